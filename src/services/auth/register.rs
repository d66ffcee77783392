use actix_web::{HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::{error, info};

use super::AuthService;
use crate::errors::CodetaError;
use crate::middlewares::RequestContext;
use crate::models::{
    FormErrors,
    auth::requests::RegistrationForm,
    users::requests::CreateUserRequest,
};
use crate::utils::password::hash_password;
use crate::views::{self, JoinPage};

pub const USERNAME_TAKEN: &str = "Sorry, that username is already taken.";
const REGISTER_FAILED: &str = "There was an error creating your account, please try again later.";

pub fn join_page(ctx: &RequestContext) -> ActixResult<HttpResponse> {
    views::render(&JoinPage {
        page: ctx.page(),
        form: RegistrationForm::default(),
        errors: FormErrors::default(),
    })
}

fn render_form(
    ctx: &RequestContext,
    status: StatusCode,
    form: RegistrationForm,
    errors: FormErrors,
    message: Option<&str>,
) -> ActixResult<HttpResponse> {
    let page = match message {
        Some(message) => ctx.page().with_message(message),
        None => ctx.page(),
    };
    views::render_status(
        status,
        &JoinPage {
            page,
            form: form.without_passwords(),
            errors,
        },
    )
}

pub async fn handle_register(
    _service: &AuthService,
    ctx: &RequestContext,
    form: RegistrationForm,
) -> ActixResult<HttpResponse> {
    let storage = ctx.storage();

    // 1. 表单校验
    let mut errors = form.validate();
    if errors.field("username").is_empty() && storage.username_exists(&form.username).await? {
        errors.add("username", USERNAME_TAKEN);
    }
    if !errors.is_empty() {
        let status = if errors.contains(USERNAME_TAKEN) {
            StatusCode::CONFLICT
        } else {
            StatusCode::BAD_REQUEST
        };
        return render_form(ctx, status, form, errors, None);
    }

    // 2. 哈希密码
    let password = match hash_password(&form.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash password for {}: {}", form.username, e);
            return render_form(
                ctx,
                StatusCode::INTERNAL_SERVER_ERROR,
                form,
                errors,
                Some(REGISTER_FAILED),
            );
        }
    };

    // 3. 创建用户
    let request = CreateUserRequest {
        username: form.username.clone(),
        password,
        email: form.email.clone(),
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
    };

    match storage.create_user(request).await {
        Ok(user) => {
            info!("User {} registered", user.username);
            Ok(views::redirect_with_flash(
                "/login",
                "Thanks for registering! Please log in.",
            ))
        }
        // 检查与插入之间被别人抢先注册
        Err(CodetaError::ConstraintViolation(_)) => {
            errors.add("username", USERNAME_TAKEN);
            render_form(ctx, StatusCode::CONFLICT, form, errors, None)
        }
        Err(e) => {
            error!("Failed to register {}: {}", form.username, e);
            render_form(
                ctx,
                StatusCode::INTERNAL_SERVER_ERROR,
                form,
                errors,
                Some(REGISTER_FAILED),
            )
        }
    }
}
