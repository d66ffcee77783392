use actix_web::{HttpResponse, Result as ActixResult, http::StatusCode, http::header};
use tracing::{error, info};

use super::AuthService;
use crate::middlewares::RequestContext;
use crate::models::{FormErrors, auth::requests::LoginForm};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_user_password;
use crate::utils::url::user_url;
use crate::views::{self, LoginPage};

pub const LOGIN_FAILED: &str = "Invalid username or password.";

pub fn login_page(ctx: &RequestContext) -> ActixResult<HttpResponse> {
    views::render(&LoginPage {
        page: ctx.page(),
        form: LoginForm::default(),
        errors: FormErrors::default(),
        error: None,
    })
}

fn render_failure(
    ctx: &RequestContext,
    status: StatusCode,
    username: String,
    errors: FormErrors,
    error: Option<String>,
) -> ActixResult<HttpResponse> {
    views::render_status(
        status,
        &LoginPage {
            page: ctx.page(),
            form: LoginForm {
                username,
                password: String::new(),
            },
            errors,
            error,
        },
    )
}

pub async fn handle_login(
    _service: &AuthService,
    ctx: &RequestContext,
    form: LoginForm,
) -> ActixResult<HttpResponse> {
    let errors = form.validate();
    if !errors.is_empty() {
        return render_failure(ctx, StatusCode::BAD_REQUEST, form.username, errors, None);
    }

    // 1. 根据用户名获取用户信息
    let user = ctx.storage().get_user_by_username(&form.username).await?;

    // 2. 验证密码；用户不存在与密码错误返回相同信息
    let verified = verify_user_password(
        &form.password,
        user.as_ref().map(|u| u.password_hash.as_str()),
    );
    let user = match user {
        Some(user) if verified => user,
        _ => {
            info!("User: {} - login auth failure.", form.username);
            return render_failure(
                ctx,
                StatusCode::UNAUTHORIZED,
                form.username,
                FormErrors::default(),
                Some(LOGIN_FAILED.to_string()),
            );
        }
    };

    // 3. 签发会话
    match JwtUtils::generate_session_token(user.user_id, &user.username) {
        Ok(token) => {
            info!("User: {} - login auth success.", user.username);
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, user_url(&user.username)))
                .cookie(JwtUtils::create_session_cookie(&token))
                .finish())
        }
        Err(e) => {
            error!("Failed to sign session for {}: {}", user.username, e);
            render_failure(
                ctx,
                StatusCode::INTERNAL_SERVER_ERROR,
                form.username,
                FormErrors::default(),
                Some("Login failed, please try again later.".to_string()),
            )
        }
    }
}
