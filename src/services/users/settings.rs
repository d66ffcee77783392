use actix_web::{HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::{error, info};

use crate::middlewares::RequestContext;
use crate::models::{
    FormErrors,
    users::{
        entities::User,
        requests::{EmailForm, NameForm, PasswordForm, UpdateUserRequest},
    },
};
use crate::services::{deny, require_user};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::url::user_url;
use crate::views::{self, SettingsPage};

const NOT_YOURS: &str = "You can only change your own settings.";
const UPDATE_FAILED: &str = "There was an error updating your settings, please try again later.";

/// 校验路径用户为当前用户
fn owner_user<'a>(ctx: &'a RequestContext, owner: &str) -> Result<&'a User, HttpResponse> {
    let user = require_user(ctx)?;
    if user.username != owner {
        return Err(deny(ctx, NOT_YOURS));
    }
    Ok(user)
}

fn settings_url(username: &str) -> String {
    format!("{}settings", user_url(username))
}

// 渲染设置页面，可附带某一栏的错误
fn render_settings(
    ctx: &RequestContext,
    status: StatusCode,
    user: &User,
    name_errors: FormErrors,
    email_errors: FormErrors,
    password_errors: FormErrors,
) -> ActixResult<HttpResponse> {
    views::render_status(
        status,
        &SettingsPage {
            page: ctx.page(),
            user: user.clone(),
            base_url: user_url(&user.username),
            name_errors,
            email_errors,
            password_errors,
        },
    )
}

pub fn settings_page(ctx: &RequestContext, owner: &str) -> ActixResult<HttpResponse> {
    let user = match owner_user(ctx, owner) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    render_settings(
        ctx,
        StatusCode::OK,
        user,
        FormErrors::default(),
        FormErrors::default(),
        FormErrors::default(),
    )
}

// 执行更新并重定向回设置页
async fn apply_update(
    ctx: &RequestContext,
    user: &User,
    update: UpdateUserRequest,
    success: &str,
) -> ActixResult<HttpResponse> {
    match ctx.storage().update_user(user.user_id, update).await {
        Ok(Some(_)) => {
            info!("User: {} - {}", user.username, success);
            Ok(views::redirect_with_flash(
                &settings_url(&user.username),
                success,
            ))
        }
        Ok(None) => Ok(views::redirect("/login")),
        Err(e) => {
            error!("Failed to update settings for {}: {}", user.username, e);
            Ok(views::redirect_with_flash(
                &settings_url(&user.username),
                UPDATE_FAILED,
            ))
        }
    }
}

pub async fn update_name(
    ctx: &RequestContext,
    owner: &str,
    form: NameForm,
) -> ActixResult<HttpResponse> {
    let user = match owner_user(ctx, owner) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let errors = form.validate();
    if !errors.is_empty() {
        return render_settings(
            ctx,
            StatusCode::BAD_REQUEST,
            user,
            errors,
            FormErrors::default(),
            FormErrors::default(),
        );
    }

    // 空字段保持原值
    let non_blank = |value: String| {
        let value = value.trim().to_string();
        (!value.is_empty()).then_some(value)
    };
    let update = UpdateUserRequest {
        first_name: non_blank(form.first_name),
        last_name: non_blank(form.last_name),
        ..Default::default()
    };
    apply_update(ctx, user, update, "Your name has been updated.").await
}

pub async fn update_email(
    ctx: &RequestContext,
    owner: &str,
    form: EmailForm,
) -> ActixResult<HttpResponse> {
    let user = match owner_user(ctx, owner) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let errors = form.validate();
    if !errors.is_empty() {
        return render_settings(
            ctx,
            StatusCode::BAD_REQUEST,
            user,
            FormErrors::default(),
            errors,
            FormErrors::default(),
        );
    }

    let update = UpdateUserRequest {
        email: Some(form.email.trim().to_string()),
        ..Default::default()
    };
    apply_update(ctx, user, update, "Your email has been updated.").await
}

pub async fn update_password(
    ctx: &RequestContext,
    owner: &str,
    form: PasswordForm,
) -> ActixResult<HttpResponse> {
    let user = match owner_user(ctx, owner) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let mut errors = form.validate();
    if errors.field("current_password").is_empty()
        && !verify_password(&form.current_password, &user.password_hash)
    {
        errors.add("current_password", "Your current password is incorrect.");
    }
    if !errors.is_empty() {
        return render_settings(
            ctx,
            StatusCode::BAD_REQUEST,
            user,
            FormErrors::default(),
            FormErrors::default(),
            errors,
        );
    }

    let password = match hash_password(&form.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash password for {}: {}", user.username, e);
            return Ok(views::redirect_with_flash(
                &settings_url(&user.username),
                UPDATE_FAILED,
            ));
        }
    };
    let update = UpdateUserRequest {
        password: Some(password),
        ..Default::default()
    };
    apply_update(ctx, user, update, "Your password has been updated.").await
}
