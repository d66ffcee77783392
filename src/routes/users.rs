use actix_web::{HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequestContext, RequireLogin};
use crate::models::users::requests::{EmailForm, NameForm, PasswordForm};
use crate::services::UserService;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

pub async fn user_home(ctx: RequestContext, path: web::Path<String>) -> ActixResult<HttpResponse> {
    USER_SERVICE.home(&ctx, &path).await
}

pub async fn settings_page(
    ctx: RequestContext,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.settings_page(&ctx, &path).await
}

pub async fn update_name(
    ctx: RequestContext,
    path: web::Path<String>,
    form: web::Form<NameForm>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_name(&ctx, &path, form.into_inner())
        .await
}

pub async fn update_email(
    ctx: RequestContext,
    path: web::Path<String>,
    form: web::Form<EmailForm>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_email(&ctx, &path, form.into_inner())
        .await
}

pub async fn update_password(
    ctx: RequestContext,
    path: web::Path<String>,
    form: web::Form<PasswordForm>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_password(&ctx, &path, form.into_inner())
        .await
}

// 配置路由；需在课程路由之前注册
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{username}/")
            .wrap(RequireLogin)
            .route(web::get().to(user_home)),
    )
    .service(
        web::resource("/{username}/settings")
            .wrap(RequireLogin)
            .route(web::get().to(settings_page)),
    )
    .service(
        web::resource("/{username}/settings/name")
            .wrap(RequireLogin)
            .route(web::post().to(update_name)),
    )
    .service(
        web::resource("/{username}/settings/email")
            .wrap(RequireLogin)
            .route(web::post().to(update_email)),
    )
    .service(
        web::resource("/{username}/settings/password")
            .wrap(RequireLogin)
            .route(web::post().to(update_password)),
    );
}
