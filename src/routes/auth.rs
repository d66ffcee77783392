use actix_web::{HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequestContext;
use crate::models::auth::requests::{LoginForm, RegistrationForm};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn join_page(ctx: RequestContext) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.join_page(&ctx).await
}

pub async fn register(
    ctx: RequestContext,
    form: web::Form<RegistrationForm>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(&ctx, form.into_inner()).await
}

pub async fn login_page(ctx: RequestContext) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login_page(&ctx).await
}

pub async fn login(ctx: RequestContext, form: web::Form<LoginForm>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(&ctx, form.into_inner()).await
}

pub async fn logout(ctx: RequestContext) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&ctx).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/join")
            .route(web::get().to(join_page))
            .route(web::post().to(register)),
    )
    .service(
        web::resource("/login")
            .route(web::get().to(login_page))
            .route(web::post().to(login)),
    )
    .route("/logout", web::get().to(logout));
}
