pub mod login;
pub mod logout;
pub mod register;

use actix_web::{HttpResponse, Result as ActixResult};

use crate::middlewares::RequestContext;
use crate::models::auth::requests::{LoginForm, RegistrationForm};

pub struct AuthService;

impl AuthService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 注册页面
    pub async fn join_page(&self, ctx: &RequestContext) -> ActixResult<HttpResponse> {
        register::join_page(ctx)
    }

    // 用户注册
    pub async fn register(
        &self,
        ctx: &RequestContext,
        form: RegistrationForm,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, ctx, form).await
    }

    // 登录页面
    pub async fn login_page(&self, ctx: &RequestContext) -> ActixResult<HttpResponse> {
        login::login_page(ctx)
    }

    // 登录验证
    pub async fn login(&self, ctx: &RequestContext, form: LoginForm) -> ActixResult<HttpResponse> {
        login::handle_login(self, ctx, form).await
    }

    // 注销
    pub async fn logout(&self, ctx: &RequestContext) -> ActixResult<HttpResponse> {
        logout::handle_logout(ctx)
    }
}
