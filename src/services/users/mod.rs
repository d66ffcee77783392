pub mod home;
pub mod settings;

use actix_web::{HttpResponse, Result as ActixResult};

use crate::middlewares::RequestContext;
use crate::models::users::requests::{EmailForm, NameForm, PasswordForm};

pub struct UserService;

impl UserService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 用户主页：讲授与选修的课程
    pub async fn home(&self, ctx: &RequestContext, owner: &str) -> ActixResult<HttpResponse> {
        home::user_home(self, ctx, owner).await
    }

    // 设置页面
    pub async fn settings_page(
        &self,
        ctx: &RequestContext,
        owner: &str,
    ) -> ActixResult<HttpResponse> {
        settings::settings_page(ctx, owner)
    }

    // 修改姓名
    pub async fn update_name(
        &self,
        ctx: &RequestContext,
        owner: &str,
        form: NameForm,
    ) -> ActixResult<HttpResponse> {
        settings::update_name(ctx, owner, form).await
    }

    // 修改邮箱
    pub async fn update_email(
        &self,
        ctx: &RequestContext,
        owner: &str,
        form: EmailForm,
    ) -> ActixResult<HttpResponse> {
        settings::update_email(ctx, owner, form).await
    }

    // 修改密码
    pub async fn update_password(
        &self,
        ctx: &RequestContext,
        owner: &str,
        form: PasswordForm,
    ) -> ActixResult<HttpResponse> {
        settings::update_password(ctx, owner, form).await
    }
}
