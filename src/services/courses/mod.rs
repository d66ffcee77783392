pub mod create;
pub mod delete;
pub mod enroll;
pub mod home;

use actix_web::{HttpResponse, Result as ActixResult};

use crate::config::{AppConfig, TitleScope};
use crate::middlewares::RequestContext;
use crate::models::courses::requests::{CreateCourseForm, DeleteCourseForm, EnrollForm};

pub struct CourseService {
    title_scope: Option<TitleScope>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { title_scope: None }
    }

    /// 指定课程名唯一性范围，不读取全局配置
    pub fn with_title_scope(scope: TitleScope) -> Self {
        Self {
            title_scope: Some(scope),
        }
    }

    pub(crate) fn title_scope(&self) -> TitleScope {
        self.title_scope
            .unwrap_or_else(|| AppConfig::get().courses.title_scope)
    }

    // 课程创建页面
    pub async fn new_course_page(
        &self,
        ctx: &RequestContext,
        owner: &str,
    ) -> ActixResult<HttpResponse> {
        create::new_course_page(ctx, owner)
    }

    // 创建课程
    pub async fn create_course(
        &self,
        ctx: &RequestContext,
        owner: &str,
        form: CreateCourseForm,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, ctx, owner, form).await
    }

    // 课程主页
    pub async fn course_home(
        &self,
        ctx: &RequestContext,
        owner: &str,
        title: &str,
    ) -> ActixResult<HttpResponse> {
        home::course_home(ctx, owner, title).await
    }

    // 课程删除页面
    pub async fn delete_page(
        &self,
        ctx: &RequestContext,
        owner: &str,
        title: &str,
    ) -> ActixResult<HttpResponse> {
        delete::delete_page(ctx, owner, title).await
    }

    // 删除课程
    pub async fn delete_course(
        &self,
        ctx: &RequestContext,
        owner: &str,
        title: &str,
        form: DeleteCourseForm,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(ctx, owner, title, form).await
    }

    // 选课页面及学生名单
    pub async fn enroll_page(
        &self,
        ctx: &RequestContext,
        owner: &str,
        title: &str,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_page(ctx, owner, title).await
    }

    // 为学生选课
    pub async fn enroll_student(
        &self,
        ctx: &RequestContext,
        owner: &str,
        title: &str,
        form: EnrollForm,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_student(ctx, owner, title, form).await
    }
}
