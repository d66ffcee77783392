pub mod create;
pub mod delete;
pub mod edit;

use actix_web::{HttpResponse, Result as ActixResult};

use crate::middlewares::RequestContext;
use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentForm, DeleteAssignmentForm},
    },
    courses::entities::Course,
};
use crate::services::{CourseGate, course_for_instructor, deny};
use crate::views;

pub const DUPLICATE_TITLE: &str = "You already have an assignment called that.";

/// 路径 `/{owner}/{course}/{assignment}`
pub struct AssignmentPath<'a> {
    pub owner: &'a str,
    pub course: &'a str,
    pub assignment: &'a str,
}

// 查找路径中的课程与作业；失败时直接给出响应
pub(crate) async fn load_assignment(
    ctx: &RequestContext,
    path: &AssignmentPath<'_>,
    deny_message: &str,
) -> ActixResult<Result<(Course, Assignment), HttpResponse>> {
    let storage = ctx.storage();
    let course = match course_for_instructor(ctx, &storage, path.owner, path.course).await? {
        CourseGate::Allowed(course) => course,
        CourseGate::NotFound => return Ok(Err(views::not_found(ctx.page())?)),
        CourseGate::Denied => return Ok(Err(deny(ctx, deny_message))),
    };
    match storage
        .get_course_assignment(course.course_id, path.assignment)
        .await?
    {
        Some(assignment) => Ok(Ok((course, assignment))),
        None => Ok(Err(views::not_found(ctx.page())?)),
    }
}

pub struct AssignmentService;

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 作业创建页面
    pub async fn new_page(
        &self,
        ctx: &RequestContext,
        owner: &str,
        course: &str,
    ) -> ActixResult<HttpResponse> {
        create::new_page(ctx, owner, course).await
    }

    // 创建作业
    pub async fn create_assignment(
        &self,
        ctx: &RequestContext,
        owner: &str,
        course: &str,
        form: AssignmentForm,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(ctx, owner, course, form).await
    }

    // 作业编辑页面
    pub async fn edit_page(
        &self,
        ctx: &RequestContext,
        path: AssignmentPath<'_>,
    ) -> ActixResult<HttpResponse> {
        edit::edit_page(ctx, path).await
    }

    // 更新作业
    pub async fn update_assignment(
        &self,
        ctx: &RequestContext,
        path: AssignmentPath<'_>,
        form: AssignmentForm,
    ) -> ActixResult<HttpResponse> {
        edit::update_assignment(ctx, path, form).await
    }

    // 作业删除页面
    pub async fn delete_page(
        &self,
        ctx: &RequestContext,
        path: AssignmentPath<'_>,
    ) -> ActixResult<HttpResponse> {
        delete::delete_page(ctx, path).await
    }

    // 删除作业
    pub async fn delete_assignment(
        &self,
        ctx: &RequestContext,
        path: AssignmentPath<'_>,
        form: DeleteAssignmentForm,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(ctx, path, form).await
    }
}
