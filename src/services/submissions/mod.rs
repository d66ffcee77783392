pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult};

use crate::middlewares::RequestContext;
use crate::models::{assignments::entities::Assignment, courses::entities::Course};
use crate::services::{assignments::AssignmentPath, deny, require_user};
use crate::utils::url::{assignment_url, course_url};
use crate::views::{self, SubmitPage};

const NOT_ENROLLED: &str = "You are not enrolled in that course.";

pub struct SubmissionService;

/// 可提交的课程与作业
pub(crate) struct SubmissionTarget {
    pub course: Course,
    pub assignment: Assignment,
}

// 学生需已选课，教师可提交用于测试
pub(crate) async fn load_target(
    ctx: &RequestContext,
    path: &AssignmentPath<'_>,
) -> ActixResult<Result<SubmissionTarget, HttpResponse>> {
    let user = match require_user(ctx) {
        Ok(user) => user,
        Err(resp) => return Ok(Err(resp)),
    };
    let storage = ctx.storage();

    let Some(course) = storage.get_instructor_course(path.owner, path.course).await? else {
        return Ok(Err(views::not_found(ctx.page())?));
    };
    if !storage.is_instructor(user.user_id, course.course_id).await?
        && !storage.is_enrolled(course.course_id, user.user_id).await?
    {
        return Ok(Err(deny(ctx, NOT_ENROLLED)));
    }

    match storage
        .get_course_assignment(course.course_id, path.assignment)
        .await?
    {
        Some(assignment) => Ok(Ok(SubmissionTarget { course, assignment })),
        None => Ok(Err(views::not_found(ctx.page())?)),
    }
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 提交页面
    pub async fn submit_page(
        &self,
        ctx: &RequestContext,
        path: AssignmentPath<'_>,
    ) -> ActixResult<HttpResponse> {
        let target = match load_target(ctx, &path).await? {
            Ok(target) => target,
            Err(resp) => return Ok(resp),
        };
        views::render(&SubmitPage {
            page: ctx.page(),
            action: assignment_url(
                path.owner,
                &target.course.title,
                &target.assignment.title,
                "submit",
            ),
            back_url: course_url(path.owner, &target.course.title),
            course: target.course,
            assignment: target.assignment,
        })
    }

    // 上传并解压提交的压缩包
    pub async fn handle_upload(
        &self,
        ctx: &RequestContext,
        path: AssignmentPath<'_>,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, ctx, path, payload).await
    }
}
