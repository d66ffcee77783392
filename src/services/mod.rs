pub mod assignments;
pub mod auth;
pub mod courses;
pub mod submissions;
pub mod users;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use submissions::SubmissionService;
pub use users::UserService;

use std::sync::Arc;

use actix_web::HttpResponse;

use crate::errors::CodetaError;
use crate::middlewares::RequestContext;
use crate::models::{courses::entities::Course, users::entities::User};
use crate::storage::Storage;
use crate::utils::url::user_url;
use crate::views::{redirect, redirect_with_flash};

/// 当前登录用户；中间件已保证登录，这里只做兜底
pub(crate) fn require_user(ctx: &RequestContext) -> Result<&User, HttpResponse> {
    ctx.user().ok_or_else(|| redirect("/login"))
}

/// 当前用户的主页
pub(crate) fn home_url(ctx: &RequestContext) -> String {
    ctx.user()
        .map(|u| user_url(&u.username))
        .unwrap_or_else(|| "/login".to_string())
}

/// 越权访问：回到自己的主页并提示
pub(crate) fn deny(ctx: &RequestContext, message: &str) -> HttpResponse {
    tracing::info!(
        "Denied {:?}: {}",
        ctx.user().map(|u| u.username.as_str()),
        message
    );
    redirect_with_flash(&home_url(ctx), message)
}

/// 教师对路径中课程的访问结果
pub(crate) enum CourseGate {
    Allowed(Course),
    NotFound,
    Denied,
}

/// 路径用户必须是当前用户，且是该课程的教师
pub(crate) async fn course_for_instructor(
    ctx: &RequestContext,
    storage: &Arc<dyn Storage>,
    owner: &str,
    title: &str,
) -> Result<CourseGate, CodetaError> {
    let Some(user) = ctx.user() else {
        return Ok(CourseGate::Denied);
    };
    if user.username != owner {
        return Ok(CourseGate::Denied);
    }

    let Some(course) = storage.get_instructor_course(owner, title).await? else {
        return Ok(CourseGate::NotFound);
    };

    if storage.is_instructor(user.user_id, course.course_id).await? {
        Ok(CourseGate::Allowed(course))
    } else {
        Ok(CourseGate::Denied)
    }
}
