use actix_web::{HttpResponse, Result as ActixResult};

use crate::middlewares::RequestContext;
use crate::services::{deny, require_user};
use crate::utils::url::{assignment_url, course_url};
use crate::views::{self, AssignmentRow, CourseHomePage};

pub async fn course_home(
    ctx: &RequestContext,
    owner: &str,
    title: &str,
) -> ActixResult<HttpResponse> {
    let user = match require_user(ctx) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = ctx.storage();

    let Some(course) = storage.get_instructor_course(owner, title).await? else {
        return views::not_found(ctx.page());
    };

    // 教师或已选课的学生可以查看
    let is_instructor = storage.is_instructor(user.user_id, course.course_id).await?;
    if !is_instructor && !storage.is_enrolled(course.course_id, user.user_id).await? {
        return Ok(deny(ctx, "You are not enrolled in that course."));
    }

    let assignments = storage
        .list_course_assignments(course.course_id)
        .await?
        .into_iter()
        .map(|assignment| AssignmentRow {
            edit_url: assignment_url(owner, &course.title, &assignment.title, "edit"),
            delete_url: assignment_url(owner, &course.title, &assignment.title, "delete"),
            submit_url: assignment_url(owner, &course.title, &assignment.title, "submit"),
            assignment,
        })
        .collect();

    views::render(&CourseHomePage {
        page: ctx.page(),
        owner: owner.to_string(),
        base_url: course_url(owner, &course.title),
        course,
        assignments,
        is_instructor,
    })
}
