use actix_web::{HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::{error, info};

use crate::middlewares::RequestContext;
use crate::models::{
    FormErrors,
    courses::{entities::Course, requests::DeleteCourseForm},
};
use crate::services::{CourseGate, course_for_instructor, deny};
use crate::utils::url::{course_url, user_url};
use crate::views::{self, CourseDeletePage};

pub const NOT_OWNER: &str = "You can not delete a course you do not own.";

fn render_form(
    ctx: &RequestContext,
    status: StatusCode,
    owner: &str,
    course: Course,
    form: DeleteCourseForm,
    errors: FormErrors,
) -> ActixResult<HttpResponse> {
    views::render_status(
        status,
        &CourseDeletePage {
            page: ctx.page(),
            action: format!("{}delete", course_url(owner, &course.title)),
            course,
            form,
            errors,
        },
    )
}

pub async fn delete_page(
    ctx: &RequestContext,
    owner: &str,
    title: &str,
) -> ActixResult<HttpResponse> {
    let storage = ctx.storage();
    match course_for_instructor(ctx, &storage, owner, title).await? {
        CourseGate::Allowed(course) => render_form(
            ctx,
            StatusCode::OK,
            owner,
            course,
            DeleteCourseForm::default(),
            FormErrors::default(),
        ),
        CourseGate::NotFound => views::not_found(ctx.page()),
        CourseGate::Denied => Ok(deny(ctx, NOT_OWNER)),
    }
}

pub async fn delete_course(
    ctx: &RequestContext,
    owner: &str,
    title: &str,
    form: DeleteCourseForm,
) -> ActixResult<HttpResponse> {
    let storage = ctx.storage();
    let course = match course_for_instructor(ctx, &storage, owner, title).await? {
        CourseGate::Allowed(course) => course,
        CourseGate::NotFound => return views::not_found(ctx.page()),
        CourseGate::Denied => return Ok(deny(ctx, NOT_OWNER)),
    };

    let mut errors = form.validate();
    if errors.field("title").is_empty() && form.title != course.title {
        errors.add("title", "That is not the title of this course.");
    }
    if !errors.is_empty() {
        return render_form(ctx, StatusCode::BAD_REQUEST, owner, course, form, errors);
    }

    match storage.delete_course(course.course_id).await {
        Ok(true) => {
            info!("User: {} - deleted course {}", owner, course.title);
            Ok(views::redirect_with_flash(
                &user_url(owner),
                format!("Course {} successfully deleted", course.title),
            ))
        }
        Ok(false) => views::not_found(ctx.page()),
        Err(e) => {
            error!("Failed to delete course {}: {}", course.course_id, e);
            Ok(views::redirect_with_flash(
                &course_url(owner, &course.title),
                "There was an error deleting your course, please try again later.",
            ))
        }
    }
}
