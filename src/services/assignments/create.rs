use actix_web::{HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::{error, info};

use super::DUPLICATE_TITLE;
use crate::errors::CodetaError;
use crate::middlewares::RequestContext;
use crate::models::{
    FormErrors,
    assignments::requests::AssignmentForm,
    courses::entities::Course,
};
use crate::services::{CourseGate, course_for_instructor, deny};
use crate::utils::url::course_url;
use crate::views::{self, AssignmentFormPage};

const NOT_YOURS: &str = "You can not create an assignment here.";

fn render_form(
    ctx: &RequestContext,
    status: StatusCode,
    owner: &str,
    course: Course,
    form: AssignmentForm,
    errors: FormErrors,
) -> ActixResult<HttpResponse> {
    let back_url = course_url(owner, &course.title);
    views::render_status(
        status,
        &AssignmentFormPage {
            page: ctx.page(),
            heading: format!("New assignment for {}", course.title),
            action: format!("{back_url}new"),
            back_url,
            course,
            form,
            errors,
        },
    )
}

pub async fn new_page(ctx: &RequestContext, owner: &str, title: &str) -> ActixResult<HttpResponse> {
    let storage = ctx.storage();
    match course_for_instructor(ctx, &storage, owner, title).await? {
        CourseGate::Allowed(course) => render_form(
            ctx,
            StatusCode::OK,
            owner,
            course,
            AssignmentForm::default(),
            FormErrors::default(),
        ),
        CourseGate::NotFound => views::not_found(ctx.page()),
        CourseGate::Denied => Ok(deny(ctx, NOT_YOURS)),
    }
}

pub async fn create_assignment(
    ctx: &RequestContext,
    owner: &str,
    title: &str,
    form: AssignmentForm,
) -> ActixResult<HttpResponse> {
    let storage = ctx.storage();
    let course = match course_for_instructor(ctx, &storage, owner, title).await? {
        CourseGate::Allowed(course) => course,
        CourseGate::NotFound => return views::not_found(ctx.page()),
        CourseGate::Denied => return Ok(deny(ctx, NOT_YOURS)),
    };

    let request = match form.parse(course.course_id) {
        Ok(request) => request,
        Err(errors) => {
            return render_form(ctx, StatusCode::BAD_REQUEST, owner, course, form, errors);
        }
    };

    if storage
        .get_course_assignment(course.course_id, &request.title)
        .await?
        .is_some()
    {
        let mut errors = FormErrors::default();
        errors.add("title", DUPLICATE_TITLE);
        return render_form(ctx, StatusCode::CONFLICT, owner, course, form, errors);
    }

    let back_url = course_url(owner, &course.title);
    match storage.create_assignment(request).await {
        Ok(assignment) => {
            info!(
                "User: {} - created assignment {} in {}",
                owner, assignment.title, course.title
            );
            Ok(views::redirect_with_flash(
                &back_url,
                format!("Assignment {} created.", assignment.title),
            ))
        }
        Err(CodetaError::ConstraintViolation(_)) => {
            let mut errors = FormErrors::default();
            errors.add("title", DUPLICATE_TITLE);
            render_form(ctx, StatusCode::CONFLICT, owner, course, form, errors)
        }
        Err(e) => {
            error!("Failed to create assignment in {}: {}", course.course_id, e);
            Ok(views::redirect_with_flash(
                &back_url,
                "There was an error adding your assignment, please try again later.",
            ))
        }
    }
}
