use actix_web::{HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::{error, info};

use super::CourseService;
use crate::errors::CodetaError;
use crate::middlewares::RequestContext;
use crate::models::{FormErrors, courses::requests::CreateCourseForm};
use crate::services::deny;
use crate::utils::url::{course_url, user_url};
use crate::views::{self, CourseCreatePage};

pub const COURSE_EXISTS: &str = "This course already exists.";
const CREATE_FAILED: &str = "There was an error adding your class, please try again later.";
const NOT_YOURS: &str = "You can not create a course here.";

fn render_form(
    ctx: &RequestContext,
    status: StatusCode,
    owner: &str,
    form: CreateCourseForm,
    errors: FormErrors,
) -> ActixResult<HttpResponse> {
    views::render_status(
        status,
        &CourseCreatePage {
            page: ctx.page(),
            action: format!("{}new", user_url(owner)),
            form,
            errors,
        },
    )
}

pub fn new_course_page(ctx: &RequestContext, owner: &str) -> ActixResult<HttpResponse> {
    if !ctx.is_user(owner) {
        return Ok(deny(ctx, NOT_YOURS));
    }
    render_form(
        ctx,
        StatusCode::OK,
        owner,
        CreateCourseForm::default(),
        FormErrors::default(),
    )
}

pub async fn create_course(
    service: &CourseService,
    ctx: &RequestContext,
    owner: &str,
    form: CreateCourseForm,
) -> ActixResult<HttpResponse> {
    let user = match ctx.user() {
        Some(user) if user.username == owner => user,
        _ => return Ok(deny(ctx, NOT_YOURS)),
    };
    let storage = ctx.storage();

    let mut errors = form.validate();
    if errors.is_empty()
        && storage
            .course_title_exists(user.user_id, form.title.trim(), service.title_scope())
            .await?
    {
        errors.add("title", COURSE_EXISTS);
        return render_form(ctx, StatusCode::CONFLICT, owner, form, errors);
    }
    if !errors.is_empty() {
        return render_form(ctx, StatusCode::BAD_REQUEST, owner, form, errors);
    }

    let request = form.clone().into_request(user.user_id);
    match storage.create_course(request).await {
        Ok(course) => {
            info!("User: {} - created course {}", user.username, course.title);
            Ok(views::redirect_with_flash(
                &course_url(&user.username, &course.title),
                format!("Course {} created.", course.title),
            ))
        }
        Err(CodetaError::ConstraintViolation(_)) => {
            errors.add("title", COURSE_EXISTS);
            render_form(ctx, StatusCode::CONFLICT, owner, form, errors)
        }
        Err(e) => {
            error!("Failed to create course for {}: {}", user.username, e);
            Ok(views::redirect_with_flash(&user_url(owner), CREATE_FAILED))
        }
    }
}
