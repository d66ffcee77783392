use actix_web::{HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::{error, info};

use crate::middlewares::RequestContext;
use crate::models::{
    FormErrors,
    courses::{entities::Course, requests::EnrollForm},
};
use crate::services::{CourseGate, course_for_instructor, deny};
use crate::utils::url::course_url;
use crate::views::{self, EnrollPage};

const NOT_YOURS: &str = "You can not enroll students here.";

async fn render_form(
    ctx: &RequestContext,
    status: StatusCode,
    owner: &str,
    course: Course,
    form: EnrollForm,
    errors: FormErrors,
) -> ActixResult<HttpResponse> {
    let students = ctx.storage().list_course_students(course.course_id).await?;
    views::render_status(
        status,
        &EnrollPage {
            page: ctx.page(),
            base_url: course_url(owner, &course.title),
            course,
            students,
            form,
            errors,
        },
    )
}

pub async fn enroll_page(
    ctx: &RequestContext,
    owner: &str,
    title: &str,
) -> ActixResult<HttpResponse> {
    let storage = ctx.storage();
    match course_for_instructor(ctx, &storage, owner, title).await? {
        CourseGate::Allowed(course) => {
            render_form(
                ctx,
                StatusCode::OK,
                owner,
                course,
                EnrollForm::default(),
                FormErrors::default(),
            )
            .await
        }
        CourseGate::NotFound => views::not_found(ctx.page()),
        CourseGate::Denied => Ok(deny(ctx, NOT_YOURS)),
    }
}

pub async fn enroll_student(
    ctx: &RequestContext,
    owner: &str,
    title: &str,
    form: EnrollForm,
) -> ActixResult<HttpResponse> {
    let storage = ctx.storage();
    let course = match course_for_instructor(ctx, &storage, owner, title).await? {
        CourseGate::Allowed(course) => course,
        CourseGate::NotFound => return views::not_found(ctx.page()),
        CourseGate::Denied => return Ok(deny(ctx, NOT_YOURS)),
    };

    let mut errors = form.validate();
    if !errors.is_empty() {
        return render_form(ctx, StatusCode::BAD_REQUEST, owner, course, form, errors).await;
    }

    let username = form.student.trim();
    let Some(student) = storage.get_user_by_username(username).await? else {
        errors.add("student", "No user with that username.");
        return render_form(ctx, StatusCode::BAD_REQUEST, owner, course, form, errors).await;
    };

    if storage.is_instructor(student.user_id, course.course_id).await? {
        errors.add("student", "Instructors can not enroll in their own course.");
        return render_form(ctx, StatusCode::BAD_REQUEST, owner, course, form, errors).await;
    }
    if storage.is_enrolled(course.course_id, student.user_id).await? {
        errors.add("student", "That student is already enrolled.");
        return render_form(ctx, StatusCode::CONFLICT, owner, course, form, errors).await;
    }

    let enroll_url = format!("{}enroll", course_url(owner, &course.title));
    match storage.enroll_student(course.course_id, student.user_id).await {
        Ok(()) => {
            info!("User: {} - enrolled {} in {}", owner, student.username, course.title);
            Ok(views::redirect_with_flash(
                &enroll_url,
                format!("{} enrolled in {}.", student.username, course.title),
            ))
        }
        Err(e) => {
            error!("Failed to enroll {} in {}: {}", student.username, course.course_id, e);
            Ok(views::redirect_with_flash(
                &enroll_url,
                "There was an error enrolling that student, please try again later.",
            ))
        }
    }
}
