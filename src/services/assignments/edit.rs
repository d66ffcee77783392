use actix_web::{HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::{error, info};

use super::{AssignmentPath, DUPLICATE_TITLE, load_assignment};
use crate::middlewares::RequestContext;
use crate::models::{
    FormErrors,
    assignments::{entities::Assignment, requests::AssignmentForm},
    courses::entities::Course,
};
use crate::utils::url::{assignment_url, course_url};
use crate::views::{self, AssignmentFormPage};

const NOT_YOURS: &str = "You can not edit that.";

fn render_form(
    ctx: &RequestContext,
    status: StatusCode,
    owner: &str,
    course: Course,
    assignment: &Assignment,
    form: AssignmentForm,
    errors: FormErrors,
) -> ActixResult<HttpResponse> {
    views::render_status(
        status,
        &AssignmentFormPage {
            page: ctx.page(),
            heading: format!("Edit {}", assignment.title),
            action: assignment_url(owner, &course.title, &assignment.title, "edit"),
            back_url: course_url(owner, &course.title),
            course,
            form,
            errors,
        },
    )
}

pub async fn edit_page(ctx: &RequestContext, path: AssignmentPath<'_>) -> ActixResult<HttpResponse> {
    let (course, assignment) = match load_assignment(ctx, &path, NOT_YOURS).await? {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };
    let form = AssignmentForm::from_assignment(&assignment);
    render_form(
        ctx,
        StatusCode::OK,
        path.owner,
        course,
        &assignment,
        form,
        FormErrors::default(),
    )
}

pub async fn update_assignment(
    ctx: &RequestContext,
    path: AssignmentPath<'_>,
    form: AssignmentForm,
) -> ActixResult<HttpResponse> {
    let (course, assignment) = match load_assignment(ctx, &path, NOT_YOURS).await? {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };
    let owner = path.owner;

    let request = match form.parse(course.course_id) {
        Ok(request) => request,
        Err(errors) => {
            return render_form(
                ctx,
                StatusCode::BAD_REQUEST,
                owner,
                course,
                &assignment,
                form,
                errors,
            );
        }
    };

    let storage = ctx.storage();
    // 改名时不能与同课程的其他作业重名
    if request.title != assignment.title
        && storage
            .get_course_assignment(course.course_id, &request.title)
            .await?
            .is_some()
    {
        let mut errors = FormErrors::default();
        errors.add("title", DUPLICATE_TITLE);
        return render_form(
            ctx,
            StatusCode::CONFLICT,
            owner,
            course,
            &assignment,
            form,
            errors,
        );
    }

    let back_url = course_url(owner, &course.title);
    match storage
        .update_assignment(assignment.assignment_id, request.into())
        .await
    {
        Ok(Some(updated)) => {
            info!("User: {} - updated assignment {}", owner, updated.assignment_id);
            Ok(views::redirect_with_flash(
                &back_url,
                format!("Assignment {} updated.", updated.title),
            ))
        }
        Ok(None) => views::not_found(ctx.page()),
        Err(e) => {
            error!("Failed to update assignment {}: {}", assignment.assignment_id, e);
            Ok(views::redirect_with_flash(
                &back_url,
                "There was an error updating your assignment, please try again later.",
            ))
        }
    }
}
