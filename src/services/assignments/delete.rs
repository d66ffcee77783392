use actix_web::{HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::{error, info};

use super::{AssignmentPath, load_assignment};
use crate::middlewares::RequestContext;
use crate::models::{
    FormErrors,
    assignments::{entities::Assignment, requests::DeleteAssignmentForm},
    courses::entities::Course,
};
use crate::utils::url::{assignment_url, course_url};
use crate::views::{self, AssignmentDeletePage};

const NOT_YOURS: &str = "You can not delete that.";

fn render_form(
    ctx: &RequestContext,
    status: StatusCode,
    owner: &str,
    course: Course,
    assignment: Assignment,
    form: DeleteAssignmentForm,
    errors: FormErrors,
) -> ActixResult<HttpResponse> {
    views::render_status(
        status,
        &AssignmentDeletePage {
            page: ctx.page(),
            action: assignment_url(owner, &course.title, &assignment.title, "delete"),
            back_url: course_url(owner, &course.title),
            course,
            assignment,
            form,
            errors,
        },
    )
}

pub async fn delete_page(
    ctx: &RequestContext,
    path: AssignmentPath<'_>,
) -> ActixResult<HttpResponse> {
    match load_assignment(ctx, &path, NOT_YOURS).await? {
        Ok((course, assignment)) => render_form(
            ctx,
            StatusCode::OK,
            path.owner,
            course,
            assignment,
            DeleteAssignmentForm::default(),
            FormErrors::default(),
        ),
        Err(resp) => Ok(resp),
    }
}

pub async fn delete_assignment(
    ctx: &RequestContext,
    path: AssignmentPath<'_>,
    form: DeleteAssignmentForm,
) -> ActixResult<HttpResponse> {
    let (course, assignment) = match load_assignment(ctx, &path, NOT_YOURS).await? {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };
    let owner = path.owner;

    let mut errors = form.validate();
    if errors.field("title").is_empty() && form.title != assignment.title {
        errors.add("title", "That is not the title of this assignment.");
    }
    if !errors.is_empty() {
        return render_form(
            ctx,
            StatusCode::BAD_REQUEST,
            owner,
            course,
            assignment,
            form,
            errors,
        );
    }

    let back_url = course_url(owner, &course.title);
    match ctx.storage().delete_assignment(assignment.assignment_id).await {
        Ok(true) => {
            info!("User: {} - deleted assignment {}", owner, assignment.title);
            Ok(views::redirect_with_flash(
                &back_url,
                format!("Assignment {} deleted.", assignment.title),
            ))
        }
        Ok(false) => views::not_found(ctx.page()),
        Err(e) => {
            error!("Failed to delete assignment {}: {}", assignment.assignment_id, e);
            Ok(views::redirect_with_flash(
                &back_url,
                "There was an error deleting your assignment, please try again later.",
            ))
        }
    }
}
