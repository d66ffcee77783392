use actix_web::{HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequestContext;
use crate::services::{deny, require_user};
use crate::views::{self, UserHomePage};

pub async fn user_home(
    _service: &UserService,
    ctx: &RequestContext,
    owner: &str,
) -> ActixResult<HttpResponse> {
    let user = match require_user(ctx) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if user.username != owner {
        return Ok(deny(ctx, "You can only view your own courses."));
    }

    let storage = ctx.storage();
    let teaching = storage.list_instructor_courses(user.user_id).await?;
    let enrolled = storage.list_student_courses(user.user_id).await?;

    views::render(&UserHomePage {
        page: ctx.page(),
        owner: user.username.clone(),
        teaching,
        enrolled,
    })
}
