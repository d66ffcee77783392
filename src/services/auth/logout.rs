use actix_web::{HttpResponse, Result as ActixResult, http::header};
use askama::Template;
use tracing::info;

use crate::errors::CodetaError;
use crate::middlewares::RequestContext;
use crate::utils::jwt::JwtUtils;
use crate::views::LogoutPage;

pub fn handle_logout(ctx: &RequestContext) -> ActixResult<HttpResponse> {
    if let Some(user) = ctx.user() {
        info!("User: {} - logged out.", user.username);
    }

    let html = LogoutPage {
        page: ctx.page().anonymous(),
    }
    .render()
    .map_err(CodetaError::from)?;

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .cookie(JwtUtils::create_empty_session_cookie())
        .body(html))
}
