//! 表单与路径参数解析失败时的处理

use actix_web::{
    Error, HttpMessage, HttpRequest, HttpResponse,
    error::{InternalError, PathError, UrlencodedError},
    http::{StatusCode, header},
};
use askama::Template;
use tracing::debug;

use crate::middlewares::RequestContext;
use crate::views::ErrorPage;

fn error_page(req: &HttpRequest, status: StatusCode, heading: &str, message: &str) -> HttpResponse {
    let page = req
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.page())
        .unwrap_or_default();
    let body = ErrorPage {
        page,
        heading: heading.to_string(),
        message: message.to_string(),
    }
    .render()
    .unwrap_or_else(|_| message.to_string());

    HttpResponse::build(status)
        .content_type(header::ContentType::html())
        .body(body)
}

/// 表单解析错误
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> Error {
    debug!("Form decode failed for {}: {}", req.path(), err);
    let (status, message) = match &err {
        UrlencodedError::Overflow { .. } => (
            StatusCode::PAYLOAD_TOO_LARGE,
            "The submitted form is too large.",
        ),
        UrlencodedError::ContentType => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Forms must be submitted as application/x-www-form-urlencoded.",
        ),
        _ => (StatusCode::BAD_REQUEST, "The submitted form could not be read."),
    };
    let response = error_page(req, status, "Bad request", message);
    InternalError::from_response(err, response).into()
}

/// 路径参数解析错误
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    debug!("Path decode failed for {}: {}", req.path(), err);
    let response = error_page(
        req,
        StatusCode::NOT_FOUND,
        "404 error :(",
        "The page you were looking for does not exist.",
    );
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_form_error_status() {
        let req = TestRequest::post().uri("/join").to_http_request();
        let err = form_error_handler(UrlencodedError::ContentType, &req);
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }
}
