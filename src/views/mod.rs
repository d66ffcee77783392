//! 页面渲染
//!
//! askama 模板位于 `templates/`，这里只负责把模板转换为 HTTP 响应。

mod templates;

pub use templates::*;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, Result as ActixResult};
use askama::Template;

use crate::config::AppConfig;
use crate::errors::CodetaError;
use crate::utils::jwt::JwtUtils;

/// 所有页面共享的上下文：当前用户和待显示的提示消息
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub system_name: String,
    pub username: Option<String>,
    pub flashes: Vec<String>,
}

impl PageContext {
    pub fn new(username: Option<String>, flashes: Vec<String>) -> Self {
        Self {
            system_name: AppConfig::get().app.system_name.clone(),
            username,
            flashes,
        }
    }

    /// 附加一条直接显示在本页的消息
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.flashes.push(message.into());
        self
    }

    /// 以未登录身份显示（注销页）
    pub fn anonymous(mut self) -> Self {
        self.username = None;
        self
    }
}

/// 渲染模板为 200 响应
pub fn render<T: Template>(template: &T) -> ActixResult<HttpResponse> {
    render_status(StatusCode::OK, template)
}

/// 渲染模板为指定状态码的响应
pub fn render_status<T: Template>(status: StatusCode, template: &T) -> ActixResult<HttpResponse> {
    let html = template.render().map_err(CodetaError::from)?;
    Ok(HttpResponse::build(status)
        .content_type(header::ContentType::html())
        .body(html))
}

/// 303 重定向
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// 重定向并在下一页显示一条消息
pub fn redirect_with_flash(location: &str, message: impl Into<String>) -> HttpResponse {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, location.to_string()));
    if let Some(cookie) = JwtUtils::create_flash_cookie(&[message.into()]) {
        builder.cookie(cookie);
    }
    builder.finish()
}

/// 404 页面
pub fn not_found(page: PageContext) -> ActixResult<HttpResponse> {
    render_status(
        StatusCode::NOT_FOUND,
        &ErrorPage {
            page,
            heading: "404 error :(".to_string(),
            message: "The page you were looking for does not exist.".to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_sets_location() {
        let resp = redirect("/login");
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/login"
        );
    }

    #[test]
    fn test_redirect_with_flash_sets_cookie() {
        let resp = redirect_with_flash("/derp/", "Course test_course created.");
        assert!(resp
            .cookies()
            .any(|c| c.name() == crate::utils::jwt::FLASH_COOKIE));
    }

    #[test]
    fn test_not_found_page() {
        let resp = not_found(PageContext::default()).unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_home_page_renders() {
        let html = HomePage {
            page: PageContext::default(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Welcome to Code TA"));
        assert!(html.contains("Login"));
    }

    #[test]
    fn test_logged_in_nav() {
        let html = HomePage {
            page: PageContext::new(Some("derp".into()), vec!["Hello there".into()]),
        }
        .render()
        .unwrap();
        assert!(html.contains("Logout"));
        assert!(html.contains("Hello there"));
    }
}
