//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use actix_web::HttpResponse;
use actix_web::http::{StatusCode, header::ContentType};
use askama::Template;
use tracing::{error, warn};

use crate::grader::archive::ArchiveError;
use crate::storage::executor::QueryError;
use crate::views::{ErrorPage, PageContext};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_codeta_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CodetaError {
            $($variant(String),)*
        }

        impl CodetaError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CodetaError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CodetaError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CodetaError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CodetaError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CodetaError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_codeta_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    ConstraintViolation("E004", "Constraint Violation"),
    NotFound("E005", "Resource Not Found"),
    Validation("E006", "Validation Error"),
    Authentication("E007", "Authentication Error"),
    Authorization("E008", "Authorization Error"),
    FileOperation("E009", "File Operation Error"),
    Archive("E010", "Archive Error"),
    Template("E011", "Template Render Error"),
    DateParse("E012", "Date Parse Error"),
}

impl CodetaError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CodetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CodetaError {}

// 为常见的错误类型实现 From trait
impl From<QueryError> for CodetaError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NoRows => CodetaError::NotFound("no rows returned".to_string()),
            QueryError::ConstraintViolation(msg) => CodetaError::ConstraintViolation(msg),
            QueryError::ConnectionFailure(msg) => CodetaError::DatabaseConnection(msg),
            QueryError::Statement(msg) => CodetaError::DatabaseOperation(msg),
        }
    }
}

impl From<sea_orm::DbErr> for CodetaError {
    fn from(err: sea_orm::DbErr) -> Self {
        QueryError::from(err).into()
    }
}

impl From<std::io::Error> for CodetaError {
    fn from(err: std::io::Error) -> Self {
        CodetaError::FileOperation(err.to_string())
    }
}

impl From<ArchiveError> for CodetaError {
    fn from(err: ArchiveError) -> Self {
        CodetaError::Archive(err.to_string())
    }
}

impl From<askama::Error> for CodetaError {
    fn from(err: askama::Error) -> Self {
        CodetaError::Template(err.to_string())
    }
}

impl From<chrono::ParseError> for CodetaError {
    fn from(err: chrono::ParseError) -> Self {
        CodetaError::DateParse(err.to_string())
    }
}

impl CodetaError {
    /// 展示给用户的标题与说明，不含底层错误详情
    pub fn public_text(&self) -> (&'static str, &'static str) {
        match self {
            CodetaError::NotFound(_) => (
                "404 error :(",
                "The page you were looking for does not exist.",
            ),
            CodetaError::Validation(_) | CodetaError::Archive(_) => (
                "Bad request",
                "We could not understand that request.",
            ),
            CodetaError::ConstraintViolation(_) => (
                "Conflict",
                "That change conflicts with existing data.",
            ),
            CodetaError::Authentication(_) => ("Login required", "Please log in to access this page."),
            CodetaError::Authorization(_) => ("Forbidden", "You can not do that."),
            _ => (
                "Something went wrong",
                "There was an error processing your request, please try again later.",
            ),
        }
    }
}

impl actix_web::ResponseError for CodetaError {
    fn status_code(&self) -> StatusCode {
        match self {
            CodetaError::NotFound(_) => StatusCode::NOT_FOUND,
            CodetaError::Validation(_) | CodetaError::Archive(_) => StatusCode::BAD_REQUEST,
            CodetaError::ConstraintViolation(_) => StatusCode::CONFLICT,
            CodetaError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CodetaError::Authorization(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // 详情只写日志，页面只显示通用说明
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("[{}] {}", self.code(), self);
        } else {
            warn!("[{}] {}", self.code(), self);
        }

        let (heading, message) = self.public_text();
        let page = ErrorPage {
            page: PageContext::new(None, Vec::new()),
            heading: heading.to_string(),
            message: message.to_string(),
        };
        match page.render() {
            Ok(html) => HttpResponse::build(status)
                .content_type(ContentType::html())
                .body(html),
            Err(e) => {
                error!("Failed to render error page: {}", e);
                HttpResponse::build(status)
                    .content_type(ContentType::plaintext())
                    .body(message)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CodetaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CodetaError::database_config("test").code(), "E001");
        assert_eq!(CodetaError::constraint_violation("test").code(), "E004");
        assert_eq!(CodetaError::validation("test").code(), "E006");
        assert_eq!(CodetaError::authorization("test").code(), "E008");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CodetaError::archive("test").error_type(),
            "Archive Error"
        );
        assert_eq!(
            CodetaError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_query_error_conversion() {
        let err: CodetaError = QueryError::ConstraintViolation("users_username_key".into()).into();
        assert!(matches!(err, CodetaError::ConstraintViolation(_)));

        let err: CodetaError = QueryError::NoRows.into();
        assert!(matches!(err, CodetaError::NotFound(_)));

        let err: CodetaError = QueryError::ConnectionFailure("pool timed out".into()).into();
        assert_eq!(err.code(), "E002");
    }

    #[actix_web::test]
    async fn test_error_response_hides_details() {
        use actix_web::ResponseError;

        let err = CodetaError::database_operation(
            "error returned from database: no such table: student_enrolls_course",
        );
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.headers().get(actix_web::http::header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("There was an error processing your request"));
        assert!(!body.contains("student_enrolls_course"));
        assert!(!body.contains("Database Operation Error"));
    }

    #[test]
    fn test_not_found_uses_404_page() {
        use actix_web::ResponseError;

        let resp = CodetaError::not_found("no rows returned").error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_format_simple() {
        let err = CodetaError::authorization("not your course");
        let formatted = err.format_simple();
        assert!(formatted.contains("Authorization Error"));
        assert!(formatted.contains("not your course"));
    }
}
