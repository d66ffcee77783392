pub mod assignments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod users;

pub use common::FormErrors;

// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
