use std::sync::Arc;

use crate::config::TitleScope;
use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    courses::{
        entities::{Course, CourseSummary},
        requests::CreateCourseRequest,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};

use crate::errors::Result;

pub mod executor;
pub mod provider;
pub mod sea_orm_storage;

pub use executor::{DbSession, QueryError, Row};
pub use provider::ConnectionProvider;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, user_id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 用户名是否已被占用
    async fn username_exists(&self, username: &str) -> Result<bool>;
    // 更新用户信息
    async fn update_user(&self, user_id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程，同时登记授课教师
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过教师用户名和课程名获取课程
    async fn get_instructor_course(&self, instructor: &str, title: &str)
    -> Result<Option<Course>>;
    // 教师讲授的课程
    async fn list_instructor_courses(&self, user_id: i64) -> Result<Vec<CourseSummary>>;
    // 学生选修的课程
    async fn list_student_courses(&self, user_id: i64) -> Result<Vec<CourseSummary>>;
    // 课程名是否已存在
    async fn course_title_exists(
        &self,
        user_id: i64,
        title: &str,
        scope: TitleScope,
    ) -> Result<bool>;
    // 是否为课程教师
    async fn is_instructor(&self, user_id: i64, course_id: i64) -> Result<bool>;
    // 删除课程及其作业、选课记录
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    // 学生选课
    async fn enroll_student(&self, course_id: i64, user_id: i64) -> Result<()>;
    // 是否已选课
    async fn is_enrolled(&self, course_id: i64, user_id: i64) -> Result<bool>;
    // 课程学生名单
    async fn list_course_students(&self, course_id: i64) -> Result<Vec<User>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 通过课程和作业名获取作业
    async fn get_course_assignment(&self, course_id: i64, title: &str)
    -> Result<Option<Assignment>>;
    // 课程作业列表
    async fn list_course_assignments(&self, course_id: i64) -> Result<Vec<Assignment>>;
    // 更新作业
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;
}

/// 基于请求会话创建存储
pub fn create_storage(session: Arc<DbSession>) -> Arc<dyn Storage> {
    Arc::new(sea_orm_storage::SeaOrmStorage::new(session))
}
