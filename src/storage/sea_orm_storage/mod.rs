//! SeaORM 存储实现
//!
//! 每个实例绑定一个请求级 [`DbSession`]，所有语句以参数化 SQL 执行，
//! 支持 SQLite 和 PostgreSQL。

mod assignments;
mod courses;
mod users;

use std::sync::Arc;

use crate::storage::executor::DbSession;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) session: Arc<DbSession>,
}

impl SeaOrmStorage {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self { session }
    }
}

// Storage trait 实现
use crate::config::TitleScope;
use crate::errors::Result;
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, user_id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(user_id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        self.username_exists_impl(username).await
    }

    async fn update_user(&self, user_id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(user_id, update).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_impl(course_id).await
    }

    async fn get_instructor_course(
        &self,
        instructor: &str,
        title: &str,
    ) -> Result<Option<Course>> {
        self.get_instructor_course_impl(instructor, title).await
    }

    async fn list_instructor_courses(&self, user_id: i64) -> Result<Vec<CourseSummary>> {
        self.list_instructor_courses_impl(user_id).await
    }

    async fn list_student_courses(&self, user_id: i64) -> Result<Vec<CourseSummary>> {
        self.list_student_courses_impl(user_id).await
    }

    async fn course_title_exists(
        &self,
        user_id: i64,
        title: &str,
        scope: TitleScope,
    ) -> Result<bool> {
        self.course_title_exists_impl(user_id, title, scope).await
    }

    async fn is_instructor(&self, user_id: i64, course_id: i64) -> Result<bool> {
        self.is_instructor_impl(user_id, course_id).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn enroll_student(&self, course_id: i64, user_id: i64) -> Result<()> {
        self.enroll_student_impl(course_id, user_id).await
    }

    async fn is_enrolled(&self, course_id: i64, user_id: i64) -> Result<bool> {
        self.is_enrolled_impl(course_id, user_id).await
    }

    async fn list_course_students(&self, course_id: i64) -> Result<Vec<User>> {
        self.list_course_students_impl(course_id).await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_impl(assignment_id).await
    }

    async fn get_course_assignment(
        &self,
        course_id: i64,
        title: &str,
    ) -> Result<Option<Assignment>> {
        self.get_course_assignment_impl(course_id, title).await
    }

    async fn list_course_assignments(&self, course_id: i64) -> Result<Vec<Assignment>> {
        self.list_course_assignments_impl(course_id).await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }
}
