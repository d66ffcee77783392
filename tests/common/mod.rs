#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{body, dev::ServiceResponse, test};
use codeta::config::{Argon2Config, DatabaseConfig};
use codeta::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use codeta::models::courses::{entities::Course, requests::CreateCourseRequest};
use codeta::models::users::{entities::User, requests::CreateUserRequest};
use codeta::storage::{ConnectionProvider, DbSession, Storage, create_storage};
use codeta::utils::jwt::{FLASH_COOKIE, JwtUtils};
use codeta::utils::password::hash_password_with;

pub const PASSWORD: &str = "test_password";

/// 使用真实路由表构建测试服务
macro_rules! test_app {
    ($provider:expr) => {
        ::actix_web::test::init_service(
            ::actix_web::App::new()
                .wrap(::codeta::middlewares::RequestScope)
                .app_data(::actix_web::web::Data::new($provider.clone()))
                .app_data(
                    ::actix_web::web::FormConfig::default()
                        .error_handler(::codeta::utils::form_error_handler),
                )
                .configure(::codeta::routes::configure_routes)
                .default_service(::actix_web::web::to(::codeta::routes::pages::not_found)),
        )
        .await
    };
}

/// 登录并返回会话 Cookie
macro_rules! login {
    ($app:expr, $username:expr) => {{
        let username: &str = $username;
        let req = ::actix_web::test::TestRequest::post()
            .uri("/login")
            .set_form([("username", username), ("password", $crate::common::PASSWORD)])
            .to_request();
        let resp = ::actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), ::actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!($crate::common::location(&resp), format!("/{username}/"));
        $crate::common::cookie_named(&resp, ::codeta::utils::jwt::SESSION_COOKIE)
            .expect("login should set a session cookie")
    }};
}

pub async fn body_text<B: body::MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = body::to_bytes(resp.into_body()).await.unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn cookie_named<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

/// 响应留给下一页的提示消息
pub fn flash_messages<B>(resp: &ServiceResponse<B>) -> Vec<String> {
    cookie_named(resp, FLASH_COOKIE)
        .map(|cookie| {
            let req = test::TestRequest::default().cookie(cookie).to_http_request();
            JwtUtils::extract_flashes(&req)
        })
        .unwrap_or_default()
}

/// 迁移后的内存数据库
pub async fn memory_provider() -> ConnectionProvider {
    memory_provider_with_timeout(5).await
}

/// 获取连接超时为 `timeout` 秒的内存数据库
pub async fn memory_provider_with_timeout(timeout: u64) -> ConnectionProvider {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout,
    };
    ConnectionProvider::connect_and_migrate(&config)
        .await
        .expect("in-memory database should migrate")
}

pub fn storage_for(provider: &ConnectionProvider) -> (Arc<DbSession>, Arc<dyn Storage>) {
    let session = Arc::new(provider.open_session());
    let storage = create_storage(session.clone());
    (session, storage)
}

fn cheap_argon2() -> Argon2Config {
    Argon2Config {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
    }
}

pub fn user_request(username: &str) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        password: hash_password_with(PASSWORD, &cheap_argon2()).unwrap(),
        email: format!("{username}@codeta_test.com"),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
    }
}

/// 直接写库创建用户，密码为 [`PASSWORD`]
pub async fn seed_user(provider: &ConnectionProvider, username: &str) -> User {
    let (session, storage) = storage_for(provider);
    let user = storage.create_user(user_request(username)).await.unwrap();
    session.close().await;
    user
}

pub fn course_request(instructor_id: i64, title: &str) -> CreateCourseRequest {
    CreateCourseRequest {
        instructor_id,
        title: title.to_string(),
        identifier: "CSET".to_string(),
        section: "001".to_string(),
        description: "Test course description text".to_string(),
    }
}

pub async fn seed_course(provider: &ConnectionProvider, instructor: &User, title: &str) -> Course {
    let (session, storage) = storage_for(provider);
    let course = storage
        .create_course(course_request(instructor.user_id, title))
        .await
        .unwrap();
    session.close().await;
    course
}

pub async fn seed_assignment(
    provider: &ConnectionProvider,
    course: &Course,
    title: &str,
) -> Assignment {
    let (session, storage) = storage_for(provider);
    let assignment = storage
        .create_assignment(CreateAssignmentRequest {
            course_id: course.course_id,
            title: title.to_string(),
            description: "This is a test course".to_string(),
            due_date: None,
            points_possible: 100,
        })
        .await
        .unwrap();
    session.close().await;
    assignment
}

pub async fn enroll(provider: &ConnectionProvider, course: &Course, student: &User) {
    let (session, storage) = storage_for(provider);
    storage
        .enroll_student(course.course_id, student.user_id)
        .await
        .unwrap();
    session.close().await;
}
