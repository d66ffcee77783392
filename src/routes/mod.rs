pub mod assignments;

pub mod auth;

pub mod courses;

pub mod pages;

pub mod users;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use pages::configure_page_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 按匹配优先级注册全部路由，未匹配的请求交给 [`pages::not_found`]
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_page_routes)
        .configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_course_routes)
        .configure(configure_assignment_routes);
}
