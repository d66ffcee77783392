use actix_web::{HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequestContext, RequireLogin};
use crate::models::courses::requests::{CreateCourseForm, DeleteCourseForm, EnrollForm};
use crate::services::CourseService;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn new_course_page(
    ctx: RequestContext,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.new_course_page(&ctx, &path).await
}

pub async fn create_course(
    ctx: RequestContext,
    path: web::Path<String>,
    form: web::Form<CreateCourseForm>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&ctx, &path, form.into_inner())
        .await
}

pub async fn course_home(
    ctx: RequestContext,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (owner, course) = path.into_inner();
    COURSE_SERVICE.course_home(&ctx, &owner, &course).await
}

pub async fn delete_page(
    ctx: RequestContext,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (owner, course) = path.into_inner();
    COURSE_SERVICE.delete_page(&ctx, &owner, &course).await
}

pub async fn delete_course(
    ctx: RequestContext,
    path: web::Path<(String, String)>,
    form: web::Form<DeleteCourseForm>,
) -> ActixResult<HttpResponse> {
    let (owner, course) = path.into_inner();
    COURSE_SERVICE
        .delete_course(&ctx, &owner, &course, form.into_inner())
        .await
}

pub async fn enroll_page(
    ctx: RequestContext,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (owner, course) = path.into_inner();
    COURSE_SERVICE.enroll_page(&ctx, &owner, &course).await
}

pub async fn enroll_student(
    ctx: RequestContext,
    path: web::Path<(String, String)>,
    form: web::Form<EnrollForm>,
) -> ActixResult<HttpResponse> {
    let (owner, course) = path.into_inner();
    COURSE_SERVICE
        .enroll_student(&ctx, &owner, &course, form.into_inner())
        .await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{username}/new")
            .wrap(RequireLogin)
            .route(web::get().to(new_course_page))
            .route(web::post().to(create_course)),
    )
    .service(
        web::resource("/{username}/{course}/")
            .wrap(RequireLogin)
            .route(web::get().to(course_home)),
    )
    .service(
        web::resource("/{username}/{course}/delete")
            .wrap(RequireLogin)
            .route(web::get().to(delete_page))
            .route(web::post().to(delete_course)),
    )
    .service(
        web::resource("/{username}/{course}/enroll")
            .wrap(RequireLogin)
            .route(web::get().to(enroll_page))
            .route(web::post().to(enroll_student)),
    );
}
