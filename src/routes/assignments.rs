use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequestContext, RequireLogin};
use crate::models::assignments::requests::{AssignmentForm, DeleteAssignmentForm};
use crate::services::{AssignmentService, SubmissionService, assignments::AssignmentPath};

// 懒加载的全局服务实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

type AssignmentParams = web::Path<(String, String, String)>;

fn assignment_path(params: &(String, String, String)) -> AssignmentPath<'_> {
    AssignmentPath {
        owner: &params.0,
        course: &params.1,
        assignment: &params.2,
    }
}

pub async fn new_page(
    ctx: RequestContext,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (owner, course) = path.into_inner();
    ASSIGNMENT_SERVICE.new_page(&ctx, &owner, &course).await
}

pub async fn create_assignment(
    ctx: RequestContext,
    path: web::Path<(String, String)>,
    form: web::Form<AssignmentForm>,
) -> ActixResult<HttpResponse> {
    let (owner, course) = path.into_inner();
    ASSIGNMENT_SERVICE
        .create_assignment(&ctx, &owner, &course, form.into_inner())
        .await
}

pub async fn edit_page(ctx: RequestContext, path: AssignmentParams) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .edit_page(&ctx, assignment_path(&path))
        .await
}

pub async fn update_assignment(
    ctx: RequestContext,
    path: AssignmentParams,
    form: web::Form<AssignmentForm>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&ctx, assignment_path(&path), form.into_inner())
        .await
}

pub async fn delete_page(ctx: RequestContext, path: AssignmentParams) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_page(&ctx, assignment_path(&path))
        .await
}

pub async fn delete_assignment(
    ctx: RequestContext,
    path: AssignmentParams,
    form: web::Form<DeleteAssignmentForm>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(&ctx, assignment_path(&path), form.into_inner())
        .await
}

pub async fn submit_page(ctx: RequestContext, path: AssignmentParams) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit_page(&ctx, assignment_path(&path))
        .await
}

pub async fn submit(
    ctx: RequestContext,
    path: AssignmentParams,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .handle_upload(&ctx, assignment_path(&path), payload)
        .await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{username}/{course}/new")
            .wrap(RequireLogin)
            .route(web::get().to(new_page))
            .route(web::post().to(create_assignment)),
    )
    .service(
        web::resource("/{username}/{course}/{assignment}/edit")
            .wrap(RequireLogin)
            .route(web::get().to(edit_page))
            .route(web::post().to(update_assignment)),
    )
    .service(
        web::resource("/{username}/{course}/{assignment}/delete")
            .wrap(RequireLogin)
            .route(web::get().to(delete_page))
            .route(web::post().to(delete_assignment)),
    )
    .service(
        web::resource("/{username}/{course}/{assignment}/submit")
            .wrap(RequireLogin)
            .route(web::get().to(submit_page))
            .route(web::post().to(submit)),
    );
}
