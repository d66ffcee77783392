use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::middlewares::RequestContext;
use crate::views::{self, HomePage, StaticPage};

pub async fn index(ctx: RequestContext) -> ActixResult<HttpResponse> {
    views::render(&HomePage { page: ctx.page() })
}

fn static_page(ctx: &RequestContext, heading: &str, body: &str) -> ActixResult<HttpResponse> {
    views::render(&StaticPage {
        page: ctx.page(),
        heading: heading.to_string(),
        body: body.to_string(),
    })
}

pub async fn about(ctx: RequestContext) -> ActixResult<HttpResponse> {
    static_page(
        &ctx,
        "About Code TA",
        "Code TA helps instructors run programming courses: create courses, enroll students, post assignments and collect submissions.",
    )
}

pub async fn support(ctx: RequestContext) -> ActixResult<HttpResponse> {
    static_page(
        &ctx,
        "Support",
        "Having trouble? Ask your instructor first, then contact the site administrators.",
    )
}

pub async fn contact(ctx: RequestContext) -> ActixResult<HttpResponse> {
    static_page(
        &ctx,
        "Contact",
        "Reach the Code TA team through your department's course staff.",
    )
}

/// 未匹配路由
pub async fn not_found(ctx: RequestContext) -> ActixResult<HttpResponse> {
    views::not_found(ctx.page())
}

// 配置路由
pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/about", web::get().to(about))
        .route("/support", web::get().to(support))
        .route("/contact", web::get().to(contact));
}
