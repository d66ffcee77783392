//! 登录检查中间件
//!
//! 必须位于 [`RequestScope`](super::RequestScope) 之内。未登录的请求直接返回登录页（401）。

use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::info;

use super::RequestContext;
use crate::models::FormErrors;
use crate::models::auth::requests::LoginForm;
use crate::views::{self, LoginPage, PageContext};

#[derive(Clone)]
pub struct RequireLogin;

impl<S, B> Transform<S, ServiceRequest> for RequireLogin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireLoginMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLoginMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireLoginMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireLoginMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            let page = {
                let extensions = req.extensions();
                match extensions.get::<RequestContext>() {
                    Some(ctx) if ctx.user().is_some() => None,
                    Some(ctx) => Some(ctx.page()),
                    None => Some(PageContext::default()),
                }
            };

            let Some(page) = page else {
                return Ok(srv.call(req).await?.map_into_left_body());
            };

            info!("Unauthenticated request to {}", req.path());
            let response = views::render_status(
                StatusCode::UNAUTHORIZED,
                &LoginPage {
                    page: page.with_message("Please log in to access this page."),
                    form: LoginForm::default(),
                    errors: FormErrors::default(),
                    error: None,
                },
            )?;
            Ok(req.into_response(response.map_into_right_body()))
        })
    }
}
