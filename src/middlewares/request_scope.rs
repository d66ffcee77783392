/*!
 * 请求作用域中间件
 *
 * 为每个请求构建 [`RequestContext`]：
 *
 * 1. 从连接提供者打开一个请求级数据库会话（事务在首次查询时才开启）
 * 2. 校验会话 Cookie，并通过同一数据库会话加载当前用户
 * 3. 读取上一个响应留下的提示消息
 * 4. 调用处理程序，结束后关闭数据库会话，未提交的修改全部回滚
 *
 * 处理程序通过提取器获取上下文：
 * ```rust,ignore
 * async fn handler(ctx: RequestContext) -> actix_web::Result<HttpResponse> {
 *     let storage = ctx.storage();
 *     ...
 * }
 * ```
 */

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    error::ErrorInternalServerError,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::errors::CodetaError;
use crate::models::users::entities::User;
use crate::storage::{ConnectionProvider, DbSession, Storage, create_storage};
use crate::utils::jwt::{FLASH_COOKIE, JwtUtils};
use crate::views::PageContext;

/// 单个请求的上下文
#[derive(Clone)]
pub struct RequestContext {
    session: Arc<DbSession>,
    user: Option<User>,
    flashes: Vec<String>,
}

impl RequestContext {
    pub fn new(session: Arc<DbSession>, user: Option<User>, flashes: Vec<String>) -> Self {
        Self {
            session,
            user,
            flashes,
        }
    }

    /// 绑定本请求数据库会话的存储
    pub fn storage(&self) -> Arc<dyn Storage> {
        create_storage(self.session.clone())
    }

    pub fn session(&self) -> &Arc<DbSession> {
        &self.session
    }

    /// 当前登录用户
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// 当前用户是否就是路径中的用户
    pub fn is_user(&self, username: &str) -> bool {
        self.user.as_ref().is_some_and(|u| u.username == username)
    }

    pub fn flashes(&self) -> &[String] {
        &self.flashes
    }

    /// 页面公共上下文
    pub fn page(&self) -> PageContext {
        PageContext::new(
            self.user.as_ref().map(|u| u.username.clone()),
            self.flashes.clone(),
        )
    }
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<RequestContext>()
                .cloned()
                .ok_or_else(|| ErrorInternalServerError("Request context is not available")),
        )
    }
}

// 辅助函数：校验会话 Cookie 并加载用户
// Cookie 无效或用户不存在时视为未登录；数据库错误向上返回
async fn resolve_session_user(
    req: &HttpRequest,
    session: &Arc<DbSession>,
) -> Result<Option<User>, CodetaError> {
    let Some(token) = JwtUtils::extract_session_token(req) else {
        return Ok(None);
    };

    let claims = match JwtUtils::verify_session_token(&token) {
        Ok(claims) => claims,
        Err(err) => {
            debug!("Session token rejected: {}", err);
            return Ok(None);
        }
    };
    let Some(user_id) = claims.user_id() else {
        return Ok(None);
    };

    match create_storage(session.clone()).get_user_by_id(user_id).await? {
        Some(user) if user.username == claims.username => Ok(Some(user)),
        _ => {
            debug!("Session refers to a missing user: {}", user_id);
            Ok(None)
        }
    }
}

#[derive(Clone)]
pub struct RequestScope;

impl<S, B> Transform<S, ServiceRequest> for RequestScope
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestScopeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestScopeMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestScopeMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestScopeMiddleware<S>
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
            let provider = req
                .app_data::<web::Data<ConnectionProvider>>()
                .cloned()
                .ok_or_else(|| ErrorInternalServerError("Database is not configured"))?;

            let session = Arc::new(provider.open_session());
            let user = match resolve_session_user(req.request(), &session).await {
                Ok(user) => user,
                Err(err) => {
                    session.close().await;
                    warn!("Failed to load session user: {}", err);
                    let response = HttpResponse::from_error(err);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };
            // 只读查询已完成，先归还连接；处理程序需要时再重新开启
            session.close().await;
            let flashes = JwtUtils::extract_flashes(req.request());
            let had_flashes = !flashes.is_empty();

            req.extensions_mut()
                .insert(RequestContext::new(session.clone(), user, flashes));

            let result = srv.call(req).await;
            session.close().await;
            let mut res = result?;

            // 消息已在本页显示，重定向时保留给下一页
            let sets_flash = res.response().cookies().any(|c| c.name() == FLASH_COOKIE);
            if had_flashes && !sets_flash && !res.status().is_redirection() {
                if let Err(e) = res
                    .response_mut()
                    .add_cookie(&JwtUtils::create_empty_flash_cookie())
                {
                    warn!("Failed to clear flash cookie: {}", e);
                }
            }

            Ok(res.map_into_left_body())
        })
    }
}
