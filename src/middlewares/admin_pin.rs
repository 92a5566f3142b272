use crate::config::AdminConfig;
use crate::error::AppError;
use actix_web::http::Method;
use actix_web::{
    Error, web,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

pub const ADMIN_PIN_HEADER: &str = "x-admin-pin";

/// 工作人员共享口令校验，挂在 /admin 作用域上
///
/// 口令取自 `web::Data<AdminConfig>`；未注册配置或口令为空时拒绝所有请求。
pub struct AdminPinMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AdminPinMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminPinMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminPinMiddlewareService { service }))
    }
}

pub struct AdminPinMiddlewareService<S> {
    service: S,
}

fn is_authorized(req: &ServiceRequest) -> bool {
    let Some(config) = req.app_data::<web::Data<AdminConfig>>() else {
        return false;
    };
    if config.pin.is_empty() {
        return false;
    }
    req.headers()
        .get(ADMIN_PIN_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == config.pin)
}

impl<S, B> Service<ServiceRequest> for AdminPinMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求
        if req.method() == Method::OPTIONS || is_authorized(&req) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let error = AppError::AuthError("Invalid or missing admin pin".to_string());
        Box::pin(async move { Err(error.into()) })
    }
}
