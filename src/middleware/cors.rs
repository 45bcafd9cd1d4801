//! Cross-origin headers middleware.
//!
//! Stamps `Access-Control-Allow-Origin` and `Access-Control-Request-Method`
//! onto every response, error responses included.

use crate::config::CorsHeadersConfig;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{self, HeaderValue},
};
use std::{
    future::{Ready, ready},
    pin::Pin,
};

/// CORS headers middleware factory
pub struct CorsHeaders {
    config: CorsHeadersConfig,
}

impl CorsHeaders {
    /// Create a new CORS headers middleware with the given configuration
    pub fn new(config: CorsHeadersConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CorsHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsHeadersMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsHeadersMiddleware {
            service,
            config: self.config.clone(),
        }))
    }
}

/// The actual CORS headers middleware service
pub struct CorsHeadersMiddleware<S> {
    service: S,
    config: CorsHeadersConfig,
}

impl<S, B> Service<ServiceRequest> for CorsHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        let config = self.config.clone();

        Box::pin(async move {
            let mut res = fut.await?;
            let headers = res.headers_mut();

            if let Ok(value) = HeaderValue::from_str(&config.allow_origin) {
                headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
            }

            if let Ok(value) = HeaderValue::from_str(&config.request_method) {
                headers.insert(header::ACCESS_CONTROL_REQUEST_METHOD, value);
            }

            Ok(res)
        })
    }
}
