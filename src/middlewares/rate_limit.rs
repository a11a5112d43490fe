/*!
 * 速率限制中间件
 *
 * 固定窗口计数，用于登录、注册等未认证端点，按客户端 IP 计数。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())  // 5次/分钟
 *     .route(web::post().to(login))
 * ```
 *
 * 超过限制返回 429，并带 `Retry-After` 头。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::{Expiry, future::Cache};
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

#[derive(Clone, Copy)]
struct Window {
    count: u32,
    length: Duration,
}

/// 窗口从第一次请求开始计时，后续计数不延长窗口
struct WindowExpiry;

impl Expiry<String, Window> for WindowExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        window: &Window,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(window.length)
    }
}

/// 全局计数缓存，键: 前缀:ip
static RATE_LIMIT_CACHE: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .expire_after(WindowExpiry)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: &'static str,
}

impl RateLimit {
    pub fn new(key_prefix: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix,
        }
    }

    /// 登录：5次/分钟/IP
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 学员注册：3次/分钟/IP
    pub fn register() -> Self {
        Self::new("register", 3, 60)
    }

    /// 刷新令牌：10次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 记录一次请求，超过限制时返回 false
    async fn hit(&self, cache: &Cache<String, Window>, client: &str) -> bool {
        let key = format!("{}:{}", self.key_prefix, client);
        let window = cache.get(&key).await.unwrap_or(Window {
            count: 0,
            length: Duration::from_secs(self.window_secs),
        });

        if window.count >= self.max_requests {
            warn!(
                "Rate limit exceeded for key: {} ({}/{})",
                key, window.count, self.max_requests
            );
            return false;
        }

        cache
            .insert(
                key,
                Window {
                    count: window.count + 1,
                    ..window
                },
            )
            .await;
        true
    }
}

/// 客户端 IP：优先连接信息，其次 X-Forwarded-For 的第一个地址
///
/// 直接暴露在不可信网络时转发头可以被伪造，应由反向代理覆盖。
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.clone();
    }

    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next().map(str::trim)
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.to_string();
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .json(ApiResponse::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let limit = self.limit.clone();

        Box::pin(async move {
            let client = extract_client_ip(&req);
            if !limit.hit(&RATE_LIMIT_CACHE, &client).await {
                return Ok(req.into_response(
                    create_rate_limit_response(limit.window_secs).map_into_right_body(),
                ));
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");

        assert_eq!(RateLimit::register().max_requests, 3);
        assert_eq!(RateLimit::refresh_token().max_requests, 10);
    }

    #[tokio::test]
    async fn test_hit_counts_per_client() {
        let cache = Cache::builder().expire_after(WindowExpiry).build();
        let limit = RateLimit::new("test", 2, 60);

        assert!(limit.hit(&cache, "10.0.0.1").await);
        assert!(limit.hit(&cache, "10.0.0.1").await);
        assert!(!limit.hit(&cache, "10.0.0.1").await);

        // 其他客户端不受影响
        assert!(limit.hit(&cache, "10.0.0.2").await);
    }
}
