//! 请求日志中间件
//!
//! 每个请求一个 `http` span (request_id / method / route / admin)，
//! 处理器内的日志都挂在该 span 下；请求结束时记录一条状态与耗时。

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::auth::CurrentUser;

/// 请求日志中间件
///
/// 5xx 记为 warn，其余为 info。健康检查只在 debug 级别出现。
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = header_str(&req, "x-request-id")
        .map(str::to_owned)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_owned(), |p| p.as_str().to_owned());
    let admin = req
        .extensions()
        .get::<CurrentUser>()
        .map(|u| u.email.clone());
    let quiet = route == "/health";

    let span = info_span!(
        "http",
        request_id = %request_id,
        method = %req.method(),
        route = %route,
        admin = ?admin,
    );

    async move {
        debug!(
            user_agent = header_str(&req, "user-agent").unwrap_or("unknown"),
            "Request started"
        );

        let response = next.run(req).await;
        let status = response.status().as_u16();
        let latency_ms = start.elapsed().as_millis() as u64;

        if response.status().is_server_error() {
            warn!(status, latency_ms, "Request failed");
        } else if quiet {
            debug!(status, latency_ms, "Health check");
        } else {
            info!(status, latency_ms, "Request completed");
        }
        response
    }
    .instrument(span)
    .await
}

fn header_str<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}
