//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | 健康检查 | 无 |
//!
//! ```json
//! { "status": "ok", "version": "0.1.0", "database": "ok", "revision": 1718000000000 }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::employee::RESOURCE;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 状态 (ok | degraded)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 数据库检查 (ok | error)
    database: &'static str,
    /// 当前员工记录集版本
    revision: u64,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = match state.db.health().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            "error"
        }
    };

    Json(HealthResponse {
        status: if database == "ok" { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
        revision: state.resource_versions.get(RESOURCE),
    })
}
