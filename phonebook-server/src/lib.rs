//! Phonebook Server - 员工通讯录服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (RocksDB 或内存)
//! - **认证** (`auth`): JWT + Argon2 管理员认证
//! - **HTTP API** (`api`): 通讯录查询与管理员增删改接口
//!
//! # 模块结构
//!
//! ```text
//! phonebook-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、密码哈希、中间件
//! ├── db/            # 数据库层 (仓储、种子数据)
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志
//! └── utils/         # 日志、输入校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerError, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境
///
/// 1. 加载 `.env` (不存在则忽略)
/// 2. 按 `LOG_LEVEL` / `LOG_DIR` 初始化日志
pub fn setup_environment() -> Result<(), ServerError> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____  __                     __                __
   / __ \/ /_  ____  ____  ___  / /_  ____  ____  / /__
  / /_/ / __ \/ __ \/ __ \/ _ \/ __ \/ __ \/ __ \/ //_/
 / ____/ / / / /_/ / / / /  __/ /_/ / /_/ / /_/ / ,<
/_/   /_/ /_/\____/_/ /_/\___/_.___/\____/\____/_/|_|
    "#
    );
}
