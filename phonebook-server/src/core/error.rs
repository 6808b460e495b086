use thiserror::Error;

use crate::auth::JwtError;
use crate::utils::AppError;

/// 启动和运行阶段的错误 (请求级错误使用 [`AppError`])
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JwtError> for ServerError {
    fn from(err: JwtError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        ServerError::Database(err.message)
    }
}

/// 服务器 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
