use std::path::PathBuf;

use shared::directory::PageSizes;

use crate::auth::JwtConfig;
use crate::core::Result;

/// 数据库存储模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseMode {
    /// 内存数据库 (测试、演示)
    Memory,
    /// RocksDB 持久化存储 (work_dir/database)
    RocksDb,
}

impl DatabaseMode {
    fn from_env_value(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "memory" | "mem" => Self::Memory,
            _ => Self::RocksDb,
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_MODE | rocksdb | rocksdb 或 memory |
/// | ENVIRONMENT | development | 运行环境 |
/// | JWT_SECRET | 开发环境自动生成 | JWT 密钥 (至少 32 字符) |
/// | JWT_EXPIRATION_MINUTES | 480 | 令牌有效期 |
/// | ADMIN_EMAIL / ADMIN_PASSWORD | - | 启动时创建的管理员账号 |
/// | SEED_FILE | - | 空库时导入的员工 JSON 文件 |
/// | LOGIN_DELAY_MS | 500 | 登录固定延迟 (防时序攻击) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/phonebook HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据库存储模式
    pub database_mode: DatabaseMode,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 启动时确保存在的管理员邮箱
    pub admin_email: Option<String>,
    /// 启动时确保存在的管理员密码
    pub admin_password: Option<String>,
    /// 种子数据文件 (JSON 数组, EmployeeDraft 格式)
    pub seed_file: Option<String>,
    /// 登录固定延迟 (毫秒)
    pub login_delay_ms: u64,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 各视图分页大小
    pub page_sizes: PageSizes,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的环境变量使用默认值；非开发环境缺少 `JWT_SECRET` 时返回错误
    pub fn from_env() -> Result<Self> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig::from_env(environment == "development")?;

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_mode: std::env::var("DATABASE_MODE")
                .map(|v| DatabaseMode::from_env_value(&v))
                .unwrap_or(DatabaseMode::RocksDb),
            jwt,
            environment,
            admin_email: std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
            seed_file: std::env::var("SEED_FILE").ok().filter(|v| !v.is_empty()),
            login_delay_ms: std::env::var("LOGIN_DELAY_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(500),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            page_sizes: PageSizes::default(),
        })
    }

    /// 内存数据库配置 (测试场景)
    ///
    /// 不读取环境变量，登录无延迟，JWT 使用随机密钥
    pub fn in_memory() -> Self {
        Self {
            work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            http_port: 0,
            database_mode: DatabaseMode::Memory,
            jwt: JwtConfig::generated(),
            environment: "test".into(),
            admin_email: None,
            admin_password: None,
            seed_file: None,
            login_delay_ms: 0,
            request_timeout_ms: 30000,
            page_sizes: PageSizes::default(),
        }
    }

    /// 设置启动管理员账号
    pub fn with_admin(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin_email = Some(email.into());
        self.admin_password = Some(password.into());
        self
    }

    /// 数据库目录: work_dir/database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        if self.database_mode == DatabaseMode::RocksDb {
            std::fs::create_dir_all(self.database_dir())?;
        }
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
