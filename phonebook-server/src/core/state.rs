use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::repository::{AdminRepository, EmployeeRepository};
use crate::db::{DbService, seed};

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。
/// 每种资源类型维护独立的版本号，支持原子递增。
///
/// # 使用场景
///
/// 每次员工记录写入成功后递增，列表响应携带当前版本号，
/// 客户端据此丢弃过期的列表结果。
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    /// 创建空的版本管理器
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 设置初始版本号 (只会调大，不会回退)
    pub fn seed(&self, resource: &str, base: u64) {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        if *entry < base {
            *entry = base;
        }
    }

    /// 递增指定资源的版本号并返回新值
    ///
    /// 如果资源不存在，从 0 开始递增（返回 1）
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号
    ///
    /// 如果资源不存在，返回 0
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | resource_versions | Arc<ResourceVersions> | 资源版本管理 |
/// | write_lock | Arc<Mutex<()>> | 员工写操作串行化 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 资源版本管理器
    pub resource_versions: Arc<ResourceVersions>,
    /// 员工写操作锁 (按到达顺序串行执行，后写覆盖先写)
    pub write_lock: Arc<Mutex<()>>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        let resource_versions = Arc::new(ResourceVersions::new());
        // 以启动时间为基准；initialize() 还会取持久化版本号的较大值
        resource_versions.seed(
            crate::db::repository::employee::RESOURCE,
            chrono::Utc::now().timestamp_millis().max(0) as u64,
        );

        Self {
            config,
            db,
            jwt_service,
            resource_versions,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (内存或 work_dir/database)
    /// 3. JWT 服务
    /// 4. 恢复持久化的员工版本号
    /// 5. 管理员账号 (ADMIN_EMAIL / ADMIN_PASSWORD)
    /// 6. 种子数据 (SEED_FILE, 仅空库)
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_service = DbService::new(config).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let state = Self::new(config.clone(), db_service.db, jwt_service);

        let revision = state
            .employee_repository()
            .restore_revision()
            .await
            .map_err(|e| crate::core::ServerError::Database(e.to_string()))?;
        tracing::debug!(revision, "Employee revision restored");

        if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
            state
                .admin_repository()
                .ensure(email, password)
                .await
                .map_err(|e| crate::core::ServerError::Database(e.to_string()))?;
        } else {
            tracing::warn!("ADMIN_EMAIL / ADMIN_PASSWORD not set, no admin account bootstrapped");
        }

        if let Some(path) = &config.seed_file {
            let drafts = seed::load_seed_file(path)?;
            let inserted = seed::seed_if_empty(&state.employee_repository(), drafts)
                .await
                .map_err(|e| crate::core::ServerError::Database(e.to_string()))?;
            if inserted > 0 {
                tracing::info!(count = inserted, file = %path, "Seeded employee records");
            }
        }

        Ok(state)
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 员工仓储 (共享写锁与版本号)
    pub fn employee_repository(&self) -> EmployeeRepository {
        EmployeeRepository::new(
            self.db.clone(),
            self.resource_versions.clone(),
            self.write_lock.clone(),
        )
    }

    /// 管理员仓储
    pub fn admin_repository(&self) -> AdminRepository {
        AdminRepository::new(self.db.clone())
    }
}
