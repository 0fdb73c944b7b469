use std::sync::Arc;

use crate::auth::{JwtConfig, JwtService};
use crate::core::{BackgroundTasks, Config, TaskKind};
use crate::inventory::ExpiryScheduler;
use crate::store::Store;

/// 服务器状态 - 持有所有服务的共享引用
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Store | 嵌入式数据库 (redb) |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | expiry | ExpiryScheduler | 库存过期扫描 |
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库
    pub store: Store,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 库存过期扫描 (定时 + 手动触发共用)
    pub expiry: ExpiryScheduler,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(config: Config, store: Store, jwt_service: Arc<JwtService>) -> Self {
        let expiry = ExpiryScheduler::new(store.clone(), config.expiry_scan_hour);
        Self {
            config,
            store,
            jwt_service,
            expiry,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 确保工作目录结构存在
    /// 2. 打开数据库 (work_dir/database/kitchiq.redb)
    /// 3. 初始化 JWT 服务
    ///
    /// # Panics
    ///
    /// 工作目录或数据库初始化失败时 panic
    pub fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("kitchiq.redb");
        let store = Store::open(&db_path).expect("Failed to initialize database");
        tracing::info!(path = %db_path.display(), "Database opened");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), store, jwt_service)
    }

    /// 测试状态：内存数据库 + 固定 JWT 密钥
    pub fn for_tests() -> Self {
        let config = Config {
            work_dir: String::new(),
            http_port: 0,
            jwt: JwtConfig::for_tests(),
            environment: "test".into(),
            expiry_scan_hour: 9,
        };
        let store = Store::open_in_memory().expect("in-memory store");
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self::new(config, store, jwt_service)
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 开始服务前调用。
    /// 启动的任务：库存过期定时扫描。
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let scheduler = self.expiry.clone();
        let shutdown = tasks.shutdown_token();
        tasks.spawn("expiry_scan", TaskKind::Periodic, async move {
            scheduler.run(shutdown).await;
        });
    }

    /// 获取数据库实例
    pub fn get_store(&self) -> &Store {
        &self.store
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
