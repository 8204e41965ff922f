use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::inventory::InventoryLedger;
use crate::orders::OrdersService;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是服务的核心数据结构，所有 handler 通过它访问数据库与
/// 领域服务。使用 Clone 实现浅拷贝（内部均为句柄）。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | ledger | InventoryLedger | 库存账本（product 数量的唯一写入者） |
/// | orders | OrdersService | 订单生命周期服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 库存账本
    pub ledger: InventoryLedger,
    /// 订单服务
    pub orders: OrdersService,
}

impl ServerState {
    /// Initialize state from configuration: open the database, wire the
    /// ledger and order service over it.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new(&config.db_path).await?;
        Ok(Self::from_db(config.clone(), db_service.db))
    }

    /// State over an in-memory database (tests, local experiments)
    pub async fn in_memory(config: Config) -> Result<Self, AppError> {
        let db_service = DbService::open_in_memory().await?;
        Ok(Self::from_db(config, db_service.db))
    }

    fn from_db(config: Config, db: Surreal<Db>) -> Self {
        let ledger = InventoryLedger::new(db.clone());
        let orders = OrdersService::new(db.clone(), ledger.clone());
        Self {
            config,
            db,
            ledger,
            orders,
        }
    }
}
