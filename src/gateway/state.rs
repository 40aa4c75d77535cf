use std::sync::Arc;

use crate::account::{AccountService, PgAccountRepository};
use crate::config::AppConfig;
use crate::db::Database;
use crate::order::{OrderService, PgOrderRepository};
use crate::session::{ContextTokenService, PgSessionRepository, SessionManager};
use crate::store::MemoryStore;

/// Gateway shared state
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub orders: Arc<OrderService>,
    pub sessions: Arc<SessionManager>,
    /// Present when running on PostgreSQL; used by the health check
    pub pg_db: Option<Arc<Database>>,
    /// `limit` used when the order listing request omits it
    pub default_order_limit: u32,
}

impl AppState {
    /// Wire services against PostgreSQL.
    pub fn with_database(db: Arc<Database>, config: &AppConfig) -> anyhow::Result<Self> {
        let accounts = Arc::new(PgAccountRepository::new(db.pool().clone()));
        let sessions = Arc::new(SessionManager::new(
            ContextTokenService::new(&config.session)?,
            Arc::new(PgSessionRepository::new(db.pool().clone())),
        ));

        Ok(Self {
            accounts: Arc::new(AccountService::new(accounts.clone(), accounts, sessions.clone())),
            orders: Arc::new(OrderService::new(Arc::new(PgOrderRepository::new(
                db.pool().clone(),
            )))),
            sessions,
            pg_db: Some(db),
            default_order_limit: config.orders.default_limit,
        })
    }

    /// Wire services against an in-memory store.
    pub fn with_memory_store(store: Arc<MemoryStore>, config: &AppConfig) -> anyhow::Result<Self> {
        let sessions = Arc::new(SessionManager::new(
            ContextTokenService::new(&config.session)?,
            store.clone(),
        ));

        Ok(Self {
            accounts: Arc::new(AccountService::new(store.clone(), store.clone(), sessions.clone())),
            orders: Arc::new(OrderService::new(store)),
            sessions,
            pg_db: None,
            default_order_limit: config.orders.default_limit,
        })
    }
}
