//! Server-side session records backing context tokens

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::account::repository::RepoResult;
use crate::core_types::{CustomerId, SessionId};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Session {
    pub id: SessionId,
    pub customer_id: CustomerId,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn open(customer_id: CustomerId) -> Self {
        Self {
            id: SessionId::new(),
            customer_id,
            created_at: Utc::now(),
            revoked_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> RepoResult<()>;

    /// Session `id` unless it has been revoked
    async fn find_active(&self, id: SessionId) -> RepoResult<Option<Session>>;

    /// Mark the session revoked. Revoking twice is a no-op.
    async fn revoke(&self, id: SessionId) -> RepoResult<()>;
}

#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, session: &Session) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO customer_sessions (id, customer_id, created_at, revoked_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(session.id)
        .bind(session.customer_id)
        .bind(session.created_at)
        .bind(session.revoked_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_active(&self, id: SessionId) -> RepoResult<Option<Session>> {
        sqlx::query_as::<_, Session>(
            r#"SELECT id, customer_id, created_at, revoked_at
               FROM customer_sessions
               WHERE id = $1 AND revoked_at IS NULL"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn revoke(&self, id: SessionId) -> RepoResult<()> {
        sqlx::query("UPDATE customer_sessions SET revoked_at = $2 WHERE id = $1 AND revoked_at IS NULL")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
