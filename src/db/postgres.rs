//! Postgres scopes

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction, pool::PoolConnection};

use super::Database;
use crate::error::AppResult;

/// A pooled connection, or a transaction that rolls back on drop
pub enum PgScope {
    Connection(PoolConnection<Postgres>),
    Transaction(Transaction<'static, Postgres>),
}

impl PgScope {
    /// Connection to run statements on
    pub fn conn(&mut self) -> &mut PgConnection {
        match self {
            PgScope::Connection(conn) => &mut **conn,
            PgScope::Transaction(tx) => &mut **tx,
        }
    }
}

/// Postgres-backed [`Database`]
#[derive(Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Database for PgDatabase {
    type Scope = PgScope;

    async fn connection(&self) -> AppResult<PgScope> {
        Ok(PgScope::Connection(self.pool.acquire().await?))
    }

    async fn begin(&self) -> AppResult<PgScope> {
        Ok(PgScope::Transaction(self.pool.begin().await?))
    }

    async fn commit(&self, scope: PgScope) -> AppResult<()> {
        if let PgScope::Transaction(tx) = scope {
            tx.commit().await?;
        }
        Ok(())
    }
}
