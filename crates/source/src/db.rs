//! Database connection and pool management.

use exn::ResultExt;
use sqlx::MySqlConnection;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnectionMetadata;
use std::time::Duration;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

// The export is strictly sequential; a second connection would sit idle.
const MAX_CONNECTIONS: u32 = 1;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection pool for a WordPress database.
///
/// Every pooled connection has `ONLY_FULL_GROUP_BY` removed from its SQL
/// mode; the post query selects non-aggregated thumbnail columns alongside
/// the aggregated term slugs, which strict grouping would reject.
#[derive(Debug, Clone)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Connect to the database at the given `mysql://` URL.
    #[instrument(skip_all)]
    pub async fn connect(url: &str) -> Result<Self> {
        let options = url.parse::<MySqlConnectOptions>().or_raise(|| ErrorKind::Connection)?;
        Self::connect_with(options).await
    }

    /// Connect using pre-built connection options.
    pub async fn connect_with(options: MySqlConnectOptions) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            // Apply the session mode to EVERY connection the pool opens, not
            // only the first one handed out.
            .after_connect(|conn, meta| Box::pin(async move { Self::apply_session_mode(conn, meta).await }))
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Connection)?;
        tracing::debug!("Connected to database");
        Ok(Self { pool })
    }

    async fn apply_session_mode(conn: &mut MySqlConnection, _meta: PoolConnectionMetadata) -> sqlx::Result<()> {
        sqlx::query(include_str!("../queries/session_mode.sql")).execute(conn).await?;
        Ok(())
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Close the connection pool, waiting for checked-out connections to be
    /// returned first.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
