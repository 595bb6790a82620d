//! Queries for published posts and category slugs.

use async_trait::async_trait;
use exn::ResultExt;
use pressmark_post::models::{CategorySet, RawPost};
use sqlx::MySqlPool;
use tracing::instrument;

use crate::Database;
use crate::PostSource;
use crate::error::{ErrorKind, Result};
use crate::models::PostRow;

const PREFIX_PLACEHOLDER: &str = "{prefix}";

/// SQL with the table prefix already substituted.
#[derive(Debug, Clone)]
struct Queries {
    categories: String,
    count: String,
    fetch: String,
}

impl Queries {
    fn new(prefix: &str) -> Result<Self> {
        if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            exn::bail!(ErrorKind::InvalidPrefix(prefix.to_string()));
        }
        let render = |sql: &str| sql.replace(PREFIX_PLACEHOLDER, prefix);
        Ok(Self {
            categories: render(include_str!("../queries/categories.sql")),
            count: render(include_str!("../queries/count_published.sql")),
            fetch: render(include_str!("../queries/fetch_published.sql")),
        })
    }
}

/// Read-only access to the posts and terms tables of a WordPress database.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: MySqlPool,
    queries: Queries,
}

impl Repository {
    /// Create a repository for tables named `{table_prefix}posts`,
    /// `{table_prefix}terms`, and so on.
    pub fn new(db: &Database, table_prefix: &str) -> Result<Self> {
        Ok(Self { pool: db.pool().clone(), queries: Queries::new(table_prefix)? })
    }
}

#[async_trait]
impl PostSource for Repository {
    #[instrument(skip(self))]
    async fn categories(&self) -> Result<CategorySet> {
        let slugs: Vec<String> = sqlx::query_scalar(&self.queries.categories)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(slugs.into_iter().collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(&self.queries.count)
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        u64::try_from(count).or_raise(|| ErrorKind::InvalidData("post count"))
    }

    #[instrument(skip(self))]
    async fn fetch(&self, limit: u64, offset: u64) -> Result<Vec<RawPost>> {
        let rows: Vec<PostRow> = sqlx::query_as(&self.queries.fetch)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(rows.into_iter().map(RawPost::from).collect())
    }
}
