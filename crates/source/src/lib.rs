//! Read access to the posts of a WordPress database.
//!
//! The exporter only ever needs three things from the database, captured by
//! the [`PostSource`] trait:
//!
//! - the slugs of every category (to separate categories from tags),
//! - how many published posts exist, and
//! - a page of published posts, joined with their featured image and the
//!   comma-joined slugs of their terms.
//!
//! [`Repository`] implements it against MySQL/MariaDB via `sqlx`. With the
//! `mock` feature, [`MemorySource`] implements it in memory for tests.

mod db;
pub mod error;
#[cfg(feature = "mock")]
mod mock;
mod models;
mod repo;

pub use crate::db::Database;
#[cfg(feature = "mock")]
pub use crate::mock::MemorySource;
pub use crate::repo::Repository;
use crate::error::Result;
use async_trait::async_trait;
use pressmark_post::models::{CategorySet, RawPost};

/// Query interface the export pipeline depends on.
///
/// Only published posts of type `post` are counted and fetched. Pages must
/// be returned in a stable order so that `offset` walks every post exactly
/// once.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Slugs of every term in the `category` taxonomy.
    async fn categories(&self) -> Result<CategorySet>;

    /// Number of published posts.
    async fn count(&self) -> Result<u64>;

    /// Up to `limit` published posts, skipping the first `offset`.
    async fn fetch(&self, limit: u64, offset: u64) -> Result<Vec<RawPost>>;
}
