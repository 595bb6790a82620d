//! In-memory post source for testing.

use async_trait::async_trait;
use pressmark_post::models::{CategorySet, RawPost};
use std::sync::Mutex;

use crate::PostSource;
use crate::error::Result;

/// In-memory [`PostSource`] for testing.
///
/// Serves a fixed list of posts and category slugs, and records every page
/// request so tests can assert on the pagination pattern.
///
/// # Examples
///
/// ```
/// use pressmark_post::models::RawPost;
/// use pressmark_source::{MemorySource, PostSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = MemorySource::new(["news"], vec![RawPost::default(); 3]);
/// assert_eq!(source.count().await?, 3);
/// assert_eq!(source.fetch(2, 2).await?.len(), 1);
/// assert_eq!(source.pages(), vec![(2, 2)]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    categories: Vec<String>,
    posts: Vec<RawPost>,
    pages: Mutex<Vec<(u64, u64)>>,
}

impl MemorySource {
    pub fn new(categories: impl IntoIterator<Item = impl Into<String>>, posts: Vec<RawPost>) -> Self {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            posts,
            pages: Mutex::new(Vec::new()),
        }
    }

    /// Every `(limit, offset)` pair requested so far, in order.
    pub fn pages(&self) -> Vec<(u64, u64)> {
        self.pages.lock().map(|pages| pages.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PostSource for MemorySource {
    async fn categories(&self) -> Result<CategorySet> {
        Ok(self.categories.iter().cloned().collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.posts.len() as u64)
    }

    async fn fetch(&self, limit: u64, offset: u64) -> Result<Vec<RawPost>> {
        if let Ok(mut pages) = self.pages.lock() {
            pages.push((limit, offset));
        }
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(self.posts.len());
        let end = start.saturating_add(usize::try_from(limit).unwrap_or(usize::MAX)).min(self.posts.len());
        Ok(self.posts[start..end].to_vec())
    }
}
