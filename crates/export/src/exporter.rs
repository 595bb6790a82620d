use exn::ResultExt;
use pressmark_markdown::{Converter, FrontMatter, Hook, Transformer, Yaml, document};
use pressmark_post::models::{CategorySet, RawPost};
use pressmark_post::normalize;
use pressmark_source::PostSource;
use pressmark_storage::OutputTree;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::Permalink;
use crate::error::{ErrorKind, Result};
use crate::report::Exported;

/// Posts requested per page query unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: u64 = 250;

/// Exports every published post of a [`PostSource`] into an [`OutputTree`].
///
/// Each post becomes one Markdown document at the path its [`Permalink`]
/// resolves to. Optionally, the post's untransformed HTML is written to the
/// same relative path under a second "mirror" tree.
///
/// ```no_run
/// use pressmark_export::{Exporter, Permalink};
/// use pressmark_source::{Database, Repository};
/// use pressmark_storage::OutputTree;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Database::connect("mysql://wordpress@localhost/wordpress").await?;
/// let exporter = Exporter::new(
///     Arc::new(Repository::new(&db, "wp_")?),
///     OutputTree::new("/srv/blog/content")?,
///     Permalink::default(),
/// )
/// .with_batch_size(100);
/// let report = exporter.run().await?;
/// println!("Wrote {} of {} ({}) posts", report.written, report.fetched, report.total_expected);
/// # Ok(())
/// # }
/// ```
pub struct Exporter {
    pub(crate) source: Arc<dyn PostSource>,
    destination: OutputTree,
    mirror: Option<OutputTree>,
    permalink: Permalink,
    transformer: Transformer,
    front_matter: Box<dyn FrontMatter>,
    pub(crate) batch_size: u64,
}

impl Exporter {
    pub fn new(source: Arc<dyn PostSource>, destination: OutputTree, permalink: Permalink) -> Self {
        Self {
            source,
            destination,
            mirror: None,
            permalink,
            transformer: Transformer::default(),
            front_matter: Box::new(Yaml),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Posts per page query. Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Also write each post's raw HTML into `mirror`.
    pub fn with_mirror(mut self, mirror: impl Into<Option<OutputTree>>) -> Self {
        self.mirror = mirror.into();
        self
    }

    pub fn with_converter(mut self, converter: impl Converter + 'static) -> Self {
        self.transformer = self.transformer.with_converter(converter);
        self
    }

    pub fn with_hook(mut self, hook: impl Hook + 'static) -> Self {
        self.transformer = self.transformer.with_hook(hook);
        self
    }

    pub fn with_front_matter(mut self, front_matter: impl FrontMatter + 'static) -> Self {
        self.front_matter = Box::new(front_matter);
        self
    }

    /// Run a single post through the whole pipeline and write it out.
    #[instrument(level = "debug", skip_all, fields(post_id = post.id()))]
    pub(crate) async fn export_post(&self, post: &RawPost, categories: &CategorySet) -> Result<Exported> {
        let post_id = post.id();
        let metadata = normalize(post, categories).or_raise(|| ErrorKind::Normalize(post_id))?;
        let path = self.permalink.resolve(post)?;

        let content = post.source_content();
        let mirror = match &self.mirror {
            Some(mirror) => Some(mirror.write_if_changed(&path, content.as_bytes()).await.or_raise(|| ErrorKind::Storage)?),
            None => None,
        };

        let body = self
            .transformer
            .transform(content, post.title(), &self.destination.root().join(&path))
            .or_raise(|| ErrorKind::Transform(post_id))?;
        let front_matter = self.front_matter.render(&metadata).or_raise(|| ErrorKind::FrontMatter(post_id))?;
        let outcome = self
            .destination
            .write_if_changed(&path, document(&front_matter, &body).as_bytes())
            .await
            .or_raise(|| ErrorKind::Storage)?;

        match outcome.is_written() {
            true => info!(post_id, path = %path.display(), ?outcome, "Wrote post"),
            false => debug!(post_id, path = %path.display(), "Post unchanged"),
        }
        Ok(Exported { post_id, path, outcome, mirror })
    }
}
