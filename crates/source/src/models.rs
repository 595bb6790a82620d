use pressmark_post::models::RawPost;

/// One row of `fetch_published.sql`.
///
/// Every column is cast to `CHAR` in the query so that zero dates, unsigned
/// IDs and `NULL`s from the left joins all decode the same way.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct PostRow {
    pub(crate) id: Option<String>,
    pub(crate) post_date: Option<String>,
    pub(crate) post_date_gmt: Option<String>,
    pub(crate) post_modified: Option<String>,
    pub(crate) post_modified_gmt: Option<String>,
    pub(crate) post_name: Option<String>,
    pub(crate) post_title: Option<String>,
    pub(crate) post_excerpt: Option<String>,
    pub(crate) guid: Option<String>,
    pub(crate) comment_count: Option<String>,
    pub(crate) pinged: Option<String>,
    pub(crate) post_content: Option<String>,
    pub(crate) post_content_filtered: Option<String>,
    pub(crate) image: Option<String>,
    pub(crate) image_alt: Option<String>,
    pub(crate) tags: Option<String>,
}

impl From<PostRow> for RawPost {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            date: row.post_date,
            date_gmt: row.post_date_gmt,
            modified: row.post_modified,
            modified_gmt: row.post_modified_gmt,
            name: row.post_name,
            title: row.post_title,
            excerpt: row.post_excerpt,
            guid: row.guid,
            comment_count: row.comment_count,
            pinged: row.pinged,
            content: row.post_content,
            content_filtered: row.post_content_filtered,
            image: row.image,
            image_alt: row.image_alt,
            tags: row.tags,
        }
    }
}
