use super::Timestamp;
use serde::Serialize;

/// Front matter for a single exported post.
///
/// Field order is the serialization order. Every field except `categories`
/// is omitted from the output when unset or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Category slugs, in sorted order. Always serialized, even when empty.
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    /// Publication time in the site's timezone (at the time of publishing).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_gmt: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Featured image path, relative to the uploads directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_gmt: Option<Timestamp>,
    /// Post slug.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// URLs that have been pinged by this post.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pings: Vec<String>,
    /// Tag slugs, in sorted order, never containing a category slug.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}
