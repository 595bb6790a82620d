/// A single published post, exactly as selected from the database.
///
/// Every column is kept as an optional string: `None` means the column was
/// `NULL` (for example a post without a featured image, or without any terms
/// attached), which is treated as "unset" and skipped during normalization.
/// Empty strings are *set* and are only pruned after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPost {
    /// `ID`
    pub id: Option<String>,
    /// `post_date`, local wall-clock time.
    pub date: Option<String>,
    /// `post_date_gmt`
    pub date_gmt: Option<String>,
    /// `post_modified`, local wall-clock time.
    pub modified: Option<String>,
    /// `post_modified_gmt`
    pub modified_gmt: Option<String>,
    /// `post_name` (the post slug)
    pub name: Option<String>,
    /// `post_title`
    pub title: Option<String>,
    /// `post_excerpt`
    pub excerpt: Option<String>,
    /// `guid`
    pub guid: Option<String>,
    /// `comment_count`
    pub comment_count: Option<String>,
    /// `pinged`, newline separated URLs.
    pub pinged: Option<String>,
    /// `post_content`
    pub content: Option<String>,
    /// `post_content_filtered`
    pub content_filtered: Option<String>,
    /// Attached file path of the featured image (`_wp_attached_file`).
    pub image: Option<String>,
    /// Alt text of the featured image (`_wp_attachment_image_alt`).
    pub image_alt: Option<String>,
    /// Comma-joined slugs of every category and tag attached to the post.
    pub tags: Option<String>,
}

impl RawPost {
    /// The numeric post ID, coerced the same way as the `id` metadata field.
    ///
    /// Returns `0` when the column is unset or not a number.
    pub fn id(&self) -> u64 {
        self.id.as_deref().map(coerce_int).unwrap_or(0)
    }

    /// The HTML body to export: the filtered content when present, otherwise
    /// the raw content.
    pub fn source_content(&self) -> &str {
        match self.content_filtered.as_deref() {
            Some(filtered) if !filtered.is_empty() => filtered,
            _ => self.content.as_deref().unwrap_or_default(),
        }
    }

    /// The post title, if set and not blank.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Integer coercion for numeric columns: leading digits are parsed and
/// anything else (including an empty string) coerces to zero.
pub(crate) fn coerce_int(value: &str) -> u64 {
    let value = value.trim();
    let end = value.find(|c: char| !c.is_ascii_digit()).unwrap_or(value.len());
    value[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", 42)]
    #[case(" 42 ", 42)]
    #[case("0", 0)]
    #[case("", 0)]
    #[case("12abc", 12)]
    #[case("abc", 0)]
    #[case("-3", 0)]
    fn test_coerce_int(#[case] value: &str, #[case] expected: u64) {
        assert_eq!(coerce_int(value), expected);
    }

    #[test]
    fn test_source_content_prefers_filtered() {
        let post = RawPost {
            content: Some("<p>raw</p>".into()),
            content_filtered: Some("<p>filtered</p>".into()),
            ..Default::default()
        };
        assert_eq!(post.source_content(), "<p>filtered</p>");
    }

    #[test]
    fn test_source_content_falls_back_when_filtered_is_empty() {
        let post = RawPost {
            content: Some("<p>raw</p>".into()),
            content_filtered: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(post.source_content(), "<p>raw</p>");
        assert_eq!(RawPost::default().source_content(), "");
    }

    #[test]
    fn test_blank_title_is_none() {
        let post = RawPost { title: Some("   ".into()), ..Default::default() };
        assert_eq!(post.title(), None);
        let post = RawPost { title: Some(" Hello ".into()), ..Default::default() };
        assert_eq!(post.title(), Some("Hello"));
    }
}
