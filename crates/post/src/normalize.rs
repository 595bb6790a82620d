//! Normalization of raw post rows into front matter [`Metadata`].

use exn::OptionExt;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::models::{CategorySet, Metadata, RawPost, Timestamp, coerce_int, parse_naive};

/// Builds the front matter [`Metadata`] for a raw post row.
///
/// Unset (`NULL`) columns are skipped, set columns are trimmed, and anything
/// that ends up empty (or zero, for numeric fields) is left out. Term slugs
/// are split between `categories` and `tags` using `categories`.
///
/// # Errors
///
/// Fails if a date column is malformed, or if a local date is present
/// without its GMT counterpart.
#[instrument(level = "debug", skip_all, fields(post_id = post.id()))]
pub fn normalize(post: &RawPost, categories: &CategorySet) -> Result<Metadata> {
    let (categories, tags) = self::terms(post.tags.as_deref(), categories);
    Ok(Metadata {
        categories,
        comment_count: self::number(post.comment_count.as_deref()),
        date: self::zoned(("post_date", post.date.as_deref()), ("post_date_gmt", post.date_gmt.as_deref()))?,
        date_gmt: self::utc("post_date_gmt", post.date_gmt.as_deref())?,
        excerpt: self::text(post.excerpt.as_deref()),
        guid: self::text(post.guid.as_deref()),
        id: self::number(post.id.as_deref()),
        image: self::text(post.image.as_deref()),
        image_alt: self::text(post.image_alt.as_deref()),
        modified: self::zoned(
            ("post_modified", post.modified.as_deref()),
            ("post_modified_gmt", post.modified_gmt.as_deref()),
        )?,
        modified_gmt: self::utc("post_modified_gmt", post.modified_gmt.as_deref())?,
        name: self::text(post.name.as_deref()),
        pings: self::pings(post.pinged.as_deref()),
        tags,
    })
}

/// Trimmed pass-through; empty strings are dropped.
fn text(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Integer coercion; zero is dropped.
fn number(value: Option<&str>) -> Option<u64> {
    value.map(coerce_int).filter(|n| *n != 0)
}

/// One URL per line, with Windows line endings normalized first.
fn pings(value: Option<&str>) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };
    let value = value.replace("\r\n", "\n");
    let value = value.trim();
    if value.is_empty() {
        return Vec::new();
    }
    value.split('\n').map(str::to_string).collect()
}

fn utc(field: &'static str, value: Option<&str>) -> Result<Option<Timestamp>> {
    value.map(|v| parse_naive(field, v).map(Timestamp::utc)).transpose()
}

/// Local wall-clock time, zoned using the offset to its GMT column.
fn zoned(local: (&'static str, Option<&str>), gmt: (&'static str, Option<&str>)) -> Result<Option<Timestamp>> {
    let (local_field, Some(local)) = local else {
        return Ok(None);
    };
    let (gmt_field, gmt) = gmt;
    let local = parse_naive(local_field, local)?;
    let gmt = parse_naive(gmt_field, gmt.ok_or_raise(|| ErrorKind::MissingField(gmt_field))?)?;
    Timestamp::from_local_and_gmt(local, gmt).map(Some)
}

/// Splits the comma-joined term slugs into `(categories, tags)`.
///
/// Slugs are sorted before partitioning, so both lists come out sorted. Any
/// slug found in `known` is moved to the categories list.
fn terms(value: Option<&str>, known: &CategorySet) -> (Vec<String>, Vec<String>) {
    let Some(value) = value else {
        return (Vec::new(), Vec::new());
    };
    let mut slugs: Vec<&str> = value.trim().split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
    slugs.sort_unstable();
    // Multiple joined thumbnail rows duplicate every term slug.
    slugs.dedup();
    let (categories, tags): (Vec<&str>, Vec<&str>) = slugs.into_iter().partition(|slug| known.contains(slug));
    (
        categories.into_iter().map(str::to_string).collect(),
        tags.into_iter().map(str::to_string).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn known() -> CategorySet {
        ["news", "tutorials"].into_iter().collect()
    }

    fn post() -> RawPost {
        RawPost {
            id: Some("42".into()),
            date: Some("2023-06-01 10:00:00".into()),
            date_gmt: Some("2023-06-01 14:00:00".into()),
            modified: Some("2023-06-02 09:30:00".into()),
            modified_gmt: Some("2023-06-02 13:30:00".into()),
            name: Some("hello-world".into()),
            title: Some("Hello World".into()),
            excerpt: Some("  A short excerpt.  ".into()),
            guid: Some("https://example.com/?p=42".into()),
            comment_count: Some("3".into()),
            pinged: Some(String::new()),
            content: Some("<p>Hello</p>".into()),
            content_filtered: Some(String::new()),
            image: Some("2023/06/hello.jpg".into()),
            image_alt: Some("A greeting".into()),
            tags: Some("tutorials,news,2023".into()),
        }
    }

    #[test]
    fn test_partitions_categories_from_tags() {
        let meta = normalize(&post(), &known()).unwrap();
        assert_eq!(meta.categories, vec!["news", "tutorials"]);
        assert_eq!(meta.tags, vec!["2023"]);
        assert!(meta.tags.iter().all(|t| !meta.categories.contains(t)));
    }

    #[test]
    fn test_only_categories_leaves_tags_empty() {
        let post = RawPost { tags: Some("news,tutorials".into()), ..post() };
        let meta = normalize(&post, &known()).unwrap();
        assert_eq!(meta.categories, vec!["news", "tutorials"]);
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_no_terms_keeps_empty_categories() {
        let post = RawPost { tags: None, ..post() };
        let meta = normalize(&post, &known()).unwrap();
        assert!(meta.categories.is_empty());
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_duplicate_and_empty_slugs_are_dropped() {
        let post = RawPost { tags: Some("b,,a,b, news".into()), ..post() };
        let meta = normalize(&post, &known()).unwrap();
        assert_eq!(meta.categories, vec!["news"]);
        assert_eq!(meta.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_slug_in_both_taxonomies_listed_once() {
        // `news` is joined once from `category` and once from `post_tag`.
        let post = RawPost { tags: Some("news,rust,news".into()), ..post() };
        let meta = normalize(&post, &known()).unwrap();
        assert_eq!(meta.categories, vec!["news"]);
        assert_eq!(meta.tags, vec!["rust"]);
    }

    #[test]
    fn test_dates_are_zoned() {
        let meta = normalize(&post(), &known()).unwrap();
        let date = meta.date.unwrap();
        assert_eq!(date.offset_string(), "-04:00");
        assert_eq!(date.to_string(), "2023-06-01T10:00:00-04:00");
        assert_eq!(meta.date_gmt.unwrap().to_string(), "2023-06-01T14:00:00+00:00");
        assert_eq!(meta.modified.unwrap().to_string(), "2023-06-02T09:30:00-04:00");
    }

    #[test]
    fn test_zero_and_empty_fields_are_pruned() {
        let post = RawPost {
            comment_count: Some("0".into()),
            pinged: Some(" \r\n ".into()),
            excerpt: Some("   ".into()),
            image: None,
            image_alt: None,
            ..post()
        };
        let meta = normalize(&post, &known()).unwrap();
        assert_eq!(meta.comment_count, None);
        assert!(meta.pings.is_empty());
        assert_eq!(meta.excerpt, None);
        assert_eq!(meta.image, None);
        assert_eq!(meta.image_alt, None);
    }

    #[test]
    fn test_pruned_keys_are_absent_from_yaml() {
        let post = RawPost { comment_count: Some("0".into()), pinged: Some(String::new()), tags: None, ..post() };
        let yaml = serde_yaml::to_string(&normalize(&post, &known()).unwrap()).unwrap();
        assert!(yaml.starts_with("categories: []\n"));
        assert!(!yaml.contains("comment_count"));
        assert!(!yaml.contains("pings"));
        assert!(!yaml.contains("tags"));
        assert!(yaml.contains("id: 42\n"));
    }

    #[test]
    fn test_pings_split_per_line() {
        let post = RawPost { pinged: Some("\r\nhttps://a.example\r\nhttps://b.example\r\n".into()), ..post() };
        let meta = normalize(&post, &known()).unwrap();
        assert_eq!(meta.pings, vec!["https://a.example", "https://b.example"]);
    }

    #[rstest]
    #[case(Some("0"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    #[case(Some("7"), Some(7))]
    fn test_id_coercion(#[case] id: Option<&str>, #[case] expected: Option<u64>) {
        let post = RawPost { id: id.map(str::to_string), ..post() };
        assert_eq!(normalize(&post, &known()).unwrap().id, expected);
    }

    #[test]
    fn test_malformed_date_fails_the_post() {
        let post = RawPost { date: Some("0000-00-00 00:00:00".into()), ..post() };
        let err = normalize(&post, &known()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedTimestamp { field: "post_date", .. }));
    }

    #[test]
    fn test_local_date_without_gmt_fails_the_post() {
        let post = RawPost { date_gmt: None, ..post() };
        let err = normalize(&post, &known()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingField("post_date_gmt")));
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let meta = normalize(&post(), &known()).unwrap();
        assert_eq!(meta.excerpt.as_deref(), Some("A short excerpt."));
        assert_eq!(meta.name.as_deref(), Some("hello-world"));
    }
}
