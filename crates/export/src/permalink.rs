//! Output paths from a WordPress permalink structure.
//!
//! The structure uses the same tokens as WordPress's own permalink setting:
//!
//! | Token        | Value                                                |
//! |--------------|------------------------------------------------------|
//! | `%year%`     | Four digit year of the (local) publication date      |
//! | `%monthnum%` | Two digit month                                      |
//! | `%day%`      | Two digit day of the month                           |
//! | `%postname%` | The post slug, or the post ID when it has no slug    |
//!
//! Any other `%token%` is copied through literally.

use exn::{OptionExt, ResultExt};
use pressmark_post::models::{RawPost, parse_naive};
use pressmark_storage::validate_path;
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};

/// WordPress's "Day and name" structure.
pub const DEFAULT_STRUCTURE: &str = "/%year%/%monthnum%/%day%/%postname%/";
const EXTENSION: &str = ".md";
const YEAR: &str = "%year%";
const MONTH: &str = "%monthnum%";
const DAY: &str = "%day%";
const POSTNAME: &str = "%postname%";

/// A permalink structure that resolves posts to Markdown file paths.
///
/// ```
/// use pressmark_export::Permalink;
/// use pressmark_post::models::RawPost;
/// use std::path::Path;
///
/// let permalink: Permalink = "/%year%/%monthnum%/%day%/%postname%/".parse().unwrap();
/// let post = RawPost {
///     id: Some("42".into()),
///     date: Some("2023-06-01 10:00:00".into()),
///     name: Some("hello-world".into()),
///     ..RawPost::default()
/// };
/// assert_eq!(permalink.resolve(&post).unwrap(), Path::new("2023/06/01/hello-world.md"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permalink {
    structure: String,
    uses_date: bool,
}

impl Default for Permalink {
    fn default() -> Self {
        Self { structure: DEFAULT_STRUCTURE.to_string(), uses_date: true }
    }
}

impl FromStr for Permalink {
    type Err = Error;

    /// Rejects structures that would put every post at the same path.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let structure = s.trim();
        if structure.trim_matches('/').is_empty() {
            exn::bail!(ErrorKind::Permalink(s.to_string()));
        }
        let uses_date = [YEAR, MONTH, DAY].iter().any(|token| structure.contains(token));
        Ok(Self { structure: structure.to_string(), uses_date })
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.structure)
    }
}

impl Permalink {
    /// The path of the post's Markdown file, relative to the output root.
    ///
    /// Fails when the structure needs a date the post doesn't have (or can't
    /// be parsed), or when the resolved path would leave the output root.
    #[instrument(level = "debug", skip_all, fields(post_id = post.id()))]
    pub fn resolve(&self, post: &RawPost) -> Result<PathBuf> {
        let id = post.id();
        let mut path = self.structure.clone();
        if self.uses_date {
            let value = post.date.as_deref().map(str::trim).filter(|d| !d.is_empty()).ok_or_raise(|| ErrorKind::Path(id))?;
            let date = parse_naive("date", value).or_raise(|| ErrorKind::Path(id))?;
            path = path
                .replace(YEAR, &format!("{:04}", date.year()))
                .replace(MONTH, &format!("{:02}", u8::from(date.month())))
                .replace(DAY, &format!("{:02}", date.day()));
        }
        // Substituted last so a slug can't inject further tokens.
        if path.contains(POSTNAME) {
            let name = match post.name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => Cow::Borrowed(name),
                _ => Cow::Owned(id.to_string()),
            };
            path = path.replace(POSTNAME, &name);
        }
        let path = path.strip_suffix('/').unwrap_or(&path);
        let path = format!("/{}{EXTENSION}", path.trim_start_matches('/'));
        validate_path(&path).or_raise(|| ErrorKind::Path(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    fn post(id: &str, date: Option<&str>, name: Option<&str>) -> RawPost {
        RawPost {
            id: Some(id.into()),
            date: date.map(Into::into),
            name: name.map(Into::into),
            ..RawPost::default()
        }
    }

    #[rstest]
    #[case(DEFAULT_STRUCTURE, "2023/06/01/hello-world.md")]
    #[case("/%year%/%postname%", "2023/hello-world.md")]
    #[case("%postname%/", "hello-world.md")]
    #[case("/blog/%year%/%monthnum%/%postname%.html/", "blog/2023/06/hello-world.html.md")]
    #[case("/%category%/%postname%/", "%category%/hello-world.md")]
    #[case("/archives/%post_id%", "archives/%post_id%.md")]
    fn test_structures(#[case] structure: &str, #[case] expected: &str) {
        let permalink: Permalink = structure.parse().unwrap();
        let post = post("7", Some("2023-06-01 10:00:00"), Some("hello-world"));
        assert_eq!(permalink.resolve(&post).unwrap(), Path::new(expected));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn test_missing_slug_falls_back_to_id(#[case] name: Option<&str>) {
        let post = post("42", Some("2023-06-01 10:00:00"), name);
        assert_eq!(Permalink::default().resolve(&post).unwrap(), Path::new("2023/06/01/42.md"));
    }

    #[test]
    fn test_slug_cannot_inject_tokens() {
        let post = post("1", Some("2023-06-01 10:00:00"), Some("%year%"));
        assert_eq!(Permalink::default().resolve(&post).unwrap(), Path::new("2023/06/01/%year%.md"));
    }

    #[test]
    fn test_date_is_zero_padded() {
        let post = post("1", Some("0999-01-02 00:00:00"), Some("old"));
        assert_eq!(Permalink::default().resolve(&post).unwrap(), Path::new("0999/01/02/old.md"));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("0000-00-00 00:00:00"))]
    #[case(Some("yesterday"))]
    fn test_unusable_date(#[case] date: Option<&str>) {
        let err = Permalink::default().resolve(&post("9", date, Some("x"))).unwrap_err();
        assert_eq!(*err, ErrorKind::Path(9));
    }

    #[test]
    fn test_date_not_needed() {
        let permalink: Permalink = "/%postname%/".parse().unwrap();
        assert_eq!(permalink.resolve(&post("9", None, Some("x"))).unwrap(), Path::new("x.md"));
    }

    #[test]
    fn test_traversal_is_rejected() {
        let permalink: Permalink = "/%postname%/".parse().unwrap();
        let err = permalink.resolve(&post("3", None, Some("../../etc/passwd"))).unwrap_err();
        assert_eq!(*err, ErrorKind::Path(3));
    }

    #[rstest]
    #[case("")]
    #[case("/")]
    #[case("  //  ")]
    fn test_empty_structure(#[case] structure: &str) {
        let err = structure.parse::<Permalink>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::Permalink(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Permalink::default().to_string(), DEFAULT_STRUCTURE);
    }
}
