//! Post-processing of converted content.

use std::path::Path;

/// Last chance to rewrite a document body before it is written.
///
/// Receives the converted content (heading included) and the path the
/// document will be written to.
///
/// Any `Fn(String, &Path) -> String` closure is a hook:
///
/// ```
/// use pressmark_markdown::Hook;
/// use std::path::Path;
///
/// let hook = |content: String, _: &Path| content.replace("http://", "https://");
/// assert_eq!(hook.apply("http://example.com".into(), Path::new("a.md")), "https://example.com");
/// ```
pub trait Hook: Send + Sync {
    fn apply(&self, content: String, path: &Path) -> String;
}

impl<F> Hook for F
where
    F: Fn(String, &Path) -> String + Send + Sync,
{
    fn apply(&self, content: String, path: &Path) -> String {
        self(content, path)
    }
}
