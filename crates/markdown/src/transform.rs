//! The content pipeline applied to every post body.

use std::borrow::Cow;
use std::path::Path;
use tracing::instrument;

use crate::converter::{Converter, Html2Md};
use crate::error::Result;
use crate::hook::Hook;

const PRE_TAG: &str = "<pre>";

/// What `htmlspecialchars` escapes. Named entities such as `&nbsp;` stay
/// encoded for the converter.
const SPECIAL_CHARS: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#039;", "'"),
    ("&#39;", "'"),
];

/// Turns a post's stored HTML into the body of its Markdown document.
///
/// In order:
///
/// 1. Windows line endings become `\n`.
/// 2. The special character entities (`&amp;`, `&lt;`, `&gt;`, `&quot;`,
///    `&#039;`) are decoded, unless the content contains a `<pre>` block
///    (code samples keep their escaped entities).
/// 3. The [`Converter`] produces Markdown.
/// 4. A non-empty title is prepended as a setext heading.
/// 5. The [`Hook`], if any, gets the final say.
pub struct Transformer {
    converter: Box<dyn Converter>,
    hook: Option<Box<dyn Hook>>,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(Html2Md::default())
    }
}

impl Transformer {
    pub fn new(converter: impl Converter + 'static) -> Self {
        Self { converter: Box::new(converter), hook: None }
    }

    pub fn with_converter(mut self, converter: impl Converter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    pub fn with_hook(mut self, hook: impl Hook + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    #[instrument(level = "debug", skip(self, content), fields(content_size = content.len()))]
    pub fn transform(&self, content: &str, title: Option<&str>, path: &Path) -> Result<String> {
        let content = normalize_line_endings(content);
        let content = match content.contains(PRE_TAG) {
            true => content,
            false => Cow::Owned(decode_special_chars(&content).into_owned()),
        };
        let mut markdown = self.converter.convert(&content)?;
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            markdown = format!("{}\n\n{markdown}", heading(title));
        }
        Ok(match &self.hook {
            Some(hook) => hook.apply(markdown, path),
            None => markdown,
        })
    }
}

fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    match content.contains("\r\n") {
        true => Cow::Owned(content.replace("\r\n", "\n")),
        false => Cow::Borrowed(content),
    }
}

/// Single pass, so `&amp;lt;` becomes `&lt;` and not `<`.
fn decode_special_chars(content: &str) -> Cow<'_, str> {
    if !content.contains('&') {
        return Cow::Borrowed(content);
    }
    let mut decoded = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        rest = &rest[start..];
        match SPECIAL_CHARS.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, plain)) => {
                decoded.push_str(plain);
                rest = &rest[entity.len()..];
            },
            None => {
                decoded.push('&');
                rest = &rest[1..];
            },
        }
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}

/// Setext heading: the title underlined with one `=` per character.
fn heading(title: &str) -> String {
    format!("{title}\n{}", "=".repeat(title.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    /// Returns its input untouched so tests can see exactly what reached it.
    struct Identity;
    impl Converter for Identity {
        fn convert(&self, html: &str) -> Result<String> {
            Ok(html.to_string())
        }
    }

    struct Broken;
    impl Converter for Broken {
        fn convert(&self, _: &str) -> Result<String> {
            exn::bail!(ErrorKind::Conversion("unbalanced tags".into()))
        }
    }

    fn path() -> &'static Path {
        Path::new("2023/06/01/hello.md")
    }

    #[test]
    fn test_line_endings() {
        let out = Transformer::new(Identity).transform("a\r\nb\r\n", None, path()).unwrap();
        assert_eq!(out, "a\nb\n");
    }

    #[rstest]
    #[case("Fish &amp; Chips", "Fish & Chips")]
    #[case("&lt;b&gt;", "<b>")]
    #[case("caf&eacute;", "caf&eacute;")]
    #[case("a&nbsp;b", "a&nbsp;b")]
    #[case("&quot;hi&quot; &#039;there&#039;", "\"hi\" 'there'")]
    #[case("&amp;lt;b&amp;gt;", "&lt;b&gt;")]
    #[case("AT&T &copy", "AT&T &copy")]
    #[case("<pre>&lt;b&gt;</pre>", "<pre>&lt;b&gt;</pre>")]
    #[case("<p>x &amp; y</p><pre>1 &lt; 2</pre>", "<p>x &amp; y</p><pre>1 &lt; 2</pre>")]
    fn test_special_chars_decoded_outside_pre(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Transformer::new(Identity).transform(input, None, path()).unwrap(), expected);
    }

    #[test]
    fn test_pre_with_attributes_is_decoded() {
        let out = Transformer::new(Identity).transform(r#"<pre class="x">&amp;</pre>"#, None, path()).unwrap();
        assert_eq!(out, r#"<pre class="x">&</pre>"#);
    }

    #[rstest]
    #[case(Some("Hello"), "Hello\n=====\n\nbody")]
    #[case(Some("Café"), "Café\n====\n\nbody")]
    #[case(Some(""), "body")]
    #[case(None, "body")]
    fn test_heading(#[case] title: Option<&str>, #[case] expected: &str) {
        assert_eq!(Transformer::new(Identity).transform("body", title, path()).unwrap(), expected);
    }

    #[test]
    fn test_hook_sees_heading_and_path() {
        let seen = Arc::new(Mutex::new(None));
        let recorder = Arc::clone(&seen);
        let transformer = Transformer::new(Identity).with_hook(move |content: String, path: &Path| {
            *recorder.lock().unwrap() = Some(path.to_path_buf());
            content.to_uppercase()
        });
        let out = transformer.transform("body", Some("Hi"), path()).unwrap();
        assert_eq!(out, "HI\n==\n\nBODY");
        assert_eq!(seen.lock().unwrap().as_deref(), Some(path()));
    }

    #[test]
    fn test_conversion_failure_propagates() {
        let err = Transformer::new(Broken).transform("<p>", Some("Title"), path()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Conversion(_)));
    }

    #[test]
    fn test_default_converter() {
        let out = Transformer::default().transform("<p>Fish &amp;amp; Chips</p>", Some("Menu"), path()).unwrap();
        assert!(out.starts_with("Menu\n====\n\n"), "{out:?}");
        assert!(out.contains("Fish &"), "{out:?}");
    }
}
