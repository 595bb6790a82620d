//! YAML front matter.

use exn::ResultExt;
use pressmark_post::models::Metadata;

use crate::error::{ErrorKind, Result};

const FENCE: &str = "---\n";

/// Serializes post metadata into the block between the `---` fences.
pub trait FrontMatter: Send + Sync {
    /// The serialized mapping, ending in a newline.
    fn render(&self, metadata: &Metadata) -> Result<String>;
}

/// Front matter as a YAML mapping, keys in [`Metadata`] field order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl FrontMatter for Yaml {
    fn render(&self, metadata: &Metadata) -> Result<String> {
        let mut yaml = serde_yaml::to_string(metadata).or_raise(|| ErrorKind::Serialization)?;
        if !yaml.ends_with('\n') {
            yaml.push('\n');
        }
        Ok(yaml)
    }
}

/// Assemble a complete document: fenced front matter, a blank line, then the
/// content.
pub fn document(front_matter: &str, content: &str) -> String {
    let mut document = String::with_capacity(FENCE.len() * 2 + front_matter.len() + content.len() + 1);
    document.push_str(FENCE);
    document.push_str(front_matter);
    if !front_matter.is_empty() && !front_matter.ends_with('\n') {
        document.push('\n');
    }
    document.push_str(FENCE);
    document.push('\n');
    document.push_str(content);
    document
}
