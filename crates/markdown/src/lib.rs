//! Building the Markdown documents that posts are exported as.
//!
//! A document is YAML front matter followed by the converted post body:
//!
//! ```text
//! ---
//! categories:
//! - news
//! id: 42
//! ---
//!
//! Hello World
//! ===========
//!
//! Converted body...
//! ```

mod converter;
pub mod error;
mod frontmatter;
mod hook;
mod transform;

pub use crate::converter::{Converter, Html2Md};
pub use crate::frontmatter::{FrontMatter, Yaml, document};
pub use crate::hook::Hook;
pub use crate::transform::Transformer;
