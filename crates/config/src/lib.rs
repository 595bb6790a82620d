//! Layered configuration for pressmark.
//!
//! See [`Config::load`] for where values come from and in which order.

mod config;
pub mod error;

pub use crate::config::{Config, DEFAULT_BATCH_SIZE, DEFAULT_PERMALINK_STRUCTURE, MarkdownConfig, Overrides};
