//! Post records and front matter metadata.
//!
//! A [`RawPost`](models::RawPost) is one row of the export query: every
//! column as an optional string, exactly as the database returned it.
//! [`normalize`] turns it into [`Metadata`](models::Metadata), the ordered
//! front matter mapping written at the top of every exported file.

pub mod error;
pub mod models;
mod normalize;

pub use crate::normalize::normalize;
