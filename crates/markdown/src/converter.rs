//! HTML to Markdown conversion.

use html2md::clean_markdown;
use html2md::rewriter::writer::get_rewriter_settings;
use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, doc_comments, doc_text, element, end_tag, rewrite_str};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{ErrorKind, Result};

/// Elements that become one Markdown block each. Breaks inside them are left
/// to the rewriter.
const BLOCKS: &str = "p, h1, h2, h3, h4, h5, h6, ul, ol, dl, blockquote, pre, table, figure, hr, address";
/// Wrappers whose children are blocks in their own right.
const CONTAINERS: &str = "div, section, article, aside, header, footer, main";

/// Stands in for a paragraph break, which the rewriter would collapse.
const BREAK: &str = "\u{E000}";
const COMMENT_OPEN: char = '\u{E001}';
const COMMENT_CLOSE: char = '\u{E002}';

/// Turns an HTML fragment into Markdown.
pub trait Converter: Send + Sync {
    fn convert(&self, html: &str) -> Result<String>;
}

/// Converter backed by `fast_html2md`'s streaming rewriter.
///
/// Top-level blocks and blank-line separated text come out as separate
/// paragraphs, and `<br>` becomes a plain line break.
#[derive(Debug, Clone, Copy)]
pub struct Html2Md {
    /// Emit CommonMark rather than the converter's looser default dialect.
    pub commonmark: bool,
    /// Keep HTML comments (such as `<!--more-->`) verbatim in the output.
    pub preserve_comments: bool,
}

impl Default for Html2Md {
    fn default() -> Self {
        Self { commonmark: true, preserve_comments: true }
    }
}

impl Converter for Html2Md {
    fn convert(&self, html: &str) -> Result<String> {
        let (marked, comments) = self.mark_blocks(html)?;
        let markdown = rewrite_str(&marked, get_rewriter_settings(self.commonmark, &None, None))
            .map_err(|e| ErrorKind::Conversion(e.to_string()))?;
        let mut markdown = clean_markdown(&markdown)
            .split(BREAK)
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        for (index, text) in comments.iter().enumerate() {
            markdown = markdown.replace(&comment_placeholder(index), &format!("<!--{text}-->"));
        }
        Ok(markdown)
    }
}

impl Html2Md {
    /// Mark where top-level blocks end and swap comments for placeholders.
    fn mark_blocks(&self, html: &str) -> Result<(String, Vec<String>)> {
        let depth = Rc::new(Cell::new(0usize));
        let comments = Rc::new(RefCell::new(Vec::new()));
        let preserve_comments = self.preserve_comments;

        let block_depth = Rc::clone(&depth);
        let container_depth = Rc::clone(&depth);
        let text_depth = Rc::clone(&depth);
        let comment_depth = Rc::clone(&depth);
        let stash = Rc::clone(&comments);

        let settings = RewriteStrSettings {
            element_content_handlers: vec![
                element!(BLOCKS, move |el| {
                    if block_depth.get() == 0 {
                        el.after(BREAK, ContentType::Html);
                    }
                    if let Some(handlers) = el.end_tag_handlers() {
                        block_depth.set(block_depth.get() + 1);
                        let depth = Rc::clone(&block_depth);
                        handlers.push(end_tag!(move |_| {
                            depth.set(depth.get().saturating_sub(1));
                            Ok(())
                        }));
                    }
                    Ok(())
                }),
                element!(CONTAINERS, move |el| {
                    if container_depth.get() == 0 {
                        el.after(BREAK, ContentType::Html);
                    }
                    Ok(())
                }),
            ],
            document_content_handlers: vec![
                doc_text!(move |chunk| {
                    if text_depth.get() == 0
                        && let Some(text) = mark_blank_lines(chunk.as_str())
                    {
                        // Raw source text: entities are still encoded.
                        chunk.replace(&text, ContentType::Html);
                    }
                    Ok(())
                }),
                doc_comments!(move |comment| {
                    if !preserve_comments {
                        comment.remove();
                        return Ok(());
                    }
                    let mut stash = stash.borrow_mut();
                    let placeholder = comment_placeholder(stash.len());
                    stash.push(comment.text());
                    match comment_depth.get() {
                        0 => comment.replace(&format!("{BREAK}{placeholder}{BREAK}"), ContentType::Html),
                        _ => comment.replace(&placeholder, ContentType::Html),
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        };

        let marked = rewrite_str(html, settings).map_err(|e| ErrorKind::Conversion(e.to_string()))?;
        let comments = comments.take();
        Ok((marked, comments))
    }
}

fn comment_placeholder(index: usize) -> String {
    format!("{COMMENT_OPEN}{index}{COMMENT_CLOSE}")
}

/// Replace every whitespace run spanning a blank line with [`BREAK`].
///
/// Returns `None` when there is nothing to replace.
fn mark_blank_lines(text: &str) -> Option<String> {
    let mut marked = String::with_capacity(text.len());
    let mut changed = false;
    let mut rest = text;
    while let Some(start) = rest.find(|c: char| c.is_ascii_whitespace()) {
        let (before, run) = rest.split_at(start);
        let end = run.find(|c: char| !c.is_ascii_whitespace()).unwrap_or(run.len());
        let (run, after) = run.split_at(end);
        marked.push_str(before);
        if run.matches('\n').count() >= 2 {
            marked.push_str(BREAK);
            changed = true;
        } else {
            marked.push_str(run);
        }
        rest = after;
    }
    marked.push_str(rest);
    changed.then_some(marked)
}
