//! Parse-failure diagnostics
//!
//! Rendering is split from printing so the clipped snippet and the
//! offset-marked excerpt can be asserted on directly.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Characters kept from each end of the offending text
pub const SNIPPET_EDGE: usize = 75;

/// Width of the excerpt window around a failure offset
pub const EXCERPT_WIDTH: usize = 75;

/// Characters of context shown before the failing character
pub const EXCERPT_LEAD: usize = 10;

/// Clips `text` to its first and last [`SNIPPET_EDGE`] characters
pub fn snippet(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= SNIPPET_EDGE * 2 {
        return text.to_string();
    }

    let head: String = chars[..SNIPPET_EDGE].iter().collect();
    let tail: String = chars[chars.len() - SNIPPET_EDGE..].iter().collect();
    format!("{} ... {}", head, tail)
}

/// A window of the offending text with the failing character marked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    /// Character offset of the window start within the full text
    pub start: usize,

    /// The window, with line breaks and tabs flattened to spaces
    pub window: String,

    /// A caret line aligned under the failing character
    pub marker: String,
}

impl std::fmt::Display for Excerpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.window)?;
        write!(f, "{}", self.marker)
    }
}

/// Builds the excerpt around character `offset` of `text`
///
/// Returns `None` for empty text. Offsets past the end mark the last character.
pub fn excerpt(text: &str, offset: usize) -> Option<Excerpt> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return None;
    }

    let offset = offset.min(chars.len() - 1);
    let start = offset.saturating_sub(EXCERPT_LEAD);
    let end = (start + EXCERPT_WIDTH).min(chars.len());

    let window = chars[start..end]
        .iter()
        .map(|&c| if c.is_control() { ' ' } else { c })
        .collect();
    let marker = format!("{}^", " ".repeat(offset - start));

    Some(Excerpt {
        start,
        window,
        marker,
    })
}

/// Persists the offending text verbatim for post-mortem inspection
pub fn write_log(path: &Path, raw: &str) -> Result<()> {
    fs::write(path, raw)
        .with_context(|| format!("Failed to write diagnostic log: {}", path.display()))
}
