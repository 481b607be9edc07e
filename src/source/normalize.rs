//! Source normalization
//!
//! Inline text that is already a complete JSON document is taken as-is, so
//! arrays and scalars pass through unchanged. Otherwise the text is assumed
//! to carry log lines printed by an earlier pipeline stage: the outermost
//! `{...}` span is isolated and only that span is parsed.
//!
//! Input holding several independent top-level objects, or noise containing
//! a `}` after the payload, is unsupported: the greedy span then covers more
//! than one value and parsing fails with a diagnostic.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// How a source value was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Raw input named a loadable data module on disk
    ModulePath,

    /// Raw input carried the JSON text itself
    InlineJson,
}

/// Variants are attempted in this order
pub const RESOLUTION_ORDER: [SourceKind; 2] = [SourceKind::ModulePath, SourceKind::InlineJson];

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::ModulePath => "module path",
            SourceKind::InlineJson => "inline json",
        }
    }
}

/// Why raw input could not be loaded as a module
#[derive(Debug, Error)]
pub enum ModuleLoadError {
    #[error("Input is not a path to an existing file")]
    NotAPath,

    #[error("Unsupported module type: {0}")]
    Unsupported(PathBuf),

    #[error("Failed to read module {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse JSON module {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML module {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Unrecoverable inline parse failure
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseFailure {
    /// Parser error message
    pub message: String,

    /// The offending text, verbatim
    pub raw: String,

    /// Character offset into `raw` where parsing failed, if the parser reported one
    pub offset: Option<usize>,
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("No source available. The previous pipeline stage produced no output.")]
    EmptySource,

    #[error("Failed to parse source: {0}")]
    Parse(ParseFailure),
}

/// A successfully resolved source value
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub kind: SourceKind,
    pub value: Value,
}

/// Normalizes raw input into a structured value
pub fn normalize(raw: Option<&str>) -> Result<Value, NormalizeError> {
    resolve(raw).map(|resolved| resolved.value)
}

/// Normalizes raw input, reporting which variant succeeded
pub fn resolve(raw: Option<&str>) -> Result<Resolved, NormalizeError> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Err(NormalizeError::EmptySource),
    };

    let mut failure = None;
    for kind in RESOLUTION_ORDER {
        let attempt = match kind {
            SourceKind::ModulePath => load_module(raw).ok(),
            SourceKind::InlineJson => match parse_inline(raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    failure = Some(e);
                    None
                }
            },
        };

        if let Some(value) = attempt {
            return Ok(Resolved { kind, value });
        }
    }

    Err(NormalizeError::Parse(failure.unwrap_or_else(|| ParseFailure {
        message: "No JSON object found".to_string(),
        raw: raw.to_string(),
        offset: None,
    })))
}

/// Loads `raw` as a path to a `.json` or `.toml` data module
pub fn load_module(raw: &str) -> Result<Value, ModuleLoadError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains('\n') {
        return Err(ModuleLoadError::NotAPath);
    }

    let path = Path::new(trimmed);
    if !path.is_file() {
        return Err(ModuleLoadError::NotAPath);
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let read = || {
        fs::read_to_string(path).map_err(|source| ModuleLoadError::Read {
            path: path.to_path_buf(),
            source,
        })
    };

    match ext.as_deref() {
        Some("json") => serde_json::from_str(&read()?).map_err(|source| ModuleLoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Some("toml") => toml::from_str(&read()?).map_err(|source| ModuleLoadError::Toml {
            path: path.to_path_buf(),
            source,
        }),
        _ => Err(ModuleLoadError::Unsupported(path.to_path_buf())),
    }
}

fn object_span() -> &'static Regex {
    static OBJECT_SPAN: OnceLock<Regex> = OnceLock::new();
    OBJECT_SPAN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("object span pattern is valid"))
}

/// Isolates the outermost `{...}` span, returning its byte offset and text
///
/// Falls back to the whole input when no braces are present, so the parser
/// still gets to report a position.
pub fn extract_object(raw: &str) -> (usize, &str) {
    match object_span().find(raw) {
        Some(m) => (m.start(), m.as_str()),
        None => (0, raw),
    }
}

/// Parses inline text, tolerating log noise around the object
///
/// A failed parse is reported against the extracted span.
pub fn parse_inline(raw: &str) -> Result<Value, ParseFailure> {
    if let Ok(value) = serde_json::from_str(raw.trim()) {
        return Ok(value);
    }

    let (start, span) = extract_object(raw);

    serde_json::from_str(span).map_err(|e| {
        let offset = error_byte_offset(span, &e).map(|b| raw[..start + b].chars().count());

        ParseFailure {
            message: e.to_string(),
            raw: raw.to_string(),
            offset,
        }
    })
}

/// Converts the parser's line/column into a byte offset within `text`
fn error_byte_offset(text: &str, err: &serde_json::Error) -> Option<usize> {
    if err.line() == 0 {
        return None;
    }

    let line_start = if err.line() == 1 {
        0
    } else {
        text.match_indices('\n').nth(err.line() - 2)?.0 + 1
    };

    let mut offset = (line_start + err.column().saturating_sub(1)).min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    Some(offset)
}
