//! # Source Ingestion
//!
//! Turns whatever arrived on the input side of a pipeline stage into a
//! structured JSON value.
//!
//! ## Resolution Order
//!
//! | Step | Variant | Accepts |
//! |------|---------|---------|
//! | 1 | [`SourceKind::ModulePath`] | Path to an existing `.json` or `.toml` file |
//! | 2 | [`SourceKind::InlineJson`] | Text with a `{...}` object, possibly wrapped in log noise |
//!
//! Each step returns a typed result; the normalizer inspects it and moves on.
//! Only when both fail does ingestion fail, with a [`ParseFailure`] carrying
//! enough context to print a snippet and an offset-marked excerpt.
//!
//! ## Stdin
//!
//! When no `--source` file is given, [`StdinCollector`] reads the upstream
//! stage's output with a bounded wait for the first byte.

mod diagnostics;
mod normalize;
mod stdin;

pub use diagnostics::{excerpt, snippet, write_log, Excerpt, EXCERPT_LEAD, EXCERPT_WIDTH, SNIPPET_EDGE};
pub use normalize::{
    extract_object, load_module, normalize, parse_inline, resolve, ModuleLoadError,
    NormalizeError, ParseFailure, Resolved, SourceKind, RESOLUTION_ORDER,
};
pub use stdin::{StdinCollector, StdinError};
