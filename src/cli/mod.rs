//! # Command-Line Interface
//!
//! The `metadoc` binary: a pass-through pipeline stage built on the plugin
//! lifecycle, useful on its own for normalizing noisy upstream output.
//!
//! ## Flags
//!
//! | Flag | Purpose |
//! |------|---------|
//! | `--source <path>` | Read the source from a file instead of stdin |
//! | `--output <path>` | Directory (receives `api.json`) or `.json` file to write |
//! | `--verbose` | Debug output on stderr |
//! | `--manifest` | Print the plugin manifest and exit |
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute one pipeline stage.

mod app;
mod output;

pub use app::{identity, run, Cli, Passthrough};
pub use output::Console;
