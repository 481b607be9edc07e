//! # Storage Layer
//!
//! Configuration loading and the filesystem collaborator used for output.
//!
//! ## Files
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Global config | TOML | `~/.config/metadoc/config.toml` |
//! | Project config | TOML | `./metadoc.toml` |
//! | Output | Pretty JSON | `--output` target, or the `--source` file |
//! | Diagnostic log | Raw text | `./metadoc-source.log` |
//!
//! Output writes are atomic (temp file + rename).

mod config;
pub mod fs;

pub use config::{Config, ConfigError};
