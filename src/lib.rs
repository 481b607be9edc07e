//! metadoc - base for chainable documentation-generator plugins
//!
//! Each plugin reads a source payload (a file, or another stage's piped
//! output mixed with log noise), transforms it, and hands the JSON result to
//! a file or to the next stage:
//!
//! ```text
//! toolA --source ./src | toolB | toolC --output ./docs
//! ```

pub mod invocation;
pub mod source;
pub mod route;
pub mod storage;
pub mod plugin;
pub mod cli;

pub use invocation::{Args, FlagValue, Invocation, LifecycleScript};
pub use plugin::{Lifecycle, Plugin, PluginIdentity, PluginManifest, Run, Stage};
pub use route::{OutputTarget, PipeTopology};
pub use source::{normalize, NormalizeError};
pub use storage::Config;
