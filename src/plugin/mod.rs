//! # Plugin Base
//!
//! Shared plumbing for chainable documentation-generator stages.
//!
//! ## Overview
//!
//! A plugin implements [`Plugin::process`]; everything around it is handled
//! by [`Lifecycle`]:
//!
//! ```text
//! toolA --source ./src | toolB | toolC --output ./docs
//!
//!   --source file or stdin ──> normalize ──> process() ──> file and/or stdout
//! ```
//!
//! Stages talk only through stdin/stdout. A stage that is not last in the
//! recorded pipeline echoes its value for the next one to read.
//!
//! ## Manifest
//!
//! Every plugin supports `--manifest` to declare its name, version and
//! operations as JSON.
//!
//! ## Key Types
//!
//! - [`Plugin`] - Trait implemented by each concrete stage
//! - [`Lifecycle`] - Runs one ingest-process-emit cycle
//! - [`Run`] - Per-run state handed to `process`
//! - [`PluginIdentity`] - Name and version
//! - [`PluginManifest`] - Declares plugin capabilities

mod identity;
mod lifecycle;

pub use identity::{PluginIdentity, PluginManifest};
pub use lifecycle::{Lifecycle, Plugin, Run, Stage};
