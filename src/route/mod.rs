//! # Output Routing
//!
//! Decides where a finished stage's value goes.
//!
//! ## Precedence
//!
//! | Order | Signal | Example |
//! |-------|--------|---------|
//! | 1 | Explicitly assigned output | `run.set_output("./docs")` |
//! | 2 | `--output` argument | `toolC --output ./docs` |
//! | 3 | `--output` in the lifecycle script | `npm_lifecycle_script="toolA \| toolB --output ./docs"` |
//!
//! A target ending in `.json` is a file; anything else is a directory that
//! receives `api.json`. With no target at all, the `--source` file is
//! overwritten, or the value goes to stdout.
//!
//! ## Pipes
//!
//! A stage that feeds a later stage of the recorded pipeline also echoes its
//! value to stdout ([`PipeTopology::is_piped`]).

mod pipe;
mod router;
mod writer;

pub use pipe::PipeTopology;
pub use router::{resolve_output, OutputTarget, RouteError, JSON_SUFFIX};
pub use writer::{echo, plan, EmitPlan};
