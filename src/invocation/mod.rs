//! # Invocation Context
//!
//! Read-only view of how this pipeline stage was launched.
//!
//! ## Signal Sources
//!
//! | Source | Type | Purpose |
//! |--------|------|---------|
//! | Process arguments | [`Args`] | `--source` / `--output` given directly to this stage |
//! | Lifecycle script | [`LifecycleScript`] | Full command line recorded by the script runner |
//!
//! The lifecycle script is only a fallback: a downstream stage of
//! `toolA --source ./src | toolB | toolC --output ./docs` never sees the
//! flags a wrapping script passed to its neighbours, but the script runner
//! records the whole line in an environment variable.
//!
//! Both sources are read once at startup and handed around explicitly as an
//! [`Invocation`], so routing and pipe detection can be tested with literal
//! fixtures instead of mutating the process environment.

mod args;
mod lifecycle;

pub use args::{flag_token, scan, Args, FlagValue, FLAG_PREFIX};
pub use lifecycle::LifecycleScript;

/// Arguments and lifecycle script captured at startup
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    args: Args,
    lifecycle: Option<LifecycleScript>,
}

impl Invocation {
    pub fn new(args: Args, lifecycle: Option<LifecycleScript>) -> Self {
        Self { args, lifecycle }
    }

    /// Captures the live process arguments and the lifecycle script stored
    /// in `lifecycle_env`
    pub fn from_env(lifecycle_env: &str) -> Self {
        Self {
            args: Args::from_env(),
            lifecycle: LifecycleScript::from_env(lifecycle_env),
        }
    }

    pub fn args(&self) -> &Args {
        &self.args
    }

    pub fn lifecycle(&self) -> Option<&LifecycleScript> {
        self.lifecycle.as_ref()
    }

    /// Probes the process arguments for a flag
    pub fn probe(&self, flag: &str) -> Option<FlagValue> {
        self.args.probe(flag)
    }

    /// Looks a flag up in the lifecycle script, if one was recorded
    pub fn lifecycle_value(&self, flag: &str) -> Option<FlagValue> {
        self.lifecycle.as_ref().and_then(|script| script.value(flag))
    }
}
