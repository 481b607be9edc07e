//! Main CLI application structure

use anyhow::{Context, Result};
use clap::Parser;

use super::output::Console;
use crate::invocation::Invocation;
use crate::plugin::{Lifecycle, Plugin, PluginIdentity, Run};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "metadoc")]
#[command(author, version, about = "Pass-through stage for documentation pipelines")]
pub struct Cli {
    /// File to read the source from (reads stdin when omitted)
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "true")]
    pub source: Option<String>,

    /// Directory (receives api.json) or .json file to write to
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "true")]
    pub output: Option<String>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', env = "METADOC_VERBOSE")]
    pub verbose: bool,

    /// Print the plugin manifest and exit
    #[arg(long)]
    pub manifest: bool,
}

/// Forwards its source unchanged
pub struct Passthrough;

impl Plugin for Passthrough {
    fn process(&mut self, run: &mut Run<'_>) -> Result<()> {
        run.console()
            .verbose_ctx("process", "Passing source through unchanged");
        Ok(())
    }
}

/// Identity of the bundled binary
pub fn identity() -> PluginIdentity {
    PluginIdentity::from_package(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        .with_description(env!("CARGO_PKG_DESCRIPTION"))
}

/// Main entry point for the CLI
///
/// `--source` and `--output` are declared for `--help` and validation only;
/// the lifecycle probes the raw arguments itself.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let identity = identity();

    if cli.manifest {
        let manifest = serde_json::to_string_pretty(&identity.manifest())
            .context("Failed to serialize manifest")?;
        println!("{}", manifest);
        return Ok(());
    }

    let config = Config::load()?;
    let console = Console::new(cli.verbose || config.verbose);
    console.verbose(&format!("{} {} starting", identity.name(), identity.version()));

    let invocation = Invocation::from_env(&config.lifecycle_env);
    if let Some(script) = invocation.lifecycle() {
        console.verbose_ctx("invocation", &format!("Lifecycle script: {}", script.raw()));
    }

    let mut lifecycle = Lifecycle::new(identity, config, invocation, console);
    lifecycle.run(&mut Passthrough)?;

    console.verbose("Run completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_output_flag_parses() {
        let cli = Cli::try_parse_from(["metadoc", "--output", "--source", "x.json"]).unwrap();

        assert_eq!(cli.output.as_deref(), Some("true"));
        assert_eq!(cli.source.as_deref(), Some("x.json"));
    }

    #[test]
    fn binary_identity_matches_package() {
        let identity = identity();
        assert_eq!(identity.name(), "metadoc");
        assert_eq!(identity.version(), env!("CARGO_PKG_VERSION"));
    }
}
