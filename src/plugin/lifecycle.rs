//! Plugin lifecycle: ingest, process, emit
//!
//! ```text
//! idle ──> ingesting ──> processing ──> emitting ──> done
//!              │              │             │
//!              └──────────────┴─────────────┴──> failed
//! ```
//!
//! Each [`Lifecycle`] performs exactly one cycle. Emission happens through
//! [`Run::emit`], which a plugin may call itself; otherwise the lifecycle
//! finalizes the run after `process` returns. Either way the value is written
//! at most once.

use std::cell::{Cell, OnceCell};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use super::identity::PluginIdentity;
use crate::cli::Console;
use crate::invocation::{FlagValue, Invocation};
use crate::route::{self, OutputTarget, PipeTopology};
use crate::source::{self, NormalizeError, ParseFailure, StdinCollector, StdinError};
use crate::storage::fs::write_json;
use crate::storage::Config;

/// A concrete pipeline stage
pub trait Plugin {
    /// Called once with the freshly normalized source, before [`Plugin::process`]
    fn on_source(&mut self, _source: &Value) {}

    /// Transforms the run's source value
    fn process(&mut self, run: &mut Run<'_>) -> Result<()>;
}

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Ingesting,
    Processing,
    Emitting,
    Done,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Ingesting => "ingesting",
            Stage::Processing => "processing",
            Stage::Emitting => "emitting",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

/// State of a single ingest-process-emit cycle, handed to [`Plugin::process`]
pub struct Run<'a> {
    source: Value,
    source_path: Option<PathBuf>,
    explicit_output: Option<PathBuf>,
    target: OnceCell<Option<OutputTarget>>,
    identity: &'a PluginIdentity,
    config: &'a Config,
    invocation: &'a Invocation,
    console: &'a Console,
    piped: bool,
    out: &'a mut dyn Write,
    emitted: bool,
}

impl<'a> Run<'a> {
    pub fn identity(&self) -> &PluginIdentity {
        self.identity
    }

    pub fn invocation(&self) -> &Invocation {
        self.invocation
    }

    pub fn console(&self) -> &Console {
        self.console
    }

    /// The current source value
    pub fn source(&self) -> &Value {
        &self.source
    }

    /// Alias of [`Run::source`]
    pub fn data(&self) -> &Value {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut Value {
        &mut self.source
    }

    /// Replaces the source value with a transformed one
    pub fn set_source(&mut self, value: Value) {
        self.source = value;
    }

    /// The `--source` file this run was read from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Whether this stage feeds a later stage of the pipeline
    pub fn is_piped(&self) -> bool {
        self.piped
    }

    /// Assigns the output explicitly; takes precedence over `--output`
    pub fn set_output(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path)
            .with_context(|| format!("Failed to resolve output path: {}", path.display()))?;

        self.explicit_output = Some(absolute);
        self.target = OnceCell::new();
        Ok(())
    }

    /// The resolved output target, computed on first use
    pub fn output(&self) -> Option<&OutputTarget> {
        self.target
            .get_or_init(|| {
                route::resolve_output(self.explicit_output.as_deref(), self.invocation)
                    .map(OutputTarget::from_path)
            })
            .as_ref()
    }

    /// Writes the value to its destinations. Later calls do nothing.
    pub fn emit(&mut self) -> Result<()> {
        if self.emitted {
            return Ok(());
        }
        self.emitted = true;

        let target = self.output().cloned();
        if let Some(target) = &target {
            target.verify()?;
        }

        let plan = route::plan(
            target.as_ref(),
            &self.config.default_filename,
            self.source_path.as_deref(),
            self.piped,
        );

        if let Some(file) = &plan.file {
            self.console
                .verbose_ctx("emit", &format!("Writing {}", file.display()));
            write_json(file, &self.source)?;
        }

        if plan.stdout {
            self.console.verbose_ctx("emit", "Writing to stdout");
            route::echo(&mut *self.out, &self.source)?;
        }

        Ok(())
    }

    /// Emits unless the plugin already did
    fn finalize(mut self) -> Result<()> {
        self.emit()
    }

    /// Ends the run without writing anything
    fn abandon(self) {
        if !self.emitted {
            self.console
                .verbose_ctx("emit", "Run failed before emitting; nothing written");
        }
    }
}

/// Drives one plugin through a single run
pub struct Lifecycle {
    identity: PluginIdentity,
    config: Config,
    invocation: Invocation,
    console: Console,
    topology: PipeTopology,
    workdir: PathBuf,
    stage: Cell<Stage>,
}

impl Lifecycle {
    pub fn new(
        identity: PluginIdentity,
        config: Config,
        invocation: Invocation,
        console: Console,
    ) -> Self {
        let topology = PipeTopology::detect(invocation.lifecycle());

        Self {
            identity,
            config,
            invocation,
            console,
            topology,
            workdir: PathBuf::from("."),
            stage: Cell::new(Stage::Idle),
        }
    }

    /// Directory that receives the diagnostic log
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = dir.into();
        self
    }

    pub fn identity(&self) -> &PluginIdentity {
        &self.identity
    }

    pub fn stage(&self) -> Stage {
        self.stage.get()
    }

    pub fn is_piped(&self) -> bool {
        self.topology.is_piped(self.identity.name())
    }

    /// The readable `--source` file, if one was named
    ///
    /// The lifecycle script is consulted only when this plugin heads the
    /// recorded pipeline; later stages read their upstream's output instead.
    pub fn source_path(&self) -> Option<PathBuf> {
        let text = |value: Option<FlagValue>| value.and_then(|v| v.as_text().map(PathBuf::from));

        text(self.invocation.probe("--source"))
            .or_else(|| {
                if self.topology.is_first_stage(self.identity.name()) {
                    text(self.invocation.lifecycle_value("--source"))
                } else {
                    None
                }
            })
            .filter(|path| path.is_file())
    }

    /// Runs against the real stdin and stdout
    pub fn run<P: Plugin>(&mut self, plugin: &mut P) -> Result<()> {
        let collector = StdinCollector::new(self.config.stdin_timeout());
        let stdout = io::stdout();
        let mut out = stdout.lock();

        self.execute(plugin, || collector.collect_stdin(), &mut out)
    }

    /// Runs with injected input and output streams
    pub fn execute<P, F>(&mut self, plugin: &mut P, read_stdin: F, out: &mut dyn Write) -> Result<()>
    where
        P: Plugin,
        F: FnOnce() -> Result<String, StdinError>,
    {
        self.transition(Stage::Ingesting);
        let (value, source_path) = match self.ingest(read_stdin) {
            Ok(ingested) => ingested,
            Err(e) => {
                self.transition(Stage::Failed);
                return Err(e);
            }
        };

        plugin.on_source(&value);

        let mut run = Run {
            source: value,
            source_path,
            explicit_output: None,
            target: OnceCell::new(),
            identity: &self.identity,
            config: &self.config,
            invocation: &self.invocation,
            console: &self.console,
            piped: self.is_piped(),
            out,
            emitted: false,
        };

        self.transition(Stage::Processing);
        let result = match plugin.process(&mut run) {
            Ok(()) => {
                self.transition(Stage::Emitting);
                run.finalize()
            }
            Err(e) => {
                run.abandon();
                Err(e.context("Plugin processing failed"))
            }
        };

        match result {
            Ok(()) => {
                self.transition(Stage::Done);
                Ok(())
            }
            Err(e) => {
                self.transition(Stage::Failed);
                Err(e)
            }
        }
    }

    fn transition(&self, stage: Stage) {
        self.console.verbose_ctx(
            "lifecycle",
            &format!("{} -> {}", self.stage.get().as_str(), stage.as_str()),
        );
        self.stage.set(stage);
    }

    fn ingest<F>(&self, read_stdin: F) -> Result<(Value, Option<PathBuf>)>
    where
        F: FnOnce() -> Result<String, StdinError>,
    {
        let (raw, path) = match self.source_path() {
            Some(path) => {
                if let Ok(value) = source::load_module(&path.to_string_lossy()) {
                    self.console
                        .verbose_ctx("ingest", &format!("Loaded module {}", path.display()));
                    return Ok((value, Some(path)));
                }

                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read source: {}", path.display()))?;
                (raw, Some(path))
            }
            None => {
                self.console.verbose_ctx(
                    "ingest",
                    &format!(
                        "No --source given, reading stdin (timeout {:?})",
                        self.config.stdin_timeout()
                    ),
                );
                (read_stdin()?, None)
            }
        };

        match source::resolve(Some(&raw)) {
            Ok(resolved) => {
                self.console
                    .verbose_ctx("ingest", &format!("Resolved source as {}", resolved.kind.as_str()));
                Ok((resolved.value, path))
            }
            Err(NormalizeError::Parse(failure)) => {
                self.report_parse_failure(&failure);
                Err(NormalizeError::Parse(failure).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn report_parse_failure(&self, failure: &ParseFailure) {
        let log_path = self.config.diagnostic_log_path(&self.workdir);
        match source::write_log(&log_path, &failure.raw) {
            Ok(()) => self
                .console
                .note(&format!("Offending input written to {}", log_path.display())),
            Err(e) => self.console.note(&format!("{:#}", e)),
        }

        self.console.note("Source snippet:");
        self.console.note(&source::snippet(&failure.raw));

        let Some(offset) = failure.offset else {
            return;
        };
        if let Some(excerpt) = source::excerpt(&failure.raw, offset) {
            self.console.note(&format!(
                "Failure at character {} (excerpt from {}):",
                offset, excerpt.start
            ));
            self.console.note(&excerpt.to_string());
        }
    }
}
