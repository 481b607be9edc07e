//! Emission planning and stdout echo

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use super::router::OutputTarget;
use crate::storage::fs::render_json;

/// What a finished run writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitPlan {
    /// File to (over)write, if any
    pub file: Option<PathBuf>,

    /// Whether the value is echoed to stdout
    pub stdout: bool,
}

/// Decides where a finished run's value goes
///
/// A resolved target always gets the file. Without one, a terminal stage
/// overwrites its `--source` file, and anything with no file falls back to
/// stdout. A non-terminal stage always echoes, since the next stage reads it.
pub fn plan(
    target: Option<&OutputTarget>,
    default_filename: &str,
    source_path: Option<&Path>,
    piped: bool,
) -> EmitPlan {
    let file = match target {
        Some(target) => Some(target.write_path(default_filename)),
        None if !piped => source_path.map(Path::to_path_buf),
        None => None,
    };

    let stdout = piped || file.is_none();
    EmitPlan { file, stdout }
}

/// Writes the value to `out` as one pretty-printed document
pub fn echo(out: &mut dyn Write, value: &Value) -> Result<()> {
    let rendered = render_json(value)?;
    writeln!(out, "{}", rendered).context("Failed to write to stdout")?;
    out.flush().context("Failed to flush stdout")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn terminal_stage_overwrites_source() {
        let plan = plan(None, "api.json", Some(Path::new("./fixture.json")), false);

        assert_eq!(plan.file, Some(PathBuf::from("./fixture.json")));
        assert!(!plan.stdout);
    }

    #[test]
    fn no_file_falls_back_to_stdout() {
        let plan = plan(None, "api.json", None, false);

        assert_eq!(plan.file, None);
        assert!(plan.stdout);
    }

    #[test]
    fn target_beats_source() {
        let target = OutputTarget::from_path("./docs");
        let plan = plan(Some(&target), "api.json", Some(Path::new("./fixture.json")), false);

        assert_eq!(plan.file, Some(PathBuf::from("./docs/api.json")));
        assert!(!plan.stdout);
    }

    #[test]
    fn piped_stage_echoes_and_keeps_source() {
        let plan = plan(None, "api.json", Some(Path::new("./fixture.json")), true);

        assert_eq!(plan.file, None);
        assert!(plan.stdout);
    }

    #[test]
    fn piped_stage_with_target_does_both() {
        let target = OutputTarget::from_path("./out.json");
        let plan = plan(Some(&target), "api.json", None, true);

        assert_eq!(plan.file, Some(PathBuf::from("./out.json")));
        assert!(plan.stdout);
    }

    #[test]
    fn echo_is_pretty_with_newline() {
        let mut out = Vec::new();
        echo(&mut out, &json!({"a": 1})).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"a\": 1\n}\n");
    }
}
