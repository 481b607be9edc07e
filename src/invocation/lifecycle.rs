//! Lifecycle-script introspection
//!
//! Script runners record the full command line of the script they launched
//! (npm exposes it as `npm_lifecycle_script`). The line is split into stages
//! on unquoted `|` (never `||`), and each stage with shell-token rules.

use std::path::Path;

use super::args::{scan, FlagValue};

/// The command line recorded by the enclosing script runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleScript {
    raw: String,
}

impl LifecycleScript {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Reads the script from `var`; unset or blank yields `None`
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var(var)
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(Self::new)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Shell tokens of each pipeline stage
    ///
    /// Returns `None` when any stage cannot be tokenized (unbalanced quotes).
    pub fn segments(&self) -> Option<Vec<Vec<String>>> {
        pipe_segments(&self.raw)
            .into_iter()
            .map(shlex::split)
            .collect::<Option<Vec<_>>>()
    }

    /// Finds `flag` in the first stage that mentions it
    ///
    /// Best effort: an untokenizable script yields `None`, never an error.
    pub fn value(&self, flag: &str) -> Option<FlagValue> {
        self.segments()?
            .iter()
            .find_map(|tokens| scan(tokens, flag))
    }

    /// Command name of each stage, in pipeline order
    ///
    /// Leading `VAR=value` assignments are skipped and only the last path
    /// segment of the command is kept, so `./node_modules/.bin/toolB` is
    /// reported as `toolB`.
    pub fn stages(&self) -> Vec<String> {
        let Some(segments) = self.segments() else {
            return Vec::new();
        };

        segments
            .iter()
            .map(|tokens| {
                tokens
                    .iter()
                    .find(|t| !is_assignment(t))
                    .map(|cmd| command_name(cmd))
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// Splits `raw` at each pipe operator, leaving quoted or escaped `|` and
/// the `||` operator inside their segment
fn pipe_segments(raw: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut quote = None;
    let mut escaped = false;
    let mut chars = raw.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if escaped {
            escaped = false;
            continue;
        }

        match (quote, c) {
            (Some('\''), '\'') => quote = None,
            (Some('\''), _) => {}
            (_, '\\') => escaped = true,
            (Some(q), c) if q == c => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '|') => {
                if chars.next_if(|&(_, next)| next == '|').is_none() {
                    segments.push(&raw[start..i]);
                    start = i + 1;
                }
            }
            _ => {}
        }
    }

    segments.push(&raw[start..]);
    segments
}

fn is_assignment(token: &str) -> bool {
    match token.split_once('=') {
        Some((name, _)) => {
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

fn command_name(token: &str) -> String {
    Path::new(token)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(token)
        .to_string()
}
