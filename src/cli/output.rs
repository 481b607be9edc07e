//! Console diagnostics
//!
//! Everything here goes to stderr. Stdout belongs to the payload, so a
//! stage's own messages never end up in the next stage's input.

use crossterm::style::Stylize;

/// Console helper for consistent diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    verbose: bool,
}

impl Console {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Returns true if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Prints a fatal error in bold red
    pub fn fatal(&self, message: &str) {
        eprintln!("{}", message.red().bold());
    }

    /// Prints a plain diagnostic line
    pub fn note(&self, message: &str) {
        eprintln!("{}", message);
    }

    /// Prints a verbose debug message (only when verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
