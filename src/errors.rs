//! fac-jit error reporting — pretty, coloured diagnostics.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// The pipeline step where an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Options,
    Init,
    Build,
    Verify,
    Jit,
    Optimize,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Options  => write!(f, "options"),
            Phase::Init     => write!(f, "init"),
            Phase::Build    => write!(f, "build"),
            Phase::Verify   => write!(f, "verify"),
            Phase::Jit      => write!(f, "jit"),
            Phase::Optimize => write!(f, "optimize"),
        }
    }
}

/// A structured pipeline error.
#[derive(Debug, Clone)]
pub struct FacError {
    pub phase: Phase,
    pub message: String,
    pub hint: Option<String>,
}

impl FacError {
    pub fn new(phase: Phase, message: impl Into<String>) -> Self {
        Self { phase, message: message.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for FacError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FacError {}

impl From<inkwell::builder::BuilderError> for FacError {
    fn from(err: inkwell::builder::BuilderError) -> Self {
        FacError::new(Phase::Build, err.to_string())
    }
}

/// Print an error to stderr with red colouring (ANSI).
pub fn report(err: &FacError) {
    // Red bold: \x1b[1;31m   Reset: \x1b[0m
    eprintln!(
        "\x1b[1;31merror\x1b[0m\x1b[1m[{}]:\x1b[0m {}",
        err.phase, err.message,
    );
    if let Some(hint) = &err.hint {
        eprintln!("  \x1b[1;36mhint:\x1b[0m {hint}");
    }
}

/// Report the error and abort the process.
///
/// Verification and JIT failures are unrecoverable; cleanup is left to
/// process teardown.
pub fn fatal(err: FacError) -> ! {
    report(&err);
    std::process::abort();
}

/// Report a command-line error and exit with status 2.
pub fn usage(err: FacError) -> ! {
    report(&err);
    std::process::exit(2);
}

// ═══════════════════════════════════════════════════════════════════
// Info messages (blue [fac-jit] tag)
// ═══════════════════════════════════════════════════════════════════

static QUIET: AtomicBool = AtomicBool::new(false);

/// Silence `info` and `success` lines. Errors still print.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a status/info message with a coloured `[fac-jit]` prefix.
pub fn info(message: impl fmt::Display) {
    if !quiet() {
        eprintln!("\x1b[1;34m[fac-jit]\x1b[0m {message}");
    }
}

/// Print a success message in green.
pub fn success(message: impl fmt::Display) {
    if !quiet() {
        eprintln!("\x1b[1;32m[fac-jit]\x1b[0m {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_phase_tag() {
        let err = FacError::new(Phase::Verify, "phi node has 1 incoming value");
        assert_eq!(err.to_string(), "[verify] phi node has 1 incoming value");
    }

    #[test]
    fn display_appends_hint_on_its_own_line() {
        let err = FacError::new(Phase::Jit, "no available targets")
            .with_hint("is LLVM built with the native backend?");
        assert_eq!(
            err.to_string(),
            "[jit] no available targets\n  hint: is LLVM built with the native backend?",
        );
    }
}
