//! Command-line options.
//!
//! ```text
//! fac-jit [N] [--emit-ir] [--no-opt] [--quiet]
//! ```

use crate::errors::{FacError, Phase};

pub const USAGE: &str = "Usage: fac-jit [N] [--emit-ir] [--no-opt] [--quiet]";

/// Input used when no `N` is given.
pub const DEFAULT_INPUT: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Argument passed to the compiled `fac`.
    pub input: i32,
    /// Print the final IR to stdout and stop before execution.
    pub emit_ir: bool,
    /// Skip the pass pipeline.
    pub no_opt: bool,
    pub quiet: bool,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT,
            emit_ir: false,
            no_opt: false,
            quiet: false,
            help: false,
        }
    }
}

impl Options {
    /// Parse everything after the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, FacError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = Options::default();
        let mut seen_input = false;

        for arg in args {
            match arg.as_ref() {
                "--emit-ir" => opts.emit_ir = true,
                "--no-opt" => opts.no_opt = true,
                "--quiet" | "-q" => opts.quiet = true,
                "--help" | "-h" => opts.help = true,
                flag if flag.starts_with("--") => {
                    return Err(FacError::new(Phase::Options, format!("unknown flag '{flag}'"))
                        .with_hint(USAGE));
                }
                value => {
                    if seen_input {
                        return Err(FacError::new(
                            Phase::Options,
                            format!("unexpected extra argument '{value}'"),
                        )
                        .with_hint(USAGE));
                    }
                    opts.input = parse_input(value)?;
                    seen_input = true;
                }
            }
        }

        Ok(opts)
    }
}

/// `N` must be a non-negative `i32`; `fac` never reaches its base case
/// from a negative input.
fn parse_input(value: &str) -> Result<i32, FacError> {
    let n: i32 = value.parse().map_err(|_| {
        FacError::new(Phase::Options, format!("'{value}' is not a 32-bit integer"))
            .with_hint(USAGE)
    })?;
    if n < 0 {
        return Err(FacError::new(Phase::Options, format!("input must be non-negative, got {n}"))
            .with_hint("fac(n) only terminates for n >= 0"));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_gives_defaults() {
        let opts = Options::parse(Vec::<String>::new()).unwrap();
        assert_eq!(opts, Options::default());
        assert_eq!(opts.input, 10);
    }

    #[test]
    fn flags_and_input_in_any_order() {
        let opts = Options::parse(["--no-opt", "5", "--emit-ir", "-q"]).unwrap();
        assert_eq!(opts.input, 5);
        assert!(opts.no_opt);
        assert!(opts.emit_ir);
        assert!(opts.quiet);
        assert!(!opts.help);
    }

    #[test]
    fn help_flag_short_and_long() {
        assert!(Options::parse(["--help"]).unwrap().help);
        assert!(Options::parse(["-h"]).unwrap().help);
    }

    #[test]
    fn negative_input_is_rejected() {
        let err = Options::parse(["-3"]).unwrap_err();
        assert_eq!(err.phase, Phase::Options);
        assert!(err.message.contains("non-negative"));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Options::parse(["ten"]).is_err());
        assert!(Options::parse(["4294967296"]).is_err());
        assert!(Options::parse(["--fast"]).is_err());
        assert!(Options::parse(["1", "2"]).is_err());
    }
}
