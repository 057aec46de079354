//! Command-line option parsing.
//!
//! Expressions routinely start with `-`, so only the exact flags below are
//! options; every other argument is expression text. Arguments are kept as
//! `OsString` so input bytes that are not UTF-8 reach the scanner intact.

use std::ffi::OsString;

/// Parsed command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Print only token kind names.
    pub kinds_only: bool,
    /// Print usage and exit.
    pub help: bool,
    /// Expression fragments, in order.
    pub expression: Vec<OsString>,
}

impl CliOptions {
    /// Parse arguments, excluding the program name.
    ///
    /// `--` ends option parsing; everything after it is expression text.
    pub fn parse(args: &[OsString]) -> Self {
        let mut options = CliOptions::default();
        let mut rest = args.iter();

        for arg in rest.by_ref() {
            match arg.to_str() {
                Some("--") => break,
                Some("--kinds-only") => options.kinds_only = true,
                Some("-h" | "--help") => options.help = true,
                _ => options.expression.push(arg.clone()),
            }
        }
        options.expression.extend(rest.cloned());

        options
    }
}
