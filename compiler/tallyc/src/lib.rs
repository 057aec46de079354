//! Command-line driver for the tally scanner.
//!
//! Each process argument becomes one input fragment, with a `" "` fragment
//! between neighbours, so `tally 1+ 2` scans `1+ 2`. The resulting token
//! stream is printed one token per line.

mod options;
mod render;

use std::ffi::OsString;
use std::io::Write;
use std::sync::Once;

use tally_lexer_core::{ChunkedSource, LexError, Scanner};

pub use options::CliOptions;
pub use render::{render_kind_line, render_token_line};

/// Failure of a CLI run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=tally_lexer_core=debug`
/// or `RUST_LOG=tally_lexer_core=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Build the input source: the arguments, separated by single spaces.
///
/// Argument bytes are passed through unchanged; bytes outside the grammar
/// become `Invalid` tokens.
pub fn source_from_args(args: &[OsString]) -> Result<ChunkedSource, LexError> {
    let mut source = ChunkedSource::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            source.add(" ")?;
        }
        source.add(arg.as_encoded_bytes())?;
    }
    Ok(source)
}

/// Scan the expression in `options` and print the tokens to `out`.
pub fn run(options: &CliOptions, out: &mut impl Write) -> Result<(), CliError> {
    let mut source = source_from_args(&options.expression)?;
    let mut scanner = Scanner::new()?;
    scanner.scan(&mut source)?;
    let stream = scanner.finish()?;
    tracing::debug!(tokens = stream.len(), "printing token stream");

    for token in &stream {
        let line = if options.kinds_only {
            render_kind_line(&token)
        } else {
            render_token_line(&token)
        };
        writeln!(out, "{line}")?;
    }

    stream.destroy();
    Ok(())
}
