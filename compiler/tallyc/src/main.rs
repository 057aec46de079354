//! `tally`: print the tokens of an arithmetic expression.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use tallyc::{init_tracing, run, CliOptions};

fn print_usage() {
    eprintln!("Usage: tally [--kinds-only] [--] <expression>...");
    eprintln!();
    eprintln!("Arguments are joined with single spaces and scanned as one expression.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --kinds-only   Print only token kind names");
    eprintln!("  -h, --help     Show this message");
    eprintln!();
    eprintln!("Set RUST_LOG=tally_lexer_core=debug for scanner tracing.");
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let options = CliOptions::parse(&args);
    if options.help {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&options, &mut out).and_then(|()| out.flush().map_err(Into::into)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
