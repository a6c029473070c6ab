use std::{
    io::{stderr, stdin, stdout},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;

use interpreter::{run_source, InterpretError};

mod repl;
use repl::Mode;

/// Exit statuses, following the BSD sysexits convention.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(u8)]
enum Status {
    Usage = 64,
    DataErr = 65,
    NoInput = 66,
    Software = 70,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status as u8)
    }
}

#[derive(clap::Parser)]
#[command(version, about)]
struct Args {
    /// Script to run. Starts an interactive prompt if omitted.
    file: Option<PathBuf>,

    /// Print the tokens of every prompt line instead of running it
    #[arg(long, conflicts_with_all = ["file", "ast"])]
    tokens: bool,

    /// Print the syntax tree of every prompt line instead of running it
    #[arg(long, conflicts_with = "file")]
    ast: bool,
}

fn run_file(path: &Path) -> anyhow::Result<ExitCode> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Could not read {}: {e}", path.display());
            return Ok(Status::NoInput.into());
        }
    };

    log::debug!("Running {}", path.display());
    match run_source(&source, &mut stdout().lock()) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e @ InterpretError::CompileError(_)) => {
            eprintln!("{e}");
            Ok(Status::DataErr.into())
        }
        Err(e @ InterpretError::RuntimeError(_)) => {
            eprintln!("{e}");
            Ok(Status::Software.into())
        }
        Err(InterpretError::Io(e)) => Err(e.into()),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version end up here as well, but go to stdout
        Err(e) => {
            e.print()?;
            return Ok(if e.use_stderr() { Status::Usage.into() } else { ExitCode::SUCCESS });
        }
    };

    match args.file {
        Some(file) => run_file(&file),
        None => {
            let mode = match (args.tokens, args.ast) {
                (true, _) => Mode::Tokens,
                (_, true) => Mode::Ast,
                _ => Mode::Run,
            };
            repl::run_prompt(stdin().lock(), stdout(), stderr(), mode)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
