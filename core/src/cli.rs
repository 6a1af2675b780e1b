use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{Error, ExitStatus};
use crate::interpreter::{lexer, Tracer, Vm};

#[derive(Parser, Debug)]
#[command(name = "dstack")]
#[command(about = "Run a dstack program", long_about = None)]
pub struct Cli {
    /// Display debugging information while running
    #[arg(short, long)]
    pub debug: bool,

    /// Path to config file (overrides default search)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the Random instruction (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Name of the file to be executed
    pub file: PathBuf,
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> ExitStatus {
    run_cli_from_args(std::env::args_os())
}

/// Run the CLI with provided arguments
///
/// Bad arguments print the usage text and count as success.
pub fn run_cli_from_args<I, T>(args: I) -> ExitStatus
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => run_cli_with_args(cli),
        Err(err) => {
            let _ = err.print();
            ExitStatus::Success
        }
    }
}

/// Internal function that handles a parsed command line
fn run_cli_with_args(cli: Cli) -> ExitStatus {
    let config = match Config::builder()
        .config_path(cli.config.clone())
        .debug(cli.debug)
        .seed(cli.seed)
        .build()
    {
        Ok(config) => config,
        Err(err) => {
            let err = Error::from(err);
            eprintln!("{}", err);
            return err.exit_status();
        }
    };

    if let Err(err) = init_logging(&config.log.filter) {
        eprintln!("Warning: {:#}", err);
    }

    tracing::debug!(
        path = ?cli.config,
        debug = config.interpreter.debug,
        seed = ?config.interpreter.seed,
        "loaded configuration"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run_file(&cli.file, &config, stdin.lock(), &mut out) {
        Ok(()) => ExitStatus::Success,
        Err(err) => {
            match &err {
                Error::Runtime(runtime) => tracing::warn!(error = %runtime, "program aborted"),
                Error::Config(_) | Error::FileNotOpen { .. } | Error::Lex(_) => {
                    tracing::debug!(error = %err, "program not run")
                }
            }
            let _ = report(&mut out, &err);
            err.exit_status()
        }
    }
}

/// Set up logging to stderr so it never mixes with program output
fn init_logging(filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}

/// Load, lex and run one source file against the given input and output
pub fn run_file<R: BufRead, W: Write>(
    path: &Path,
    config: &Config,
    input: R,
    output: W,
) -> Result<(), Error> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::FileNotOpen {
        path: path.to_path_buf(),
        source,
    })?;

    run_source(&source, config, input, output)
}

/// Lex and run source text
pub fn run_source<R: BufRead, W: Write>(
    source: &str,
    config: &Config,
    input: R,
    output: W,
) -> Result<(), Error> {
    let program = lexer::lex(source)?;

    let mut vm = Vm::new(program, input, output);
    if let Some(seed) = config.interpreter.seed {
        vm = vm.with_seed(seed);
    }
    if config.interpreter.debug {
        vm = vm.with_tracer(Tracer::new(config.trace.rule_width));
    }

    vm.run()?;
    Ok(())
}

/// Write an error the way the interpreter always has: positional errors
/// inside a banner, a missing file as a plain line
pub fn report<W: Write>(out: &mut W, err: &Error) -> io::Result<()> {
    const BANNER: &str = "*********************************";

    match err {
        Error::Lex(_) | Error::Runtime(_) => {
            write!(out, "\n{}\n{}\n{}\n", BANNER, err, BANNER)?;
        }
        Error::FileNotOpen { .. } | Error::Config(_) => writeln!(out, "{}", err)?,
    }
    out.flush()
}
