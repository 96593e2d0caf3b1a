mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod options;
mod rules;
mod schedule;
mod toast;
mod ui;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

const USAGE: &str = concat!(
    "Usage: gridsnake [--config <file>] [--log-file <file>]\n",
    "\n",
    "Play Snake on a grid in your terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <file>    Read configuration from the given file\n",
    "      --log-file <file>  Write log messages to the given file\n",
    "  -h, --help             Display this help message and exit\n",
    "  -V, --version          Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum CliAction {
    Run(Arguments),
    Help,
    Version,
}

impl CliAction {
    fn from_parser(mut parser: Parser) -> Result<CliAction, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(CliAction::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(CliAction::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(CliAction::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    /// Configuration file given on the command line.  If this is not set,
    /// the default configuration file is read if it exists.
    config: Option<PathBuf>,

    /// File to write logs to.  Nothing is logged if this is not set, as the
    /// terminal is taken up by the game.
    log_file: Option<PathBuf>,
}

impl Arguments {
    fn run(self) -> ExitCode {
        if let Some(ref path) = self.log_file {
            if let Err(e) = init_logging(path) {
                eprintln!("gridsnake: {e:?}");
                return ExitCode::FAILURE;
            }
        }
        let config = match load_config(self.config.as_deref()) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!(error = ?e, "Failed to load configuration");
                eprintln!("gridsnake: {e:?}");
                return ExitCode::FAILURE;
            }
        };
        let terminal = ratatui::init();
        if let Err(e) = crossterm::execute!(io::stdout(), EnableFocusChange) {
            tracing::warn!(error = %e, "Could not enable focus change events");
        }
        let r = terminal
            .size()
            .and_then(|display| App::new(config, display).run(terminal));
        let _ = crossterm::execute!(io::stdout(), DisableFocusChange);
        ratatui::restore();
        io_exit(r)
    }
}

fn main() -> ExitCode {
    match CliAction::from_parser(Parser::from_env()) {
        Ok(CliAction::Run(args)) => args.run(),
        Ok(CliAction::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(CliAction::Version) => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprint!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path).context("failed to open log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Build the log filter from the value of `RUST_LOG`, logging at `info` and
/// above when it is unset or names no valid directives
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Read the configuration file given on the command line, or else the
/// default configuration file if there is one
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(p) = path {
        return Config::load(p, false)
            .with_context(|| format!("failed to load configuration from {}", p.display()));
    }
    match Config::default_path() {
        Ok(p) => Config::load(&p, true)
            .with_context(|| format!("failed to load configuration from {}", p.display())),
        Err(e) => {
            tracing::warn!(error = %e, "Using default configuration");
            Ok(Config::default())
        }
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "I/O error");
            eprintln!("gridsnake: {e}");
            ExitCode::from(2)
        }
    }
}
