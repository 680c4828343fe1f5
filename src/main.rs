mod app;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod scheduler;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use crate::warning::Warning;
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use lexopt::{Arg, ValueExt};
use rand::{rngs::StdRng, SeedableRng};
use std::collections::VecDeque;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: snake-rounds [OPTIONS]\n",
    "\n",
    "Play Snake in the terminal, one round at a time\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>  Read configuration from the given file\n",
    "      --seed <N>       Seed the apple placement RNG with the given integer\n",
    "  -h, --help           Show this help and exit\n",
    "  -V, --version        Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Mode {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    seed: Option<u64>,
}

impl Mode {
    fn from_parser(mut parser: lexopt::Parser) -> Result<Mode, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Mode::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Mode::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Mode::Run(args))
    }
}

fn main() -> ExitCode {
    match Mode::from_parser(lexopt::Parser::from_env()) {
        Ok(Mode::Run(args)) => run(args),
        Ok(Mode::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Mode::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("snake-rounds: {e}");
            eprint!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> ExitCode {
    let mut warnings = VecDeque::new();
    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            warnings.push_back(e);
            Config::default()
        }
    };
    if let Err(e) = logging::init(&config.log) {
        warnings.push_back(e);
    }
    for e in &warnings {
        tracing::warn!("{e:#}");
    }
    let rng = match args.seed {
        Some(seed) => {
            tracing::info!(seed, "Using fixed RNG seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    let app = App::new(
        Game::new(config.game, rng),
        warnings.into_iter().map(Warning::from).collect(),
    );
    let terminal = ratatui::init();
    let r = crossterm::execute!(io::stdout(), EnableFocusChange).and_then(|()| app.run(terminal));
    let _ = crossterm::execute!(io::stdout(), DisableFocusChange);
    ratatui::restore();
    io_exit(r)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(p) => Config::load(p, false)
            .with_context(|| format!("Failed to load configuration from {}", p.display())),
        None => {
            let p = Config::default_path().context("Failed to load configuration")?;
            Config::load(&p, true)
                .with_context(|| format!("Failed to load configuration from {}", p.display()))
        }
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Terminal I/O failed");
            eprintln!("snake-rounds: {e}");
            ExitCode::from(2)
        }
    }
}
