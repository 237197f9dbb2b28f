mod app;
mod appearance;
mod command;
mod config;
mod consts;
mod engine;
mod game;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use crate::warning::Warning;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use log::LevelFilter;
use rand::{rngs::StdRng, SeedableRng};
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

static USAGE: &str = "\
Usage: snakeskin [<options>]

Play Snake in the terminal

Options:
  -c, --config <path>       Read configuration from the given file
      --log-file <path>     Write log messages to the given file
      --log-level <level>   Minimum level of log messages to write [default: info]
      --seed <u64>          Seed the random placement of food
  -h, --help                Show this help message and exit
  -V, --version             Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Arguments),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-level") => args.log_level = parser.value()?.parse()?,
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }

    fn run(self) -> ExitCode {
        match self {
            Command::Run(args) => args.run(),
            Command::Help => {
                print!("{USAGE}");
                ExitCode::SUCCESS
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_level: LevelFilter,
    seed: Option<u64>,
}

impl Default for Arguments {
    fn default() -> Arguments {
        Arguments {
            config: None,
            log_file: None,
            log_level: LevelFilter::Info,
            seed: None,
        }
    }
}

impl Arguments {
    fn run(self) -> ExitCode {
        let game = match self.prepare() {
            Ok(game) => game,
            Err(e) => {
                eprintln!("snakeskin: {e:?}");
                return ExitCode::from(2);
            }
        };
        let terminal = ratatui::init();
        let r = App::new(game).run(terminal);
        ratatui::restore();
        if let Err(ref e) = r {
            log::error!("Terminal I/O failed: {e}");
        }
        io_exit(r)
    }

    /// Everything that can fail before the terminal is taken over: setting up
    /// logging, reading the configuration, and building the first game
    fn prepare(&self) -> anyhow::Result<Game> {
        if let Some(ref path) = self.log_file {
            let file = fs_err::File::create(path)
                .context("Failed to open log file")?;
            WriteLogger::init(self.log_level, simplelog::Config::default(), file)
                .context("Failed to initialize logging")?;
        }
        log::info!(
            "Starting {} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        let config = if let Some(ref path) = self.config {
            Config::load(path, false).with_context(|| {
                format!("Failed to load configuration from {}", path.display())
            })?
        } else {
            match Config::default_path() {
                Ok(path) => Config::load(&path, true).with_context(|| {
                    format!("Failed to load configuration from {}", path.display())
                })?,
                Err(e) => {
                    log::warn!("{e}; using default configuration");
                    Config::default()
                }
            }
        };
        log::debug!("Configuration: {config:?}");
        let (appearance, warning) = match config.load_appearance() {
            Ok(appearance) => (appearance, None),
            Err(e) => {
                log::warn!("{e}: {e:?}");
                (config.appearance, Some(Warning::from(e)))
            }
        };
        let rng = match self.seed {
            Some(seed) => {
                log::info!("Seeding food placement with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        let game = Game::new(config, appearance, rng, StdRng::from_os_rng());
        Ok(match warning {
            Some(w) => game.with_warning(w),
            None => game,
        })
    }
}

fn main() -> ExitCode {
    match Command::from_parser(Parser::from_env()) {
        Ok(cmd) => cmd.run(),
        Err(e) => {
            eprintln!("snakeskin: {e}");
            eprintln!("Run `snakeskin --help` for usage");
            ExitCode::from(2)
        }
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("snakeskin").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(Arguments::default()));
    }

    #[test]
    fn all_args() {
        assert_eq!(
            parse(&[
                "--config",
                "snake.toml",
                "--log-file=snake.log",
                "--log-level",
                "debug",
                "--seed",
                "42",
            ])
            .unwrap(),
            Command::Run(Arguments {
                config: Some(PathBuf::from("snake.toml")),
                log_file: Some(PathBuf::from("snake.log")),
                log_level: LevelFilter::Debug,
                seed: Some(42),
            })
        );
    }

    #[rstest]
    #[case(&["-h"], Command::Help)]
    #[case(&["--seed", "7", "--help"], Command::Help)]
    #[case(&["-V"], Command::Version)]
    #[case(&["--version"], Command::Version)]
    fn test_info_commands(#[case] args: &[&str], #[case] cmd: Command) {
        assert_eq!(parse(args).unwrap(), cmd);
    }

    #[rstest]
    #[case(&["--seed", "-1"])]
    #[case(&["--seed", "lots"])]
    #[case(&["--log-level", "loud"])]
    #[case(&["--config"])]
    #[case(&["--bogus"])]
    #[case(&["extra"])]
    fn test_bad_args(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }
}
