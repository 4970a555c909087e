use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;

use clap::Parser;
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use mazechase::terminal::RawModeGuard;
use mazechase::{
    input, Config, Game, GameResult, Maze, Outcome, Pacing, TerminalScreen,
};

const DEFAULT_CONFIG: &str = "config.json";

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "mazechase")]
#[command(about = "Eat every dot before the ghosts catch you")]
#[command(version)]
struct Args {
    /// Path to a JSON configuration file
    #[arg(long)]
    config_file: Option<PathBuf>,

    /// Path to a maze text file
    #[arg(long, default_value = "maze01.txt")]
    maze_file: PathBuf,

    /// Seed for ghost movement, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(args: &Args) -> io::Result<()> {
    let env = env_logger::Env::default().default_filter_or(args.log_level.as_str());
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = &args.log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

/// An explicitly requested config must load; the default one may be absent.
fn load_config(path: Option<&Path>) -> GameResult<Config> {
    match path {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(DEFAULT_CONFIG),
        None => {
            warn!("{DEFAULT_CONFIG} not found, using built-in glyphs");
            Ok(Config::default())
        }
    }
}

fn play(args: &Args) -> GameResult<(Outcome, u32)> {
    let level = Maze::load(&args.maze_file)?;
    let config = load_config(args.config_file.as_deref())?;
    info!(
        "starting mazechase v{}: {}x{} maze, {} ghosts, {} dots",
        mazechase::VERSION,
        level.maze.height(),
        level.maze.width(),
        level.ghosts.len(),
        level.maze.dots_left()
    );

    let mut game = Game::new(level, config.pill_duration());
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let _terminal = RawModeGuard::enter()?;
    let (events, inbox) = mpsc::channel();
    input::spawn_reader(io::stdin(), events)?;

    let mut screen = TerminalScreen::new(io::stdout(), config);
    let outcome = game.run(&inbox, &mut screen, &mut rng, &Pacing::default())?;
    Ok((outcome, game.score()))
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(&args) {
        eprintln!("unable to open log file: {e}");
        return ExitCode::FAILURE;
    }

    match play(&args) {
        Ok((outcome, score)) => {
            let verdict = match outcome {
                Outcome::Won => "You win!",
                Outcome::Lost => "Game over.",
            };
            println!("\r\n{verdict} Final score: {score}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("mazechase: {e}");
            ExitCode::FAILURE
        }
    }
}
