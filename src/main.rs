use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::clock::MonotonicClock;
use grid_snake::config::Settings;
use grid_snake::error::Result;
use grid_snake::input::InputHandler;
use grid_snake::logging::init_file_logging;
use grid_snake::mode::{App, Flow};
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};

#[derive(Debug, Parser)]
#[command(version, about = "Grid-based Snake for the terminal")]
struct Cli {
    /// Settings JSON file. Defaults to the per-user config file when present.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the frame rate from settings.
    #[arg(long)]
    fps: Option<u32>,

    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<()> {
    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let settings = load_settings(&cli)?;
    tracing::info!(
        grid = ?settings.grid_size(),
        fps = settings.fps,
        seed = ?cli.seed,
        "starting"
    );

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    run(&mut session, settings, cli.seed)
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::load_or_default(),
    };

    if let Some(fps) = cli.fps {
        settings.fps = fps;
        settings.validate()?;
    }

    Ok(settings)
}

fn run(session: &mut TerminalSession, settings: Settings, seed: Option<u64>) -> Result<()> {
    let clock = MonotonicClock::new();
    let frame_interval = Duration::from_secs(1) / settings.fps;
    let mut input = InputHandler::new();
    let mut app = match seed {
        Some(seed) => App::new_with_seed(settings, seed, &clock),
        None => App::new(settings, &clock),
    };

    loop {
        let frame_start = Instant::now();

        for event in input.drain()? {
            if app.handle_event(event, &clock) == Flow::Quit {
                tracing::info!("quit requested");
                return Ok(());
            }
        }

        app.update(&clock);
        session.draw(&app)?;

        if let Some(remaining) = frame_interval.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}
