mod app;
mod cli;
mod config;
mod logging;
mod map;
mod models;
mod quiz;
mod share;
mod swipe;
mod theme;
mod ui;

use std::io::{self, stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use app::App;
use cli::{parse_args, print_usage, CliConfig, ParseOutcome, VERSION};
use config::{ConfigFile, MapsConfig, API_KEY_ENV, ENDPOINT_ENV};
use map::{HttpMapProvider, LibraryRegistry};
use models::QuestionSet;
use share::FileShare;

/// Input poll interval; also the timer resolution of the UI loop
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(ParseOutcome::Run(cli)) => cli,
        Ok(ParseOutcome::Help) => {
            print_usage();
            return Ok(());
        }
        Ok(ParseOutcome::Version) => {
            println!("where-to-move {}", VERSION);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            return Err(e);
        }
    };

    if let Some(path) = logging::init_logging() {
        info!(log = %path.display(), version = VERSION, "starting where-to-move");
    }

    // Map library fetches run here while the UI loop stays synchronous
    let runtime = Runtime::new()?;
    let mut app = build_app(&cli, &runtime)?;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Run the app
    let result = run(&mut terminal, &mut app);

    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn build_app(cli: &CliConfig, runtime: &Runtime) -> io::Result<App> {
    let questions = match &cli.questions_path {
        Some(path) => QuestionSet::load(path),
        None => QuestionSet::bundled(),
    }
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    info!(count = questions.len(), "questions loaded");

    let maps = MapsConfig::load(cli.api_key.clone(), cli.offline).unwrap_or_else(|e| {
        warn!(%e, "ignoring config file");
        MapsConfig::from_sources(
            cli.api_key.clone(),
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(ENDPOINT_ENV).ok(),
            ConfigFile::default(),
        )
    });
    if !maps.is_enabled() {
        info!("no maps credential configured, map background disabled");
    }

    let provider = HttpMapProvider::new(&maps.endpoint)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let registry = LibraryRegistry::new(Arc::new(provider), runtime.handle().clone());

    Ok(App::new(
        questions,
        registry,
        maps,
        Box::new(FileShare::in_data_dir()),
    ))
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle input
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        app.on_tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
