use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use baghchal::{RandomChooser, Side};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    crossterm::{
        event::{self, Event, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use app::App;

mod app;
mod ui;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Role {
    Goat,
    Tiger,
}

impl From<Role> for Side {
    fn from(role: Role) -> Side {
        match role {
            Role::Goat => Side::Goat,
            Role::Tiger => Side::Tiger,
        }
    }
}

/// Play Bagh-Chal against the computer in the terminal.
#[derive(Parser)]
struct Args {
    /// Skip the side selection screen and play this side
    #[arg(short, long)]
    role: Option<Role>,

    /// RNG seed for the AI
    #[arg(long)]
    seed: Option<u64>,

    /// How long the AI waits before making its move
    #[arg(long, default_value_t = 500)]
    ai_delay_ms: u64,

    /// Write logs to this file. The terminal is taken by the UI, so there is
    /// no logging without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        initialize_logging(File::create(path)?, args.log_level);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "Starting");
    let mut app = App::new(
        RandomChooser(StdRng::seed_from_u64(seed)),
        args.role.map(Side::from),
        Duration::from_millis(args.ai_delay_ms),
    );

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<RandomChooser<StdRng>>) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;
        handle_events(app)?;
        app.tick(Instant::now());
    }
    Ok(())
}

fn handle_events(app: &mut App<RandomChooser<StdRng>>) -> io::Result<()> {
    if event::poll(Duration::from_millis(16))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.on_key(key.code);
            }
        }
    }
    Ok(())
}

fn initialize_logging(file: File, level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .with_ansi(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
}
