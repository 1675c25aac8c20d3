mod app;
mod domain;
mod env;
mod input;
mod notifications;
mod persistence;
mod report;
mod ticker;
mod timer;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{ensure_grove_dir, get_grove_dir, init_local_grove, load_state, state_file};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grove")]
#[command(about = "A terminal focus timer where every focus session grows a tree", long_about = None)]
struct Cli {
    /// Data directory. Defaults to a local .grove, then ~/.grove
    #[arg(long, global = true, env = "GROVE_DIR")]
    dir: Option<PathBuf>,

    /// Draw trees with ASCII glyphs instead of emoji
    #[arg(long, global = true)]
    ascii: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .grove directory in the current directory
    Init,
    /// Print all-time focus statistics
    Stats,
    /// Generate a daily report with statistics
    Report {
        /// Date to generate report for (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Output file path. Defaults to <dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn log_filter() -> EnvFilter {
    let debug_enabled = std::env::var("GROVE_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Subcommands log to stderr
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(io::stderr)
        .init();
}

/// The TUI owns the terminal, so it logs to a file in the data directory
fn init_file_logging(dir: &Path) -> Result<()> {
    let path = dir.join(persistence::LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            init_stderr_logging();
            let grove_dir = init_local_grove()?;
            println!("Initialized grove directory: {}", grove_dir.display());
            println!();
            println!("Grove will now keep its state in this local directory.");
            println!("Run 'grove' to start focusing.");
            Ok(())
        }
        Some(Commands::Stats) => {
            init_stderr_logging();
            print_stats(cli.dir.as_deref())
        }
        Some(Commands::Report { date, output }) => {
            init_stderr_logging();
            let report_date = if let Some(date_str) = date {
                chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                    .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))?
            } else {
                chrono::Local::now().date_naive()
            };

            let grove_dir = ensure_grove_dir(cli.dir.as_deref())?;
            let state = load_state(state_file(&grove_dir));
            let output_path = output.map(PathBuf::from);

            println!("Generating report for {}...", report_date);
            let report_path =
                report::generate_report(&state, report_date, &grove_dir, output_path)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        None => run_tui(cli.dir.as_deref(), !cli.ascii),
    }
}

fn print_stats(dir: Option<&Path>) -> Result<()> {
    let grove_dir = get_grove_dir(dir)?;
    let state = load_state(state_file(&grove_dir));
    let stats = report::calculate_global_stats(&state);

    println!("Grove: {}", grove_dir.display());
    println!();
    println!("Focus sessions:  {}", stats.total_sessions);
    println!(
        "Focus time:      {}",
        report::format_focus_time(stats.total_focus_secs)
    );
    println!("Growth points:   {}", stats.total_growth_points);
    println!("Days active:     {}", stats.days_active);
    if let Some((date, sessions)) = &stats.best_day {
        println!("Best day:        {} ({} sessions)", date, sessions);
    }
    println!(
        "Trees:           {} harvested, {} growing",
        stats.trees_harvested, stats.trees_growing
    );
    Ok(())
}

fn run_tui(dir: Option<&Path>, use_emoji: bool) -> Result<()> {
    let grove_dir = ensure_grove_dir(dir)?;
    init_file_logging(&grove_dir)?;
    tracing::info!(dir = %grove_dir.display(), "Starting grove");

    let mut app = App::new(state_file(&grove_dir));
    app.use_emoji = use_emoji;
    tracing::info!(state = %app.state_path().display(), "State file");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Pause a running timer so the saved state has no orphaned countdown
    app.shutdown();
    tracing::info!("Stopped grove");

    if let Err(err) = result {
        tracing::error!(error = %err, "TUI loop failed");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick();
    }
}
