mod app;
mod domain;
mod input;
mod lifecycle;
mod notifications;
mod persistence;
mod stats;
mod timer;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lifecycle::Lifecycle;
use persistence::{ensure_data_dir, init_local_dir, RecordStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "study-hq")]
#[command(about = "A two-operative terminal study headquarters with time tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .studyhq directory in the current directory
    Init,
    /// Generate a leaderboard summary with statistics
    Summary {
        /// Date to generate the summary for (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Output file path. Defaults to <data-dir>/summary-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_dir()?;
            println!("Initialized study-hq directory: {}", data_dir.display());
            println!();
            println!("Study HQ will now use this local directory for storage.");
            println!("Run 'study-hq' to log in.");
            Ok(())
        }
        Some(Commands::Summary { date, output }) => {
            let summary_date = if let Some(date_str) = date {
                Some(
                    chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                        anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e)
                    })?,
                )
            } else {
                None
            };

            let output_path = output.map(std::path::PathBuf::from);

            let store = RecordStore::new(ensure_data_dir()?);
            store.seed_if_empty()?;
            let summary_path = stats::export::generate_summary(&store, summary_date, output_path)?;
            println!("Summary generated: {}", summary_path.display());
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    let data_dir = ensure_data_dir()?;
    eprintln!("Using study-hq directory: {}", data_dir.display());

    let lifecycle = Lifecycle::new(RecordStore::new(data_dir));
    let mut app = AppState::new(lifecycle)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Park any running session so at most the partial second is lost
    if let Err(e) = app.checkpoint_now() {
        eprintln!("Error saving session progress: {}", e);
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = timer::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Advance the session timer and flush any due checkpoints
        app.on_tick(Instant::now())?;
    }
}
