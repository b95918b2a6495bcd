mod app;
mod domain;
mod input;
mod persistence;
mod store;
mod ticker;
mod ui;

use anyhow::Result;
use app::App;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{
    default_export_file, ensure_stint_dir, get_stint_dir, init_local_stint, load_snapshot,
    save_snapshot, tasks_file, write_export,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stint")]
#[command(about = "A terminal tracker for nested tasks with a single running timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .stint directory in the current directory
    Init,
    /// Export the full task set as a JSON document
    Export {
        /// Output file path. Defaults to .stint/export-YYYY-MM-DD.json
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let stint_dir = init_local_stint()?;
            println!("Initialized stint directory: {}", stint_dir.display());
            println!();
            println!("Stint will now use this local directory for task storage.");
            println!("Run 'stint' to start tracking tasks.");
            Ok(())
        }
        Some(Commands::Export { output }) => {
            let tasks = load_snapshot(tasks_file()?)?;
            let output_path = match output {
                Some(path) => PathBuf::from(path),
                None => default_export_file()?,
            };
            write_export(&output_path, &tasks)?;
            println!(
                "Exported {} task(s) to {}",
                tasks.len(),
                output_path.display()
            );
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    ensure_stint_dir()?;

    let stint_dir = get_stint_dir()?;
    eprintln!("Using stint directory: {}", stint_dir.display());

    // Hydrate the store from the persisted snapshot
    let snapshot_path = tasks_file()?;
    let tasks = load_snapshot(&snapshot_path)?;
    let mut app = App::new(tasks)?;

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

    // Save on exit
    if let Err(e) = save_snapshot(&snapshot_path, app.store.tasks()) {
        eprintln!("Error saving tasks: {}", e);
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let poll_rate = ticker::poll_duration();
    let snapshot_path = tasks_file()?;

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with a timeout so the timer keeps ticking
        if event::poll(poll_rate)? {
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

        // Pump the store's one-second timer
        app.store.tick();

        // Autosave whenever the store changed
        if app.take_dirty() {
            save_snapshot(&snapshot_path, app.store.tasks())?;
        }
    }
}
