//! delve layout viewer
//!
//! Generates a dungeon layout from the built-in sample content and shows
//! it in the terminal: one-shot with --map, interactive otherwise.

use std::io;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use delve_tui::{App, AppAction};

/// Dungeon layout viewer
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "delve - generate and inspect dungeon layouts", long_about = None)]
struct Args {
    /// Layout seed; random when omitted
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Print the layout map to stdout and exit
    #[arg(short = 'm', long = "map")]
    map: bool,

    /// Verbose build logging (map mode only)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| delve_core::GameRng::from_entropy().seed());

    if args.map {
        let level = if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        let _ = TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        );
        return print_map(seed);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, seed);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    seed: u64,
) -> io::Result<()> {
    let mut app = App::new(seed);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        let event = event::read()?;
        if app.handle_event(&event) == AppAction::Quit {
            return Ok(());
        }
    }
}

/// One-shot mode: build, print, exit
fn print_map(seed: u64) -> io::Result<()> {
    let app = App::new(seed);
    match app.rooms() {
        Some(rooms) => {
            println!("seed {seed}, {} rooms", rooms.len());
            print!("{}", delve_core::dungeon::render_layout(rooms));
            Ok(())
        }
        None => {
            eprintln!("seed {seed}: layout generation failed");
            Err(io::Error::other("layout generation failed"))
        }
    }
}
