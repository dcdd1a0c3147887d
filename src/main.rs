// Recurtty: recursion visualizer for the terminal

use std::io;
use std::rc::Rc;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::Level;

use recurtty::config::CliOptions;
use recurtty::logging::{init_tracing, MemoryLogger};
use recurtty::simulation::Algorithm;
use recurtty::ui::App;

fn print_usage(program_name: &str) {
    eprintln!(
        "Usage: {} [ALGORITHM] [N] [--speed MS] [--smoothing F] [--log FILE]",
        program_name
    );
    eprintln!();
    eprintln!("Algorithms:");
    for algorithm in Algorithm::ALL {
        eprintln!(
            "  {:<12} {} (default n={})",
            algorithm.name(),
            algorithm.title(),
            algorithm.default_n()
        );
    }
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} hanoi 4              # Towers of Hanoi with 4 disks", program_name);
    eprintln!("  {} fibonacci 5 --speed 200", program_name);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("recurtty");

    let opts = match CliOptions::parse(args.iter().skip(1).cloned()) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    };
    if opts.help {
        print_usage(program_name);
        return Ok(());
    }

    let algorithm = match opts.algorithm.as_deref() {
        Some(name) => match name.parse::<Algorithm>() {
            Ok(algorithm) => algorithm,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage(program_name);
                std::process::exit(1);
            }
        },
        None => Algorithm::Fibonacci,
    };
    let n = opts.n.unwrap_or_else(|| algorithm.default_n());

    // The TUI owns the terminal, so tracing output goes to a file
    let log_path = opts
        .log_path
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("recurtty.log"));
    if let Err(e) = init_tracing(&log_path) {
        eprintln!("Warning: could not open log file {}: {}", log_path.display(), e);
    }
    tracing::info!(%algorithm, n, log = %log_path.display(), "starting");

    let logger =
        Rc::new(MemoryLogger::new(opts.settings.log_capacity).with_min_level(Level::INFO));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(algorithm, n, opts.settings, logger);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
