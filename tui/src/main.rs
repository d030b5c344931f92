//! Plotcast TUI Entry Point
//!
//! Launches the terminal console for composing expressions and casting
//! compiled plots to a remote device.
//!
//! Usage:
//!   plotcast [DEVICE]
//!
//! DEVICE is the plotting device's network address (default: 192.168.2.99).

use std::io;
use std::panic;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plotcast_engine::EngineConfig;
use plotcast_tui::App;

/// Interactive console for casting compiled plots to a remote device.
#[derive(Debug, Parser)]
#[command(name = "plotcast", version, about)]
struct Cli {
    /// Network address of the plotting device
    device: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Check for a TTY before touching the terminal
    use std::io::IsTerminal;
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: plotcast requires a terminal (TTY)");
        std::process::exit(1);
    }

    let mut config = EngineConfig::from_env();
    if let Some(device) = cli.device {
        config = config.with_device(device);
    }

    // Restore the terminal before printing any panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let mut app = App::new(config);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}
