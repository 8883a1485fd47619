use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use cloud_console::config::AppConfig;
use cloud_console::tui::app::AppState;
use cloud_console::tui::services::Services;

#[derive(Parser, Debug)]
#[command(name = "cloud-console", version, about = "Terminal admin console for multi-cloud resources")]
struct Args {
    /// Path to the TOML config file (defaults to the user config directory).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Resource server base URL; overrides the config file.
    #[arg(long, env = "CLOUD_CONSOLE_API_URL")]
    api_url: Option<String>,

    /// Run against an in-memory demo estate instead of a server.
    #[arg(long)]
    demo: bool,

    /// Print the resolved configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let (mut config, config_error) = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }
    if args.print_config {
        if let Some(e) = config_error {
            eprintln!("warning: {e}");
        }
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    // Initialize logging
    let _log_guard = cloud_console::core::logging::init_tui(&config.log_dir());
    log::info!("{} v{} starting", cloud_console::NAME, cloud_console::VERSION);
    if let Some(e) = config_error {
        log::warn!("Config could not be loaded, using defaults: {e}");
    }

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(&config, args.demo, event_tx);
    let mut app = AppState::new(event_rx, services);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    // Restore terminal
    disable_raw_mode()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("Event loop failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("Shutting down");
    Ok(())
}
