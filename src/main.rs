//! Evidence Center - compliance evidence submission
//!
//! A Ratatui-based form for collecting application metadata, a spreadsheet
//! and evidence screenshots, plus the HTTP backend that acknowledges them.

mod app;
mod client;
mod config;
mod platform;
mod server;
mod state;
mod submit;
mod ui;

use anyhow::Result;
use app::{save_template, App, TEMPLATE_FILE_NAME};
use clap::{Parser, Subcommand};
use client::{EvidenceApi, HttpEvidenceClient};
use config::ClientConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use server::ServerConfig;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "evidence-center",
    version,
    about = "Collect and submit compliance evidence"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP backend
    Serve {
        /// Listening port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Open the evidence form (default)
    Tui {
        /// Backend address
        #[arg(long)]
        server_url: Option<String>,
    },
    /// Download the spreadsheet template
    Template {
        /// Backend address
        #[arg(long)]
        server_url: Option<String>,
        /// Output file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evidence_center=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Tui { server_url: None }) {
        Command::Serve { port } => {
            let mut config = ServerConfig::load()?;
            if let Some(port) = port {
                config.port = port;
            }
            server::start_server(config).await
        }
        Command::Tui { server_url } => run_tui(server_url).await,
        Command::Template { server_url, output } => {
            let config = ClientConfig::load()?;
            let client = HttpEvidenceClient::new(&config.resolve_server_url(server_url))?;
            let path = output.unwrap_or_else(|| config.template_dir().join(TEMPLATE_FILE_NAME));
            save_template(&client, &path).await?;
            println!("Template saved to {}", path.display());
            Ok(())
        }
    }
}

async fn run_tui(server_url: Option<String>) -> Result<()> {
    let config = ClientConfig::load()?;
    let client = HttpEvidenceClient::new(&config.resolve_server_url(server_url))?;
    tracing::info!("Using backend {}", client.base_url());
    let mut app = App::new(client, config.template_dir()).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend, A: EvidenceApi>(
    terminal: &mut Terminal<B>,
    app: &mut App<A>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }

                app.handle_key(key).await?;
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
