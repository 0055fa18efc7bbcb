// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tokio::sync::watch;

mod app;
mod client;
mod data;
mod events;
mod input;
mod logging;
mod monitor;
mod settings;
mod ui;

use app::{App, Mode};
use client::MonitorClient;
use input::TargetForm;
use monitor::CycleStats;
use settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "sitewatch")]
#[command(about = "Terminal dashboard for website uptime and latency monitoring")]
struct Args {
    /// Website URL to monitor (repeatable; pre-fills the setup form)
    #[arg(short, long = "url", value_name = "URL")]
    urls: Vec<String>,

    /// Check interval in seconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Requests per check
    #[arg(short, long)]
    requests: Option<u32>,

    /// Backend base endpoint (e.g. http://localhost:8000)
    #[arg(long)]
    endpoint: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Diagnostic log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run this many cycles without the TUI and print the last snapshot as JSON
    #[arg(long, value_name = "CYCLES")]
    headless: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(interval) = args.interval {
        settings.interval = interval;
    }
    if let Some(requests) = args.requests {
        settings.requests = requests;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }

    let _log_guard = logging::init(&settings.log_file)?;

    let runtime = tokio::runtime::Runtime::new()?;

    // Handle headless mode (non-interactive)
    if let Some(cycles) = args.headless {
        return run_headless(&runtime, &settings, &args.urls, cycles);
    }

    run_tui(runtime.handle().clone(), settings, &args.urls)
}

/// Run a fixed number of cycles without the TUI and print the last snapshot.
fn run_headless(
    runtime: &tokio::runtime::Runtime,
    settings: &Settings,
    urls: &[String],
    cycles: u64,
) -> Result<()> {
    let form = TargetForm::new(settings.interval, settings.requests).with_urls(urls);
    let plan = input::collect(&form)?;

    let client = MonitorClient::new(&settings.endpoint);
    let (snapshots_tx, snapshots_rx) = watch::channel(None);
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let stats = Arc::new(CycleStats::default());

    let delay = Duration::from_secs(plan.interval);
    runtime.block_on(monitor::run_loop(
        client,
        plan.targets,
        delay,
        snapshots_tx,
        cancel_rx,
        stats.clone(),
        Some(cycles),
    ));
    drop(cancel_tx);

    let last = snapshots_rx.borrow().clone();
    match last {
        Some(snapshot) => {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
        None => anyhow::bail!(
            "no snapshot received after {} cycles ({} failed)",
            stats.cycles(),
            stats.failures()
        ),
    }
}

/// Run the interactive TUI.
fn run_tui(runtime: tokio::runtime::Handle, settings: Settings, urls: &[String]) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(&settings, runtime);
    app.form = app.form.clone().with_urls(urls);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Pick up any snapshot published by the monitoring loop
        app.poll_snapshots();

        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let y = (area.height / 2).saturating_sub(2);
                let centered = ratatui::layout::Rect::new(0, y, area.width, area.height.min(5));
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);

            match app.mode {
                Mode::Setup => ui::setup::render(frame, app, chunks[1]),
                Mode::Dashboard => ui::dashboard::render(frame, app, chunks[1]),
            }

            ui::common::render_status_bar(frame, app, chunks[2]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key_event(app, key);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}
