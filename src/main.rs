//! A scroll-driven portfolio page for the terminal.
//!
//! Run the binary to open the page.  The nav bar follows the section under
//! the reading line, sections fade in the first time they scroll into view,
//! and the hero fades out as it scrolls away.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Paragraph, Terminal};

use crate::app::{
    event::{tick_rate, AppEvent, EventReader},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::content::CONTENT;
use crate::ui::{document::DocumentWidget, theme::Theme};

type Term = Terminal<CrosstermBackend<Stderr>>;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven portfolio page")]
struct Cli {
    /// Distance of the active-section line below the viewport top, in units.
    #[arg(long)]
    reference_offset: Option<f64>,

    /// Inset of the reveal area from the viewport edges, in units.
    #[arg(long)]
    reveal_margin: Option<f64>,

    /// Show every section immediately, without entrance animations.
    #[arg(long)]
    no_reveal: bool,

    /// Document units per terminal row.
    #[arg(long)]
    units_per_row: Option<f64>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(v) = self.reference_offset {
            config.reference_offset = v.max(0.0);
        }
        if let Some(v) = self.reveal_margin {
            config.reveal_margin = v.max(0.0);
        }
        if let Some(v) = self.units_per_row {
            config.units_per_row = v.max(1.0);
        }
        if let Some(v) = self.fps {
            config.fps = v;
        }
        if self.no_reveal {
            config.reveal_animations = false;
        }
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load();
    cli.apply(&mut config);

    if cli.write_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let area = terminal
        .size()
        .ok()
        .filter(|s| s.width > 0 && s.height > 0)
        .map(|s| Rect::new(0, 0, s.width, s.height));
    let frame_rate = tick_rate(config.fps);
    let mut state = AppState::new(config, &CONTENT, area);
    state.mount();

    let result = run(&mut terminal, &mut state, EventReader::spawn(frame_rate)).await;

    // ── teardown ──────────────────────────────────────────────
    state.unmount();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

/// The frame loop: advance animations, emit one page event, draw, wait.
async fn run(terminal: &mut Term, state: &mut AppState, mut events: EventReader) -> Result<()> {
    loop {
        let size = terminal.size()?;
        state.resize(Rect::new(0, 0, size.width, size.height));
        state.pump();

        let snapshot = state.snapshot();
        terminal.draw(|frame| {
            let layout = state.layout();

            frame.render_widget(state.nav_bar(), layout.nav_area);

            let document = DocumentWidget::new(&state.document, &snapshot, state.scroll.row())
                .units_per_row(state.config.units_per_row);
            frame.render_widget(document, layout.doc_area);

            let status = Paragraph::new(state.status_line()).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        match events.next().await {
            Some(AppEvent::Key(k)) => handler::handle_key(state, k),
            Some(AppEvent::Mouse(m)) => handler::handle_mouse(state, m),
            Some(AppEvent::Resize(w, h)) => state.resize(Rect::new(0, 0, w, h)),
            Some(AppEvent::Tick) => {}
            None => break,
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}
