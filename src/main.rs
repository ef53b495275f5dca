//! The agency landing page's animated surfaces, in the terminal.
//!
//! Scroll the page (arrows, PgUp/PgDn, mouse wheel) and the marquee strips
//! follow the scroll direction; particles float in the background; `n` opens
//! the newsletter form.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    newsletter_runtime::{spawn_subscribe, NewsletterUpdate},
    scheduler::FrameLoop,
    state::{ActiveView, AppState},
};
use crate::config::AppConfig;
use crate::core::newsletter::{InMemoryBackend, NewsletterBackend, SubmitStatus};
use crate::ui::{
    layout::AppLayout,
    marquee::MarqueeWidget,
    newsletter::NewsletterPopup,
    page::{PageBody, DEFAULT_MARQUEE_TEXTS, PAGE_COPY},
    particles::ParticleField,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-velocity marquee and particle field")]
struct Cli {
    /// Marquee advance per frame, in columns.
    #[arg(long)]
    velocity: Option<f64>,

    /// Copies of the marquee text per strip.
    #[arg(long)]
    repeat: Option<u32>,

    /// Number of background particles.
    #[arg(long)]
    particles: Option<usize>,

    /// Animation frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Marquee text; repeat the flag for more rows.
    #[arg(long = "text")]
    texts: Vec<String>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Save the effective configuration and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Layer CLI overrides on top of the file configuration.
    fn apply(&self, config: &mut AppConfig) {
        let a = &mut config.animation;
        if let Some(v) = self.velocity {
            a.base_velocity = v;
        }
        if let Some(r) = self.repeat {
            a.repeat_count = r;
        }
        if let Some(p) = self.particles {
            a.particle_count = p;
        }
        if let Some(f) = self.fps {
            a.frames_per_second = f;
        }
        config.animation = config.animation.clone().clamped();
    }

    fn marquee_texts(&self) -> Vec<String> {
        if self.texts.is_empty() {
            DEFAULT_MARQUEE_TEXTS.iter().map(|s| s.to_string()).collect()
        } else {
            self.texts.clone()
        }
    }
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area(), state.marquees.len());

    frame.render_widget(
        Paragraph::new(Line::styled(" STUDIO  brand · web · growth", Theme::hero_style())),
        layout.hero_area,
    );

    for (i, (marquee, area)) in state
        .marquees
        .iter_mut()
        .zip(layout.marquee_areas.iter())
        .enumerate()
    {
        let widget = MarqueeWidget::new(Theme::marquee_style(i)).reversed(i % 2 == 1);
        frame.render_stateful_widget(widget, *area, marquee);
    }

    let body_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    let body_inner = body_block.inner(layout.body_area);
    frame.render_widget(body_block, layout.body_area);
    frame.render_widget(
        PageBody {
            scroll: state.scroll_position() as u16,
        },
        body_inner,
    );
    frame.render_widget(
        ParticleField::new(&state.particles, state.elapsed_secs()),
        body_inner,
    );

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    frame.render_widget(
        Paragraph::new(format!(
            "{status_text} | line {:.0} | {}",
            state.scroll_position(),
            state.marquee_summary()
        ))
        .style(Theme::status_bar_style()),
        layout.status_area,
    );

    if state.active_view == ActiveView::Newsletter {
        frame.render_widget(
            NewsletterPopup {
                form: &state.newsletter,
                tick: state.frame_count,
            },
            frame.area(),
        );
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = AppConfig::load();
    cli.apply(&mut config);

    if cli.write_config {
        config.save()?;
        return Ok(());
    }

    let frame_period = config.animation.frame_period();
    let mut state = AppState::new(config, cli.marquee_texts(), PAGE_COPY.len());
    let backend: Arc<dyn NewsletterBackend> = Arc::new(InMemoryBackend::new());

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend_term = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend_term)?;

    // ── async channels ────────────────────────────────────────
    let (event_tx, mut events) = mpsc::unbounded_channel::<AppEvent>();
    spawn_event_reader(event_tx.clone(), Duration::from_millis(100));
    let mut frames = FrameLoop::start(frame_period, event_tx);
    let (news_tx, mut news_rx) = mpsc::unbounded_channel::<NewsletterUpdate>();

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| draw(frame, &mut state))?;

        if let Some(email) = state.pending_submission.take() {
            tracing::debug!("newsletter submission for {email:?}");
            spawn_subscribe(news_tx.clone(), Arc::clone(&backend), email);
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize => {}
                    AppEvent::Frame => state.on_frame(),
                }
            }

            Some(update) = news_rx.recv() => {
                state.newsletter.status = SubmitStatus::from_result(&update.result);
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    if frames.is_running() {
        frames.stop();
    }
    state.unmount_marquees();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
