use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::info;

use soiree_core::{
    media::{AutoAdvanceTick, Catalog, EventSink, MediaEvent, Section},
    AppConfig,
};
use soiree_tui::{
    app::{App, Mode},
    event::{spawn_media_load, AppEvent, EventHandler, MediaLoadResult},
    input::handle_key_event,
    keymap::Keymap,
    widgets::{
        ComparisonWidget, FeaturedWidget, GalleryWidget, HeroWidget, PopupWidget,
        StatusBarWidget, TestimonialsWidget, ViewerWidget,
    },
};

type Backend = CrosstermBackend<io::Stdout>;

pub async fn run(config: Arc<AppConfig>, catalog_path: Option<PathBuf>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    let catalog = Catalog::load_or_sample(catalog_path.as_deref())?;
    info!(
        "Loaded catalog from {}",
        catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in sample".to_string())
    );

    // Channels: timer ticks, controller events, decoded media
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<AutoAdvanceTick>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<MediaEvent>();
    let (media_tx, mut media_rx) = mpsc::unbounded_channel::<MediaLoadResult>();

    let mut app = App::new(config.clone(), catalog, tick_tx, EventSink::new(event_tx));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Soirée"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create event handler with animation FPS support
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    app.start();

    // Errors break out of the loop so the terminal is always restored
    let result = run_loop(
        &mut terminal,
        &mut app,
        &keymap,
        &event_handler,
        Channels {
            tick_rx: &mut tick_rx,
            event_rx: &mut event_rx,
            media_rx: &mut media_rx,
            media_tx: &media_tx,
        },
    );

    restore_terminal(&mut terminal)?;
    info!("Showcase closed");

    result
}

/// Receivers drained at the top of every loop iteration
struct Channels<'a> {
    tick_rx: &'a mut mpsc::UnboundedReceiver<AutoAdvanceTick>,
    event_rx: &'a mut mpsc::UnboundedReceiver<MediaEvent>,
    media_rx: &'a mut mpsc::UnboundedReceiver<MediaLoadResult>,
    media_tx: &'a mpsc::UnboundedSender<MediaLoadResult>,
}

fn run_loop(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    keymap: &Keymap,
    event_handler: &EventHandler,
    channels: Channels<'_>,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        // Auto-advance ticks
        while let Ok(tick) = channels.tick_rx.try_recv() {
            app.on_auto_advance(tick);
        }

        // Controller state changes (drives viewer media requests)
        while let Ok(event) = channels.event_rx.try_recv() {
            app.on_media_event(event);
        }

        // Completed decodes
        while let Ok(result) = channels.media_rx.try_recv() {
            app.on_media_loaded(result);
        }

        for request in app.take_media_requests() {
            spawn_media_load(request, channels.media_tx.clone());
        }

        // One marquee update per display frame
        if app.needs_animation() && last_frame.elapsed() >= event_handler.animation_rate() {
            app.on_frame();
            last_frame = Instant::now();
        }

        terminal.draw(|frame| draw(frame, app))?;

        let event = if app.needs_animation() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                // Layout is recomputed on the next draw
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {
                    // Tick spinner animation for loading indicator
                    app.tick_spinner();
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Restore terminal
fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Lay out every section, or the viewer when it is open
fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // Fullscreen modal viewer
    if app.modal_open() {
        ViewerWidget::render(frame, size, app);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title
            Constraint::Length(7),  // Hero
            Constraint::Length(10), // Testimonials
            Constraint::Min(6),     // Gallery
            Constraint::Length(9),  // Featured + comparisons
            Constraint::Length(1),  // Status bar
        ])
        .split(size);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[4]);

    app.hit.sections = vec![
        (Section::Hero, rows[1]),
        (Section::Testimonials, rows[2]),
        (Section::Gallery, rows[3]),
        (Section::Featured, bottom[0]),
        (Section::Comparisons, bottom[1]),
    ];

    render_title(frame, rows[0], app);
    HeroWidget::render(frame, rows[1], app);
    TestimonialsWidget::render(frame, rows[2], app);
    GalleryWidget::render(frame, rows[3], app);
    FeaturedWidget::render(frame, bottom[0], app);
    ComparisonWidget::render(frame, bottom[1], app);
    StatusBarWidget::render(frame, rows[5], app);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let line = Line::from(vec![
        Span::styled(
            " ✦ Soirée ",
            Style::default().fg(theme.gold).add_modifier(Modifier::BOLD),
        ),
        Span::styled("Luxury event planning", Style::default().fg(theme.grey1)),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg0)), area);
}
