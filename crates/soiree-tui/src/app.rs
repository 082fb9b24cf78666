use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use image::DynamicImage;
use ratatui::layout::{Position, Rect};
use soiree_core::media::{
    AutoAdvanceTick, Carousel, Catalog, ComparisonSlider, EventSink, Item, ItemFilter, ItemList,
    KeyOutcome, Marquee, MediaEvent, ModalViewer, Section, TestimonialStats, ViewerKey,
    ALL_CATEGORIES,
};
use soiree_core::AppConfig;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::event::{MediaLoadResult, MediaRequest};
use crate::input::Action;
use crate::theme::Theme;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Typing a gallery search
    Search(String),
    /// Help overlay
    Help,
}

/// Screen regions recorded during the last draw, used for mouse hit-testing
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    pub sections: Vec<(Section, Rect)>,
    pub marquee: Rect,
    pub comparison: Rect,
    pub gallery_tiles: Vec<(usize, Rect)>,
    pub thumbnails: Vec<(usize, Rect)>,
}

impl HitAreas {
    fn find(entries: &[(usize, Rect)], position: Position) -> Option<usize> {
        entries
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(k, _)| *k)
    }

    pub fn gallery_tile_at(&self, position: Position) -> Option<usize> {
        Self::find(&self.gallery_tiles, position)
    }

    pub fn thumbnail_at(&self, position: Position) -> Option<usize> {
        Self::find(&self.thumbnails, position)
    }

    pub fn section_at(&self, position: Position) -> Option<Section> {
        self.sections
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(section, _)| *section)
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub catalog: Catalog,
    pub theme: Theme,
    /// Section receiving navigation keys
    pub focus: Section,
    pub mode: Mode,
    /// Hero slideshow
    pub hero: Carousel,
    /// Testimonial carousel
    pub testimonials: Carousel,
    /// Testimonial ticker
    pub marquee: Marquee,
    pub stats: TestimonialStats,
    /// Unfiltered gallery
    gallery_all: ItemList,
    pub gallery_filter: ItemFilter,
    pub categories: Vec<String>,
    /// Gallery selection over the filtered list
    pub gallery: Carousel,
    pub viewer: ModalViewer,
    /// Unfiltered featured events
    featured_all: ItemList,
    pub featured_filter: ItemFilter,
    pub featured_categories: Vec<String>,
    pub featured: Carousel,
    /// Photo viewer for the selected featured event
    pub event_viewer: ModalViewer,
    /// Decoded media for the viewer entry it belongs to
    pub viewer_image: Option<(Section, usize, DynamicImage)>,
    pub comparisons: Carousel,
    pub slider: ComparisonSlider,
    pub hit: HitAreas,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    spinner_frame: usize,
    media_requests: Vec<MediaRequest>,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        catalog: Catalog,
        tick_tx: mpsc::UnboundedSender<AutoAdvanceTick>,
        events: EventSink,
    ) -> Self {
        let hero = Carousel::new(Section::Hero, catalog.section(Section::Hero))
            .with_auto_advance(config.carousel.hero_interval(), tick_tx.clone())
            .with_event_sink(events.clone());

        let testimonial_items = catalog.section(Section::Testimonials);
        let stats = TestimonialStats::from_items(&testimonial_items);
        let testimonials = Carousel::new(Section::Testimonials, testimonial_items.clone())
            .with_auto_advance(config.carousel.testimonial_interval(), tick_tx)
            .with_event_sink(events.clone());

        let mut marquee = Marquee::new(Section::Testimonials, config.marquee.speed)
            .with_event_sink(events.clone());
        marquee.set_item_count(testimonial_items.len());
        marquee.set_item_extent(config.marquee.item_extent());

        let gallery_all = catalog.section(Section::Gallery);
        let categories = gallery_all.categories();
        let gallery =
            Carousel::new(Section::Gallery, gallery_all.clone()).with_event_sink(events.clone());
        let viewer =
            ModalViewer::new(Section::Gallery, gallery_all.clone()).with_event_sink(events.clone());

        let featured_all = catalog.section(Section::Featured);
        let featured_categories = featured_all.categories();
        let featured =
            Carousel::new(Section::Featured, featured_all.clone()).with_event_sink(events.clone());
        let event_viewer = ModalViewer::new(Section::Featured, ItemList::default())
            .with_event_sink(events.clone());
        let comparisons =
            Carousel::new(Section::Comparisons, catalog.section(Section::Comparisons))
                .with_event_sink(events.clone());
        let slider = ComparisonSlider::new(Section::Comparisons, config.slider.initial_fraction)
            .with_event_sink(events);

        Self {
            config,
            catalog,
            theme: Theme::default(),
            focus: Section::Hero,
            mode: Mode::Normal,
            hero,
            testimonials,
            marquee,
            stats,
            gallery_all,
            gallery_filter: ItemFilter::default(),
            categories,
            gallery,
            viewer,
            featured_all,
            featured_filter: ItemFilter::default(),
            featured_categories,
            featured,
            event_viewer,
            viewer_image: None,
            comparisons,
            slider,
            hit: HitAreas::default(),
            should_quit: false,
            status_message: None,
            spinner_frame: 0,
            media_requests: Vec::new(),
        }
    }

    /// Start timers and the ticker; requires a tokio runtime for auto-advance
    pub fn start(&mut self) {
        if self.config.carousel.autoplay {
            self.hero.start();
            self.testimonials.start();
        }
        self.marquee.start();
        info!(
            "Showcase started: {} hero slides, {} testimonials, {} gallery images",
            self.hero.len(),
            self.testimonials.len(),
            self.gallery_all.len()
        );
    }

    /// Move focus to the next section
    pub fn focus_next(&mut self) {
        let i = Section::ALL.iter().position(|s| *s == self.focus).unwrap_or(0);
        self.focus = Section::ALL[(i + 1) % Section::ALL.len()];
    }

    /// Move focus to the previous section
    pub fn focus_prev(&mut self) {
        let i = Section::ALL.iter().position(|s| *s == self.focus).unwrap_or(0);
        self.focus = Section::ALL[(i + Section::ALL.len() - 1) % Section::ALL.len()];
    }

    fn focused_carousel(&mut self) -> &mut Carousel {
        match self.focus {
            Section::Hero => &mut self.hero,
            Section::Testimonials => &mut self.testimonials,
            Section::Gallery => &mut self.gallery,
            Section::Featured => &mut self.featured,
            Section::Comparisons => &mut self.comparisons,
        }
    }

    pub fn next(&mut self) {
        if self.focused_carousel().next() && self.focus == Section::Comparisons {
            self.slider.reset();
        }
    }

    pub fn previous(&mut self) {
        if self.focused_carousel().previous() && self.focus == Section::Comparisons {
            self.slider.reset();
        }
    }

    /// Play/pause the focused section
    pub fn toggle_play(&mut self) {
        match self.focus {
            Section::Hero => {
                if !self.hero.has_auto_advance() {
                    self.set_status("Hero auto-advance is disabled");
                    return;
                }
                let playing = self.hero.toggle_play();
                self.set_status(if playing { "Slideshow playing" } else { "Slideshow paused" });
            }
            Section::Testimonials => {
                // Carousel and ticker pause together
                let running = self.testimonials.is_playing() || self.marquee.is_started();
                if running {
                    self.testimonials.stop();
                    self.marquee.stop();
                    self.set_status("Testimonials paused");
                } else {
                    self.testimonials.start();
                    self.marquee.start();
                    self.set_status("Testimonials playing");
                }
            }
            _ => {}
        }
    }

    /// Open the event viewer when featured events are focused, else the gallery viewer
    pub fn open_viewer(&mut self) {
        if self.focus == Section::Featured {
            self.open_event();
            return;
        }
        self.focus = Section::Gallery;
        if self.gallery.is_empty() {
            self.set_status("No images match the current filter");
            return;
        }
        let index = self.gallery.index();
        self.open_viewer_at(index);
    }

    pub fn open_viewer_at(&mut self, index: usize) {
        self.viewer_image = None;
        self.viewer.open(index);
    }

    /// Browse the photos of the selected featured event
    pub fn open_event(&mut self) {
        let Some(event) = self.featured.current_item() else {
            self.set_status("No events match the current filter");
            return;
        };
        let photos = event.gallery_items();
        debug!("Opening event {} with {} photos", event.id, photos.len());
        self.event_viewer.set_items(photos);
        self.viewer_image = None;
        self.event_viewer.open(0);
    }

    /// The open modal viewer and the section it belongs to
    pub fn active_viewer(&self) -> Option<(Section, &ModalViewer)> {
        if self.viewer.is_open() {
            Some((Section::Gallery, &self.viewer))
        } else if self.event_viewer.is_open() {
            Some((Section::Featured, &self.event_viewer))
        } else {
            None
        }
    }

    /// Whether a viewer currently owns the keyboard
    pub fn modal_open(&self) -> bool {
        self.active_viewer().is_some()
    }

    fn viewer_mut(&mut self, section: Section) -> Option<&mut ModalViewer> {
        match section {
            Section::Gallery => Some(&mut self.viewer),
            Section::Featured => Some(&mut self.event_viewer),
            _ => None,
        }
    }

    /// The featured event whose photos the event viewer shows
    pub fn viewed_event(&self) -> Option<&Item> {
        if self.event_viewer.is_open() {
            self.featured.current_item()
        } else {
            None
        }
    }

    /// Route a key to the open viewer
    pub fn handle_viewer_key(&mut self, key: ViewerKey) {
        let Some((section, _)) = self.active_viewer() else {
            return;
        };
        let Some(viewer) = self.viewer_mut(section) else {
            return;
        };
        let last_viewed = viewer.index();
        if viewer.handle_key(key) == KeyOutcome::Closed && section == Section::Gallery {
            // Keep the gallery selection on the last viewed image
            if let Some(index) = last_viewed {
                self.gallery.goto(index);
            }
        }
    }

    /// Advance the category filter of the featured events when focused, else the gallery's
    pub fn cycle_category(&mut self) {
        if self.focus == Section::Featured {
            self.cycle_featured_category();
            return;
        }
        let Some(next) = next_category(&self.categories, self.gallery_filter.category.as_deref())
        else {
            return;
        };
        self.gallery_filter.category = Some(next.clone());
        self.focus = Section::Gallery;
        self.apply_gallery_filter();
        self.set_status(format!("Category: {} ({} images)", next, self.gallery.len()));
    }

    fn cycle_featured_category(&mut self) {
        let Some(next) = next_category(
            &self.featured_categories,
            self.featured_filter.category.as_deref(),
        ) else {
            return;
        };
        self.featured_filter.category = Some(next.clone());
        let filtered = self.featured_all.filter(&self.featured_filter);
        debug!(
            "Featured filter {:?} matched {} of {}",
            self.featured_filter,
            filtered.len(),
            self.featured_all.len()
        );
        self.featured.set_items(filtered);
        self.set_status(format!("Events: {} ({} events)", next, self.featured.len()));
    }

    /// Replace the gallery search text and refilter
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.gallery_filter.search = query.into();
        self.apply_gallery_filter();
    }

    fn apply_gallery_filter(&mut self) {
        let filtered = self.gallery_all.filter(&self.gallery_filter);
        debug!(
            "Gallery filter {:?} matched {} of {}",
            self.gallery_filter,
            filtered.len(),
            self.gallery_all.len()
        );
        self.gallery.set_items(filtered.clone());
        self.viewer.set_items(filtered);
    }

    /// Move the comparison slider by one keyboard step in `direction`
    pub fn nudge_slider(&mut self, direction: f64) {
        self.focus = Section::Comparisons;
        self.slider.nudge(direction * self.config.slider.keyboard_step);
    }

    /// Item whose media `o` would open
    pub fn current_media_item(&self) -> Option<&Item> {
        if let Some((_, viewer)) = self.active_viewer() {
            return viewer.current_item();
        }
        match self.focus {
            Section::Hero => self.hero.current_item(),
            Section::Testimonials => self.testimonials.current_item(),
            Section::Gallery => self.gallery.current_item(),
            Section::Featured => self.featured.current_item(),
            Section::Comparisons => self.comparisons.current_item(),
        }
    }

    pub fn current_media_path(&self) -> Option<PathBuf> {
        self.current_media_item()
            .map(|item| self.catalog.resolve_media(item))
    }

    /// Open the current media in the system viewer
    pub fn open_external(&mut self) {
        let Some(path) = self.current_media_path() else {
            self.set_status("Nothing to open");
            return;
        };
        if !path.exists() {
            self.set_status(format!("Media file not found: {}", path.display()));
            return;
        }
        match open::that(&path) {
            Ok(()) => self.set_status("Opening media in external viewer..."),
            Err(e) => self.set_status(format!("Failed to open media: {}", e)),
        }
    }

    /// Apply one input action
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusNext => self.focus_next(),
            Action::FocusPrev => self.focus_prev(),
            Action::Next => self.next(),
            Action::Prev => self.previous(),
            Action::TogglePlay => self.toggle_play(),
            Action::OpenViewer => self.open_viewer(),
            Action::CycleCategory => self.cycle_category(),
            Action::StartSearch => {
                self.focus = Section::Gallery;
                self.mode = Mode::Search(self.gallery_filter.search.clone());
            }
            Action::SliderLeft => self.nudge_slider(-1.0),
            Action::SliderRight => self.nudge_slider(1.0),
            Action::OpenExternal => self.open_external(),
            Action::Help => self.mode = Mode::Help,
            Action::ExitMode => {
                self.mode = Mode::Normal;
                self.clear_status();
            }
            Action::Viewer(key) => self.handle_viewer_key(key),
            Action::InputChar(c) => {
                if let Mode::Search(query) = &mut self.mode {
                    query.push(c);
                    let query = query.clone();
                    self.set_search(query);
                }
            }
            Action::Backspace => {
                if let Mode::Search(query) = &mut self.mode {
                    query.pop();
                    let query = query.clone();
                    self.set_search(query);
                }
            }
            Action::Confirm => {
                if matches!(self.mode, Mode::Search(_)) {
                    self.mode = Mode::Normal;
                    self.set_status(format!("{} images match", self.gallery.len()));
                }
            }
            Action::Cancel => {
                if matches!(self.mode, Mode::Search(_)) {
                    self.mode = Mode::Normal;
                    self.set_search(String::new());
                }
            }
            Action::None => {}
        }
    }

    /// Route an auto-advance tick to its carousel
    pub fn on_auto_advance(&mut self, tick: AutoAdvanceTick) {
        match tick.section {
            Section::Hero => {
                self.hero.on_tick(&tick);
            }
            Section::Testimonials => {
                self.testimonials.on_tick(&tick);
            }
            other => debug!("No auto-advance owner for {}", other),
        }
    }

    /// React to a controller state change
    pub fn on_media_event(&mut self, event: MediaEvent) {
        debug!("{:?}", event);
        match event {
            MediaEvent::LoadingChanged {
                section,
                loading: true,
            } => self.request_viewer_media(section),
            MediaEvent::ViewerClosed { section } => {
                if matches!(&self.viewer_image, Some((s, _, _)) if *s == section) {
                    self.viewer_image = None;
                }
            }
            _ => {}
        }
    }

    fn request_viewer_media(&mut self, section: Section) {
        let viewer = match section {
            Section::Gallery => &mut self.viewer,
            Section::Featured => &mut self.event_viewer,
            _ => return,
        };
        let Some(index) = viewer.index() else {
            return;
        };
        if !viewer.is_loading() {
            return;
        }
        if !self.config.ui.image_preview {
            // Nothing to decode
            viewer.media_loaded(index);
            return;
        }
        let Some(item) = viewer.current_item() else {
            return;
        };
        let path = self.catalog.resolve_media(item);
        let request = MediaRequest {
            section,
            index,
            path,
        };
        if !self.media_requests.contains(&request) {
            self.media_requests.push(request);
        }
    }

    /// Pending decode requests for the caller to spawn
    pub fn take_media_requests(&mut self) -> Vec<MediaRequest> {
        std::mem::take(&mut self.media_requests)
    }

    /// Handle a completed decode
    pub fn on_media_loaded(&mut self, result: MediaLoadResult) {
        let section = result.section();
        let Some(viewer) = self.viewer_mut(section) else {
            return;
        };
        match result {
            MediaLoadResult::Success { index, image, .. } => {
                if viewer.media_loaded(index) {
                    self.viewer_image = Some((section, index, image));
                }
            }
            MediaLoadResult::Failure { index, error, .. } => {
                if viewer.media_failed(index) {
                    self.viewer_image = None;
                    self.set_status(format!("Failed to load image: {}", error));
                }
            }
        }
    }

    /// Image to draw for the viewer's current entry
    pub fn viewer_image(&self) -> Option<&DynamicImage> {
        let (section, viewer) = self.active_viewer()?;
        match &self.viewer_image {
            Some((s, k, image))
                if *s == section && viewer.index() == Some(*k) && !viewer.is_loading() =>
            {
                Some(image)
            }
            _ => None,
        }
    }

    /// Whether the main loop should poll at animation rate
    pub fn needs_animation(&self) -> bool {
        self.marquee.needs_frame()
    }

    /// Advance the ticker by one display frame
    pub fn on_frame(&mut self) -> Option<f64> {
        self.marquee.on_frame()
    }

    /// Fit marquee cards to the viewport width
    pub fn measure_marquee(&mut self, viewport_width: u16) {
        let card = self.card_width(viewport_width);
        let extent = f64::from(card) + f64::from(self.config.marquee.card_gap);
        if (extent - self.marquee.item_extent()).abs() > f64::EPSILON {
            self.marquee.set_item_extent(extent);
        }
    }

    /// Card width for a viewport, never wider than the viewport itself
    pub fn card_width(&self, viewport_width: u16) -> u16 {
        self.config.marquee.card_width.min(viewport_width.max(1))
    }

    /// Pointer input: ticker hover, slider drag, gallery/thumbnail clicks
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);

        if self.hit.marquee.contains(position) && !self.modal_open() {
            self.marquee.pointer_enter();
        } else {
            self.marquee.pointer_leave();
        }

        if let Some((section, _)) = self.active_viewer() {
            if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                if let Some(k) = self.hit.thumbnail_at(position) {
                    if let Some(viewer) = self.viewer_mut(section) {
                        viewer.select_thumbnail(k);
                    }
                }
            }
            return;
        }

        let in_comparison = self.hit.comparison.contains(position);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if in_comparison {
                    self.focus = Section::Comparisons;
                    self.slider.on_drag_start();
                    self.move_slider(mouse.column);
                } else if let Some(k) = self.hit.gallery_tile_at(position) {
                    self.focus = Section::Gallery;
                    self.gallery.goto(k);
                    self.open_viewer_at(k);
                } else if let Some(section) = self.hit.section_at(position) {
                    self.focus = section;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if in_comparison {
                    self.move_slider(mouse.column);
                } else {
                    self.slider.on_pointer_leave();
                }
            }
            MouseEventKind::Moved => {
                if !in_comparison {
                    self.slider.on_pointer_leave();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.slider.on_drag_end(),
            _ => {}
        }
    }

    fn move_slider(&mut self, column: u16) {
        let area = self.hit.comparison;
        // Last column maps to 100
        let width = f64::from(area.width.saturating_sub(1).max(1));
        self.slider
            .on_pointer_move(f64::from(column), f64::from(area.x), width);
    }

    /// Tick spinner animation for loading indicator
    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.spinner_frame]
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Check if we're in a mode that accepts text input
    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Search(_))
    }
}

/// Category after `current` in `categories`, wrapping back to "All"
fn next_category(categories: &[String], current: Option<&str>) -> Option<String> {
    if categories.is_empty() {
        return None;
    }
    let current = current.unwrap_or(ALL_CATEGORIES);
    let i = categories.iter().position(|c| c == current).unwrap_or(0);
    Some(categories[(i + 1) % categories.len()].clone())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    pub(crate) fn sample_app() -> (App, mpsc::UnboundedReceiver<MediaEvent>) {
        let (tick_tx, _tick_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let catalog = Catalog::sample().unwrap();
        let app = App::new(
            Arc::new(AppConfig::default()),
            catalog,
            tick_tx,
            EventSink::new(event_tx),
        );
        (app, event_rx)
    }

    fn pump(app: &mut App, rx: &mut mpsc::UnboundedReceiver<MediaEvent>) {
        while let Ok(event) = rx.try_recv() {
            app.on_media_event(event);
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_focus_cycles_through_sections() {
        let (mut app, _rx) = sample_app();
        for _ in 0..Section::ALL.len() {
            app.focus_next();
        }
        assert_eq!(app.focus, Section::Hero);
        app.focus_prev();
        assert_eq!(app.focus, Section::Comparisons);
    }

    #[test]
    fn test_category_filter_updates_gallery_and_viewer() {
        let (mut app, _rx) = sample_app();
        app.gallery.goto(5);
        app.cycle_category();

        assert_eq!(app.gallery_filter.category.as_deref(), Some("Wedding"));
        assert_eq!(app.gallery.len(), 2);
        assert_eq!(app.gallery.index(), 1);
        assert_eq!(app.viewer.items().len(), 2);
    }

    #[test]
    fn test_search_typing_filters_live() {
        let (mut app, _rx) = sample_app();
        app.handle_action(Action::StartSearch);
        for c in "JAZZ".chars() {
            app.handle_action(Action::InputChar(c));
        }
        assert_eq!(app.gallery.len(), 1);
        app.handle_action(Action::Cancel);
        assert_eq!(app.gallery.len(), 6);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_viewer_open_requests_media_and_failure_clears_loading() {
        let (mut app, mut rx) = sample_app();
        app.focus = Section::Gallery;
        app.gallery.goto(2);
        app.handle_action(Action::OpenViewer);
        pump(&mut app, &mut rx);

        let requests = app.take_media_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].index, 2);
        assert!(app.viewer.is_loading());

        app.on_media_loaded(MediaLoadResult::Failure {
            section: Section::Gallery,
            index: 2,
            error: "missing".to_string(),
        });
        assert!(!app.viewer.is_loading());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_stale_media_result_ignored() {
        let (mut app, mut rx) = sample_app();
        app.open_viewer_at(0);
        app.handle_action(Action::Viewer(ViewerKey::ArrowRight));
        pump(&mut app, &mut rx);

        app.on_media_loaded(MediaLoadResult::Success {
            section: Section::Gallery,
            index: 0,
            image: DynamicImage::new_rgb8(2, 2),
        });
        assert!(app.viewer.is_loading());
        assert!(app.viewer_image().is_none());

        app.on_media_loaded(MediaLoadResult::Success {
            section: Section::Gallery,
            index: 1,
            image: DynamicImage::new_rgb8(2, 2),
        });
        assert!(app.viewer_image().is_some());
    }

    #[test]
    fn test_escape_returns_gallery_to_last_viewed() {
        let (mut app, _rx) = sample_app();
        app.open_viewer_at(4);
        app.handle_action(Action::Viewer(ViewerKey::ArrowRight));
        app.handle_action(Action::Viewer(ViewerKey::Escape));
        assert!(!app.viewer.is_open());
        assert_eq!(app.gallery.index(), 5);
    }

    #[test]
    fn test_featured_filter_then_browse_event_photos() {
        let (mut app, mut rx) = sample_app();
        app.focus = Section::Featured;
        app.handle_action(Action::CycleCategory);

        assert_eq!(app.featured_filter.category.as_deref(), Some("Wedding"));
        assert_eq!(app.featured.len(), 2);
        assert_eq!(app.focus, Section::Featured);
        // Gallery filter untouched
        assert_eq!(app.gallery_filter.category, None);

        app.handle_action(Action::OpenViewer);
        assert!(app.event_viewer.is_open());
        assert!(!app.viewer.is_open());
        assert_eq!(app.event_viewer.items().len(), 3);
        assert_eq!(app.viewed_event().map(|e| e.id.as_str()), Some("f-1"));
        pump(&mut app, &mut rx);
        let requests = app.take_media_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].section, Section::Featured);
        assert_eq!(requests[0].index, 0);

        app.handle_action(Action::Viewer(ViewerKey::ArrowRight));
        assert_eq!(app.event_viewer.counter_label().as_deref(), Some("2 / 3"));
        pump(&mut app, &mut rx);
        let requests = app.take_media_requests();
        assert_eq!(requests[0].index, 1);

        app.on_media_loaded(MediaLoadResult::Success {
            section: Section::Featured,
            index: 1,
            image: DynamicImage::new_rgb8(2, 2),
        });
        assert!(app.viewer_image().is_some());

        app.handle_action(Action::Viewer(ViewerKey::Escape));
        pump(&mut app, &mut rx);
        assert!(!app.modal_open());
        assert!(app.viewer_image.is_none());
        assert_eq!(app.featured.index(), 0);
    }

    #[test]
    fn test_event_without_gallery_shows_cover() {
        let (mut app, _rx) = sample_app();
        app.focus = Section::Featured;
        app.featured.goto(4);
        app.open_viewer();
        assert_eq!(app.event_viewer.counter_label().as_deref(), Some("1 / 1"));
        assert_eq!(
            app.current_media_item().map(|item| item.media_ref.as_str()),
            Some("media/featured/jaipur.jpg")
        );
    }

    #[test]
    fn test_gallery_result_ignored_by_event_viewer() {
        let (mut app, _rx) = sample_app();
        app.focus = Section::Featured;
        app.open_viewer();
        app.on_media_loaded(MediaLoadResult::Success {
            section: Section::Gallery,
            index: 0,
            image: DynamicImage::new_rgb8(2, 2),
        });
        assert!(app.event_viewer.is_loading());
        assert!(app.viewer_image().is_none());
    }

    #[test]
    fn test_slider_drag_and_leave() {
        let (mut app, _rx) = sample_app();
        app.hit.comparison = Rect::new(10, 5, 41, 6);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 30, 6));
        assert!(app.slider.is_dragging());
        assert_eq!(app.slider.fraction(), 50.0);

        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 20, 6));
        assert_eq!(app.slider.fraction(), 25.0);

        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 80, 6));
        assert!(!app.slider.is_dragging());
        assert_eq!(app.slider.fraction(), 25.0);
    }

    #[test]
    fn test_hover_pauses_marquee() {
        let (mut app, _rx) = sample_app();
        app.marquee.start();
        app.hit.marquee = Rect::new(0, 0, 80, 5);

        app.handle_mouse(mouse(MouseEventKind::Moved, 3, 2));
        assert!(app.marquee.is_paused());
        app.handle_mouse(mouse(MouseEventKind::Moved, 3, 20));
        assert!(!app.marquee.is_paused());
    }

    #[test]
    fn test_testimonial_toggle_pauses_ticker() {
        let (mut app, _rx) = sample_app();
        app.marquee.start();
        app.focus = Section::Testimonials;
        app.handle_action(Action::TogglePlay);
        assert!(!app.marquee.is_started());
        assert_eq!(app.on_frame(), None);
    }

    #[test]
    fn test_slider_nudge_uses_keyboard_step() {
        let (mut app, _rx) = sample_app();
        app.handle_action(Action::SliderRight);
        assert_eq!(app.slider.fraction(), 55.0);
        assert_eq!(app.focus, Section::Comparisons);
    }
}
