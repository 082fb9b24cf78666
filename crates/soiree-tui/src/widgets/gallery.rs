use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use soiree_core::media::{Item, Section, ALL_CATEGORIES};

use super::{category_bar, fit_width, section_block};
use crate::app::{App, Mode};

const TILE_WIDTH: u16 = 26;
const TILE_HEIGHT: u16 = 3;
const TILE_GAP: u16 = 1;

pub struct GalleryWidget;

impl GalleryWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let focused = app.focus == Section::Gallery;
        let title = format!("Gallery · {} images", app.gallery.len());
        let block = section_block(title, focused, &app.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        app.hit.gallery_tiles.clear();
        if inner.height == 0 {
            return;
        }

        let filter_area = Rect { height: 1, ..inner };
        Self::render_filter_bar(frame, filter_area, app);

        let grid = Rect {
            y: inner.y + 2,
            height: inner.height.saturating_sub(2),
            ..inner
        };
        Self::render_tiles(frame, grid, app);
    }

    fn render_filter_bar(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let active = app
            .gallery_filter
            .category
            .as_deref()
            .unwrap_or(ALL_CATEGORIES);

        let mut spans = category_bar(&app.categories, active, theme);

        match &app.mode {
            Mode::Search(query) => {
                spans.push(Span::styled(
                    format!(" /{}▏", query),
                    Style::default().fg(theme.champagne),
                ));
            }
            _ if !app.gallery_filter.search.is_empty() => {
                spans.push(Span::styled(
                    format!(" /{}", app.gallery_filter.search),
                    Style::default().fg(theme.grey1),
                ));
            }
            _ => {}
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_tiles(frame: &mut Frame, area: Rect, app: &mut App) {
        let gallery = &app.gallery;
        if gallery.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No images match the current filter",
                    Style::default()
                        .fg(app.theme.grey1)
                        .add_modifier(Modifier::ITALIC),
                )),
                area,
            );
            return;
        }

        let columns = usize::from((area.width / (TILE_WIDTH + TILE_GAP)).max(1));
        let visible_rows = usize::from((area.height / (TILE_HEIGHT + TILE_GAP)).max(1));
        // Scroll so the selected tile's row stays visible
        let selected_row = gallery.index() / columns;
        let first_row = selected_row.saturating_sub(visible_rows - 1);

        let mut tiles = Vec::new();
        for (k, item) in gallery.items().iter().enumerate() {
            let row = k / columns;
            if row < first_row || row >= first_row + visible_rows {
                continue;
            }
            let col = (k % columns) as u16;
            let rect = Rect {
                x: area.x + col * (TILE_WIDTH + TILE_GAP),
                y: area.y + (row - first_row) as u16 * (TILE_HEIGHT + TILE_GAP),
                width: TILE_WIDTH.min(area.width),
                height: TILE_HEIGHT.min(area.height),
            };
            if rect.bottom() > area.bottom() {
                continue;
            }
            let selected = gallery.is_current(k);
            frame.render_widget(Self::tile(item, selected, app), rect);
            tiles.push((k, rect));
        }
        app.hit.gallery_tiles = tiles;
    }

    fn tile<'a>(item: &Item, selected: bool, app: &App) -> Paragraph<'a> {
        let theme = &app.theme;
        let focused = app.focus == Section::Gallery;
        let width = usize::from(TILE_WIDTH);

        let bg = if selected { theme.selection } else { theme.bg1 };
        let caption_style = if selected && focused {
            Style::default().fg(theme.gold).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD)
        };

        let category = item.category.as_deref().unwrap_or("");
        let venue = item.metadata_str("venue").unwrap_or("");
        let guests = item
            .metadata
            .get("guests")
            .and_then(|v| v.as_u64())
            .map(|n| format!(" {} guests", n))
            .unwrap_or_default();
        let marker = if selected { "▌" } else { " " };

        Paragraph::new(vec![
            Line::from(Span::styled(
                fit_width(&format!("{}{}", marker, item.title()), width),
                caption_style,
            )),
            Line::from(Span::styled(
                fit_width(&format!(" {} · {}", category, venue), width),
                Style::default().fg(theme.grey1),
            )),
            Line::from(Span::styled(
                fit_width(&guests, width),
                Style::default().fg(theme.rose),
            )),
        ])
        .style(Style::default().bg(bg))
    }
}
