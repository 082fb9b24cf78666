use image::{DynamicImage, GenericImageView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use soiree_core::media::{Item, ModalViewer, Section};

use super::{dots, fit_width};
use crate::app::App;
use crate::theme::Theme;

const THUMB_WIDTH: u16 = 14;
const INFO_WIDTH: u16 = 36;

pub struct ViewerWidget;

impl ViewerWidget {
    /// Render the fullscreen modal viewer
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        app.hit.thumbnails = Self::draw(frame, area, app);
    }

    /// Draw the open viewer; returns the thumbnail hit areas
    fn draw(frame: &mut Frame, area: Rect, app: &App) -> Vec<(usize, Rect)> {
        let Some((section, viewer)) = app.active_viewer() else {
            return Vec::new();
        };
        let theme = &app.theme;
        // Dark background
        let block = Block::default()
            .style(Style::default().bg(theme.bg0))
            .borders(Borders::NONE);
        frame.render_widget(block, area);

        let show_dots = section == Section::Featured && viewer.items().len() > 1;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                    // Caption + counter
                Constraint::Min(3),                       // Media (+ info panel)
                Constraint::Length(u16::from(show_dots)), // Position dots
                Constraint::Length(1),                    // Thumbnails
                Constraint::Length(1),                    // Key hints
            ])
            .split(area);

        Self::render_header(frame, chunks[0], viewer, theme);

        let media_area = if viewer.show_info() && chunks[1].width > INFO_WIDTH * 2 {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(10), Constraint::Length(INFO_WIDTH)])
                .split(chunks[1]);
            // Events describe the occasion, not the single photo
            let subject = app.viewed_event().or(viewer.current_item());
            Self::render_info(frame, split[1], subject, theme);
            split[0]
        } else {
            chunks[1]
        };

        if let Some(image) = app.viewer_image() {
            Self::render_fullscreen_halfblocks(frame, media_area, image);
        } else if viewer.is_loading() {
            Self::render_centered(
                frame,
                media_area,
                &format!("{} Loading image...", app.spinner()),
                Style::default().fg(theme.gold).add_modifier(Modifier::BOLD),
                theme,
            );
        } else if let Some(item) = viewer.current_item() {
            Self::render_centered(
                frame,
                media_area,
                &format!("[ {} ]", item.title()),
                Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
                theme,
            );
        } else {
            Self::render_centered(
                frame,
                media_area,
                "No images",
                Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
                theme,
            );
        }

        if show_dots {
            let line = Line::from(dots(viewer.items().len(), |k| viewer.index() == Some(k), theme));
            frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), chunks[2]);
        }
        let hits = Self::render_thumbnails(frame, chunks[3], viewer, theme);
        Self::render_hints(frame, chunks[4], theme);
        hits
    }

    fn render_header(frame: &mut Frame, area: Rect, viewer: &ModalViewer, theme: &Theme) {
        let counter = viewer.counter_label().unwrap_or_else(|| "0 / 0".to_string());
        let caption = viewer
            .current_item()
            .map(|item| item.title().to_string())
            .unwrap_or_default();

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", counter),
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.gold)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(caption, Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD)),
        ]);
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg1)), area);
    }

    /// Info panel: description, date, place, guests, highlights, tags
    fn render_info(frame: &mut Frame, area: Rect, item: Option<&Item>, theme: &Theme) {
        let block = Block::default()
            .title(" Details ")
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(theme.gold_dim))
            .style(Style::default().bg(theme.bg1));

        let Some(item) = item else {
            frame.render_widget(block, area);
            return;
        };

        let label = Style::default().fg(theme.gold);
        let value = Style::default().fg(theme.fg0);
        let mut lines = vec![
            Line::from(Span::styled(
                item.title().to_string(),
                Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        if let Some(description) = item.metadata_str("description") {
            lines.push(Line::from(Span::styled(description.to_string(), value)));
            lines.push(Line::default());
        }
        let mut field = |name: &'static str, text: String| {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<9}", name), label),
                Span::styled(text, value),
            ]));
        };
        if let Some(category) = &item.category {
            field("Category", category.clone());
        }
        if let Some(date) = item.date {
            field("Date", date.format("%B %-d, %Y").to_string());
        }
        if let Some(venue) = item.metadata_str("venue") {
            field("Venue", venue.to_string());
        }
        if let Some(location) = item.metadata_str("location") {
            field("Location", location.to_string());
        }
        if let Some(guests) = item.metadata.get("guests").and_then(|v| v.as_u64()) {
            field("Guests", guests.to_string());
        }

        let highlights = item.highlights();
        if !highlights.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Highlights", label)));
            for highlight in highlights {
                lines.push(Line::from(vec![
                    Span::styled("• ", Style::default().fg(theme.gold)),
                    Span::styled(highlight.to_string(), value),
                ]));
            }
        }
        if !item.tags.is_empty() {
            let tags = item
                .tags
                .iter()
                .map(|tag| format!("#{}", tag))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(tags, Style::default().fg(theme.rose))));
        }

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }

    /// Thumbnail strip; the current entry is highlighted
    fn render_thumbnails(
        frame: &mut Frame,
        area: Rect,
        viewer: &ModalViewer,
        theme: &Theme,
    ) -> Vec<(usize, Rect)> {
        let slots = usize::from((area.width / THUMB_WIDTH).max(1));
        let current = viewer.index().unwrap_or(0);
        // Keep the highlighted thumbnail in view
        let first = current.saturating_sub(slots.saturating_sub(1));

        let mut spans = Vec::new();
        let mut hits = Vec::new();
        for (k, highlighted) in viewer.thumbnails().skip(first).take(slots) {
            let caption = viewer
                .items()
                .get(k)
                .map(|item| item.title().to_string())
                .unwrap_or_default();
            let style = if highlighted {
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.gold)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.grey1).bg(theme.bg1)
            };
            let x = area.x + ((k - first) as u16) * THUMB_WIDTH;
            hits.push((k, Rect::new(x, area.y, THUMB_WIDTH - 1, 1)));
            spans.push(Span::styled(
                fit_width(&format!(" {}", caption), usize::from(THUMB_WIDTH - 1)),
                style,
            ));
            spans.push(Span::raw(" "));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
        hits
    }

    /// Render key hints
    fn render_hints(frame: &mut Frame, area: Rect, theme: &Theme) {
        let hints = Line::from(vec![
            Span::styled(" ←/→", Style::default().fg(theme.gold)),
            Span::styled(" prev/next ", Style::default().fg(theme.fg0)),
            Span::styled("i", Style::default().fg(theme.gold)),
            Span::styled(" info ", Style::default().fg(theme.fg0)),
            Span::styled("o", Style::default().fg(theme.gold)),
            Span::styled(" open externally ", Style::default().fg(theme.fg0)),
            Span::styled("Esc", Style::default().fg(theme.gold)),
            Span::styled(" close", Style::default().fg(theme.fg0)),
        ]);

        let paragraph = Paragraph::new(hints).style(Style::default().bg(theme.bg1));
        frame.render_widget(paragraph, area);
    }

    /// Single centered message line
    fn render_centered(frame: &mut Frame, area: Rect, message: &str, style: Style, theme: &Theme) {
        let paragraph = Paragraph::new(Line::from(Span::styled(message.to_string(), style)))
            .style(Style::default().bg(theme.bg0))
            .alignment(Alignment::Center);

        // Center vertically
        let centered_area = Rect {
            y: area.y + area.height / 2,
            height: 1.min(area.height),
            ..area
        };
        frame.render_widget(paragraph, centered_area);
    }

    /// Render image using halfblock characters
    fn render_fullscreen_halfblocks(frame: &mut Frame, area: Rect, img: &DynamicImage) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        // Each character cell represents 2 vertical pixels
        let target_width = area.width as u32;
        let target_height = (area.height as u32) * 2;

        // Calculate aspect-ratio preserving dimensions
        let (img_width, img_height) = img.dimensions();
        if img_width == 0 || img_height == 0 {
            return;
        }
        let scale_w = target_width as f32 / img_width as f32;
        let scale_h = target_height as f32 / img_height as f32;
        let scale = scale_w.min(scale_h);

        let new_width = ((img_width as f32 * scale) as u32).clamp(1, target_width);
        let new_height = ((img_height as f32 * scale) as u32).clamp(1, target_height);

        let resized =
            img.resize_exact(new_width, new_height, image::imageops::FilterType::Triangle);
        let rgba = resized.to_rgba8();

        // Center the image
        let x_offset = (target_width.saturating_sub(new_width)) / 2;
        let y_offset = (area.height as u32).saturating_sub(new_height.div_ceil(2)) / 2;

        for row in 0..new_height.div_ceil(2) {
            let y = row * 2;
            let mut spans: Vec<Span> = Vec::with_capacity(new_width as usize + 1);

            if x_offset > 0 {
                spans.push(Span::raw(" ".repeat(x_offset as usize)));
            }

            for x in 0..new_width {
                let top_pixel = rgba.get_pixel(x, y);
                let bottom_pixel = if y + 1 < new_height {
                    rgba.get_pixel(x, y + 1)
                } else {
                    top_pixel
                };

                let top_color = Color::Rgb(top_pixel[0], top_pixel[1], top_pixel[2]);
                let bottom_color = Color::Rgb(bottom_pixel[0], bottom_pixel[1], bottom_pixel[2]);

                spans.push(Span::styled(
                    "▀",
                    Style::default().fg(top_color).bg(bottom_color),
                ));
            }

            let line_area = Rect {
                x: area.x,
                y: area.y + (y_offset + row) as u16,
                width: area.width,
                height: 1,
            };

            if line_area.y < area.y + area.height {
                frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
            }
        }
    }
}
