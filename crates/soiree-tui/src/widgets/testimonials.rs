use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use soiree_core::media::{Item, Section};

use super::{dots, fit_width, section_block, stars, truncate_str};
use crate::app::App;
use crate::theme::Theme;

/// Rows per ticker card
const CARD_ROWS: usize = 3;

pub struct TestimonialsWidget;

impl TestimonialsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let stats = app.stats;
        let title = if stats.count > 0 {
            format!(
                "Testimonials · {:.1}★ average · {}% five-star · {} reviews",
                stats.average_rating, stats.satisfaction_percent, stats.count
            )
        } else {
            "Testimonials".to_string()
        };
        let block = section_block(title, app.focus == Section::Testimonials, &app.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Carousel card
                Constraint::Length(1), // Spacer
                Constraint::Min(CARD_ROWS as u16),
            ])
            .split(inner);

        Self::render_card(frame, chunks[0], app);

        app.hit.marquee = chunks[2];
        app.measure_marquee(chunks[2].width);
        Self::render_marquee(frame, chunks[2], app);
    }

    /// Current testimonial of the auto-advancing carousel
    fn render_card(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let carousel = &app.testimonials;
        let Some(item) = carousel.current_item() else {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No testimonials yet",
                    Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
                )),
                area,
            );
            return;
        };

        let mut header = vec![
            Span::styled(
                stars(item.rating().unwrap_or(0)),
                Style::default().fg(theme.gold),
            ),
            Span::raw("  "),
            Span::styled(
                item.title().to_string(),
                Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(detail) = event_line(item) {
            header.push(Span::styled(format!(" · {}", detail), Style::default().fg(theme.grey1)));
        }

        let quote = item.metadata_str("text").unwrap_or_default();
        let quote = truncate_str(&format!("“{}”", quote), area.width as usize);

        let mut indicator = dots(carousel.len(), |k| carousel.is_current(k), theme);
        if carousel.is_playing() {
            indicator.push(Span::styled(" ▶", Style::default().fg(theme.success)));
        }

        let lines = vec![
            Line::from(header),
            Line::from(Span::styled(
                quote,
                Style::default().fg(theme.champagne).add_modifier(Modifier::ITALIC),
            )),
            Line::from(indicator),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    /// The doubled card strip, scrolled by the ticker position
    fn render_marquee(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let items = app.testimonials.items();
        if items.is_empty() {
            return;
        }

        let card_width = usize::from(app.card_width(area.width));
        let gap = " ".repeat(usize::from(app.config.marquee.card_gap));
        let mut rows: Vec<Vec<Span>> = vec![Vec::new(); CARD_ROWS];

        for (_copy, item) in items.doubled() {
            for (row, (text, style)) in card_rows(item, theme).into_iter().enumerate() {
                rows[row].push(Span::styled(
                    fit_width(&text, card_width),
                    style.bg(theme.bg1),
                ));
                rows[row].push(Span::styled(gap.clone(), Style::default().bg(theme.bg0)));
            }
        }

        let offset = u16::try_from(app.marquee.visible_offset()).unwrap_or(u16::MAX);
        let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
        let strip = Paragraph::new(lines).scroll((0, offset));
        frame.render_widget(strip, area);
    }
}

fn card_rows(item: &Item, theme: &Theme) -> [(String, Style); CARD_ROWS] {
    let name = format!(" {} {}", stars(item.rating().unwrap_or(0)), item.title());
    let quote = format!(" “{}”", item.metadata_str("text").unwrap_or_default());
    let detail = format!(" {}", event_line(item).unwrap_or_default());
    [
        (name, Style::default().fg(theme.gold).add_modifier(Modifier::BOLD)),
        (quote, Style::default().fg(theme.fg0)),
        (detail, Style::default().fg(theme.grey1)),
    ]
}

/// "Event, Location · Mon YYYY"
fn event_line(item: &Item) -> Option<String> {
    let mut parts = Vec::new();
    match (item.metadata_str("event"), item.metadata_str("location")) {
        (Some(event), Some(location)) => parts.push(format!("{}, {}", event, location)),
        (Some(event), None) => parts.push(event.to_string()),
        (None, Some(location)) => parts.push(location.to_string()),
        (None, None) => {}
    }
    if let Some(date) = item.date {
        parts.push(date.format("%b %Y").to_string());
    }
    (!parts.is_empty()).then(|| parts.join(" · "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_event_line() {
        let mut item = Item::new("1", "a.jpg")
            .with_metadata("event", "Gala")
            .with_metadata("location", "Pune");
        item.date = NaiveDate::from_ymd_opt(2024, 2, 14);
        assert_eq!(event_line(&item).as_deref(), Some("Gala, Pune · Feb 2024"));
        assert_eq!(event_line(&Item::new("2", "b.jpg")), None);
    }
}
