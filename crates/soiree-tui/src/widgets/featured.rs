use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use soiree_core::media::{Section, ALL_CATEGORIES};

use super::{category_bar, dots, section_block};
use crate::app::App;

pub struct FeaturedWidget;

impl FeaturedWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let featured = &app.featured;
        let title = if featured.is_empty() {
            "Featured Events".to_string()
        } else {
            format!("Featured Events · {} / {}", featured.index() + 1, featured.len())
        };
        let block = section_block(title, app.focus == Section::Featured, theme);

        let active = app
            .featured_filter
            .category
            .as_deref()
            .unwrap_or(ALL_CATEGORIES);
        let filter_bar = Line::from(category_bar(&app.featured_categories, active, theme));

        let Some(item) = featured.current_item() else {
            let empty = Line::from(Span::styled(
                "No events in this category",
                Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
            ));
            frame.render_widget(
                Paragraph::new(vec![filter_bar, Line::default(), empty]).block(block),
                area,
            );
            return;
        };

        let mut lines = vec![
            filter_bar,
            Line::from(Span::styled(
                item.title().to_string(),
                Style::default().fg(theme.gold).add_modifier(Modifier::BOLD),
            )),
        ];

        if let Some(date) = item.date {
            lines.push(Line::from(Span::styled(
                date.format("%B %-d, %Y").to_string(),
                Style::default().fg(theme.champagne),
            )));
        }

        let mut details = Vec::new();
        if let Some(category) = &item.category {
            details.push(category.clone());
        }
        if let Some(place) = item
            .metadata_str("location")
            .or_else(|| item.metadata_str("venue"))
        {
            details.push(place.to_string());
        }
        if let Some(guests) = item.metadata.get("guests").and_then(|v| v.as_u64()) {
            details.push(format!("{} guests", guests));
        }
        lines.push(Line::from(Span::styled(
            details.join(" · "),
            Style::default().fg(theme.grey1),
        )));
        let photos = item.gallery.len().max(1);
        let mut footer = dots(featured.len(), |k| featured.is_current(k), theme);
        footer.push(Span::styled(
            format!("  Enter: {} photo{}", photos, if photos == 1 { "" } else { "s" }),
            Style::default().fg(theme.grey1),
        ));
        lines.push(Line::from(footer));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
