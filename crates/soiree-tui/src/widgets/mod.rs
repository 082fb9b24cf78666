mod comparison;
mod featured;
mod gallery;
mod hero;
mod popup;
mod status_bar;
mod testimonials;
mod viewer;

pub use comparison::ComparisonWidget;
pub use featured::FeaturedWidget;
pub use gallery::GalleryWidget;
pub use hero::HeroWidget;
pub use popup::{centered_rect, fit_width, truncate_str, PopupWidget};
pub use status_bar::StatusBarWidget;
pub use testimonials::TestimonialsWidget;
pub use viewer::ViewerWidget;

use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

use crate::theme::Theme;

/// Bordered section frame, gold when focused
pub(crate) fn section_block<'a>(title: String, focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.grey0)
    };
    let title_style = if focused {
        Style::default().fg(theme.gold).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.grey1)
    };

    Block::default()
        .title(Span::styled(format!(" {} ", title), title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(theme.bg0))
}

/// Position dots, the current entry filled
pub(crate) fn dots<'a>(
    length: usize,
    is_current: impl Fn(usize) -> bool,
    theme: &Theme,
) -> Vec<Span<'a>> {
    (0..length)
        .map(|k| {
            if is_current(k) {
                Span::styled("● ", Style::default().fg(theme.gold))
            } else {
                Span::styled("○ ", Style::default().fg(theme.grey0))
            }
        })
        .collect()
}

/// Category chips, the active one highlighted
pub(crate) fn category_bar<'a>(
    categories: &[String],
    active: &str,
    theme: &Theme,
) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    for category in categories {
        let style = if category == active {
            Style::default()
                .fg(theme.bg0)
                .bg(theme.gold)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.grey1)
        };
        spans.push(Span::styled(format!(" {} ", category), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Five-slot star rating
pub(crate) fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
