use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key binding overview
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keys = &app.config.keymap;
        let area = frame.area();

        let bindings: [(&str, &str); 14] = [
            (keys.focus_next.as_str(), "next section"),
            (keys.focus_prev.as_str(), "previous section"),
            (keys.next.as_str(), "next item"),
            (keys.prev.as_str(), "previous item"),
            (keys.toggle_play.as_str(), "play / pause"),
            (keys.open_viewer.as_str(), "open image viewer / event photos"),
            (keys.cycle_category.as_str(), "cycle gallery or event category"),
            (keys.search.as_str(), "search gallery"),
            (keys.slider_left.as_str(), "comparison slider left"),
            (keys.slider_right.as_str(), "comparison slider right"),
            (keys.open_external.as_str(), "open media externally"),
            ("←/→ Esc i", "viewer: navigate, close, info"),
            ("mouse", "drag slider, hover ticker, click image"),
            (keys.quit.as_str(), "quit"),
        ];

        let popup_width = 56u16.min(area.width.saturating_sub(4));
        let popup_height = (bindings.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.gold))
            .style(Style::default().bg(theme.bg1));

        let mut lines: Vec<Line> = bindings
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>12}  ", key),
                        Style::default()
                            .fg(theme.gold)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*description, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "press any key to close",
            Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
        )));

        frame.render_widget(
            Paragraph::new(lines).block(block).alignment(Alignment::Left),
            popup_area,
        );
    }
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Truncate a string to `max_width` display columns with an ellipsis
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Pad (or truncate) to exactly `width` display columns
pub fn fit_width(s: &str, width: usize) -> String {
    let truncated = truncate_str(s, width);
    let pad = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_display_width() {
        assert_eq!(truncate_str("Soirée", 10), "Soirée");
        assert_eq!(truncate_str("Floral Mandap", 7), "Floral…");
        assert_eq!(truncate_str("abc", 0), "");
    }

    #[test]
    fn test_fit_width_pads() {
        assert_eq!(fit_width("ab", 4), "ab  ");
        assert_eq!(fit_width("abcdef", 4).width(), 4);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(40, 40, area), area);
    }
}
