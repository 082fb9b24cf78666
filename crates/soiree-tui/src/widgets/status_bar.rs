use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use soiree_core::media::Section;
use soiree_core::config::KeymapConfig;
use unicode_width::UnicodeWidthStr;

use super::truncate_str;
use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match &app.mode {
            Mode::Normal if app.modal_open() => "VIEWER",
            Mode::Normal => "NORMAL",
            Mode::Search(_) => "SEARCH",
            Mode::Help => "HELP",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else if let Mode::Search(query) = &app.mode {
            format!(" /{}▏", query)
        } else {
            format!(" {} | {}", app.focus.name(), Self::section_summary(app))
        };

        let hint = help_hint(&app.config.keymap);
        let mode_label = format!(" {} ", mode_str);
        let available = (area.width as usize)
            .saturating_sub(mode_label.width() + hint.width());
        let status_text = truncate_str(&status_text, available);
        let padding_len = available.saturating_sub(status_text.width());

        let bar = Style::default().fg(theme.fg0).bg(theme.bg2);
        let line = Line::from(vec![
            Span::styled(
                mode_label,
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.gold)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(status_text, bar),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Position and playback of the focused section
    fn section_summary(app: &App) -> String {
        let position = |index: usize, len: usize| {
            if len == 0 {
                "empty".to_string()
            } else {
                format!("{}/{}", index + 1, len)
            }
        };
        match app.focus {
            Section::Hero => format!(
                "{} | {}",
                position(app.hero.index(), app.hero.len()),
                if app.hero.is_playing() { "playing" } else { "paused" }
            ),
            Section::Testimonials => format!(
                "{} | {} | ticker {}",
                position(app.testimonials.index(), app.testimonials.len()),
                if app.testimonials.is_playing() { "playing" } else { "paused" },
                if app.marquee.is_started() { "on" } else { "off" }
            ),
            Section::Gallery => format!(
                "{} | {}",
                position(app.gallery.index(), app.gallery.len()),
                app.gallery_filter.category().unwrap_or("All")
            ),
            Section::Featured => format!(
                "{} | {}",
                position(app.featured.index(), app.featured.len()),
                app.featured_filter.category().unwrap_or("All")
            ),
            Section::Comparisons => format!(
                "{} | slider {:.0}%",
                position(app.comparisons.index(), app.comparisons.len()),
                app.slider.fraction()
            ),
        }
    }
}

/// Key reminder built from the configured bindings
fn help_hint(keys: &KeymapConfig) -> String {
    let label = |key: &str| key.trim_start_matches('<').trim_end_matches('>').to_string();
    format!(
        " {}:quit {}:section {}/{}:move {}:play {}:view ?:help ",
        label(&keys.quit),
        label(&keys.focus_next),
        label(&keys.prev),
        label(&keys.next),
        label(&keys.toggle_play),
        label(&keys.open_viewer),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_hint_follows_keymap() {
        let mut keys = KeymapConfig::default();
        assert_eq!(
            help_hint(&keys),
            " q:quit Tab:section h/l:move Space:play CR:view ?:help "
        );

        keys.quit = "Q".to_string();
        keys.next = "<Right>".to_string();
        let hint = help_hint(&keys);
        assert!(hint.contains(" Q:quit "));
        assert!(hint.contains("h/Right:move"));
    }
}
