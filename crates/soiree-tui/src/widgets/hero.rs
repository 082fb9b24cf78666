use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use soiree_core::media::Section;

use super::{dots, section_block};
use crate::app::App;

pub struct HeroWidget;

impl HeroWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let hero = &app.hero;
        let block = section_block("Soirée".to_string(), app.focus == Section::Hero, theme);

        let Some(item) = hero.current_item() else {
            let empty = Paragraph::new(Span::styled(
                "No slides",
                Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        };

        let tags = item.tags.iter().cloned().collect::<Vec<_>>().join(" · ");
        let playback = if hero.is_playing() {
            Span::styled("  ▶", Style::default().fg(theme.success))
        } else if hero.has_auto_advance() {
            Span::styled("  ⏸", Style::default().fg(theme.grey1))
        } else {
            Span::raw("")
        };

        let mut indicator = dots(hero.len(), |k| hero.is_current(k), theme);
        indicator.push(playback);

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                item.title().to_string(),
                Style::default()
                    .fg(theme.gold)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(tags, Style::default().fg(theme.grey1))),
            Line::default(),
            Line::from(indicator),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}
