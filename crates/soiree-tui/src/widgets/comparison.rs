use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use soiree_core::media::{clip_extent, Section};

use super::section_block;
use crate::app::App;

pub struct ComparisonWidget;

impl ComparisonWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let index = app.comparisons.index();
        let pair = app.catalog.comparisons.get(index).cloned();
        let fraction = app.slider.fraction();

        let title = match &pair {
            Some(pair) => format!("Before & After · {} · {:.0}%", pair.title, fraction),
            None => "Before & After".to_string(),
        };
        let block = section_block(title, app.focus == Section::Comparisons, &app.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let theme = &app.theme;
        let Some(pair) = pair else {
            app.hit.comparison = Rect::default();
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No comparisons",
                    Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
                )),
                inner,
            );
            return;
        };

        let hint = Line::from(vec![
            Span::styled("drag", Style::default().fg(theme.gold)),
            Span::styled(" or ", Style::default().fg(theme.grey1)),
            Span::styled(
                format!("{} {}", app.config.keymap.slider_left, app.config.keymap.slider_right),
                Style::default().fg(theme.gold),
            ),
            Span::styled(
                format!(" to compare · {} / {}", index + 1, app.comparisons.len()),
                Style::default().fg(theme.grey1),
            ),
        ]);
        frame.render_widget(Paragraph::new(hint), Rect { height: 1, ..inner });

        let stage = Rect {
            y: inner.y + 1,
            height: inner.height.saturating_sub(1),
            ..inner
        };
        if stage.height == 0 || stage.width == 0 {
            app.hit.comparison = Rect::default();
            return;
        }

        let extent = clip_extent(fraction, stage.width);
        let before_area = Rect { width: extent, ..stage };
        let after_area = Rect {
            x: stage.x + extent,
            width: stage.width - extent,
            ..stage
        };
        let label_row = stage.height / 2;

        let before = Self::layer("BEFORE", pair.before.title(), label_row, Alignment::Left)
            .style(Style::default().fg(theme.fg0).bg(theme.grey0));
        let after = Self::layer("AFTER", pair.after.title(), label_row, Alignment::Right)
            .style(Style::default().fg(theme.bg0).bg(theme.gold_dim));
        frame.render_widget(after, after_area);
        frame.render_widget(before, before_area);

        // Handle on the clip boundary
        if extent < stage.width {
            let handle_style = if app.slider.is_dragging() {
                Style::default().fg(theme.champagne).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.gold)
            };
            let handle: Vec<Line> = (0..stage.height)
                .map(|row| {
                    let glyph = if row == label_row { "◆" } else { "┃" };
                    Line::from(Span::styled(glyph, handle_style))
                })
                .collect();
            let handle_area = Rect {
                x: stage.x + extent,
                width: 1,
                ..stage
            };
            frame.render_widget(Paragraph::new(handle), handle_area);
        }

        app.hit.comparison = stage;
    }

    fn layer<'a>(
        label: &str,
        caption: &str,
        label_row: u16,
        alignment: Alignment,
    ) -> Paragraph<'a> {
        let mut lines: Vec<Line> = (0..label_row).map(|_| Line::default()).collect();
        lines.push(Line::from(Span::styled(
            format!(" {} ", label),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!(" {} ", caption)));
        Paragraph::new(lines).alignment(alignment)
    }
}
