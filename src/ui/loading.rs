//! Loading screen rendering

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use super::helpers::centered_rect;
use crate::theme::{spinner_frame, BG_PAGE, BRAND_BLUE, TEXT_PRIMARY, TEXT_SECONDARY};

/// Spinner plus "Analyzing your preferences..." while the match is prepared
pub fn render_loading_screen(frame: &mut Frame, area: Rect, tick: u64) {
    frame.render_widget(Block::default().style(Style::default().bg(BG_PAGE)), area);

    let content = vec![
        Line::from(Span::styled(
            spinner_frame(tick),
            Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Analyzing your preferences...",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Finding your perfect city match",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let inner = centered_rect(area, 40, content.len() as u16, 0);
    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .style(Style::default().bg(BG_PAGE));
    frame.render_widget(paragraph, inner);
}
