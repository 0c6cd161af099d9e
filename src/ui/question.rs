//! Question screen rendering

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
};

use super::helpers::{centered_rect, wrap_text};
use super::map::render_map_background;
use crate::app::App;
use crate::theme::{
    fade, BG_CARD, BORDER_SUBTLE, BRAND_BLUE, GREEN_YES, RED_NO, TEXT_MUTED, TEXT_PRIMARY,
    TEXT_SECONDARY,
};

const CARD_WIDTH: u16 = 56;
const CARD_HEIGHT: u16 = 12;

/// Drag offset units per terminal column
const OFFSET_PER_COLUMN: i16 = 5;

pub fn render_question_screen(frame: &mut Frame, area: Rect, app: &App) {
    render_map_background(frame, area, app.question_map.state());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(3), // Progress
        ])
        .split(area);

    render_header(frame, layout[0]);
    render_card(frame, layout[1], app);
    render_progress(frame, layout[2], app);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let inner = centered_rect(area, 64, 3, 0);
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Where to Move Game",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Discover your perfect city through our card-swiping adventure",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().style(Style::default().bg(BG_CARD)));
    frame.render_widget(header, inner);
}

fn render_card(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.controller.current_question() else {
        return;
    };

    let card_area = centered_rect(
        area,
        CARD_WIDTH,
        CARD_HEIGHT,
        app.swipe.offset() / OFFSET_PER_COLUMN,
    );
    let title = format!(
        " Question {} of {} ",
        app.controller.current_index() + 1,
        app.controller.total_questions()
    );
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(TEXT_MUTED))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .style(Style::default().bg(BG_CARD));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let mut lines = vec![
        Line::from(Span::styled(
            question.category.to_uppercase(),
            Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for line in wrap_text(&question.text, inner.width.saturating_sub(4) as usize) {
        lines.push(Line::from(Span::styled(
            line,
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let content_height = inner.height.saturating_sub(1);
    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(
        text,
        Rect {
            height: content_height,
            ..inner
        },
    );

    if inner.height > 0 {
        render_indicators(
            frame,
            Rect {
                y: inner.y + content_height,
                height: 1,
                ..inner
            },
            app,
        );
    }
}

/// "← No" and "Yes →" fade in as the card is dragged toward them
fn render_indicators(frame: &mut Frame, area: Rect, app: &App) {
    let (no_opacity, yes_opacity) = app.swipe.opacity();
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Keep a floor so the hints stay readable at rest
    let no = Paragraph::new(Span::styled(
        " ← No",
        Style::default()
            .fg(fade(RED_NO, BG_CARD, no_opacity.max(0.25)))
            .add_modifier(Modifier::BOLD),
    ));
    let yes = Paragraph::new(Span::styled(
        "Yes → ",
        Style::default()
            .fg(fade(GREEN_YES, BG_CARD, yes_opacity.max(0.25)))
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);

    frame.render_widget(no, halves[0]);
    frame.render_widget(yes, halves[1]);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.controller.total_questions();
    let answered = app.controller.answers().len();
    let ratio = if total == 0 {
        0.0
    } else {
        answered as f64 / total as f64
    };

    let gauge_area = centered_rect(area, CARD_WIDTH, 1, 0);
    let gauge_area = Rect {
        y: area.y + area.height / 2,
        ..gauge_area
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(BRAND_BLUE).bg(BORDER_SUBTLE))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(Span::styled(
            format!("{} / {}", answered, total),
            Style::default().fg(TEXT_PRIMARY),
        ));
    frame.render_widget(gauge, gauge_area);
}
