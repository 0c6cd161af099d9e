//! Results screen rendering

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::helpers::{centered_rect, wrap_text};
use super::map::render_map_background;
use crate::app::App;
use crate::models::AnswerRecord;
use crate::theme::{
    BG_CARD, BORDER_SUBTLE, BRAND_BLUE, GREEN_YES, RED_NO, TEXT_MUTED, TEXT_PRIMARY,
    TEXT_SECONDARY,
};

const PANEL_WIDTH: u16 = 64;

pub fn render_results_screen(frame: &mut Frame, area: Rect, app: &App) {
    render_map_background(frame, area, app.results_map.state());

    let panel = centered_rect(area, PANEL_WIDTH, area.height, 0);
    let answers = if app.show_answers {
        Constraint::Min(5)
    } else {
        Constraint::Length(3)
    };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(9), // City card
            answers,
            Constraint::Length(1), // Actions
        ])
        .split(panel);

    render_title(frame, layout[0]);
    render_city_card(frame, layout[1], app);
    render_answers(frame, layout[2], app);
    render_actions(frame, layout[3]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Your Perfect Match!",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Based on your answers, we found your ideal city",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().style(Style::default().bg(BG_CARD)));
    frame.render_widget(title, area);
}

fn render_city_card(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .style(Style::default().bg(BG_CARD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(city_match) = &app.city_match else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                city_match.city.clone(),
                Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(", {}", city_match.country),
                Style::default().fg(TEXT_SECONDARY),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Why {}?", city_match.city),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    for line in wrap_text(&city_match.explanation, inner.width.saturating_sub(2) as usize) {
        lines.push(Line::from(Span::styled(
            line,
            Style::default().fg(TEXT_SECONDARY),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner.inner(Margin::new(1, 0)));
}

fn render_answers(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }

    let answers = app.controller.answers();
    let toggle = if app.show_answers { "−" } else { "+" };
    let block = Block::default()
        .title(format!(" View Your Answers ({}) {} ", answers.len(), toggle))
        .title_style(Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .style(Style::default().bg(BG_CARD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !app.show_answers {
        let hint = Paragraph::new(Span::styled(
            "Press a to expand",
            Style::default().fg(TEXT_MUTED),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hint, inner);
        return;
    }

    // Scrolling moves whole answers; the list starts at the scrolled-to one
    let width = inner.width.saturating_sub(2) as usize;
    let lines: Vec<Line> = answers
        .iter()
        .enumerate()
        .skip(app.answers_scroll)
        .flat_map(|(i, answer)| answer_lines(i, answer, width))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner.inner(Margin::new(1, 0)));
}

fn answer_lines(index: usize, answer: &AnswerRecord, width: usize) -> Vec<Line<'static>> {
    let choice_color = if answer.choice == "Yes" { GREEN_YES } else { RED_NO };

    let mut lines = vec![Line::from(Span::styled(
        format!("Question {} · {}", index + 1, answer.category),
        Style::default().fg(TEXT_MUTED),
    ))];
    for line in wrap_text(&answer.question, width) {
        lines.push(Line::from(Span::styled(
            line,
            Style::default().fg(TEXT_PRIMARY),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("→ {}", answer.choice),
        Style::default().fg(choice_color).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines
}

fn render_actions(frame: &mut Frame, area: Rect) {
    let actions = Paragraph::new(Line::from(vec![
        Span::styled(
            " r: Try Again ",
            Style::default().fg(BG_CARD).bg(BRAND_BLUE),
        ),
        Span::raw("   "),
        Span::styled(
            " s: Share Result ",
            Style::default().fg(BRAND_BLUE).bg(BG_CARD),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(actions, area);
}
