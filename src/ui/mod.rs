//! UI module for where-to-move
//!
//! This module contains the rendering functions for each screen and the
//! map background drawn behind them.

mod helpers;
mod loading;
mod map;
mod question;
mod results;

use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::App;
use crate::models::Phase;
use crate::theme::{BG_CARD, BRAND_BLUE};

/// Draw the whole frame for the current phase
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main content area + bottom bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    match app.controller.phase() {
        Phase::Questioning => question::render_question_screen(frame, main_layout[0], app),
        Phase::Loading => loading::render_loading_screen(frame, main_layout[0], app.animation_tick),
        Phase::Results => results::render_results_screen(frame, main_layout[0], app),
    }

    render_bottom_bar(frame, main_layout[1], app);
}

fn render_bottom_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hints = match app.controller.phase() {
        Phase::Questioning => " ←/n: No | →/y: Yes | Enter: commit swipe | q: Quit ",
        Phase::Loading => " q: Quit ",
        Phase::Results => " r: Try Again | s: Share | a: Answers | ↑/↓: Scroll | q: Quit ",
    };

    let text = match &app.status_message {
        Some(message) => format!("{}| {} ", hints, message),
        None => hints.to_string(),
    };

    let bar = Paragraph::new(text).style(Style::default().fg(BG_CARD).bg(BRAND_BLUE));
    frame.render_widget(bar, area);
}
