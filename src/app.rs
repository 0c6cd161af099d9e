//! Application state and core logic for the quiz TUI.
//!
//! This module contains the `App` struct which ties the phase controller,
//! the two map backgrounds and the results/share state together, and maps
//! key presses onto them.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use tracing::warn;

use crate::config::MapsConfig;
use crate::map::{LibraryRegistry, LocationTarget, MapBackground};
use crate::models::{Choice, CityMatch, Phase, QuestionSet};
use crate::quiz::{MatchGenerator, PhaseController, PlaceholderMatcher};
use crate::share::{share_match, ShareSink};
use crate::swipe::SwipeCard;

/// How often the spinner advances
const ANIMATION_INTERVAL: Duration = Duration::from_millis(150);

/// Application state
pub struct App {
    pub controller: PhaseController,
    pub matcher: Box<dyn MatchGenerator>,
    pub city_match: Option<CityMatch>,
    // Map behind the question card, rotating with the question number
    pub question_map: MapBackground,
    // Map behind the results card, centered on the matched city
    pub results_map: MapBackground,
    pub swipe: SwipeCard,
    pub share_sink: Box<dyn ShareSink>,
    // Results screen: answers list expanded and the first answer shown
    pub show_answers: bool,
    pub answers_scroll: usize,
    // One-line feedback in the bottom bar (share outcome)
    pub status_message: Option<String>,
    // Animation state
    pub animation_tick: u64,
    pub last_animation_update: Instant,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        questions: QuestionSet,
        registry: LibraryRegistry,
        maps: MapsConfig,
        share_sink: Box<dyn ShareSink>,
    ) -> Self {
        let question_map = MapBackground::new(
            "question",
            registry.clone(),
            maps.clone(),
            &LocationTarget::Index(0),
        );
        let results_map = MapBackground::new("results", registry, maps, &LocationTarget::Default);

        let mut app = Self {
            controller: PhaseController::new(questions),
            matcher: Box::new(PlaceholderMatcher),
            city_match: None,
            question_map,
            results_map,
            swipe: SwipeCard::default(),
            share_sink,
            show_answers: false,
            answers_scroll: 0,
            status_message: None,
            animation_tick: 0,
            last_animation_update: Instant::now(),
            should_quit: false,
        };
        app.sync_views();
        app
    }

    /// Route a key press to the current screen
    pub fn handle_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
            self.should_quit = true;
            return;
        }

        match self.controller.phase() {
            Phase::Questioning => self.handle_question_key(code),
            Phase::Loading => {}
            Phase::Results => self.handle_results_key(code),
        }
    }

    fn handle_question_key(&mut self, code: KeyCode) {
        let choice = match code {
            KeyCode::Left => self.swipe.nudge(Choice::No),
            KeyCode::Right => self.swipe.nudge(Choice::Yes),
            KeyCode::Char('y') => {
                self.swipe.reset();
                Some(Choice::Yes)
            }
            KeyCode::Char('n') => {
                self.swipe.reset();
                Some(Choice::No)
            }
            KeyCode::Enter => self.swipe.release(),
            _ => None,
        };

        if let Some(choice) = choice {
            self.answer(choice);
        }
    }

    fn handle_results_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('s') => self.share(),
            KeyCode::Char('a') | KeyCode::Tab => {
                self.show_answers = !self.show_answers;
                self.answers_scroll = 0;
            }
            KeyCode::Up => {
                self.answers_scroll = self.answers_scroll.saturating_sub(1);
            }
            KeyCode::Down if self.show_answers => {
                let last = self.controller.answers().len().saturating_sub(1);
                self.answers_scroll = (self.answers_scroll + 1).min(last);
            }
            _ => {}
        }
    }

    /// Record an answer for the card on screen
    pub fn answer(&mut self, choice: Choice) {
        match self.controller.submit_answer(choice) {
            Ok(_) => self.sync_views(),
            Err(err) => warn!(%err, "ignoring answer"),
        }
    }

    /// Start a fresh session
    pub fn restart(&mut self) {
        self.controller.restart();
        self.city_match = None;
        self.swipe.reset();
        self.show_answers = false;
        self.answers_scroll = 0;
        self.status_message = None;
        self.sync_views();
    }

    /// Share the current match, if any
    pub fn share(&mut self) {
        if let Some(city_match) = &self.city_match {
            self.status_message = Some(share_match(self.share_sink.as_ref(), city_match));
        }
    }

    /// Periodic work from the event loop: loading deadline, map loads and
    /// animation
    pub fn on_tick(&mut self, now: Instant) {
        if self.controller.tick(now) {
            self.sync_views();
        }

        self.question_map.poll();
        self.results_map.poll();

        if now.saturating_duration_since(self.last_animation_update) >= ANIMATION_INTERVAL {
            self.animation_tick = self.animation_tick.wrapping_add(1);
            self.last_animation_update = now;
        }
    }

    /// Mount, unmount and retarget the map views for the current phase
    fn sync_views(&mut self) {
        match self.controller.phase() {
            Phase::Questioning => {
                self.results_map.unmount();
                let index = self.controller.current_index() as i64;
                self.question_map.set_target(&LocationTarget::Index(index));
                self.question_map.mount();
            }
            Phase::Loading => {
                self.question_map.unmount();
                self.results_map.unmount();
            }
            Phase::Results => {
                let city_match = self
                    .city_match
                    .get_or_insert_with(|| self.matcher.generate(self.controller.answers()));
                let target = LocationTarget::choose(Some(&city_match.city), None);
                self.question_map.unmount();
                self.results_map.set_target(&target);
                self.results_map.mount();
            }
        }
    }

    /// Tear down before exit: no pending transition, no load listeners
    pub fn shutdown(&mut self) {
        self.controller.cancel_loading_timer();
        self.question_map.unmount();
        self.results_map.unmount();
    }
}
