//! Phase state machine for a quiz session.
//!
//! The controller is the only writer of the session. Screens read
//! `phase()`, `answers()` and `current_index()` and call back into
//! `submit_answer`, `tick` and `restart`.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::timer::{ScheduledTransition, LOADING_DELAY};
use crate::models::{AnswerRecord, Phase, Question, QuestionSet};

/// Contract violations from calling an operation in the wrong phase
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Cannot submit an answer while {phase}")]
    NotQuestioning { phase: Phase },
    #[error("No question at index {index} (question count {total})")]
    NoCurrentQuestion { index: usize, total: usize },
}

/// Phase, answer log and question cursor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub phase: Phase,
    pub answers: Vec<AnswerRecord>,
    pub current_index: usize,
}

/// Owns the session and the scheduled loading transition
pub struct PhaseController {
    questions: QuestionSet,
    session: Session,
    loading_timer: Option<ScheduledTransition>,
    loading_delay: Duration,
}

impl PhaseController {
    pub fn new(questions: QuestionSet) -> Self {
        Self::with_loading_delay(questions, LOADING_DELAY)
    }

    pub fn with_loading_delay(questions: QuestionSet, loading_delay: Duration) -> Self {
        Self {
            questions,
            session: Session::default(),
            loading_timer: None,
            loading_delay,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.session.answers
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Question on screen, if the session is still questioning
    pub fn current_question(&self) -> Option<&Question> {
        if self.session.phase != Phase::Questioning {
            return None;
        }
        self.questions.get(self.session.current_index)
    }

    /// Whether a loading transition is pending
    #[cfg(test)]
    pub fn loading_pending(&self) -> bool {
        self.loading_timer.is_some()
    }

    /// Time left on the loading deadline, if one is scheduled
    #[cfg(test)]
    pub fn loading_remaining(&self, now: Instant) -> Option<Duration> {
        self.loading_timer.map(|t| t.remaining(now))
    }

    /// Record an answer for the current question
    pub fn submit_answer(&mut self, choice: impl Into<String>) -> Result<Phase, SessionError> {
        self.submit_answer_at(choice, Instant::now())
    }

    /// Record an answer, scheduling the loading deadline relative to `now`
    /// if this was the last question
    pub fn submit_answer_at(
        &mut self,
        choice: impl Into<String>,
        now: Instant,
    ) -> Result<Phase, SessionError> {
        if self.session.phase != Phase::Questioning {
            warn!(phase = %self.session.phase, "answer submitted outside questioning");
            return Err(SessionError::NotQuestioning {
                phase: self.session.phase,
            });
        }

        let index = self.session.current_index;
        let Some(question) = self.questions.get(index) else {
            return Err(SessionError::NoCurrentQuestion {
                index,
                total: self.questions.len(),
            });
        };

        let record = AnswerRecord::new(question, choice);
        debug!(question_id = record.question_id, choice = %record.choice, "answer recorded");
        self.session.answers.push(record);
        self.session.current_index += 1;

        if self.session.current_index == self.questions.len() {
            info!(answers = self.session.answers.len(), "all questions answered");
            self.session.phase = Phase::Loading;
            self.loading_timer = Some(ScheduledTransition::starting_at(now, self.loading_delay));
        }

        Ok(self.session.phase)
    }

    /// Move from loading to results. Returns false (and changes nothing)
    /// outside the loading phase.
    pub fn complete_loading(&mut self) -> bool {
        if self.session.phase != Phase::Loading {
            return false;
        }
        self.loading_timer = None;
        self.session.phase = Phase::Results;
        info!("showing results");
        true
    }

    /// Fire the loading deadline if it is due. Returns true if the phase
    /// changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.loading_timer {
            Some(timer) if timer.is_due(now) => {
                self.loading_timer = None;
                self.complete_loading()
            }
            _ => false,
        }
    }

    /// Drop the pending loading deadline without transitioning
    pub fn cancel_loading_timer(&mut self) {
        if self.loading_timer.take().is_some() {
            debug!("loading transition cancelled");
        }
    }

    /// Start over from the first question
    pub fn restart(&mut self) {
        self.cancel_loading_timer();
        self.session = Session::default();
        info!("session restarted");
    }
}
