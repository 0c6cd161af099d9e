//! Enums used throughout the quiz
//!
//! This module contains the enum types used for session state
//! and UI rendering.

use std::fmt;

/// Coarse screen state of a quiz session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Questioning, // A question card is on screen
    Loading,     // All answers in, waiting for the match
    Results,     // Match result is shown
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Questioning => "questioning",
            Phase::Loading => "loading",
            Phase::Results => "results",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Answer given by swiping a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes, // Swipe right
    No,  // Swipe left
}

impl Choice {
    pub fn label(&self) -> &'static str {
        match self {
            Choice::Yes => "Yes",
            Choice::No => "No",
        }
    }
}

impl From<Choice> for String {
    fn from(choice: Choice) -> Self {
        choice.label().to_string()
    }
}
