//! Swipe gesture state for the question card.
//!
//! Arrow keys drag the card; past the threshold the drag commits as an
//! answer. Indicator opacity follows the drag offset.

use crate::models::Choice;

/// Offset at which a drag commits
pub const SWIPE_THRESHOLD: i16 = 100;

/// Offset change per key press
pub const SWIPE_STEP: i16 = 25;

/// Opacity of the (left "No", right "Yes") indicators for a drag offset.
/// Left fades in over [-100, 0], right over [0, 100].
pub fn indicator_opacity(offset: f64) -> (f64, f64) {
    let threshold = f64::from(SWIPE_THRESHOLD);
    let left = (-offset / threshold).clamp(0.0, 1.0);
    let right = (offset / threshold).clamp(0.0, 1.0);
    (left, right)
}

/// Horizontal drag of the current card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwipeCard {
    offset: i16,
}

impl SwipeCard {
    pub fn offset(&self) -> i16 {
        self.offset
    }

    /// Drag one step toward `direction`. Returns the choice once the
    /// threshold is reached, resetting the card.
    pub fn nudge(&mut self, direction: Choice) -> Option<Choice> {
        let step = match direction {
            Choice::Yes => SWIPE_STEP,
            Choice::No => -SWIPE_STEP,
        };
        self.offset = (self.offset + step).clamp(-SWIPE_THRESHOLD, SWIPE_THRESHOLD);

        if self.offset.abs() >= SWIPE_THRESHOLD {
            self.reset();
            Some(direction)
        } else {
            None
        }
    }

    /// Commit whatever side the card is leaning to
    pub fn release(&mut self) -> Option<Choice> {
        let choice = match self.offset {
            o if o > 0 => Some(Choice::Yes),
            o if o < 0 => Some(Choice::No),
            _ => None,
        };
        self.reset();
        choice
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn opacity(&self) -> (f64, f64) {
        indicator_opacity(f64::from(self.offset))
    }
}
