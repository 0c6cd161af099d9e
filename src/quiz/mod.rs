//! Quiz session lifecycle.
//!
//! - `controller`: phase state machine and answer log
//! - `timer`: the one-shot loading deadline
//! - `matcher`: pluggable match generation

mod controller;
mod matcher;
mod timer;

pub use controller::PhaseController;
pub use matcher::{MatchGenerator, PlaceholderMatcher};

#[cfg(test)]
pub use timer::LOADING_DELAY;
