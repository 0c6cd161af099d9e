//! Data models for the quiz
//!
//! This module contains the core data structures:
//! - Questions and the bundled question set
//! - Answer records appended as the user swipes
//! - Enums for phase and choice state
//! - The city match produced at the end of a session

pub mod answer;
pub mod city;
pub mod enums;
pub mod question;

// Re-exports for convenient access
pub use answer::AnswerRecord;
pub use city::CityMatch;
pub use enums::{Choice, Phase};
pub use question::{Question, QuestionSet};
