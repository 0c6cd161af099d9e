//! Match generation from a finished answer log.

use crate::models::{AnswerRecord, CityMatch};

/// Turns the full, ordered answer log into a single city match
pub trait MatchGenerator {
    fn generate(&self, answers: &[AnswerRecord]) -> CityMatch;
}

/// Fixed result used until a real matcher is plugged in
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderMatcher;

impl MatchGenerator for PlaceholderMatcher {
    fn generate(&self, answers: &[AnswerRecord]) -> CityMatch {
        tracing::debug!(answers = answers.len(), "generating placeholder match");
        CityMatch {
            city: "Tokyo".to_string(),
            country: "Japan".to_string(),
            explanation: "Based on your preferences, Tokyo is your perfect match! You appreciate \
                a vibrant urban lifestyle with access to incredible food diversity, efficient \
                public transportation, and a dynamic cultural scene. Tokyo offers the perfect \
                blend of modern technology and traditional culture, with something happening at \
                all hours. The city's walkability, world-class transit system, and endless dining \
                options align perfectly with your desire for an energetic, connected lifestyle."
                .to_string(),
        }
    }
}
