//! City match produced by a match generator

/// Result shown on the results screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityMatch {
    pub city: String,
    pub country: String,
    pub explanation: String,
}

impl CityMatch {
    /// Text handed to the share sink
    pub fn share_text(&self) -> String {
        format!(
            "I just discovered my perfect city: {}, {}! Take the \"Where to Move\" quiz to find yours.",
            self.city, self.country
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_text() {
        let m = CityMatch {
            city: "Lisbon".to_string(),
            country: "Portugal".to_string(),
            explanation: String::new(),
        };
        assert_eq!(
            m.share_text(),
            "I just discovered my perfect city: Lisbon, Portugal! Take the \"Where to Move\" quiz to find yours."
        );
    }
}
