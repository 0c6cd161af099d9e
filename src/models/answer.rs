//! Answer records collected during a session

use serde::Serialize;

use super::Question;

/// One answered question, appended once and never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: u32,
    pub category: String,
    pub question: String,
    pub choice: String,
}

impl AnswerRecord {
    /// Build a record from the question being answered and the user's choice
    pub fn new(question: &Question, choice: impl Into<String>) -> Self {
        Self {
            question_id: question.id,
            category: question.category.clone(),
            question: question.text.clone(),
            choice: choice.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_record_copies_question_context() {
        let question = Question {
            id: 7,
            category: "Climate".to_string(),
            text: "Do you love snow?".to_string(),
        };
        let record = AnswerRecord::new(&question, "No");
        assert_eq!(record.question_id, 7);
        assert_eq!(record.category, "Climate");
        assert_eq!(record.question, "Do you love snow?");
        assert_eq!(record.choice, "No");
    }

    #[test]
    fn test_answer_record_serializes_camel_case() {
        let question = Question {
            id: 1,
            category: "Food".to_string(),
            text: "Street food?".to_string(),
        };
        let json = serde_json::to_value(AnswerRecord::new(&question, "Yes")).unwrap();
        assert_eq!(json["questionId"], 1);
        assert_eq!(json["choice"], "Yes");
    }
}
