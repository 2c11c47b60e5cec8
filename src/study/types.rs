use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::GatewayError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Flashcard {
    /// The question for the front of the flashcard.
    pub question: String,
    /// The answer for the back of the flashcard.
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Multiple,
    Open,
    Definition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuizQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Answer options, present on multiple-choice questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// 0-based index into `options` of the correct one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<i64>,
    /// Suggested answer for open and definition questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl QuizQuestion {
    /// The text of the correct option, if the index points at one.
    pub fn correct_option(&self) -> Option<&str> {
        let index = usize::try_from(self.correct?).ok()?;
        self.options.as_ref()?.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Study,
    Break,
    Commitment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoutineSlot {
    /// HH:MM
    pub start: String,
    /// HH:MM
    pub end: String,
    pub activity: String,
    #[serde(rename = "type")]
    pub kind: SlotKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LessonSection {
    pub title: String,
    pub content: String,
    /// Minutes
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LessonPlan {
    pub title: String,
    pub objective: String,
    pub materials: Vec<String>,
    pub sections: Vec<LessonSection>,
    pub assessment: String,
}

impl LessonPlan {
    /// Sum of section durations in minutes, or `None` if it overflows.
    pub fn total_duration(&self) -> Option<u32> {
        self.sections
            .iter()
            .try_fold(0u32, |total, section| total.checked_add(section.duration))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InterdisciplinaryConnection {
    pub subject: String,
    pub connection: String,
}

/// Which kinds of questions a quiz or test should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionMix {
    Multiple,
    Open,
    Mixed,
}

impl FromStr for QuestionMix {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multiple" => Ok(QuestionMix::Multiple),
            "open" => Ok(QuestionMix::Open),
            "mixed" => Ok(QuestionMix::Mixed),
            other => Err(GatewayError::InvalidRequest(format!(
                "Unknown question type '{other}'. Expected multiple, open or mixed."
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(GatewayError::InvalidRequest(format!(
                "Unknown difficulty '{other}'. Expected easy, medium or hard."
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOptions {
    pub topic: String,
    pub num_questions: u32,
    pub mix: QuestionMix,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineOptions {
    /// HH:MM
    pub start_time: String,
    /// HH:MM
    pub end_time: String,
    pub tasks: String,
    /// Free text; empty means no commitments.
    pub commitments: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quiz_question_reads_wire_names() {
        let question: QuizQuestion = serde_json::from_value(json!({
            "question": "Which planet is largest?",
            "type": "multiple",
            "options": ["Mars", "Jupiter", "Venus", "Earth"],
            "correct": 1
        }))
        .unwrap();

        assert_eq!(question.kind, QuestionKind::Multiple);
        assert_eq!(question.correct_option(), Some("Jupiter"));
        assert_eq!(question.answer, None);
    }

    #[test]
    fn correct_option_tolerates_bad_indices() {
        let mut question = QuizQuestion {
            question: "Q".to_string(),
            kind: QuestionKind::Multiple,
            options: Some(vec!["a".to_string()]),
            correct: Some(-1),
            answer: None,
        };
        assert_eq!(question.correct_option(), None);

        question.correct = Some(3);
        assert_eq!(question.correct_option(), None);

        question.options = None;
        question.correct = Some(0);
        assert_eq!(question.correct_option(), None);
    }

    #[test]
    fn optional_fields_are_not_serialized_when_absent() {
        let question = QuizQuestion {
            question: "Define entropy".to_string(),
            kind: QuestionKind::Definition,
            options: None,
            correct: None,
            answer: Some("A measure of disorder".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&question).unwrap(),
            json!({
                "question": "Define entropy",
                "type": "definition",
                "answer": "A measure of disorder"
            })
        );
    }

    #[test]
    fn lesson_plan_sums_section_durations() {
        let plan: LessonPlan = serde_json::from_value(json!({
            "title": "Optics",
            "objective": "Understand refraction",
            "materials": ["prism"],
            "sections": [
                {"title": "Intro", "content": "...", "duration": 10},
                {"title": "Lab", "content": "...", "duration": 35}
            ],
            "assessment": "Short quiz"
        }))
        .unwrap();

        assert_eq!(plan.total_duration(), Some(45));
    }

    fn plan_with_durations(durations: &[serde_json::Value]) -> serde_json::Value {
        let sections: Vec<_> = durations
            .iter()
            .map(|duration| json!({"title": "Part", "content": "...", "duration": duration}))
            .collect();
        json!({
            "title": "Optics",
            "objective": "Understand refraction",
            "materials": [],
            "sections": sections,
            "assessment": "Short quiz"
        })
    }

    #[test]
    fn overflowing_total_duration_is_none() {
        let plan: LessonPlan =
            serde_json::from_value(plan_with_durations(&[json!(u32::MAX), json!(1)])).unwrap();

        assert_eq!(plan.total_duration(), None);
    }

    #[test]
    fn out_of_range_durations_are_rejected() {
        let huge = plan_with_durations(&[json!(9_000_000_000_000_000_000u64)]);
        assert!(serde_json::from_value::<LessonPlan>(huge).is_err());

        let negative = plan_with_durations(&[json!(-5)]);
        assert!(serde_json::from_value::<LessonPlan>(negative).is_err());
    }

    #[test]
    fn option_enums_parse_case_insensitively() {
        assert_eq!("Mixed".parse::<QuestionMix>().unwrap(), QuestionMix::Mixed);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!(matches!(
            "extreme".parse::<Difficulty>(),
            Err(GatewayError::InvalidRequest(_))
        ));
    }
}
