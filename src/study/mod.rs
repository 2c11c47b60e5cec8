//! Study aids built on the completion gateway: flashcards, quizzes, tests,
//! study routines, lesson plans, interdisciplinary connections and
//! regulation Q&A.

pub mod aids;
pub mod schemas;
pub mod templates;
pub mod types;

pub use aids::{NO_ANSWER_FALLBACK, StudyAids};
pub use templates::{DifficultyPhrases, MixPhrases, PromptTemplates};
pub use types::{
    Difficulty, Flashcard, InterdisciplinaryConnection, LessonPlan, LessonSection, QuestionKind,
    QuestionMix, QuizOptions, QuizQuestion, RoutineOptions, RoutineSlot, SlotKind,
};
