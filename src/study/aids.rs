use tracing::warn;

use crate::completions::Gateway;
use crate::core::{GatewayError, GenerationRequest, SchemaDescriptor, Transport};
use crate::provider::{DEFAULT_MODEL, GeminiTransport};

use super::schemas;
use super::templates::PromptTemplates;
use super::types::{
    Difficulty, Flashcard, InterdisciplinaryConnection, LessonPlan, QuizOptions, QuizQuestion,
    RoutineOptions, RoutineSlot,
};

/// Answer returned by [`StudyAids::answer_regulation_question`] when no
/// answer could be produced.
pub const NO_ANSWER_FALLBACK: &str = "Sorry, no answer was found for your question.";

/// Study-aid generators sharing one gateway, model, and template set.
pub struct StudyAids<T: Transport = GeminiTransport> {
    gateway: Gateway<T>,
    model: String,
    templates: PromptTemplates,
    regulation_text: String,
}

impl<T: Transport> StudyAids<T> {
    pub fn new(gateway: Gateway<T>) -> Self {
        Self {
            gateway,
            model: DEFAULT_MODEL.to_string(),
            templates: PromptTemplates::default(),
            regulation_text: String::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_templates(mut self, templates: PromptTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Text that regulation answers must be grounded in.
    pub fn with_regulation_text(mut self, text: impl Into<String>) -> Self {
        self.regulation_text = text.into();
        self
    }

    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn templates(&self) -> &PromptTemplates {
        &self.templates
    }

    fn structured(&self, prompt: String, schema: SchemaDescriptor) -> GenerationRequest {
        GenerationRequest::new(self.model.as_str(), prompt).with_response_schema(schema)
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn generate_flashcards(&self, topic: &str) -> Result<Vec<Flashcard>, GatewayError> {
        let request = self.structured(self.templates.flashcards_prompt(topic), schemas::flashcards());
        self.gateway.complete_as(&request).await
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn generate_quiz(
        &self,
        options: &QuizOptions,
    ) -> Result<Vec<QuizQuestion>, GatewayError> {
        let request = self.structured(self.templates.quiz_prompt(options), schemas::quiz());
        self.gateway.complete_as(&request).await
    }

    /// Like a quiz, but aimed at a whole class and allowing definition questions.
    #[tracing::instrument(skip(self), err)]
    pub async fn generate_test(
        &self,
        options: &QuizOptions,
    ) -> Result<Vec<QuizQuestion>, GatewayError> {
        let request = self.structured(self.templates.test_prompt(options), schemas::test());
        self.gateway.complete_as(&request).await
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn generate_routine(
        &self,
        options: &RoutineOptions,
    ) -> Result<Vec<RoutineSlot>, GatewayError> {
        let request = self.structured(self.templates.routine_prompt(options), schemas::routine());
        self.gateway.complete_as(&request).await
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn generate_lesson_plan(
        &self,
        topic: &str,
        duration_minutes: u32,
        difficulty: Difficulty,
    ) -> Result<LessonPlan, GatewayError> {
        let prompt = self
            .templates
            .lesson_plan_prompt(topic, duration_minutes, difficulty);
        let request = self.structured(prompt, schemas::lesson_plan());
        self.gateway.complete_as(&request).await
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn generate_connections(
        &self,
        topic: &str,
        subject: &str,
    ) -> Result<Vec<InterdisciplinaryConnection>, GatewayError> {
        let request = self.structured(
            self.templates.connections_prompt(topic, subject),
            schemas::connections(),
        );
        self.gateway.complete_as(&request).await
    }

    /// Answer a question about the configured regulation text.
    ///
    /// Never fails: any error, or an empty answer, becomes
    /// [`NO_ANSWER_FALLBACK`].
    #[tracing::instrument(skip(self))]
    pub async fn answer_regulation_question(&self, question: &str) -> String {
        if self.regulation_text.trim().is_empty() {
            warn!("No regulation text configured, answering with fallback");
            return NO_ANSWER_FALLBACK.to_string();
        }

        let request = GenerationRequest::new(self.model.as_str(), question)
            .with_system_instruction(self.templates.regulation_instruction(&self.regulation_text));

        match self.gateway.complete_text(&request).await {
            Ok(answer) if !answer.trim().is_empty() => answer,
            Ok(_) => {
                warn!("Provider returned an empty answer, answering with fallback");
                NO_ANSWER_FALLBACK.to_string()
            }
            Err(error) => {
                warn!(error = %error, "Regulation question failed, answering with fallback");
                NO_ANSWER_FALLBACK.to_string()
            }
        }
    }
}
