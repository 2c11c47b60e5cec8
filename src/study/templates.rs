//! Prompt text for the study aids.
//!
//! Templates are plain strings with `{name}` placeholders. The defaults are
//! neutral English; callers replace any of them to change language or tone.

use super::types::{Difficulty, QuestionMix, QuizOptions, RoutineOptions};

/// Instruction fragments for each [`QuestionMix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixPhrases {
    pub multiple: String,
    pub open: String,
    pub mixed: String,
}

impl MixPhrases {
    pub fn phrase(&self, mix: QuestionMix) -> &str {
        match mix {
            QuestionMix::Multiple => &self.multiple,
            QuestionMix::Open => &self.open,
            QuestionMix::Mixed => &self.mixed,
        }
    }
}

/// Wording for each [`Difficulty`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyPhrases {
    pub easy: String,
    pub medium: String,
    pub hard: String,
}

impl DifficultyPhrases {
    pub fn phrase(&self, difficulty: Difficulty) -> &str {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    /// Placeholders: `{topic}`
    pub flashcards: String,
    /// Placeholders: `{count}`, `{topic}`, `{difficulty}`, `{mix}`
    pub quiz: String,
    /// Placeholders: `{count}`, `{topic}`, `{difficulty}`, `{mix}`
    pub test: String,
    /// Placeholders: `{start}`, `{end}`, `{tasks}`, `{commitments}`
    pub routine: String,
    /// Placeholders: `{topic}`, `{duration}`, `{difficulty}`
    pub lesson_plan: String,
    /// Placeholders: `{topic}`, `{subject}`
    pub connections: String,
    /// System instruction for regulation questions. Placeholders: `{regulation}`
    pub regulation: String,
    /// Substituted for `{commitments}` when there are none.
    pub no_commitments: String,
    pub quiz_mix: MixPhrases,
    pub test_mix: MixPhrases,
    pub quiz_difficulty: DifficultyPhrases,
    pub lesson_difficulty: DifficultyPhrases,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            flashcards: "Generate 5 flashcards for the topic: \"{topic}\". Focus on key concepts."
                .to_string(),
            quiz: "Generate a quiz of {count} questions for a high school student on the topic: \
                   \"{topic}\". The difficulty level must be {difficulty}. The quiz must contain {mix}."
                .to_string(),
            test: "Generate a complete test of {count} questions for a high school class on the \
                   topic: \"{topic}\". The difficulty level must be {difficulty}. The test must \
                   contain {mix}."
                .to_string(),
            routine: "Create a study schedule for a student.\n\
                      - Start time: {start}\n\
                      - End time: {end}\n\
                      - Tasks to complete: {tasks}\n\
                      - Pre-existing commitments: {commitments}\n\
                      Plan out the study sessions for the tasks, allocating reasonable time for \
                      each. Include short breaks (10-15 minutes) between study blocks."
                .to_string(),
            lesson_plan: "Create a detailed lesson plan for a high school class on the topic: \
                          \"{topic}\". Duration: {duration} minutes. Difficulty: {difficulty}."
                .to_string(),
            connections: "Given the topic \"{topic}\" (subject: \"{subject}\"), generate 4-5 \
                          interdisciplinary connections with other high school subjects."
                .to_string(),
            regulation: "You are an expert assistant on the school's regulations. Answer based \
                         EXCLUSIVELY on this text:\n\n{regulation}"
                .to_string(),
            no_commitments: "None".to_string(),
            quiz_mix: MixPhrases {
                multiple: "only multiple choice questions with 4 options each".to_string(),
                open: "only open-ended questions".to_string(),
                mixed: "a mix of multiple choice questions (with 4 options) and open-ended questions"
                    .to_string(),
            },
            test_mix: MixPhrases {
                multiple: "only multiple choice questions with 4 options each".to_string(),
                open: "only open-ended questions and definitions".to_string(),
                mixed: "a mix of multiple choice questions (with 4 options), open-ended questions \
                        and definitions"
                    .to_string(),
            },
            quiz_difficulty: DifficultyPhrases {
                easy: "easy".to_string(),
                medium: "medium".to_string(),
                hard: "hard".to_string(),
            },
            lesson_difficulty: DifficultyPhrases {
                easy: "for beginners".to_string(),
                medium: "intermediate level".to_string(),
                hard: "for experts/advanced".to_string(),
            },
        }
    }
}

impl PromptTemplates {
    pub fn flashcards_prompt(&self, topic: &str) -> String {
        render(&self.flashcards, &[("topic", topic)])
    }

    pub fn quiz_prompt(&self, options: &QuizOptions) -> String {
        self.question_prompt(&self.quiz, &self.quiz_mix, options)
    }

    pub fn test_prompt(&self, options: &QuizOptions) -> String {
        self.question_prompt(&self.test, &self.test_mix, options)
    }

    fn question_prompt(&self, template: &str, mixes: &MixPhrases, options: &QuizOptions) -> String {
        let count = options.num_questions.to_string();
        render(
            template,
            &[
                ("count", count.as_str()),
                ("topic", options.topic.as_str()),
                ("difficulty", self.quiz_difficulty.phrase(options.difficulty)),
                ("mix", mixes.phrase(options.mix)),
            ],
        )
    }

    pub fn routine_prompt(&self, options: &RoutineOptions) -> String {
        let commitments = match options.commitments.trim() {
            "" => self.no_commitments.as_str(),
            given => given,
        };
        render(
            &self.routine,
            &[
                ("start", options.start_time.as_str()),
                ("end", options.end_time.as_str()),
                ("tasks", options.tasks.as_str()),
                ("commitments", commitments),
            ],
        )
    }

    pub fn lesson_plan_prompt(&self, topic: &str, duration_minutes: u32, difficulty: Difficulty) -> String {
        let duration = duration_minutes.to_string();
        render(
            &self.lesson_plan,
            &[
                ("topic", topic),
                ("duration", duration.as_str()),
                ("difficulty", self.lesson_difficulty.phrase(difficulty)),
            ],
        )
    }

    pub fn connections_prompt(&self, topic: &str, subject: &str) -> String {
        render(&self.connections, &[("topic", topic), ("subject", subject)])
    }

    pub fn regulation_instruction(&self, regulation_text: &str) -> String {
        render(&self.regulation, &[("regulation", regulation_text)])
    }
}

/// Substitute `{name}` placeholders in a single left-to-right pass, so values
/// that themselves contain braces are never expanded again.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match replacement {
            Some((value, close)) => {
                output.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_options(mix: QuestionMix) -> QuizOptions {
        QuizOptions {
            topic: "The French Revolution".to_string(),
            num_questions: 8,
            mix,
            difficulty: Difficulty::Hard,
        }
    }

    #[test]
    fn render_replaces_known_placeholders_once() {
        let rendered = render(
            "{a} and {b}, not {c}",
            &[("a", "{b}"), ("b", "two")],
        );
        assert_eq!(rendered, "{b} and two, not {c}");
    }

    #[test]
    fn render_keeps_unbalanced_braces() {
        assert_eq!(render("open { only", &[("x", "y")]), "open { only");
        assert_eq!(render("{x}}", &[("x", "y")]), "y}");
    }

    #[test]
    fn flashcards_prompt_quotes_the_topic() {
        let prompt = PromptTemplates::default().flashcards_prompt("Photosynthesis");
        assert_eq!(
            prompt,
            "Generate 5 flashcards for the topic: \"Photosynthesis\". Focus on key concepts."
        );
    }

    #[test]
    fn quiz_and_test_use_their_own_mix_phrases() {
        let templates = PromptTemplates::default();
        let quiz = templates.quiz_prompt(&quiz_options(QuestionMix::Open));
        let test = templates.test_prompt(&quiz_options(QuestionMix::Open));

        assert!(quiz.contains("8 questions"));
        assert!(quiz.contains("must be hard"));
        assert!(quiz.ends_with("only open-ended questions."));
        assert!(test.ends_with("only open-ended questions and definitions."));
    }

    #[test]
    fn empty_commitments_render_as_none() {
        let options = RoutineOptions {
            start_time: "15:00".to_string(),
            end_time: "19:00".to_string(),
            tasks: "Math homework, read chapter 3".to_string(),
            commitments: "  ".to_string(),
        };
        let prompt = PromptTemplates::default().routine_prompt(&options);

        assert!(prompt.contains("- Start time: 15:00\n"));
        assert!(prompt.contains("- Pre-existing commitments: None\n"));
    }

    #[test]
    fn lesson_plan_uses_lesson_difficulty_wording() {
        let prompt =
            PromptTemplates::default().lesson_plan_prompt("Optics", 50, Difficulty::Easy);
        assert!(prompt.contains("Duration: 50 minutes. Difficulty: for beginners."));
    }

    #[test]
    fn custom_templates_replace_defaults() {
        let templates = PromptTemplates {
            connections: "Collegamenti per {topic} ({subject})".to_string(),
            ..PromptTemplates::default()
        };
        assert_eq!(
            templates.connections_prompt("Dante", "Italiano"),
            "Collegamenti per Dante (Italiano)"
        );
    }
}
