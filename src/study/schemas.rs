//! Response schemas for each study aid.

use crate::core::SchemaDescriptor;

pub fn flashcards() -> SchemaDescriptor {
    SchemaDescriptor::array(
        SchemaDescriptor::object()
            .required_property(
                "question",
                SchemaDescriptor::string().describe("The question for the front of the flashcard."),
            )
            .required_property(
                "answer",
                SchemaDescriptor::string().describe("The answer for the back of the flashcard."),
            ),
    )
}

fn question_list(kind_hint: &str, answer_hint: &str) -> SchemaDescriptor {
    SchemaDescriptor::array(
        SchemaDescriptor::object()
            .required_property("question", SchemaDescriptor::string())
            .required_property("type", SchemaDescriptor::string().describe(kind_hint))
            .property(
                "options",
                SchemaDescriptor::array(SchemaDescriptor::string())
                    .describe("Array of 4 options for multiple choice questions."),
            )
            .property(
                "correct",
                SchemaDescriptor::integer().describe(
                    "The 0-based index of the correct option for multiple choice questions.",
                ),
            )
            .property("answer", SchemaDescriptor::string().describe(answer_hint)),
    )
}

pub fn quiz() -> SchemaDescriptor {
    question_list(
        "Can be 'multiple' or 'open'.",
        "A suggested correct answer for open-ended questions.",
    )
}

pub fn test() -> SchemaDescriptor {
    question_list(
        "Can be 'multiple', 'open', or 'definition'.",
        "A suggested correct answer for open-ended or definition questions.",
    )
}

pub fn routine() -> SchemaDescriptor {
    SchemaDescriptor::array(
        SchemaDescriptor::object()
            .required_property(
                "start",
                SchemaDescriptor::string().describe("Start time in HH:MM format."),
            )
            .required_property(
                "end",
                SchemaDescriptor::string().describe("End time in HH:MM format."),
            )
            .required_property(
                "activity",
                SchemaDescriptor::string().describe("Description of the activity."),
            )
            .required_property(
                "type",
                SchemaDescriptor::string()
                    .describe("Type of activity: 'study', 'break', or 'commitment'."),
            ),
    )
}

pub fn lesson_plan() -> SchemaDescriptor {
    let section = SchemaDescriptor::object()
        .required_property("title", SchemaDescriptor::string())
        .required_property("content", SchemaDescriptor::string())
        .required_property("duration", SchemaDescriptor::integer());

    SchemaDescriptor::object()
        .required_property("title", SchemaDescriptor::string())
        .required_property("objective", SchemaDescriptor::string())
        .required_property("materials", SchemaDescriptor::array(SchemaDescriptor::string()))
        .required_property("sections", SchemaDescriptor::array(section))
        .required_property("assessment", SchemaDescriptor::string())
}

pub fn connections() -> SchemaDescriptor {
    SchemaDescriptor::array(
        SchemaDescriptor::object()
            .required_property("subject", SchemaDescriptor::string())
            .required_property("connection", SchemaDescriptor::string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::types::{
        Flashcard, InterdisciplinaryConnection, LessonPlan, QuizQuestion, RoutineSlot,
    };

    fn required_set(schema: &SchemaDescriptor) -> Vec<String> {
        let mut required = schema.required().to_vec();
        required.sort();
        required
    }

    fn assert_same_required(explicit: &SchemaDescriptor, derived: &SchemaDescriptor) {
        assert_eq!(explicit.kind(), derived.kind());
        assert_eq!(required_set(explicit), required_set(derived));
        if let (Some(explicit_items), Some(derived_items)) = (explicit.items(), derived.items()) {
            assert_same_required(explicit_items, derived_items);
        }
        for (name, property) in explicit.properties() {
            let derived_property = derived
                .property_schema(name)
                .unwrap_or_else(|| panic!("derived schema lacks '{name}'"));
            assert_same_required(property, derived_property);
        }
    }

    #[test]
    fn every_schema_is_well_formed() {
        for schema in [
            flashcards(),
            quiz(),
            test(),
            routine(),
            lesson_plan(),
            connections(),
        ] {
            schema.validate_definition().unwrap();
        }
    }

    #[test]
    fn schemas_agree_with_the_rust_types() {
        let pairs = [
            (flashcards(), SchemaDescriptor::for_type::<Vec<Flashcard>>()),
            (quiz(), SchemaDescriptor::for_type::<Vec<QuizQuestion>>()),
            (routine(), SchemaDescriptor::for_type::<Vec<RoutineSlot>>()),
            (lesson_plan(), SchemaDescriptor::for_type::<LessonPlan>()),
            (
                connections(),
                SchemaDescriptor::for_type::<Vec<InterdisciplinaryConnection>>(),
            ),
        ];

        for (explicit, derived) in pairs {
            assert_same_required(&explicit, &derived.unwrap());
        }
    }

    #[test]
    fn quiz_and_test_differ_only_in_hints() {
        let quiz_item = quiz();
        let test_item = test();
        let quiz_type = quiz_item.items().unwrap().property_schema("type").unwrap();
        let test_type = test_item.items().unwrap().property_schema("type").unwrap();

        assert!(test_type.description().unwrap().contains("definition"));
        assert!(!quiz_type.description().unwrap().contains("definition"));
        assert_eq!(
            required_set(quiz_item.items().unwrap()),
            required_set(test_item.items().unwrap())
        );
    }
}
