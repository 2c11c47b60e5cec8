use dotenv::dotenv;
use studyai::study::{Difficulty, QuestionMix, QuizOptions};
use studyai::provider::API_KEY_ENV_VAR;
use studyai::{ApiKey, Gateway, StudyAids};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let topic = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Photosynthesis".to_string());

    let gateway = Gateway::gemini(ApiKey::Default)?;
    if !gateway.has_credential() {
        eprintln!("Set {API_KEY_ENV_VAR} (or add it to .env) to run this demo.");
        return Ok(());
    }
    let aids = StudyAids::new(gateway);
    println!("Using {}\n", aids.model());

    for card in aids.generate_flashcards(&topic).await? {
        println!("Q: {}\nA: {}\n", card.question, card.answer);
    }

    let quiz = aids
        .generate_quiz(&QuizOptions {
            topic,
            num_questions: 3,
            mix: QuestionMix::Multiple,
            difficulty: Difficulty::Medium,
        })
        .await?;

    for question in quiz {
        println!(
            "{} -> {}",
            question.question,
            question.correct_option().unwrap_or("(no option)")
        );
    }

    Ok(())
}
