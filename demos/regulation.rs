use dotenv::dotenv;
use studyai::{ApiKey, Gateway, StudyAids};
use tracing_subscriber::EnvFilter;

const REGULATION: &str = "The school is a community of dialogue, research and social experience. \
                          Students respect people, facilities and timetables. Mobile phones may \
                          only be used for teaching purposes under the supervision of a teacher.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let question = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Can I use my phone during lessons?".to_string());

    // Failures, including a missing API key, come back as the fallback answer.
    let aids = StudyAids::new(Gateway::gemini(ApiKey::Default)?).with_regulation_text(REGULATION);
    println!("{}", aids.answer_regulation_question(&question).await);

    Ok(())
}
