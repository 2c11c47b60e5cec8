#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use studyai::{GatewayError, ProviderCall, SchemaDescriptor, Transport};

/// What the scripted provider answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(&'static str),
    NoText,
    Status(u16),
    Slow(Duration, &'static str),
}

/// Owned copy of a [`ProviderCall`], kept for assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub credential: String,
    pub model: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub response_schema: Option<SchemaDescriptor>,
}

pub struct ScriptedTransport {
    reply: Reply,
    calls: AtomicUsize,
    last_call: Mutex<Option<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> RecordedCall {
        self.last_call
            .lock()
            .unwrap()
            .clone()
            .expect("transport was never called")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn generate(
        &self,
        credential: &str,
        call: ProviderCall<'_>,
    ) -> Result<Option<String>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some(RecordedCall {
            credential: credential.to_string(),
            model: call.model.to_string(),
            prompt: call.prompt.to_string(),
            system_instruction: call.system_instruction.map(str::to_string),
            response_schema: call.response_schema.cloned(),
        });

        match &self.reply {
            Reply::Text(text) => Ok(Some(text.to_string())),
            Reply::NoText => Ok(None),
            Reply::Status(status) => Err(GatewayError::Transport {
                message: format!("Provider returned {status}"),
                status_code: Some(*status),
                source: None,
            }),
            Reply::Slow(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(Some(text.to_string()))
            }
        }
    }
}

pub fn flashcard_schema() -> SchemaDescriptor {
    SchemaDescriptor::array(
        SchemaDescriptor::object()
            .required_property("question", SchemaDescriptor::string())
            .required_property("answer", SchemaDescriptor::string()),
    )
}

pub const FIVE_FLASHCARDS: &str = r#"[
    {"question": "Q1", "answer": "A1"},
    {"question": "Q2", "answer": "A2"},
    {"question": "Q3", "answer": "A3"},
    {"question": "Q4", "answer": "A4"},
    {"question": "Q5", "answer": "A5"}
]"#;
