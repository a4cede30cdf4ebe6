pub mod client;
pub mod llm;
pub mod normalizer;
pub mod prompt;
pub mod response;
pub mod schema;

pub use client::{Attempt, ExtractionClient, classify_response};
pub use llm::{ChatApi, LlmError, OpenAiClient};
pub use normalizer::normalize;
pub use schema::{
    ExtractionPayload, ExtractionResult, FailureReason, RelationEntry, RelationKind,
    RelationRecord, SourceTag,
};
