use crate::llm::{ChatApi, LlmError};
use crate::prompt;
use crate::response;
use crate::schema::{ExtractionPayload, ExtractionResult, FailureReason};
use ingest::TokenBudgeter;
use ingest::bundle::RawDocument;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// How much of the raw model response is kept for the failure ledger.
const EXCERPT_CHARS: usize = 100;

/// Outcome of classifying one raw model response.
#[derive(Debug)]
pub enum Attempt {
    Accepted(ExtractionPayload, String),
    Retry(FailureReason),
}

/// Pure per-attempt transition: refusal check, fence stripping, JSON span
/// extraction, then schema validation. The retry policy above this never
/// inspects response text itself.
pub fn classify_response(raw: &str) -> Attempt {
    if response::detect_refusal(raw) {
        return Attempt::Retry(FailureReason::RefusalDetected);
    }

    let cleaned = response::strip_code_fences(raw);
    let Some(span) = response::extract_json_span(&cleaned) else {
        return Attempt::Retry(FailureReason::MalformedOutput);
    };

    match serde_json::from_str::<ExtractionPayload>(span) {
        Ok(payload) => Attempt::Accepted(payload, excerpt(raw)),
        Err(_) => Attempt::Retry(FailureReason::MalformedOutput),
    }
}

fn excerpt(raw: &str) -> String {
    raw.chars().take(EXCERPT_CHARS).collect()
}

/// Drives the bounded-retry extraction loop against a chat provider.
/// Yields exactly one terminal `ExtractionResult` per call.
pub struct ExtractionClient<C: ChatApi> {
    chat: C,
    budgeter: TokenBudgeter,
    max_retries: usize,
    retry_delay: Duration,
    rate_limit_delay: Duration,
}

impl<C: ChatApi> ExtractionClient<C> {
    pub fn new(
        chat: C,
        token_budget: usize,
        max_retries: usize,
        retry_delay: Duration,
        rate_limit_delay: Duration,
    ) -> Self {
        Self {
            chat,
            budgeter: TokenBudgeter::new(token_budget),
            max_retries,
            retry_delay,
            rate_limit_delay,
        }
    }

    pub async fn extract(&self, doc: &RawDocument) -> ExtractionResult {
        let bounded = self.budgeter.bound(&doc.text);
        let user_prompt = prompt::build_extraction_prompt(&doc.company_name, &bounded);

        let mut attempt = 0;
        while attempt < self.max_retries {
            attempt += 1;

            let outcome = match self.chat.chat(prompt::SYSTEM_PROMPT, &user_prompt).await {
                Ok(raw) => classify_response(&raw),
                Err(LlmError::RateLimited) => Attempt::Retry(FailureReason::RateLimited),
                Err(e) => {
                    warn!(company = %doc.company_name, error = %e, "model call failed");
                    Attempt::Retry(FailureReason::TransportError)
                }
            };

            match outcome {
                Attempt::Accepted(payload, raw_excerpt) => {
                    if attempt > 1 {
                        info!(
                            company = %doc.company_name,
                            attempts = attempt,
                            "extraction succeeded after retries"
                        );
                    }
                    return ExtractionResult::Success {
                        payload,
                        raw_excerpt,
                    };
                }
                Attempt::Retry(reason) => {
                    if attempt >= self.max_retries {
                        warn!(
                            company = %doc.company_name,
                            attempts = attempt,
                            reason = reason.as_str(),
                            "extraction failed after max retries"
                        );
                        return ExtractionResult::Failure {
                            reason: FailureReason::Exhausted,
                        };
                    }

                    // Rate limits back off longer than the generic retry
                    // delay; both count toward the shared attempt budget.
                    let delay = if reason == FailureReason::RateLimited {
                        self.rate_limit_delay
                    } else {
                        self.retry_delay
                    };
                    warn!(
                        company = %doc.company_name,
                        attempt = attempt,
                        max_retries = self.max_retries,
                        reason = reason.as_str(),
                        delay_ms = delay.as_millis() as u64,
                        "retryable extraction failure"
                    );
                    sleep(delay).await;
                }
            }
        }

        ExtractionResult::Failure {
            reason: FailureReason::Exhausted,
        }
    }
}
