use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use common::{
    env_config::AiConfig,
    error::{AppError, Res},
};

use crate::circuit::CircuitBreaker;

/// Per-turn input cap. Longer content is truncated, never rejected.
const MAX_TURN_CHARS: usize = 2000;

/// Backoff schedule for transient upstream failures: the first retry waits
/// 1s, the second 3s, then the call is surfaced as failed.
const RETRY_DELAYS: [Duration; 2] = [Duration::from_secs(1), Duration::from_secs(3)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Mentor,
}

impl Role {
    /// Provider wire role. The mentor side of a conversation is the model.
    fn as_provider_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Mentor => "model",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Either a one-shot prompt or an ordered conversation history.
#[derive(Debug, Clone)]
pub enum GenerateInput {
    Prompt(String),
    History(Vec<Turn>),
}

/// Structured context appended to the system instruction: who is asking and
/// what the app already knows about them.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    pub profile_summary: Option<String>,
    pub recent_readings: Vec<String>,
    pub moon_phase: Option<String>,
}

/// Client for the generative-text provider. Provider-agnostic at the seam:
/// handlers only depend on `generate(system, input, context) -> text`.
pub struct TextGateway {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    breaker: Arc<CircuitBreaker>,
}

enum CallError {
    /// Worth retrying: rate limits, server errors, transport failures.
    Transient(String),
    /// Not worth retrying: bad request, auth, unparseable response.
    Fatal(String),
}

/// Whether an HTTP status from the provider is worth retrying.
fn is_transient_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Char-boundary-safe prefix truncation.
fn truncate_chars(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

fn build_system_text(system_instruction: &str, context: Option<&PromptContext>) -> String {
    let mut text = system_instruction.to_string();
    if let Some(ctx) = context {
        if let Some(profile) = &ctx.profile_summary {
            text.push_str("\n\nUser profile: ");
            text.push_str(profile);
        }
        if !ctx.recent_readings.is_empty() {
            text.push_str("\n\nRecent readings: ");
            text.push_str(&ctx.recent_readings.join("; "));
        }
        if let Some(moon) = &ctx.moon_phase {
            text.push_str("\n\nCurrent moon phase: ");
            text.push_str(moon);
        }
    }
    text
}

// --- provider wire format (Gemini-style generateContent) ---

#[derive(Serialize)]
struct GenerateRequest {
    system_instruction: InstructionParts,
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct InstructionParts {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

/// First candidate's first part, or None when the provider returned an
/// empty candidate list (treated as failure by the caller).
fn extract_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts?
        .into_iter()
        .next()
        .map(|part| part.text)
}

fn build_contents(input: &GenerateInput) -> Vec<Content> {
    match input {
        GenerateInput::Prompt(prompt) => vec![Content {
            role: Role::User.as_provider_str(),
            parts: vec![Part {
                text: truncate_chars(prompt, MAX_TURN_CHARS).to_string(),
            }],
        }],
        GenerateInput::History(turns) => turns
            .iter()
            .map(|turn| Content {
                role: turn.role.as_provider_str(),
                parts: vec![Part {
                    text: truncate_chars(&turn.content, MAX_TURN_CHARS).to_string(),
                }],
            })
            .collect(),
    }
}

impl TextGateway {
    pub fn new(config: &AiConfig, breaker: Arc<CircuitBreaker>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            breaker,
        }
    }

    /// Generates text for the given system instruction and input.
    ///
    /// Fails fast with `ServiceUnavailable` while the circuit is open.
    /// Transient upstream failures are retried per `RETRY_DELAYS`; retry
    /// exhaustion counts as a single failure toward the breaker.
    pub async fn generate(
        &self,
        system_instruction: &str,
        input: GenerateInput,
        context: Option<&PromptContext>,
    ) -> Res<String> {
        if self.breaker.is_open() {
            log::warn!("AI gateway circuit open, failing fast");
            return Err(AppError::ServiceUnavailable);
        }

        let request = GenerateRequest {
            system_instruction: InstructionParts {
                parts: vec![Part {
                    text: build_system_text(system_instruction, context),
                }],
            },
            contents: build_contents(&input),
        };

        let mut attempt = 0;
        loop {
            match self.call_once(&request).await {
                Ok(text) => {
                    self.breaker.record_success();
                    return Ok(text);
                }
                Err(CallError::Transient(reason)) if attempt < RETRY_DELAYS.len() => {
                    log::warn!(
                        "AI call failed (attempt {}): {}, retrying",
                        attempt + 1,
                        reason
                    );
                    tokio::time::sleep(RETRY_DELAYS[attempt]).await;
                    attempt += 1;
                }
                Err(CallError::Transient(reason)) | Err(CallError::Fatal(reason)) => {
                    log::error!("AI call failed: {}", reason);
                    self.breaker.record_failure();
                    return Err(AppError::ServiceUnavailable);
                }
            }
        }
    }

    async fn call_once(&self, request: &GenerateRequest) -> Result<String, CallError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| CallError::Transient(format!("transport error: {}", e)))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let reason = format!("provider returned status {}", status);
            return if is_transient_status(status) {
                Err(CallError::Transient(reason))
            } else {
                Err(CallError::Fatal(reason))
            };
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CallError::Fatal(format!("unparseable response: {}", e)))?;

        extract_text(body).ok_or_else(|| CallError::Fatal("response had no candidates".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_statuses() {
        assert!(is_transient_status(429));
        assert!(is_transient_status(500));
        assert!(is_transient_status(503));
        assert!(!is_transient_status(400));
        assert!(!is_transient_status(401));
        assert!(!is_transient_status(404));
    }

    #[test]
    fn truncation_keeps_short_input() {
        assert_eq!(truncate_chars("hello", 2000), "hello");
    }

    #[test]
    fn truncation_cuts_at_char_count() {
        let long = "x".repeat(3000);
        assert_eq!(truncate_chars(&long, 2000).chars().count(), 2000);
    }

    #[test]
    fn truncation_respects_multibyte_boundaries() {
        let input = "☽☾".repeat(1500); // 3000 chars, multibyte
        let cut = truncate_chars(&input, 2000);
        assert_eq!(cut.chars().count(), 2000);
    }

    #[test]
    fn prompt_becomes_single_user_turn() {
        let contents = build_contents(&GenerateInput::Prompt("what lies ahead?".to_string()));
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[0].parts[0].text, "what lies ahead?");
    }

    #[test]
    fn history_maps_mentor_to_model_role() {
        let contents = build_contents(&GenerateInput::History(vec![
            Turn {
                role: Role::User,
                content: "hello".to_string(),
            },
            Turn {
                role: Role::Mentor,
                content: "greetings".to_string(),
            },
        ]));
        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[1].role, "model");
    }

    #[test]
    fn history_turns_are_truncated() {
        let contents = build_contents(&GenerateInput::History(vec![Turn {
            role: Role::User,
            content: "y".repeat(5000),
        }]));
        assert_eq!(contents[0].parts[0].text.chars().count(), MAX_TURN_CHARS);
    }

    #[test]
    fn system_text_appends_context_sections() {
        let ctx = PromptContext {
            profile_summary: Some("Leo, born 1990".to_string()),
            recent_readings: vec!["tarot: The Sun".to_string(), "horoscope: daily".to_string()],
            moon_phase: Some("Waxing Gibbous".to_string()),
        };
        let text = build_system_text("You are a mystic.", Some(&ctx));
        assert!(text.starts_with("You are a mystic."));
        assert!(text.contains("User profile: Leo, born 1990"));
        assert!(text.contains("Recent readings: tarot: The Sun; horoscope: daily"));
        assert!(text.contains("Current moon phase: Waxing Gibbous"));
    }

    #[test]
    fn system_text_without_context_is_unchanged() {
        assert_eq!(build_system_text("instructions", None), "instructions");
    }

    #[test]
    fn extract_text_takes_first_candidate_part() {
        let response = GenerateResponse {
            candidates: Some(vec![Candidate {
                content: Some(CandidateContent {
                    parts: Some(vec![
                        Part {
                            text: "first".to_string(),
                        },
                        Part {
                            text: "second".to_string(),
                        },
                    ]),
                }),
            }]),
        };
        assert_eq!(extract_text(response).as_deref(), Some("first"));
    }

    #[test]
    fn extract_text_handles_empty_candidates() {
        assert_eq!(
            extract_text(GenerateResponse {
                candidates: Some(vec![])
            }),
            None
        );
        assert_eq!(extract_text(GenerateResponse { candidates: None }), None);
    }
}
