//! Text-generation relay and the message surface
//!
//! The relay is a small service that holds the secret credential and forwards
//! a `{prompt}` body to a generative-text API, answering `{text}` on success or
//! `{error}` with a non-2xx status. The transport belongs to the host; this
//! module owns the wire bodies, the prompts and the strings the player sees.
//! Nothing here touches the simulation: a slow or failed request never pauses
//! or changes a run.

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Request body sent to the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub prompt: String,
}

impl RelayRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, RelayError> {
        serde_json::to_string(self).map_err(|e| RelayError::Malformed(e.to_string()))
    }
}

/// Response body from the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayResponse {
    Text { text: String },
    Error { error: String },
}

/// Interpret a relay reply
pub fn parse_relay_response(status: u16, body: &str) -> Result<String, RelayError> {
    let parsed = serde_json::from_str::<RelayResponse>(body);
    let success = (200..300).contains(&status);
    match (success, parsed) {
        (true, Ok(RelayResponse::Text { text })) => Ok(text),
        (_, Ok(RelayResponse::Error { error })) => Err(RelayError::Service {
            status,
            message: error,
        }),
        (false, Ok(RelayResponse::Text { .. })) => Err(RelayError::Service {
            status,
            message: "Relay request failed".to_string(),
        }),
        (_, Err(e)) => Err(RelayError::Malformed(e.to_string())),
    }
}

/// Anything that can turn a prompt into text: an HTTP client, a test fake, ...
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, RelayError>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> Result<String, RelayError>,
{
    fn generate(&self, prompt: &str) -> Result<String, RelayError> {
        self(prompt)
    }
}

/// Player-triggered requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRequest {
    Encouragement,
    StarFact,
}

impl MessageRequest {
    pub fn prompt(&self, score: u64) -> String {
        match self {
            MessageRequest::Encouragement => encouragement_prompt(score),
            MessageRequest::StarFact => star_fact_prompt().to_string(),
        }
    }

    /// Wrap generated text for display
    pub fn present(&self, text: &str) -> String {
        let text = text.trim();
        match self {
            MessageRequest::Encouragement => format!("✨ {text}"),
            MessageRequest::StarFact => format!("✨ Did you know? {text}"),
        }
    }
}

pub fn encouragement_prompt(score: u64) -> String {
    format!(
        "Generate a short, encouraging message for a child who is playing a star-catching game. \
         The message should be positive, simple, and congratulate them on their effort or score. \
         Keep it under 20 words. Current score: {score}."
    )
}

pub fn star_fact_prompt() -> &'static str {
    "Generate a very simple and interesting fact about stars or space, suitable for a child. \
     Keep it under 15 words."
}

/// Run one request and return the message-surface text, success or not
pub fn request_message(
    generator: &impl TextGenerator,
    request: MessageRequest,
    score: u64,
) -> String {
    match generator.generate(&request.prompt(score)) {
        Ok(text) => request.present(&text),
        Err(e) => {
            log::warn!("{request:?} request failed: {e}");
            error_message(&e)
        }
    }
}

/// Player-facing text for a failed request
pub fn error_message(error: &RelayError) -> String {
    match error {
        RelayError::Service { message, .. } => format!("Error: {message}"),
        RelayError::Transport(_) => "Error: Error fetching data. Please try again.".to_string(),
        RelayError::Malformed(_) => "Error: Failed to get a response.".to_string(),
    }
}

/// Fixed message-surface strings
pub mod messages {
    pub const WELCOME: &str =
        "Press 'Start Game' to begin! Use Left/Right arrow keys to move.";
    pub const LOADING: &str = "Loading...";

    pub fn game_over(score: u64) -> String {
        format!("Game Over! Your final score is: {score}. Press 'Play Again?' to retry.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success() {
        assert_eq!(
            parse_relay_response(200, r#"{"text":"Stars are suns!"}"#),
            Ok("Stars are suns!".to_string())
        );
    }

    #[test]
    fn test_parse_service_error() {
        assert_eq!(
            parse_relay_response(500, r#"{"error":"Server configuration error"}"#),
            Err(RelayError::Service {
                status: 500,
                message: "Server configuration error".to_string(),
            })
        );
        assert!(matches!(
            parse_relay_response(405, r#"{"text":"odd"}"#),
            Err(RelayError::Service { status: 405, .. })
        ));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_relay_response(200, "<html>"),
            Err(RelayError::Malformed(_))
        ));
        assert!(matches!(
            parse_relay_response(200, r#"{"candidates":[]}"#),
            Err(RelayError::Malformed(_))
        ));
    }

    #[test]
    fn test_request_body() {
        let json = RelayRequest::new("hi").to_json().unwrap();
        assert_eq!(json, r#"{"prompt":"hi"}"#);
    }

    #[test]
    fn test_encouragement_includes_score() {
        let prompt = MessageRequest::Encouragement.prompt(130);
        assert!(prompt.ends_with("Current score: 130."));
        assert_eq!(MessageRequest::StarFact.prompt(130), star_fact_prompt());
    }

    #[test]
    fn test_request_message_success_and_failure() {
        let echo = |prompt: &str| -> Result<String, RelayError> {
            assert!(prompt.contains("score: 40"));
            Ok(" Great job! ".to_string())
        };
        assert_eq!(
            request_message(&echo, MessageRequest::Encouragement, 40),
            "✨ Great job!"
        );

        let fact = |_: &str| -> Result<String, RelayError> { Ok("The Sun is a star.".to_string()) };
        assert_eq!(
            request_message(&fact, MessageRequest::StarFact, 0),
            "✨ Did you know? The Sun is a star."
        );

        let down = |_: &str| -> Result<String, RelayError> {
            Err(RelayError::Transport("connection refused".to_string()))
        };
        assert_eq!(
            request_message(&down, MessageRequest::StarFact, 0),
            "Error: Error fetching data. Please try again."
        );
    }

    #[test]
    fn test_game_over_message() {
        assert_eq!(
            messages::game_over(10),
            "Game Over! Your final score is: 10. Press 'Play Again?' to retry."
        );
    }
}
