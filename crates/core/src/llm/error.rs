use crate::strategy::Provider;
use serde_json::{json, Value};
use std::fmt;

/// A remote provider call that got a response but could not turn it into a
/// strategy. `stage` names where it broke: `http`, `empty_response` or `parse`.
#[derive(Debug, Clone)]
pub struct LlmDiagnosticsError {
    pub provider: Provider,
    pub stage: &'static str,
    pub detail: String,
    /// Message text produced by the model, when there was any.
    pub raw_output: Option<String>,
    /// Full decoded response body.
    pub raw_response_json: Option<Value>,
}

impl LlmDiagnosticsError {
    /// The most specific raw payload for logs and error reports. Model text
    /// wins over the response body; text that is not JSON is wrapped as
    /// `{"raw_text": ...}`.
    pub fn raw_payload(&self) -> Option<Value> {
        match self.raw_output.as_deref() {
            Some(raw) => Some(
                serde_json::from_str(raw).unwrap_or_else(|_| json!({ "raw_text": raw })),
            ),
            None => self.raw_response_json.clone(),
        }
    }
}

impl fmt::Display for LlmDiagnosticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} strategy call failed at {}: {}",
            self.provider, self.stage, self.detail
        )
    }
}

impl std::error::Error for LlmDiagnosticsError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(raw_output: Option<&str>, raw_response_json: Option<Value>) -> LlmDiagnosticsError {
        LlmDiagnosticsError {
            provider: Provider::OpenAi,
            stage: "parse",
            detail: "expected value".to_string(),
            raw_output: raw_output.map(str::to_string),
            raw_response_json,
        }
    }

    #[test]
    fn display_names_provider_and_stage() {
        assert_eq!(
            error(None, None).to_string(),
            "openai strategy call failed at parse: expected value"
        );
    }

    #[test]
    fn raw_payload_prefers_model_text() {
        let body = json!({"choices": []});
        assert_eq!(
            error(Some("{\"isi\": 3}"), Some(body.clone())).raw_payload(),
            Some(json!({"isi": 3}))
        );
        assert_eq!(
            error(Some("sorry"), Some(body.clone())).raw_payload(),
            Some(json!({"raw_text": "sorry"}))
        );
        assert_eq!(error(None, Some(body.clone())).raw_payload(), Some(body));
        assert_eq!(error(None, None).raw_payload(), None);
    }
}
