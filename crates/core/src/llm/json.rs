use crate::domain::contract::RemoteStrategy;
use crate::domain::recommendation::StrategyResult;
use anyhow::Context;

pub fn extract_json(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        // Remove Markdown fences (```json ... ``` or ``` ... ```).
        let mut inner = trimmed;
        if let Some(after_first) = inner.split_once('\n').map(|(_, rest)| rest) {
            inner = after_first;
        }
        if let Some(end) = inner.rfind("```") {
            inner = &inner[..end];
        }
        return Some(inner.trim().to_string());
    }

    // Best-effort extraction: first '{' to last '}'.
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(trimmed[start..=end].trim().to_string())
}

pub fn parse_strategy(text: &str) -> anyhow::Result<StrategyResult> {
    let json_str = extract_json(text).context("could not find a JSON object in the model output")?;
    let parsed = serde_json::from_str::<RemoteStrategy>(&json_str)
        .with_context(|| format!("model output is not valid JSON for strategy schema: {json_str}"))?;
    parsed.validate_and_into_strategy()
}
