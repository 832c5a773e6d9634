use crate::config::Settings;
use crate::domain::profile::InvestorProfile;
use crate::domain::recommendation::StrategyResult;
use crate::llm::error::LlmDiagnosticsError;
use crate::llm::json;
use crate::strategy::{Provider, StrategyProvider, StrategyRequest};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_MAX_TOKENS: u32 = 2000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const TEMPERATURE: f32 = 0.7;

/// Remote strategy provider using the OpenAI chat completions API.
///
/// Each call issues exactly one request. Failures surface as
/// [`LlmDiagnosticsError`] and never fall back to another provider.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_openai_api_key()?.to_string();
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let max_tokens = std::env::var("OPENAI_MAX_TOKENS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let timeout_secs = std::env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url,
            model,
            max_tokens,
        })
    }

    async fn create_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> anyhow::Result<(serde_json::Value, ChatCompletionResponse)> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );

        let url = format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );
        let res = self
            .http
            .post(url)
            .headers(headers)
            .json(&req)
            .send()
            .await
            .context("OpenAI request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read OpenAI response body")?;
        if !status.is_success() {
            let raw_response_json = serde_json::from_str::<serde_json::Value>(&text).ok();
            let detail = raw_response_json
                .as_ref()
                .and_then(|v| v.pointer("/error/message"))
                .and_then(|m| m.as_str())
                .map(|m| format!("status={status}: {m}"))
                .unwrap_or_else(|| format!("status={status}"));
            return Err(LlmDiagnosticsError {
                provider: Provider::OpenAi,
                stage: "http",
                detail,
                raw_output: Some(text),
                raw_response_json,
            }
            .into());
        }

        let raw_json = serde_json::from_str::<serde_json::Value>(&text)
            .with_context(|| format!("failed to parse OpenAI response JSON: {text}"))?;
        let parsed = serde_json::from_value::<ChatCompletionResponse>(raw_json.clone())
            .context("failed to decode OpenAI response into ChatCompletionResponse")?;
        Ok((raw_json, parsed))
    }

    fn system_prompt() -> &'static str {
        "You are a financial advisor specializing in Indian investments and tax planning."
    }

    fn user_prompt(request: &StrategyRequest) -> String {
        let profile = &request.profile;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "As a financial advisor, provide an investment strategy based on the following profile:\n"
        );
        let _ = writeln!(out, "Total Annual Income: ₹{}", request.total_income);
        let _ = writeln!(
            out,
            "Monthly Investment Amount: ₹{}\n",
            request.investment_amount / 12.0
        );
        let _ = writeln!(out, "Income Sources: {}\n", Self::describe_sources(profile));
        let _ = writeln!(out, "Risk Tolerance: {}", profile.risk_tolerance.as_str());
        let _ = writeln!(
            out,
            "Investment Experience: {}",
            profile.investment_experience.as_str()
        );
        let _ = writeln!(
            out,
            "Liquidity Preference: {}\n",
            profile.liquidity_preference.as_str()
        );
        let _ = writeln!(out, "Financial Goals:");
        for goal in &profile.financial_goals {
            let _ = writeln!(
                out,
                "- {} goal: ₹{} in {} years (priority: {}/10)",
                goal.kind.as_str(),
                goal.target_amount,
                goal.timeframe,
                goal.priority
            );
        }
        let _ = writeln!(
            out,
            "\nProvide a detailed investment strategy in the following JSON format:\n{}",
            Self::schema_hint()
        );
        out.push_str(
            "\nEnsure all percentages add up to 100%, provide realistic specific investment \
             recommendations considering the Indian market, and include appropriate tax savings \
             options based on the income level.",
        );
        out
    }

    fn describe_sources(profile: &InvestorProfile) -> String {
        profile
            .income_sources
            .iter()
            .map(|s| {
                format!(
                    "{}: ₹{} ({}, stability: {}/10)",
                    s.kind.as_str(),
                    s.amount,
                    s.frequency.as_str(),
                    s.stability
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn schema_hint() -> String {
        [
            "{",
            "  \"isi\": number between 0-10,",
            "  \"incomeCategories\": {\"fixed\": percentage, \"variable\": percentage, \"passive\": percentage},",
            "  \"riskScore\": number between 0-10,",
            "  \"assetAllocation\": {",
            "    \"Fixed Deposits\": percentage, \"Government Bonds\": percentage,",
            "    \"Corporate Bonds\": percentage, \"Blue-chip Stocks\": percentage,",
            "    \"Mutual Funds\": percentage, \"Gold\": percentage, \"ETFs\": percentage,",
            "    \"Real Estate\": percentage, \"Crypto\": percentage,",
            "    \"Small-cap Stocks\": percentage, \"Startups\": percentage",
            "  },",
            "  \"specificRecommendations\": [",
            "    {\"assetClass\": string, \"allocation\": percentage, \"amount\": number, \"specific\": [string]}",
            "  ],",
            "  \"taxSuggestions\": [string]",
            "}",
        ]
        .join("\n")
    }

    fn response_text(res: &ChatCompletionResponse) -> Option<&str> {
        res.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    fn chat_request(&self, request: &StrategyRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: Self::system_prompt().to_string(),
                },
                Message {
                    role: "user",
                    content: Self::user_prompt(request),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: self.max_tokens,
        }
    }

    /// Turns a decoded completion into a strategy. Failures keep the full
    /// response body on the diagnostics error.
    fn strategy_from_response(
        raw_json: serde_json::Value,
        res: &ChatCompletionResponse,
    ) -> anyhow::Result<StrategyResult> {
        let Some(text) = Self::response_text(res) else {
            return Err(LlmDiagnosticsError {
                provider: Provider::OpenAi,
                stage: "empty_response",
                detail: "response contained no message content".to_string(),
                raw_output: None,
                raw_response_json: Some(raw_json),
            }
            .into());
        };

        json::parse_strategy(text).map_err(|err| {
            anyhow::Error::from(LlmDiagnosticsError {
                provider: Provider::OpenAi,
                stage: "parse",
                detail: format!("{err:#}"),
                raw_output: Some(text.to_string()),
                raw_response_json: Some(raw_json),
            })
        })
    }
}

#[async_trait::async_trait]
impl StrategyProvider for OpenAiClient {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    async fn generate_strategy(&self, request: &StrategyRequest) -> anyhow::Result<StrategyResult> {
        let (raw_json, res) = self.create_completion(self.chat_request(request)).await?;
        tracing::debug!(model = %self.model, raw_response = %raw_json, "openai completion received");

        let strategy = Self::strategy_from_response(raw_json, &res)?;
        tracing::info!(
            model = %self.model,
            risk_score = strategy.risk_score,
            recommendations = strategy.specific_recommendations.len(),
            "remote strategy generated"
        );
        Ok(strategy)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
