use crate::domain::recommendation::StrategyResult;
use crate::strategy::{generate_strategy, StrategyRequest};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[default]
    Local,
    #[serde(rename = "openai")]
    OpenAi,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::OpenAi => "openai",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "openai" => Ok(Self::OpenAi),
            other => anyhow::bail!("unknown strategy provider: {other}"),
        }
    }
}

/// Anything that can turn an investor profile into a [`StrategyResult`].
/// Callers treat every implementation interchangeably.
#[async_trait::async_trait]
pub trait StrategyProvider: Send + Sync {
    fn provider(&self) -> Provider;

    async fn generate_strategy(&self, request: &StrategyRequest) -> anyhow::Result<StrategyResult>;
}

/// The deterministic in-process pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStrategyProvider;

#[async_trait::async_trait]
impl StrategyProvider for LocalStrategyProvider {
    fn provider(&self) -> Provider {
        Provider::Local
    }

    async fn generate_strategy(&self, request: &StrategyRequest) -> anyhow::Result<StrategyResult> {
        Ok(generate_strategy(
            &request.profile,
            request.total_income,
            request.investment_amount,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::tests::salaried_profile;

    #[tokio::test]
    async fn local_provider_matches_pipeline() {
        let request = StrategyRequest {
            profile: salaried_profile(),
            total_income: 1_200_000.0,
            investment_amount: 300_000.0,
        };

        let provider: Box<dyn StrategyProvider> = Box::new(LocalStrategyProvider);
        let via_trait = provider.generate_strategy(&request).await.unwrap();
        let direct = generate_strategy(&request.profile, 1_200_000.0, 300_000.0);

        assert_eq!(provider.provider(), Provider::Local);
        assert_eq!(via_trait, direct);
    }

    #[test]
    fn parses_provider_names() {
        assert_eq!("local".parse::<Provider>().unwrap(), Provider::Local);
        assert_eq!(" OpenAI ".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert!("gemini".parse::<Provider>().is_err());
        assert_eq!(serde_json::to_string(&Provider::OpenAi).unwrap(), "\"openai\"");
    }
}
