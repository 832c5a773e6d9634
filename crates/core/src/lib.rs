pub mod assistant;
pub mod domain;
pub mod llm;
pub mod planning;
pub mod strategy;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub openai_api_key: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        /// Blank keys count as missing.
        pub fn require_openai_api_key(&self) -> anyhow::Result<&str> {
            self.openai_api_key
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .context("OPENAI_API_KEY is required")
        }
    }
}
