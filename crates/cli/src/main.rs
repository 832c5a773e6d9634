use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finplan_core::llm::openai::OpenAiClient;
use finplan_core::strategy::{LocalStrategyProvider, Provider, StrategyProvider};

mod request;

#[derive(Debug, Parser)]
#[command(name = "finplan_cli")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build an investment strategy for a profile JSON file.
    Strategy {
        #[arg(long)]
        profile: PathBuf,

        /// Annual income. Defaults to the sum of the profile's income sources.
        #[arg(long)]
        total_income: Option<f64>,

        /// Annual amount to invest. Defaults to 30% of total income.
        #[arg(long)]
        investment_amount: Option<f64>,

        #[arg(long, default_value_t = Provider::Local)]
        provider: Provider,
    },
    /// Compare old and new income tax regimes.
    Tax {
        #[arg(long)]
        income: f64,

        #[arg(long, default_value_t = 0.0)]
        deductions: f64,
    },
    /// Answer a tax or planning question from the built-in notes.
    Ask {
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = finplan_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let output = match args.command {
        Command::Strategy {
            profile,
            total_income,
            investment_amount,
            provider,
        } => {
            let loaded = request::load_profile(&profile)?;
            let req = request::build_request(
                loaded,
                request::RequestOverrides {
                    total_income,
                    investment_amount,
                },
            )?;

            let strategy_provider: Box<dyn StrategyProvider> = match provider {
                Provider::Local => Box::new(LocalStrategyProvider),
                Provider::OpenAi => Box::new(OpenAiClient::from_settings(&settings)?),
            };

            tracing::info!(
                provider = %strategy_provider.provider(),
                total_income = req.total_income,
                investment_amount = req.investment_amount,
                "generating strategy"
            );

            match strategy_provider.generate_strategy(&req).await {
                Ok(strategy) => serde_json::to_value(&strategy)?,
                Err(err) => {
                    sentry_anyhow::capture_anyhow(&err);
                    if let Some(diag) =
                        err.downcast_ref::<finplan_core::llm::error::LlmDiagnosticsError>()
                    {
                        if let Some(payload) = diag.raw_payload() {
                            tracing::debug!(raw = %payload, "remote provider output");
                        }
                    }
                    return Err(err);
                }
            }
        }
        Command::Tax { income, deductions } => {
            let cmp = finplan_core::planning::tax_regime::compare_regimes(income, deductions)?;
            serde_json::to_value(&cmp)?
        }
        Command::Ask { query } => match finplan_core::assistant::lookup(&query) {
            Some(answer) => serde_json::to_value(&answer)?,
            None => anyhow::bail!("no offline answer for {query:?}"),
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_sentry(settings: &finplan_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
