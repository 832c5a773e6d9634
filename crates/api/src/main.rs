use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use finplan_core::domain::recommendation::StrategyResult;
use finplan_core::llm::error::LlmDiagnosticsError;
use finplan_core::llm::openai::OpenAiClient;
use finplan_core::assistant::{self, Answer};
use finplan_core::planning::pension::{self, WithdrawalInputs, WithdrawalPlan};
use finplan_core::planning::retirement::{self, RetirementInputs, RetirementProjection};
use finplan_core::planning::returns::{self, ContributionFrequency, InvestmentOption, ReturnProjection};
use finplan_core::planning::tax_regime::{self, RegimeComparison};
use finplan_core::strategy::{LocalStrategyProvider, Provider, StrategyProvider, StrategyRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = finplan_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let remote: Option<Arc<dyn StrategyProvider>> = match OpenAiClient::from_settings(&settings) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!(error = %e, "remote strategy provider disabled; serving local strategies only");
            None
        }
    };

    let state = AppState {
        local: Arc::new(LocalStrategyProvider),
        remote,
    };

    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/strategy", post(post_strategy))
        .route("/tax/compare", post(post_tax_compare))
        .route("/returns/projection", post(post_return_projection))
        .route("/retirement/projection", post(post_retirement_projection))
        .route("/pension/options", post(post_pension_options))
        .route("/investment-options", get(get_investment_options))
        .route("/assistant/lookup", post(post_assistant_lookup))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    local: Arc<dyn StrategyProvider>,
    remote: Option<Arc<dyn StrategyProvider>>,
}

impl AppState {
    fn provider_for(&self, provider: Provider) -> Option<&Arc<dyn StrategyProvider>> {
        match provider {
            Provider::Local => Some(&self.local),
            Provider::OpenAi => self.remote.as_ref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn bad_request(err: anyhow::Error) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, format!("{err:#}"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StrategyBody {
    #[serde(flatten)]
    request: StrategyRequest,
    #[serde(default)]
    provider: Provider,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiStrategy {
    request_id: Uuid,
    provider: Provider,
    generated_at: DateTime<Utc>,
    strategy: StrategyResult,
}

async fn post_strategy(
    State(state): State<AppState>,
    Json(body): Json<StrategyBody>,
) -> Result<Json<ApiStrategy>, ApiError> {
    body.request.validate().map_err(bad_request)?;

    let Some(provider) = state.provider_for(body.provider) else {
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("strategy provider {} is not configured", body.provider),
        ));
    };

    let request_id = Uuid::new_v4();
    let strategy = provider
        .generate_strategy(&body.request)
        .await
        .map_err(|e| {
            sentry_anyhow::capture_anyhow(&e);
            if let Some(diag) = e.downcast_ref::<LlmDiagnosticsError>() {
                tracing::error!(
                    %request_id,
                    stage = diag.stage,
                    detail = %diag.detail,
                    "remote strategy generation failed"
                );
                if let Some(payload) = diag.raw_payload() {
                    tracing::debug!(%request_id, raw = %payload, "remote provider output");
                }
            } else {
                tracing::error!(%request_id, error = %e, "strategy generation failed");
            }
            api_error(StatusCode::BAD_GATEWAY, format!("{e}"))
        })?;

    tracing::info!(
        %request_id,
        provider = %body.provider,
        risk_score = strategy.risk_score,
        "strategy generated"
    );

    Ok(Json(ApiStrategy {
        request_id,
        provider: body.provider,
        generated_at: Utc::now(),
        strategy,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaxCompareBody {
    income: f64,
    #[serde(default)]
    deductions: f64,
}

async fn post_tax_compare(
    Json(body): Json<TaxCompareBody>,
) -> Result<Json<RegimeComparison>, ApiError> {
    tax_regime::compare_regimes(body.income, body.deductions)
        .map(Json)
        .map_err(bad_request)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReturnProjectionBody {
    amount: f64,
    years: u32,
    /// Percent per year. Takes precedence over `optionId`.
    #[serde(default)]
    expected_return: Option<f64>,
    #[serde(default)]
    option_id: Option<String>,
    #[serde(default)]
    frequency: ContributionFrequency,
}

async fn post_return_projection(
    Json(body): Json<ReturnProjectionBody>,
) -> Result<Json<ReturnProjection>, ApiError> {
    let expected_return = match (body.expected_return, body.option_id.as_deref()) {
        (Some(pct), _) => pct,
        (None, Some(id)) => returns::find_investment_option(id)
            .map(|o| o.expected_return)
            .ok_or_else(|| {
                api_error(
                    StatusCode::BAD_REQUEST,
                    format!("unknown investment option: {id}"),
                )
            })?,
        (None, None) => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "either expectedReturn or optionId is required",
            ))
        }
    };

    returns::project_returns(body.amount, body.years, expected_return, body.frequency)
        .map(Json)
        .map_err(bad_request)
}

async fn post_retirement_projection(
    Json(inputs): Json<RetirementInputs>,
) -> Result<Json<RetirementProjection>, ApiError> {
    retirement::project_retirement(&inputs)
        .map(Json)
        .map_err(bad_request)
}

async fn post_pension_options(
    Json(inputs): Json<WithdrawalInputs>,
) -> Result<Json<WithdrawalPlan>, ApiError> {
    pension::withdrawal_options(&inputs)
        .map(Json)
        .map_err(bad_request)
}

#[derive(Debug, Deserialize)]
struct LookupBody {
    query: String,
}

async fn post_assistant_lookup(Json(body): Json<LookupBody>) -> Result<Json<Answer>, ApiError> {
    assistant::lookup(&body.query).map(Json).ok_or_else(|| {
        api_error(
            StatusCode::NOT_FOUND,
            "no offline answer for this question",
        )
    })
}

async fn get_investment_options() -> Json<Vec<InvestmentOption>> {
    Json(returns::investment_options())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
