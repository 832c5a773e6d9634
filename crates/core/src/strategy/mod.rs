//! Deterministic investment-strategy pipeline.
//!
//! Stages run strictly in order and only see each other's outputs through
//! explicit arguments: income scoring, risk scoring, allocation selection,
//! recommendation expansion. Tax suggestions depend only on income and risk
//! tolerance.

pub mod allocation;
pub mod income;
pub mod provider;
pub mod recommend;
pub mod risk;
pub mod tax;

use crate::domain::profile::InvestorProfile;
use crate::domain::recommendation::StrategyResult;
use anyhow::ensure;
use serde::{Deserialize, Serialize};

pub use provider::{LocalStrategyProvider, Provider, StrategyProvider};

/// Rounds to 2 decimal places (currency and score precision).
///
/// Rounds the exact binary value, so 0.595 (stored as 0.59499...) becomes
/// 0.59. Exact half-cent values round away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // Exact ties are multiples of 1/8; scaling by 100 keeps them exact.
    let cents = value * 100.0;
    if (value * 8.0).fract() == 0.0 && cents.fract().abs() == 0.5 {
        return cents.round() / 100.0;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

pub fn generate_strategy(
    profile: &InvestorProfile,
    total_income: f64,
    investment_amount: f64,
) -> StrategyResult {
    let trend = profile.resolved_market_trend();

    let isi = income::income_stability_index(&profile.income_sources);
    let income_categories = income::categorize_income(&profile.income_sources);

    let risk_score = risk::dynamic_risk_score(
        isi,
        trend.crypto_volatility,
        profile.risk_tolerance,
        profile.investment_experience,
    );

    let (band, asset_allocation) = allocation::select_allocation(risk_score);

    let specific_recommendations =
        recommend::expand_recommendations(&asset_allocation, &trend, investment_amount);

    let tax_suggestions = tax::tax_suggestions(total_income, profile.risk_tolerance);

    tracing::debug!(
        sources = profile.income_sources.len(),
        isi,
        risk_score,
        band = band.as_str(),
        recommendations = specific_recommendations.len(),
        "generated strategy"
    );

    StrategyResult {
        isi,
        income_categories,
        risk_score,
        asset_allocation,
        specific_recommendations,
        tax_suggestions,
    }
}

/// Everything a provider needs to produce a [`StrategyResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRequest {
    pub profile: InvestorProfile,
    pub total_income: f64,
    /// Annual amount to invest.
    pub investment_amount: f64,
}

impl StrategyRequest {
    /// Input checks for outer surfaces. The pipeline itself accepts anything
    /// and degrades to defined values.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.total_income.is_finite() && self.total_income >= 0.0,
            "totalIncome must be a non-negative number (got {})",
            self.total_income
        );
        ensure!(
            self.investment_amount.is_finite() && self.investment_amount >= 0.0,
            "investmentAmount must be a non-negative number (got {})",
            self.investment_amount
        );

        for (idx, source) in self.profile.income_sources.iter().enumerate() {
            ensure!(
                source.amount.is_finite() && source.amount >= 0.0,
                "incomeSources[{idx}].amount must be non-negative (got {})",
                source.amount
            );
            ensure!(
                (1..=10).contains(&source.stability),
                "incomeSources[{idx}].stability must be 1..=10 (got {})",
                source.stability
            );
        }

        for (idx, goal) in self.profile.financial_goals.iter().enumerate() {
            ensure!(
                goal.target_amount.is_finite() && goal.target_amount >= 0.0,
                "financialGoals[{idx}].targetAmount must be non-negative (got {})",
                goal.target_amount
            );
            ensure!(
                (1..=10).contains(&goal.priority),
                "financialGoals[{idx}].priority must be 1..=10 (got {})",
                goal.priority
            );
        }

        Ok(())
    }
}
