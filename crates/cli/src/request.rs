use anyhow::Context;
use std::path::Path;

use finplan_core::domain::profile::InvestorProfile;
use finplan_core::planning::returns::recommended_monthly_investment;
use finplan_core::strategy::StrategyRequest;

/// Overrides taken from the command line. Anything left unset is derived
/// from the profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOverrides {
    pub total_income: Option<f64>,
    pub investment_amount: Option<f64>,
}

pub fn load_profile(path: &Path) -> anyhow::Result<InvestorProfile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid profile JSON in {}", path.display()))
}

pub fn build_request(
    profile: InvestorProfile,
    overrides: RequestOverrides,
) -> anyhow::Result<StrategyRequest> {
    let total_income = overrides
        .total_income
        .unwrap_or_else(|| profile.total_income());
    let investment_amount = overrides
        .investment_amount
        .unwrap_or_else(|| recommended_monthly_investment(total_income) * 12.0);

    let request = StrategyRequest {
        profile,
        total_income,
        investment_amount,
    };
    request.validate()?;
    Ok(request)
}
