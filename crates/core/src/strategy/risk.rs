use crate::domain::profile::{InvestmentExperience, RiskTolerance};
use crate::strategy::round2;

const W_INVERTED_ISI: f64 = 0.3;
const W_MARKET_VOLATILITY: f64 = 0.2;
const W_RISK_APPETITE: f64 = 0.3;
const W_EXPERIENCE: f64 = 0.2;

fn risk_appetite(tolerance: RiskTolerance) -> f64 {
    match tolerance {
        RiskTolerance::Low => 2.0,
        RiskTolerance::Medium => 5.0,
        RiskTolerance::High => 8.0,
    }
}

fn experience_factor(experience: InvestmentExperience) -> f64 {
    match experience {
        InvestmentExperience::Beginner => 3.0,
        InvestmentExperience::Intermediate => 6.0,
        InvestmentExperience::Expert => 9.0,
    }
}

/// Dynamic risk score, rounded to 2 decimals.
///
/// Fixed linear model: lower income stability, higher market volatility,
/// higher appetite and more experience all push the score up. The weighted sum
/// is divided by 10 to land back on a 0..=10 scale.
pub fn dynamic_risk_score(
    isi: f64,
    market_volatility: f64,
    tolerance: RiskTolerance,
    experience: InvestmentExperience,
) -> f64 {
    let inverted_isi = 10.0 - isi;
    let weighted = W_INVERTED_ISI * inverted_isi
        + W_MARKET_VOLATILITY * market_volatility
        + W_RISK_APPETITE * risk_appetite(tolerance)
        + W_EXPERIENCE * experience_factor(experience);

    round2(weighted / 10.0)
}
