use anyhow::ensure;
use serde::{Deserialize, Serialize};

/// Share of annual income suggested for investing.
const RECOMMENDED_SAVINGS_RATE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// A broad investment category with an assumed long-run annual return.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub risk_level: RiskLevel,
    /// Percent per year.
    pub expected_return: f64,
    /// Suggested share of the monthly investment, in percent.
    pub allocation: f64,
    pub time_horizon: &'static str,
}

pub fn investment_options() -> Vec<InvestmentOption> {
    vec![
        InvestmentOption {
            id: "stocks",
            name: "Equity Stocks",
            description: "High growth potential with higher volatility, suitable for long-term goals.",
            risk_level: RiskLevel::High,
            expected_return: 12.0,
            allocation: 40.0,
            time_horizon: "5+ years",
        },
        InvestmentOption {
            id: "bonds",
            name: "Debt Securities",
            description: "Steady returns with lower risk, ideal for capital preservation.",
            risk_level: RiskLevel::Low,
            expected_return: 7.0,
            allocation: 25.0,
            time_horizon: "2-4 years",
        },
        InvestmentOption {
            id: "real_estate",
            name: "Real Estate",
            description: "Tangible assets with rental income potential and capital appreciation.",
            risk_level: RiskLevel::Medium,
            expected_return: 9.0,
            allocation: 20.0,
            time_horizon: "7+ years",
        },
        InvestmentOption {
            id: "gold",
            name: "Gold & Precious Metals",
            description: "Hedge against inflation and economic uncertainty with moderate returns.",
            risk_level: RiskLevel::Medium,
            expected_return: 8.0,
            allocation: 15.0,
            time_horizon: "3-5 years",
        },
    ]
}

pub fn find_investment_option(id: &str) -> Option<InvestmentOption> {
    investment_options().into_iter().find(|o| o.id == id)
}

/// Monthly amount worth investing out of an annual income, whole rupees.
pub fn recommended_monthly_investment(total_income: f64) -> f64 {
    (total_income.max(0.0) * RECOMMENDED_SAVINGS_RATE / 12.0).round()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionFrequency {
    #[default]
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPoint {
    pub year: u32,
    pub invested: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnProjection {
    pub total_invested: f64,
    pub final_value: f64,
    pub total_returns: f64,
    pub multiplier: f64,
    /// Year 0 through `years`, whole rupees.
    pub yearly: Vec<YearPoint>,
}

/// Compound growth of a recurring contribution.
///
/// Monthly contributions are invested at the start of each month and grow at
/// `annual_return_pct / 12` per month; yearly contributions are invested at the
/// start of each year.
pub fn project_returns(
    amount: f64,
    years: u32,
    annual_return_pct: f64,
    frequency: ContributionFrequency,
) -> anyhow::Result<ReturnProjection> {
    ensure!(
        amount.is_finite() && amount >= 0.0,
        "amount must be a non-negative number (got {amount})"
    );
    ensure!(
        annual_return_pct.is_finite() && annual_return_pct > -100.0,
        "expected return must be greater than -100% (got {annual_return_pct})"
    );

    let rate = annual_return_pct / 100.0;
    let (total_invested, final_value) = match frequency {
        ContributionFrequency::Monthly => {
            let invested = amount * 12.0 * f64::from(years);
            let monthly_rate = rate / 12.0;
            let value = if monthly_rate == 0.0 {
                invested
            } else {
                let periods = 12 * years as i32;
                amount * (((1.0 + monthly_rate).powi(periods) - 1.0) / monthly_rate)
                    * (1.0 + monthly_rate)
            };
            (invested, value)
        }
        ContributionFrequency::Yearly => {
            let mut value = 0.0;
            for _ in 0..years {
                value = (value + amount) * (1.0 + rate);
            }
            (amount * f64::from(years), value)
        }
    };

    let yearly = yearly_points(amount, years, rate, frequency);
    let multiplier = if total_invested > 0.0 {
        (final_value / total_invested * 100.0).round() / 100.0
    } else {
        0.0
    };

    Ok(ReturnProjection {
        total_invested: total_invested.round(),
        final_value: final_value.round(),
        total_returns: (final_value - total_invested).round(),
        multiplier,
        yearly,
    })
}

fn yearly_points(
    amount: f64,
    years: u32,
    rate: f64,
    frequency: ContributionFrequency,
) -> Vec<YearPoint> {
    let mut out = Vec::with_capacity(years as usize + 1);
    out.push(YearPoint {
        year: 0,
        invested: 0.0,
        value: 0.0,
    });

    let mut invested = 0.0;
    let mut value = 0.0;
    for year in 1..=years {
        match frequency {
            ContributionFrequency::Monthly => {
                for _ in 0..12 {
                    invested += amount;
                    value = (value + amount) * (1.0 + rate / 12.0);
                }
            }
            ContributionFrequency::Yearly => {
                invested += amount;
                value = (value + amount) * (1.0 + rate);
            }
        }
        out.push(YearPoint {
            year,
            invested: invested.round(),
            value: value.round(),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_contributions_compound() {
        let p = project_returns(1_000.0, 1, 12.0, ContributionFrequency::Monthly).unwrap();
        assert_eq!(p.total_invested, 12_000.0);
        assert_eq!(p.final_value, 12_809.0);
        assert_eq!(p.total_returns, 809.0);
        assert_eq!(p.multiplier, 1.07);
        assert_eq!(p.yearly.len(), 2);
        assert_eq!(p.yearly[1].value, p.final_value);
    }

    #[test]
    fn yearly_contributions_compound() {
        let p = project_returns(10_000.0, 2, 10.0, ContributionFrequency::Yearly).unwrap();
        assert_eq!(p.total_invested, 20_000.0);
        assert_eq!(p.final_value, 23_100.0);
        assert_eq!(p.yearly[1].value, 11_000.0);
        assert_eq!(p.yearly[2].invested, 20_000.0);
    }

    #[test]
    fn zero_rate_keeps_principal() {
        let p = project_returns(500.0, 3, 0.0, ContributionFrequency::Monthly).unwrap();
        assert_eq!(p.final_value, 18_000.0);
        assert_eq!(p.total_returns, 0.0);
        assert_eq!(p.multiplier, 1.0);
    }

    #[test]
    fn zero_years_is_empty_projection() {
        let p = project_returns(500.0, 0, 8.0, ContributionFrequency::Monthly).unwrap();
        assert_eq!(p.total_invested, 0.0);
        assert_eq!(p.final_value, 0.0);
        assert_eq!(p.multiplier, 0.0);
        assert_eq!(p.yearly.len(), 1);
    }

    #[test]
    fn series_tracks_closed_form_over_long_horizon() {
        let p = project_returns(10_000.0, 20, 12.0, ContributionFrequency::Monthly).unwrap();
        let last = p.yearly.last().unwrap();
        assert!((last.value - p.final_value).abs() <= 1.0);
        assert!(p.yearly.windows(2).all(|w| w[1].value > w[0].value));
    }

    #[test]
    fn rejects_negative_amount() {
        assert!(project_returns(-1.0, 5, 8.0, ContributionFrequency::Yearly).is_err());
        assert!(project_returns(1.0, 5, -100.0, ContributionFrequency::Yearly).is_err());
    }

    #[test]
    fn recommended_monthly_is_thirty_percent() {
        assert_eq!(recommended_monthly_investment(1_200_000.0), 30_000.0);
        assert_eq!(recommended_monthly_investment(0.0), 0.0);
    }

    #[test]
    fn catalog_allocations_sum_to_100() {
        let total: f64 = investment_options().iter().map(|o| o.allocation).sum();
        assert_eq!(total, 100.0);
        assert_eq!(find_investment_option("gold").unwrap().expected_return, 8.0);
        assert!(find_investment_option("tulips").is_none());
    }
}
