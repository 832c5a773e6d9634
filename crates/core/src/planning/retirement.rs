use anyhow::ensure;
use serde::{Deserialize, Serialize};

const DEFAULT_EXPECTED_RETURN_PCT: f64 = 8.0;
/// Safe withdrawal rate applied to the retirement corpus.
const WITHDRAWAL_RATE: f64 = 0.04;

const MODEST_MONTHLY_CEILING: f64 = 30_000.0;
const COMFORTABLE_MONTHLY_CEILING: f64 = 80_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_investment: f64,
    /// Percent per year; defaults to 8 when no investment option was chosen.
    #[serde(default)]
    pub expected_return_pct: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleTier {
    Modest,
    Comfortable,
    Luxury,
}

impl LifestyleTier {
    pub fn from_monthly_income(monthly: f64) -> Self {
        if monthly < MODEST_MONTHLY_CEILING {
            Self::Modest
        } else if monthly < COMFORTABLE_MONTHLY_CEILING {
            Self::Comfortable
        } else {
            Self::Luxury
        }
    }

    pub fn profile(self) -> LifestyleProfile {
        match self {
            Self::Modest => LifestyleProfile {
                housing: "1-BHK Apartment in a Tier-2 City",
                travel: "Occasional domestic trips",
                healthcare: "Basic cover with government or affordable private care",
                lifestyle: "Modest, with local entertainment and public transport",
            },
            Self::Comfortable => LifestyleProfile {
                housing: "2-BHK Apartment in Major City Suburbs",
                travel: "Regular domestic getaways and an annual international trip",
                healthcare: "Comprehensive cover at private hospitals",
                lifestyle: "Comfortable, with regular dining out and an own vehicle",
            },
            Self::Luxury => LifestyleProfile {
                housing: "Villa or Premium Apartment in a prime location",
                travel: "Multiple international trips per year",
                healthcare: "Premium cover at the best private hospitals",
                lifestyle: "Luxury, with clubs, fine dining and premium experiences",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestyleProfile {
    pub housing: &'static str,
    pub travel: &'static str,
    pub healthcare: &'static str,
    pub lifestyle: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementProjection {
    pub years_to_retirement: u32,
    pub corpus: f64,
    pub annual_income: f64,
    pub monthly_income: f64,
    /// Share of the way from birth to retirement age, 0..=100.
    pub time_progress: f64,
    pub tier: LifestyleTier,
    pub lifestyle: LifestyleProfile,
}

/// Projects the corpus built by investing `monthly_investment` until
/// retirement (contributions made yearly in arrears) and the income it
/// sustains under a 4% withdrawal rule.
pub fn project_retirement(inputs: &RetirementInputs) -> anyhow::Result<RetirementProjection> {
    ensure!(
        inputs.retirement_age > inputs.current_age,
        "retirement age ({}) must be greater than current age ({})",
        inputs.retirement_age,
        inputs.current_age
    );
    ensure!(
        inputs.monthly_investment.is_finite() && inputs.monthly_investment >= 0.0,
        "monthly investment must be non-negative (got {})",
        inputs.monthly_investment
    );
    let return_pct = inputs
        .expected_return_pct
        .unwrap_or(DEFAULT_EXPECTED_RETURN_PCT);
    ensure!(
        return_pct.is_finite() && return_pct > -100.0,
        "expected return must be greater than -100% (got {return_pct})"
    );

    let years = inputs.retirement_age - inputs.current_age;
    let rate = return_pct / 100.0;
    let annual_contribution = inputs.monthly_investment * 12.0;
    let corpus = if rate == 0.0 {
        annual_contribution * f64::from(years)
    } else {
        annual_contribution * (((1.0 + rate).powi(years as i32) - 1.0) / rate)
    };

    let annual_income = corpus * WITHDRAWAL_RATE;
    let monthly_income = annual_income / 12.0;
    let tier = LifestyleTier::from_monthly_income(monthly_income);

    let time_progress =
        (f64::from(inputs.current_age) / f64::from(inputs.retirement_age) * 100.0).clamp(0.0, 100.0);

    Ok(RetirementProjection {
        years_to_retirement: years,
        corpus: corpus.round(),
        annual_income: annual_income.round(),
        monthly_income: monthly_income.round(),
        time_progress: (time_progress * 100.0).round() / 100.0,
        tier,
        lifestyle: tier.profile(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(current: u32, retire: u32, monthly: f64, ret: Option<f64>) -> RetirementInputs {
        RetirementInputs {
            current_age: current,
            retirement_age: retire,
            monthly_investment: monthly,
            expected_return_pct: ret,
        }
    }

    #[test]
    fn default_return_over_thirty_years() {
        let p = project_retirement(&inputs(30, 60, 10_000.0, None)).unwrap();
        assert_eq!(p.years_to_retirement, 30);
        assert_eq!(p.corpus, 13_593_985.0);
        assert_eq!(p.annual_income, 543_759.0);
        assert_eq!(p.monthly_income, 45_313.0);
        assert_eq!(p.tier, LifestyleTier::Comfortable);
        assert_eq!(p.time_progress, 50.0);
    }

    #[test]
    fn small_short_plan_is_modest() {
        let p = project_retirement(&inputs(50, 60, 5_000.0, Some(8.0))).unwrap();
        assert_eq!(p.monthly_income, 2_897.0);
        assert_eq!(p.tier, LifestyleTier::Modest);
    }

    #[test]
    fn large_plan_is_luxury() {
        let p = project_retirement(&inputs(25, 55, 100_000.0, Some(12.0))).unwrap();
        assert_eq!(p.monthly_income, 965_331.0);
        assert_eq!(p.tier, LifestyleTier::Luxury);
    }

    #[test]
    fn zero_return_sums_contributions() {
        let p = project_retirement(&inputs(40, 50, 1_000.0, Some(0.0))).unwrap();
        assert_eq!(p.corpus, 120_000.0);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(LifestyleTier::from_monthly_income(29_999.99), LifestyleTier::Modest);
        assert_eq!(LifestyleTier::from_monthly_income(30_000.0), LifestyleTier::Comfortable);
        assert_eq!(LifestyleTier::from_monthly_income(80_000.0), LifestyleTier::Luxury);
    }

    #[test]
    fn rejects_retirement_before_current_age() {
        assert!(project_retirement(&inputs(60, 60, 1_000.0, None)).is_err());
        assert!(project_retirement(&inputs(30, 60, -1.0, None)).is_err());
    }
}
