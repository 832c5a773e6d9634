use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

const DEFAULT_CURRENT_AGE: u32 = 30;
const DEFAULT_RETIREMENT_AGE: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalInputs {
    /// Pension corpus at retirement. When absent or zero it is estimated from
    /// `current_income` and the two ages.
    #[serde(default)]
    pub corpus: Option<f64>,
    /// Annual income, only used to estimate a missing corpus.
    #[serde(default)]
    pub current_income: Option<f64>,
    #[serde(default)]
    pub current_age: Option<u32>,
    #[serde(default)]
    pub retirement_age: Option<u32>,
    /// Expected years in retirement.
    #[serde(default = "default_withdrawal_years")]
    pub withdrawal_years: u32,
    /// Share of the corpus taken as a lump sum at retirement.
    #[serde(default = "default_lumpsum_pct")]
    pub lumpsum_pct: f64,
    /// Assumed marginal tax rate in retirement.
    #[serde(default = "default_tax_bracket_pct")]
    pub tax_bracket_pct: f64,
}

fn default_withdrawal_years() -> u32 {
    20
}

// NPS default lump-sum share.
fn default_lumpsum_pct() -> f64 {
    40.0
}

fn default_tax_bracket_pct() -> f64 {
    20.0
}

impl WithdrawalInputs {
    pub fn with_corpus(corpus: f64) -> Self {
        Self {
            corpus: Some(corpus),
            current_income: None,
            ..Self::from_income(0.0)
        }
    }

    pub fn from_income(current_income: f64) -> Self {
        Self {
            corpus: None,
            current_income: Some(current_income),
            current_age: None,
            retirement_age: None,
            withdrawal_years: default_withdrawal_years(),
            lumpsum_pct: default_lumpsum_pct(),
            tax_bracket_pct: default_tax_bracket_pct(),
        }
    }

    /// The supplied corpus, or an estimate when it is missing or zero.
    pub fn resolved_corpus(&self) -> anyhow::Result<(f64, bool)> {
        if let Some(corpus) = self.corpus.filter(|c| *c != 0.0) {
            return Ok((corpus, false));
        }
        let income = self
            .current_income
            .context("either corpus or currentIncome is required")?;
        ensure!(
            income.is_finite() && income >= 0.0,
            "current income must be non-negative (got {income})"
        );
        let corpus = estimated_corpus(
            income,
            self.current_age.unwrap_or(DEFAULT_CURRENT_AGE),
            self.retirement_age.unwrap_or(DEFAULT_RETIREMENT_AGE),
        );
        Ok((corpus, true))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxImpact {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tax_impact: TaxImpact,
    pub monthly_income: f64,
    pub lumpsum: f64,
    /// 0..=100
    pub long_term_sustainability: u8,
    pub estimated_annual_tax: f64,
}

/// Rough pension corpus for someone who has not supplied one.
pub fn estimated_corpus(annual_income: f64, current_age: u32, retirement_age: u32) -> f64 {
    let years = retirement_age.saturating_sub(current_age);
    (annual_income.max(0.0) * 8.0 * f64::from(years) * 0.2).round()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalPlan {
    pub corpus: f64,
    /// True when the corpus was estimated from income.
    pub corpus_estimated: bool,
    pub options: Vec<WithdrawalOption>,
}

/// Four withdrawal strategies trading monthly income against lump sum, tax
/// and longevity. A non-positive corpus yields no options.
pub fn withdrawal_options(inputs: &WithdrawalInputs) -> anyhow::Result<WithdrawalPlan> {
    ensure!(
        inputs.withdrawal_years > 0,
        "withdrawal years must be at least 1"
    );
    ensure!(
        (0.0..=100.0).contains(&inputs.lumpsum_pct),
        "lump sum percentage must be within 0..=100 (got {})",
        inputs.lumpsum_pct
    );
    ensure!(
        (0.0..=100.0).contains(&inputs.tax_bracket_pct),
        "tax bracket must be within 0..=100 (got {})",
        inputs.tax_bracket_pct
    );
    let (corpus, corpus_estimated) = inputs.resolved_corpus()?;
    if corpus.is_nan() || corpus <= 0.0 {
        return Ok(WithdrawalPlan {
            corpus: corpus.max(0.0),
            corpus_estimated,
            options: Vec::new(),
        });
    }

    let lumpsum = corpus * inputs.lumpsum_pct / 100.0;
    let annuity = corpus - lumpsum;
    let per_month = annuity / (f64::from(inputs.withdrawal_years) * 12.0);

    let standard = per_month.round();
    let aggressive = (per_month * 1.3).round();
    let conservative = (per_month * 0.8).round();
    let annual_tax = |monthly: f64| (monthly * 12.0 * inputs.tax_bracket_pct / 100.0).round();

    let options = [
        (
            "balanced",
            "Balanced Withdrawal",
            "A balanced approach with steady monthly income and moderate tax efficiency.",
            TaxImpact::Medium,
            standard,
            lumpsum.round(),
            70,
        ),
        (
            "tax-optimized",
            "Tax-Optimized Strategy",
            "Minimizes tax impact by strategically timing withdrawals across tax years.",
            TaxImpact::Low,
            (standard * 0.9).round(),
            (lumpsum * 1.1).round(),
            65,
        ),
        (
            "income-focused",
            "Income-Focused Plan",
            "Maximizes monthly income at the cost of higher taxes and lower lumpsum.",
            TaxImpact::High,
            aggressive,
            (lumpsum * 0.8).round(),
            50,
        ),
        (
            "longevity",
            "Longevity Protection",
            "Conservative withdrawals to ensure funds last through extended retirement.",
            TaxImpact::Low,
            conservative,
            (lumpsum * 0.9).round(),
            90,
        ),
    ];

    let options = options
        .into_iter()
        .map(
            |(id, name, description, tax_impact, monthly_income, lumpsum, sustainability)| {
                WithdrawalOption {
                    id,
                    name,
                    description,
                    tax_impact,
                    monthly_income,
                    lumpsum,
                    long_term_sustainability: sustainability,
                    estimated_annual_tax: annual_tax(monthly_income),
                }
            },
        )
        .collect();

    Ok(WithdrawalPlan {
        corpus,
        corpus_estimated,
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_four_options_from_defaults() {
        let plan = withdrawal_options(&WithdrawalInputs::with_corpus(12_000_000.0)).unwrap();
        assert!(!plan.corpus_estimated);
        let options = plan.options;
        let ids: Vec<_> = options.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["balanced", "tax-optimized", "income-focused", "longevity"]);

        assert_eq!(options[0].monthly_income, 30_000.0);
        assert_eq!(options[0].lumpsum, 4_800_000.0);
        assert_eq!(options[0].estimated_annual_tax, 72_000.0);

        assert_eq!(options[1].monthly_income, 27_000.0);
        assert_eq!(options[1].lumpsum, 5_280_000.0);

        assert_eq!(options[2].monthly_income, 39_000.0);
        assert_eq!(options[2].lumpsum, 3_840_000.0);
        assert_eq!(options[2].tax_impact, TaxImpact::High);

        assert_eq!(options[3].monthly_income, 24_000.0);
        assert_eq!(options[3].long_term_sustainability, 90);
    }

    #[test]
    fn missing_corpus_is_estimated_from_income() {
        // 250,000 * 8 * 30 * 0.2
        let plan = withdrawal_options(&WithdrawalInputs::from_income(250_000.0)).unwrap();
        assert!(plan.corpus_estimated);
        assert_eq!(plan.corpus, 12_000_000.0);
        assert_eq!(plan.options[0].monthly_income, 30_000.0);

        let mut inputs = WithdrawalInputs::from_income(250_000.0);
        inputs.current_age = Some(40);
        inputs.retirement_age = Some(50);
        assert_eq!(withdrawal_options(&inputs).unwrap().corpus, 4_000_000.0);
    }

    #[test]
    fn zero_corpus_falls_back_to_estimate() {
        let mut inputs = WithdrawalInputs::from_income(250_000.0);
        inputs.corpus = Some(0.0);
        let plan = withdrawal_options(&inputs).unwrap();
        assert!(plan.corpus_estimated);
        assert_eq!(plan.corpus, 12_000_000.0);
    }

    #[test]
    fn empty_corpus_has_no_options() {
        let plan = withdrawal_options(&WithdrawalInputs::from_income(0.0)).unwrap();
        assert_eq!(plan.corpus, 0.0);
        assert!(plan.options.is_empty());

        let plan = withdrawal_options(&WithdrawalInputs::with_corpus(-5.0)).unwrap();
        assert!(plan.options.is_empty());
    }

    #[test]
    fn corpus_or_income_is_required() {
        let inputs: WithdrawalInputs = serde_json::from_str("{}").unwrap();
        let err = withdrawal_options(&inputs).unwrap_err();
        assert!(err.to_string().contains("currentIncome"));
    }

    #[test]
    fn rejects_invalid_parameters() {
        let mut inputs = WithdrawalInputs::with_corpus(1_000_000.0);
        inputs.withdrawal_years = 0;
        assert!(withdrawal_options(&inputs).is_err());

        let mut inputs = WithdrawalInputs::with_corpus(1_000_000.0);
        inputs.lumpsum_pct = 120.0;
        assert!(withdrawal_options(&inputs).is_err());
    }

    #[test]
    fn estimates_corpus_from_income() {
        assert_eq!(estimated_corpus(1_000_000.0, 30, 60), 48_000_000.0);
        assert_eq!(estimated_corpus(1_000_000.0, 65, 60), 0.0);
    }

    #[test]
    fn deserializes_with_defaults() {
        let inputs: WithdrawalInputs = serde_json::from_str(r#"{"corpus": 500000}"#).unwrap();
        assert_eq!(inputs, WithdrawalInputs::with_corpus(500_000.0));
    }
}
