use anyhow::ensure;
use serde::{Deserialize, Serialize};

/// One progressive slab: income up to `upper` (exclusive of the previous
/// slab's upper bound) is taxed at `rate_pct`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSlab {
    /// `None` for the open-ended top slab.
    pub upper: Option<f64>,
    pub rate_pct: f64,
}

static OLD_SLABS: [TaxSlab; 4] = [
    TaxSlab { upper: Some(250_000.0), rate_pct: 0.0 },
    TaxSlab { upper: Some(500_000.0), rate_pct: 5.0 },
    TaxSlab { upper: Some(1_000_000.0), rate_pct: 20.0 },
    TaxSlab { upper: None, rate_pct: 30.0 },
];

static NEW_SLABS: [TaxSlab; 6] = [
    TaxSlab { upper: Some(300_000.0), rate_pct: 0.0 },
    TaxSlab { upper: Some(600_000.0), rate_pct: 5.0 },
    TaxSlab { upper: Some(900_000.0), rate_pct: 10.0 },
    TaxSlab { upper: Some(1_200_000.0), rate_pct: 15.0 },
    TaxSlab { upper: Some(1_500_000.0), rate_pct: 20.0 },
    TaxSlab { upper: None, rate_pct: 30.0 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    Old,
    New,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionLimit {
    pub section: &'static str,
    pub max_amount: f64,
}

impl TaxRegime {
    pub fn slabs(self) -> &'static [TaxSlab] {
        match self {
            Self::Old => &OLD_SLABS,
            Self::New => &NEW_SLABS,
        }
    }

    pub fn deduction_limits(self) -> Vec<DeductionLimit> {
        let standard = DeductionLimit {
            section: "Standard",
            max_amount: 50_000.0,
        };
        match self {
            Self::Old => vec![
                DeductionLimit {
                    section: "80C",
                    max_amount: 150_000.0,
                },
                DeductionLimit {
                    section: "80D",
                    max_amount: 25_000.0,
                },
                standard,
            ],
            Self::New => vec![standard],
        }
    }
}

/// Progressive slab tax, rounded to whole rupees.
pub fn calculate_tax(regime: TaxRegime, income: f64) -> f64 {
    let mut tax = 0.0;
    let mut remaining = income.max(0.0);
    let mut prev_upper = 0.0;

    for slab in regime.slabs() {
        if remaining <= 0.0 {
            break;
        }
        let width = slab.upper.map_or(f64::INFINITY, |u| u - prev_upper);
        let taxable = remaining.min(width);
        tax += taxable * slab.rate_pct / 100.0;
        remaining -= taxable;
        if let Some(u) = slab.upper {
            prev_upper = u;
        }
    }

    tax.round()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeComparison {
    pub old_tax: f64,
    pub new_tax: f64,
    pub recommended: TaxRegime,
    /// Tax saved by choosing the recommended regime.
    pub savings: f64,
    /// Deductions that can be claimed under the recommended regime.
    pub deduction_limits: Vec<DeductionLimit>,
}

/// Compares both regimes. Deductions only apply to the old regime; ties go
/// to the old regime.
pub fn compare_regimes(income: f64, deductions: f64) -> anyhow::Result<RegimeComparison> {
    ensure!(
        income.is_finite() && income >= 0.0,
        "income must be a non-negative number (got {income})"
    );
    ensure!(
        deductions.is_finite() && deductions >= 0.0,
        "deductions must be a non-negative number (got {deductions})"
    );

    let old_tax = calculate_tax(TaxRegime::Old, (income - deductions).max(0.0));
    let new_tax = calculate_tax(TaxRegime::New, income);
    let recommended = if old_tax <= new_tax {
        TaxRegime::Old
    } else {
        TaxRegime::New
    };

    Ok(RegimeComparison {
        old_tax,
        new_tax,
        recommended,
        savings: (old_tax - new_tax).abs(),
        deduction_limits: recommended.deduction_limits(),
    })
}
