use crate::domain::profile::{IncomeSource, IncomeType};
use crate::domain::recommendation::IncomeCategories;
use crate::strategy::round2;

/// Sources at or above this self-reported stability count as fixed income.
const FIXED_STABILITY_THRESHOLD: u8 = 8;

/// Income stability index on a 0..=10 scale, 10 being most stable.
///
/// Derived from the mean absolute deviation of source amounts relative to the
/// mean amount. An empty list or a zero total yields 0.
pub fn income_stability_index(sources: &[IncomeSource]) -> f64 {
    if sources.is_empty() {
        return 0.0;
    }

    let count = sources.len() as f64;
    let total: f64 = sources.iter().map(|s| s.amount).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let mean = total / count;

    let mean_abs_dev = sources
        .iter()
        .map(|s| (s.amount - mean).abs())
        .sum::<f64>()
        / count;

    round2((10.0 - (mean_abs_dev / mean) * 10.0).max(0.0))
}

pub fn categorize_income(sources: &[IncomeSource]) -> IncomeCategories {
    let total: f64 = sources.iter().map(|s| s.amount).sum();
    if total <= 0.0 {
        return IncomeCategories::default();
    }

    let mut fixed = 0.0;
    let mut variable = 0.0;
    let mut passive = 0.0;
    for source in sources {
        if source.kind == IncomeType::Salary || source.stability >= FIXED_STABILITY_THRESHOLD {
            fixed += source.amount;
        } else if matches!(source.kind, IncomeType::Rental | IncomeType::Dividends) {
            passive += source.amount;
        } else {
            variable += source.amount;
        }
    }

    IncomeCategories {
        fixed: round2(fixed / total * 100.0),
        variable: round2(variable / total * 100.0),
        passive: round2(passive / total * 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::IncomeFrequency;

    fn source(kind: IncomeType, amount: f64, stability: u8) -> IncomeSource {
        IncomeSource {
            kind,
            amount,
            frequency: IncomeFrequency::Monthly,
            stability,
        }
    }

    #[test]
    fn single_source_is_perfectly_stable() {
        let sources = [source(IncomeType::Salary, 1_200_000.0, 9)];
        assert_eq!(income_stability_index(&sources), 10.0);
    }

    #[test]
    fn empty_and_zero_income_yield_zero() {
        assert_eq!(income_stability_index(&[]), 0.0);
        let zeros = [
            source(IncomeType::Salary, 0.0, 5),
            source(IncomeType::Business, 0.0, 5),
        ];
        assert_eq!(income_stability_index(&zeros), 0.0);
        assert_eq!(categorize_income(&zeros), IncomeCategories::default());
        assert_eq!(categorize_income(&[]), IncomeCategories::default());
    }

    #[test]
    fn dispersion_lowers_index() {
        // mean 200, mean abs deviation 66.67 => 10 - 3.33
        let sources = [
            source(IncomeType::Salary, 100.0, 5),
            source(IncomeType::Business, 200.0, 5),
            source(IncomeType::Rental, 300.0, 5),
        ];
        assert_eq!(income_stability_index(&sources), 6.67);
    }

    #[test]
    fn index_is_clamped_at_zero() {
        let sources = [
            source(IncomeType::Business, 0.0, 5),
            source(IncomeType::Business, 0.0, 5),
            source(IncomeType::Business, 0.0, 5),
            source(IncomeType::Business, 1_000.0, 5),
        ];
        // mean 250, mean abs deviation 375 => negative before clamping
        assert_eq!(income_stability_index(&sources), 0.0);
    }

    #[test]
    fn stability_never_lowers_index() {
        let base = [
            source(IncomeType::Business, 500.0, 2),
            source(IncomeType::Rental, 300.0, 3),
        ];
        let raised = [
            source(IncomeType::Business, 500.0, 10),
            source(IncomeType::Rental, 300.0, 9),
        ];
        assert!(income_stability_index(&raised) >= income_stability_index(&base));
    }

    #[test]
    fn categorizes_by_type_and_stability() {
        let sources = [
            source(IncomeType::Salary, 60_000.0, 3),
            source(IncomeType::Rental, 30_000.0, 4),
            source(IncomeType::Business, 10_000.0, 9),
        ];
        let cats = categorize_income(&sources);
        assert_eq!(cats.fixed, 70.0);
        assert_eq!(cats.passive, 30.0);
        assert_eq!(cats.variable, 0.0);
    }

    #[test]
    fn stable_rental_counts_as_fixed() {
        let sources = [
            source(IncomeType::Dividends, 25.0, 8),
            source(IncomeType::CapitalGains, 75.0, 2),
        ];
        let cats = categorize_income(&sources);
        assert_eq!(cats.fixed, 25.0);
        assert_eq!(cats.variable, 75.0);
        assert_eq!(cats.passive, 0.0);
    }
}
