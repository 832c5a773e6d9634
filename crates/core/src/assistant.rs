//! Offline answers for common tax and planning questions.
//!
//! Queries are matched by keyword, case-insensitively, and the first topic
//! whose keyword appears in the query wins.

use crate::planning::tax_regime::{DeductionLimit, TaxRegime};
use serde::Serialize;
use std::fmt::Write as _;

static TOPICS: [(&str, Topic); 7] = [
    ("old tax regime", Topic::Regime(TaxRegime::Old)),
    ("new tax regime", Topic::Regime(TaxRegime::New)),
    (
        "80c",
        Topic::Text(
            "Section 80C allows deductions up to ₹1.5 lakh per year for investments in PPF, \
             ELSS, LIC premiums, etc.",
        ),
    ),
    (
        "hra",
        Topic::Text(
            "House Rent Allowance (HRA) exemption is available for rent paid. The minimum of: \
             1) Actual HRA received, 2) Rent paid minus 10% of salary, 3) 50% of salary (metro) \
             or 40% of salary (non-metro).",
        ),
    ),
    (
        "itr filing",
        Topic::Text(
            "ITR filing requires documents like Form 16, bank statements, investment proofs, \
             and rent receipts. The filing deadline is typically July 31st.",
        ),
    ),
    (
        "retirement",
        Topic::Text(
            "Retirement planning options include EPF, PPF, NPS, and various pension schemes. \
             NPS offers additional tax benefits under section 80CCD(1B).",
        ),
    ),
    (
        "investment",
        Topic::Text(
            "Investment options include equity (stocks, mutual funds), debt (bonds, FDs), \
             hybrid funds, gold, and real estate. Risk, return, and time horizon should be \
             considered.",
        ),
    ),
];

#[derive(Debug, Clone, Copy)]
enum Topic {
    Regime(TaxRegime),
    Text(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    /// Keyword that matched.
    pub topic: &'static str,
    pub text: String,
}

pub fn lookup(query: &str) -> Option<Answer> {
    let query = query.to_lowercase();
    TOPICS
        .iter()
        .find(|(keyword, _)| query.contains(keyword))
        .map(|(keyword, topic)| Answer {
            topic: *keyword,
            text: match topic {
                Topic::Regime(regime) => regime_summary(*regime),
                Topic::Text(text) => (*text).to_string(),
            },
        })
}

/// Human-readable slab table and deductions for one regime.
pub fn regime_summary(regime: TaxRegime) -> String {
    let (name, description) = match regime {
        TaxRegime::Old => (
            "Old Tax Regime",
            "Higher tax rates with various deductions and exemptions.",
        ),
        TaxRegime::New => (
            "New Tax Regime",
            "Lower tax rates without most deductions and exemptions.",
        ),
    };

    let mut out = format!("{name}: {description}\n\nTax Slabs:\n");
    let mut lower = 0.0;
    for slab in regime.slabs() {
        let _ = match slab.upper {
            Some(upper) => writeln!(
                out,
                "₹{:.1}L to ₹{:.1}L: {}%",
                lower / 100_000.0,
                upper / 100_000.0,
                slab.rate_pct
            ),
            None => writeln!(out, "Above ₹{:.1}L: {}%", lower / 100_000.0, slab.rate_pct),
        };
        if let Some(upper) = slab.upper {
            lower = upper;
        }
    }

    let deductions: Vec<String> = regime
        .deduction_limits()
        .iter()
        .map(describe_deduction)
        .collect();
    let _ = write!(out, "\nAvailable Deductions:\n{}", deductions.join(", "));
    out
}

fn describe_deduction(limit: &DeductionLimit) -> String {
    match limit.section {
        "Standard" => format!("Standard Deduction (₹{})", limit.max_amount),
        section => format!("Section {section} (up to ₹{})", limit.max_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_questions_get_slab_tables() {
        let answer = lookup("How does the OLD TAX REGIME work?").unwrap();
        assert_eq!(answer.topic, "old tax regime");
        assert!(answer.text.starts_with("Old Tax Regime: "));
        assert!(answer.text.contains("₹0.0L to ₹2.5L: 0%"));
        assert!(answer.text.contains("₹5.0L to ₹10.0L: 20%"));
        assert!(answer.text.contains("Above ₹10.0L: 30%"));
        assert!(answer.text.contains("Section 80C (up to ₹150000)"));
    }

    #[test]
    fn new_regime_lists_only_standard_deduction() {
        let text = regime_summary(TaxRegime::New);
        assert!(text.contains("₹12.0L to ₹15.0L: 20%"));
        assert!(text.contains("Above ₹15.0L: 30%"));
        assert!(text.ends_with("Available Deductions:\nStandard Deduction (₹50000)"));
    }

    #[test]
    fn first_matching_keyword_wins() {
        // "80c" is listed before "retirement" and "investment"
        let answer = lookup("Which 80C investment is best for retirement?").unwrap();
        assert_eq!(answer.topic, "80c");

        let answer = lookup("retirement investment ideas").unwrap();
        assert_eq!(answer.topic, "retirement");

        let answer = lookup("new tax regime vs old tax regime").unwrap();
        assert_eq!(answer.topic, "old tax regime");
    }

    #[test]
    fn multi_word_keywords_need_the_full_phrase() {
        assert_eq!(lookup("help with ITR filing").unwrap().topic, "itr filing");
        assert!(lookup("what is an itr").is_none());
    }

    #[test]
    fn unrelated_questions_have_no_answer() {
        assert_eq!(lookup("what's the weather in Pune?"), None);
        assert_eq!(lookup(""), None);
    }
}
