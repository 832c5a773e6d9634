use crate::domain::profile::RiskTolerance;

/// Annual income above which high-income instruments are suggested.
pub const HIGH_INCOME_THRESHOLD: f64 = 1_000_000.0;

const ELSS: &str = "ELSS (Equity Linked Savings Scheme) - Tax saving mutual funds with 3-year lock-in";
const PPF: &str = "PPF (Public Provident Fund) - Long-term savings with tax benefits";
const NPS: &str = "NPS (National Pension System) - Additional tax benefits under 80CCD(1B)";
const TAX_FREE_BONDS: &str =
    "Tax-free bonds - Long-term infrastructure bonds with tax-free interest";
const LTCG_NOTE: &str = "LTCG from stocks/equity (Tax rate of 10% above ₹1 lakh)";
const SENIOR_FD_NOTE: &str =
    "FDs with senior citizen benefits (Higher interest rates & tax benefits for seniors)";

/// Ordered tax-advantaged suggestions for the given annual income.
pub fn tax_suggestions(income: f64, tolerance: RiskTolerance) -> Vec<String> {
    let mut out = vec![ELSS.to_string(), PPF.to_string()];

    if income > HIGH_INCOME_THRESHOLD {
        out.push(NPS.to_string());
        out.push(TAX_FREE_BONDS.to_string());
    }

    match tolerance {
        RiskTolerance::High => out.push(LTCG_NOTE.to_string()),
        RiskTolerance::Low | RiskTolerance::Medium => out.push(SENIOR_FD_NOTE.to_string()),
    }

    out
}
