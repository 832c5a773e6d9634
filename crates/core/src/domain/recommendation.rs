use crate::domain::allocation::{AllocationTable, AssetClass};
use serde::{Deserialize, Serialize};

/// Share of total income per income category, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeCategories {
    pub fixed: f64,
    pub variable: f64,
    pub passive: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub asset_class: AssetClass,
    #[serde(rename = "allocation")]
    pub allocation_percent: f64,
    pub amount: f64,
    #[serde(rename = "specific")]
    pub specific_instruments: Vec<String>,
}

/// Output of either strategy provider. The JSON shape is shared with the
/// remote model's response, so field names must not drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    pub isi: f64,
    pub income_categories: IncomeCategories,
    pub risk_score: f64,
    pub asset_allocation: AllocationTable,
    pub specific_recommendations: Vec<Recommendation>,
    pub tax_suggestions: Vec<String>,
}
