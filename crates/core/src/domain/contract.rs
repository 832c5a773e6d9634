use crate::domain::allocation::{AllocationTable, AssetClass};
use crate::domain::recommendation::{IncomeCategories, Recommendation, StrategyResult};
use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Strategy document as produced by the remote model. Decoded leniently and
/// only trusted after [`RemoteStrategy::validate_and_into_strategy`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteStrategy {
    pub isi: f64,
    pub income_categories: IncomeCategories,
    pub risk_score: f64,
    pub asset_allocation: AllocationTable,
    #[serde(default)]
    pub specific_recommendations: Vec<RemoteRecommendation>,
    #[serde(default)]
    pub tax_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRecommendation {
    pub asset_class: AssetClass,
    pub allocation: f64,
    pub amount: f64,
    #[serde(default)]
    pub specific: Vec<String>,
}

impl RemoteStrategy {
    pub fn validate_and_into_strategy(self) -> anyhow::Result<StrategyResult> {
        ensure!(
            (0.0..=10.0).contains(&self.isi),
            "isi must be between 0 and 10 (got {})",
            self.isi
        );
        ensure!(
            (0.0..=10.0).contains(&self.risk_score),
            "riskScore must be between 0 and 10 (got {})",
            self.risk_score
        );

        let cats = self.income_categories;
        for (label, pct) in [
            ("fixed", cats.fixed),
            ("variable", cats.variable),
            ("passive", cats.passive),
        ] {
            ensure!(
                (0.0..=100.0).contains(&pct),
                "incomeCategories.{label} must be between 0 and 100 (got {pct})"
            );
        }

        let mut seen = BTreeSet::<AssetClass>::new();
        let mut recommendations = Vec::with_capacity(self.specific_recommendations.len());
        for rec in self.specific_recommendations {
            recommendations.push(rec.validate_and_into_recommendation(
                &self.asset_allocation,
                &mut seen,
            )?);
        }

        let tax_suggestions: Vec<String> = self
            .tax_suggestions
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if tax_suggestions.is_empty() {
            bail!("taxSuggestions must contain at least one entry");
        }

        Ok(StrategyResult {
            isi: self.isi,
            income_categories: cats,
            risk_score: self.risk_score,
            asset_allocation: self.asset_allocation,
            specific_recommendations: recommendations,
            tax_suggestions,
        })
    }
}

impl RemoteRecommendation {
    fn validate_and_into_recommendation(
        self,
        table: &AllocationTable,
        seen: &mut BTreeSet<AssetClass>,
    ) -> anyhow::Result<Recommendation> {
        ensure!(
            table.get(self.asset_class) > 0.0,
            "recommendation for {} has no allocation in assetAllocation",
            self.asset_class
        );
        ensure!(
            seen.insert(self.asset_class),
            "duplicate recommendation for {}",
            self.asset_class
        );
        ensure!(
            self.amount.is_finite() && self.amount >= 0.0,
            "amount for {} must be non-negative (got {})",
            self.asset_class,
            self.amount
        );

        let specific: Vec<String> = self
            .specific
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        ensure!(
            !specific.is_empty(),
            "recommendation for {} must list at least one instrument",
            self.asset_class
        );

        Ok(Recommendation {
            asset_class: self.asset_class,
            allocation_percent: self.allocation,
            amount: self.amount,
            specific_instruments: specific,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn remote_json() -> serde_json::Value {
        json!({
            "isi": 8.5,
            "incomeCategories": {"fixed": 80, "variable": 20, "passive": 0},
            "riskScore": 4.2,
            "assetAllocation": {
                "Fixed Deposits": 15, "Government Bonds": 10, "Corporate Bonds": 10,
                "Blue-chip Stocks": 25, "Mutual Funds": 15, "Gold": 5, "ETFs": 10,
                "Real Estate": 10, "Crypto": 0, "Small-cap Stocks": 0, "Startups": 0
            },
            "specificRecommendations": [
                {"assetClass": "Blue-chip Stocks", "allocation": 25, "amount": 75000,
                 "specific": [" HDFC Bank ", "", "TCS"]}
            ],
            "taxSuggestions": ["ELSS", "  "]
        })
    }

    #[test]
    fn accepts_valid_remote_strategy() {
        let remote: RemoteStrategy = serde_json::from_value(remote_json()).unwrap();
        let strategy = remote.validate_and_into_strategy().unwrap();
        assert_eq!(strategy.risk_score, 4.2);
        assert_eq!(strategy.specific_recommendations.len(), 1);
        assert_eq!(
            strategy.specific_recommendations[0].specific_instruments,
            vec!["HDFC Bank".to_string(), "TCS".to_string()]
        );
        assert_eq!(strategy.tax_suggestions, vec!["ELSS".to_string()]);
    }

    #[test]
    fn rejects_out_of_range_risk_score() {
        let mut raw = remote_json();
        raw["riskScore"] = json!(11.0);
        let remote: RemoteStrategy = serde_json::from_value(raw).unwrap();
        assert!(remote.validate_and_into_strategy().is_err());
    }

    #[test]
    fn rejects_recommendation_for_unallocated_class() {
        let mut raw = remote_json();
        raw["specificRecommendations"] = json!([
            {"assetClass": "Crypto", "allocation": 5, "amount": 100, "specific": ["BTC"]}
        ]);
        let remote: RemoteStrategy = serde_json::from_value(raw).unwrap();
        let err = remote.validate_and_into_strategy().unwrap_err();
        assert!(err.to_string().contains("Crypto"));
    }

    #[test]
    fn rejects_missing_tax_suggestions() {
        let mut raw = remote_json();
        raw["taxSuggestions"] = json!([]);
        let remote: RemoteStrategy = serde_json::from_value(raw).unwrap();
        assert!(remote.validate_and_into_strategy().is_err());
    }

    #[test]
    fn allocation_not_summing_to_100_fails_to_decode() {
        let mut raw = remote_json();
        raw["assetAllocation"]["Gold"] = json!(50);
        assert!(serde_json::from_value::<RemoteStrategy>(raw).is_err());
    }
}
