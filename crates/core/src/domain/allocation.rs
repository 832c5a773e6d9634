use anyhow::ensure;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Percentages in one table must sum to 100 within this tolerance.
pub const ALLOCATION_SUM_TOLERANCE: f64 = 0.01;

/// The eleven asset classes. Declaration order is display order and drives
/// the iteration order of [`AllocationTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    #[serde(rename = "Fixed Deposits")]
    FixedDeposits,
    #[serde(rename = "Government Bonds")]
    GovernmentBonds,
    #[serde(rename = "Corporate Bonds")]
    CorporateBonds,
    #[serde(rename = "Blue-chip Stocks")]
    BlueChipStocks,
    #[serde(rename = "Mutual Funds")]
    MutualFunds,
    #[serde(rename = "Gold")]
    Gold,
    #[serde(rename = "ETFs")]
    Etfs,
    #[serde(rename = "Real Estate")]
    RealEstate,
    #[serde(rename = "Crypto")]
    Crypto,
    #[serde(rename = "Small-cap Stocks")]
    SmallCapStocks,
    #[serde(rename = "Startups")]
    Startups,
}

impl AssetClass {
    pub const ALL: [AssetClass; 11] = [
        Self::FixedDeposits,
        Self::GovernmentBonds,
        Self::CorporateBonds,
        Self::BlueChipStocks,
        Self::MutualFunds,
        Self::Gold,
        Self::Etfs,
        Self::RealEstate,
        Self::Crypto,
        Self::SmallCapStocks,
        Self::Startups,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::FixedDeposits => "Fixed Deposits",
            Self::GovernmentBonds => "Government Bonds",
            Self::CorporateBonds => "Corporate Bonds",
            Self::BlueChipStocks => "Blue-chip Stocks",
            Self::MutualFunds => "Mutual Funds",
            Self::Gold => "Gold",
            Self::Etfs => "ETFs",
            Self::RealEstate => "Real Estate",
            Self::Crypto => "Crypto",
            Self::SmallCapStocks => "Small-cap Stocks",
            Self::Startups => "Startups",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Percentage allocation over every [`AssetClass`]. Always holds all eleven
/// classes (absent ones are zero) and always sums to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<AssetClass, f64>",
    into = "BTreeMap<AssetClass, f64>"
)]
pub struct AllocationTable {
    percentages: BTreeMap<AssetClass, f64>,
}

impl AllocationTable {
    pub fn new(percentages: BTreeMap<AssetClass, f64>) -> anyhow::Result<Self> {
        let mut full = BTreeMap::new();
        for class in AssetClass::ALL {
            let pct = percentages.get(&class).copied().unwrap_or(0.0);
            ensure!(
                pct.is_finite() && (0.0..=100.0).contains(&pct),
                "allocation for {class} must be within 0..=100 (got {pct})"
            );
            full.insert(class, pct);
        }

        let total: f64 = full.values().sum();
        ensure!(
            (total - 100.0).abs() <= ALLOCATION_SUM_TOLERANCE,
            "allocation percentages must sum to 100 (got {total})"
        );

        Ok(Self { percentages: full })
    }

    /// Builds a table from whole percentages listed in [`AssetClass::ALL`]
    /// order. Only for the built-in tables; the sum is not rechecked.
    pub(crate) fn from_ordered(pcts: [u8; 11]) -> Self {
        let percentages = AssetClass::ALL
            .iter()
            .zip(pcts)
            .map(|(class, pct)| (*class, f64::from(pct)))
            .collect();
        Self { percentages }
    }

    pub fn get(&self, class: AssetClass) -> f64 {
        self.percentages.get(&class).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        self.percentages.iter().map(|(class, pct)| (*class, *pct))
    }

    /// Classes with a non-zero share, in display order.
    pub fn non_zero(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        self.iter().filter(|(_, pct)| *pct > 0.0)
    }

    pub fn total(&self) -> f64 {
        self.percentages.values().sum()
    }
}

impl TryFrom<BTreeMap<AssetClass, f64>> for AllocationTable {
    type Error = anyhow::Error;

    fn try_from(value: BTreeMap<AssetClass, f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AllocationTable> for BTreeMap<AssetClass, f64> {
    fn from(value: AllocationTable) -> Self {
        value.percentages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fills_missing_classes_with_zero() {
        let table = AllocationTable::new(BTreeMap::from([
            (AssetClass::Gold, 40.0),
            (AssetClass::Etfs, 60.0),
        ]))
        .unwrap();
        assert_eq!(table.iter().count(), 11);
        assert_eq!(table.get(AssetClass::Crypto), 0.0);
        assert_eq!(table.non_zero().count(), 2);
    }

    #[test]
    fn rejects_tables_not_summing_to_100() {
        let err = AllocationTable::new(BTreeMap::from([(AssetClass::Gold, 99.0)])).unwrap_err();
        assert!(err.to_string().contains("sum to 100"));
    }

    #[test]
    fn rejects_out_of_range_share() {
        let res = AllocationTable::new(BTreeMap::from([
            (AssetClass::Gold, 120.0),
            (AssetClass::Etfs, -20.0),
        ]));
        assert!(res.is_err());
    }

    #[test]
    fn serializes_by_display_name_in_display_order() {
        let table = AllocationTable::from_ordered([30, 25, 15, 20, 10, 0, 0, 0, 0, 0, 0]);
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["Fixed Deposits"], json!(30.0));
        assert_eq!(value["Small-cap Stocks"], json!(0.0));

        let text = serde_json::to_string(&table).unwrap();
        let fd = text.find("Fixed Deposits").unwrap();
        let startups = text.find("Startups").unwrap();
        assert!(fd < startups);
    }

    #[test]
    fn deserialization_enforces_invariant() {
        let ok = json!({"Gold": 50, "Crypto": 50});
        let table: AllocationTable = serde_json::from_value(ok).unwrap();
        assert_eq!(table.get(AssetClass::Crypto), 50.0);

        let bad = json!({"Gold": 50});
        assert!(serde_json::from_value::<AllocationTable>(bad).is_err());

        let unknown = json!({"Gold": 50, "Tulips": 50});
        assert!(serde_json::from_value::<AllocationTable>(unknown).is_err());
    }
}
