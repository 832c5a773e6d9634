use crate::domain::allocation::AllocationTable;
use serde::{Deserialize, Serialize};

// Shares in AssetClass::ALL order:
// FD, G-Sec, Corp Bonds, Blue-chip, MF, Gold, ETFs, Real Estate, Crypto, Small-cap, Startups
const CONSERVATIVE: [u8; 11] = [30, 25, 15, 20, 10, 0, 0, 0, 0, 0, 0];
const MODERATE: [u8; 11] = [15, 10, 10, 25, 15, 5, 10, 10, 0, 0, 0];
const AGGRESSIVE: [u8; 11] = [5, 5, 5, 20, 10, 5, 15, 15, 10, 5, 5];

const CONSERVATIVE_MAX_SCORE: f64 = 3.0;
const MODERATE_MAX_SCORE: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskBand {
    /// Band boundaries are inclusive on the lower band: 3.0 is conservative,
    /// 7.0 is moderate.
    pub fn from_score(score: f64) -> Self {
        if score <= CONSERVATIVE_MAX_SCORE {
            Self::Conservative
        } else if score <= MODERATE_MAX_SCORE {
            Self::Moderate
        } else {
            Self::Aggressive
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }

    pub fn table(self) -> AllocationTable {
        let pcts = match self {
            Self::Conservative => CONSERVATIVE,
            Self::Moderate => MODERATE,
            Self::Aggressive => AGGRESSIVE,
        };
        AllocationTable::from_ordered(pcts)
    }
}

/// Maps a risk score to its band and that band's table.
pub fn select_allocation(risk_score: f64) -> (RiskBand, AllocationTable) {
    let band = RiskBand::from_score(risk_score);
    (band, band.table())
}
