use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    Salary,
    Business,
    Rental,
    CapitalGains,
    Dividends,
    Other,
}

impl IncomeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Business => "business",
            Self::Rental => "rental",
            Self::CapitalGains => "capital_gains",
            Self::Dividends => "dividends",
            Self::Other => "other",
        }
    }
}

/// Informational only; scoring never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeFrequency {
    Monthly,
    Quarterly,
    Annually,
    Irregular,
}

impl IncomeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annually => "annually",
            Self::Irregular => "irregular",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSource {
    #[serde(rename = "type")]
    pub kind: IncomeType,
    pub amount: f64,
    pub frequency: IncomeFrequency,
    /// Self-reported, 1 (volatile) to 10 (most stable).
    pub stability: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl RiskTolerance {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    ShortTerm,
    MidTerm,
    LongTerm,
}

impl GoalType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::MidTerm => "mid_term",
            Self::LongTerm => "long_term",
        }
    }
}

/// Carried in the profile for advisors and the remote provider. The local
/// pipeline does not weigh goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialGoal {
    #[serde(rename = "type")]
    pub kind: GoalType,
    pub target_amount: f64,
    /// Years.
    pub timeframe: u32,
    pub priority: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityPreference {
    Immediate,
    Flexible,
    Locked,
}

impl LiquidityPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Flexible => "flexible",
            Self::Locked => "locked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentExperience {
    Beginner,
    Intermediate,
    Expert,
}

impl InvestmentExperience {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTrend {
    /// -10..=10
    pub stock_performance: f64,
    /// 0..=10
    pub crypto_volatility: f64,
    /// Percent.
    pub bond_yields: f64,
    /// Percent.
    pub inflation_rate: f64,
}

impl Default for MarketTrend {
    fn default() -> Self {
        Self {
            stock_performance: 5.0,
            crypto_volatility: 5.0,
            bond_yields: 7.0,
            inflation_rate: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorProfile {
    pub income_sources: Vec<IncomeSource>,
    pub risk_tolerance: RiskTolerance,
    #[serde(default)]
    pub financial_goals: Vec<FinancialGoal>,
    pub liquidity_preference: LiquidityPreference,
    pub investment_experience: InvestmentExperience,
    #[serde(
        rename = "currentMarketTrends",
        alias = "marketTrend",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub market_trend: Option<MarketTrend>,
}

impl InvestorProfile {
    /// The profile's trend, or the default snapshot when none was supplied.
    pub fn resolved_market_trend(&self) -> MarketTrend {
        self.market_trend.unwrap_or_default()
    }

    pub fn total_income(&self) -> f64 {
        self.income_sources.iter().map(|s| s.amount).sum()
    }
}
