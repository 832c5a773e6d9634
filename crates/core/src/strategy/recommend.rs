use crate::domain::allocation::{AllocationTable, AssetClass};
use crate::domain::profile::MarketTrend;
use crate::domain::recommendation::Recommendation;
use crate::strategy::round2;

/// Blue-chip picks switch to large caps above this stock performance.
const STRONG_STOCK_PERFORMANCE: f64 = 5.0;
/// Crypto picks stay with majors below this volatility.
const CALM_CRYPTO_VOLATILITY: f64 = 5.0;

/// Concrete instrument suggestions for one asset class under the given trend.
pub fn instruments_for(class: AssetClass, trend: &MarketTrend) -> &'static [&'static str] {
    match class {
        AssetClass::FixedDeposits => &[
            "SBI Fixed Deposit (5.5% p.a.)",
            "HDFC Bank Fixed Deposit (5.75% p.a.)",
        ],
        AssetClass::GovernmentBonds => &["10-year G-Sec Bonds", "5-year Treasury Bonds"],
        AssetClass::CorporateBonds => &["HDFC Corporate Bond Fund", "SBI Corporate Bond Fund"],
        AssetClass::BlueChipStocks => {
            if trend.stock_performance > STRONG_STOCK_PERFORMANCE {
                &["HDFC Bank", "Reliance Industries", "TCS", "Infosys"]
            } else {
                &["ITC", "HUL", "Nestle India", "Asian Paints"]
            }
        }
        AssetClass::MutualFunds => &[
            "SBI Blue Chip Fund",
            "Axis Long Term Equity Fund",
            "HDFC Mid-Cap Opportunities Fund",
        ],
        AssetClass::Gold => &["Sovereign Gold Bond", "Gold ETFs"],
        AssetClass::Etfs => &["Nifty 50 ETF", "Nifty Next 50 ETF"],
        AssetClass::RealEstate => &["Embassy REIT", "Mindspace REIT"],
        AssetClass::Crypto => {
            if trend.crypto_volatility < CALM_CRYPTO_VOLATILITY {
                &["Bitcoin (BTC)", "Ethereum (ETH)"]
            } else {
                &["Stablecoins (USDT, USDC)"]
            }
        }
        AssetClass::SmallCapStocks => &[
            "Selected Small-cap Mutual Funds",
            "Direct Small-cap Stocks",
        ],
        AssetClass::Startups => &["Angel Investing Platforms", "Startup Equity Crowdfunding"],
    }
}

/// Expands an allocation table into amount-denominated recommendations.
/// Zero-share classes are omitted rather than returned with a zero amount.
pub fn expand_recommendations(
    table: &AllocationTable,
    trend: &MarketTrend,
    investment_amount: f64,
) -> Vec<Recommendation> {
    table
        .non_zero()
        .map(|(class, pct)| Recommendation {
            asset_class: class,
            allocation_percent: pct,
            amount: round2(pct / 100.0 * investment_amount),
            specific_instruments: instruments_for(class, trend)
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })
        .collect()
}
