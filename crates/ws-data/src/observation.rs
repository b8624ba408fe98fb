//! The per-country-per-year record and its categorical domain types

use serde::{Deserialize, Serialize};

/// World Bank income classification, ordered from lowest to highest tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IncomeTier {
    Low,
    LowerMiddle,
    UpperMiddle,
    High,
}

impl IncomeTier {
    pub const ALL: [IncomeTier; 4] = [
        IncomeTier::Low,
        IncomeTier::LowerMiddle,
        IncomeTier::UpperMiddle,
        IncomeTier::High,
    ];

    /// Parse the World Bank label, e.g. "Upper middle income"
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "Low income" => Some(IncomeTier::Low),
            "Lower middle income" => Some(IncomeTier::LowerMiddle),
            "Upper middle income" => Some(IncomeTier::UpperMiddle),
            "High income" => Some(IncomeTier::High),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IncomeTier::Low => "Low income",
            IncomeTier::LowerMiddle => "Lower middle income",
            IncomeTier::UpperMiddle => "Upper middle income",
            IncomeTier::High => "High income",
        }
    }
}

/// One country-year observation
///
/// Numeric indicators are independently nullable; `None` means the source
/// reported no value, which is distinct from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub country: String,
    /// ISO3 country code, stable across years for a given country
    pub code: Option<String>,
    pub year: u16,
    pub region: String,
    pub income: IncomeTier,

    pub income_per_capita: Option<f64>,
    /// HIV incidence per 1,000 uninfected population
    pub hiv_rate: Option<f64>,
    /// Adult literacy rate, percent
    pub literacy: Option<f64>,
    /// Secondary school enrollment, percent gross
    pub enrollment_secondary: Option<f64>,
    /// Condom use average, percent
    pub condom_use: Option<f64>,
    pub population: Option<f64>,
    pub life_exp: Option<f64>,
}

impl Observation {
    /// Stable mark key: country code when present, otherwise the name
    pub fn key(&self) -> &str {
        self.code.as_deref().unwrap_or(&self.country)
    }

    /// A record must carry at least one of the two anchor indicators
    /// (income per capita, life expectancy) to be usable in any scene.
    pub fn is_viable(&self) -> bool {
        self.income_per_capita.is_some() || self.life_exp.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parse_roundtrip() {
        for tier in IncomeTier::ALL {
            assert_eq!(IncomeTier::parse(tier.label()), Some(tier));
        }
        assert_eq!(IncomeTier::parse("Middle earth income"), None);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(IncomeTier::Low < IncomeTier::LowerMiddle);
        assert!(IncomeTier::UpperMiddle < IncomeTier::High);
    }
}
