//! Probability → display tier mapping.
//!
//! Thresholds are closed on the lower bound: 0.35 is High, 0.20 is Moderate.

use serde::Serialize;

/// Lower bound (inclusive) of the High tier.
pub const HIGH_RISK_THRESHOLD: f64 = 0.35;

/// Lower bound (inclusive) of the Moderate tier.
pub const MODERATE_RISK_THRESHOLD: f64 = 0.20;

/// Display tier for a readmission probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if probability >= MODERATE_RISK_THRESHOLD {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }

    /// Banner text shown under the probability.
    pub fn banner(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low risk of 30-day readmission",
            RiskTier::Moderate => "Moderate risk of 30-day readmission",
            RiskTier::High => "High risk of 30-day readmission",
        }
    }

    /// CSS class carrying the banner color (red / amber / green).
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskTier::Low => "risk-low",
            RiskTier::Moderate => "risk-moderate",
            RiskTier::High => "risk-high",
        }
    }
}

/// Result of one prediction, ready for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    pub probability: f64,
    pub tier: RiskTier,
}

impl RiskAssessment {
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            tier: RiskTier::from_probability(probability),
        }
    }

    /// Probability as a percentage with two decimals, e.g. `"50.00%"`.
    pub fn percentage(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }

    pub fn banner(&self) -> &'static str {
        self.tier.banner()
    }
}
