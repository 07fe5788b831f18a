//! Shop configuration - purity table, interest schedule, lifecycle windows
//!
//! All reference data the rule engine needs is carried here and passed in
//! explicitly by the caller. The engine holds no hidden defaults: whatever
//! an operator loads (or the stock `Default`) is what every calculation
//! sees.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PledgebookError, Result};

/// One row of the gold purity reference table
///
/// `multiplier` scales the pure-gold price down to the fineness of the item
/// (916 gold is worth 91.6% of pure). `margin_rate` is the default
/// loan-to-value fraction offered against that purity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurityRate {
    /// Purity code, e.g. "916"
    pub code: String,
    /// Display label, e.g. "22K (916)"
    pub label: String,
    /// Fraction of pure-gold value, in (0, 1]
    pub multiplier: Decimal,
    /// Default loan-to-value fraction, in (0, 1]
    pub margin_rate: Decimal,
}

/// One bracket of the tiered interest schedule
///
/// Tiers are ordered by ascending `threshold_months`; a pledge outstanding
/// for N whole months is charged the first tier whose threshold is >= N.
/// The last tier acts as the catch-all for anything beyond the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestTier {
    /// Upper bound (inclusive) of elapsed whole months this tier covers
    pub threshold_months: i64,
    /// Simple monthly interest rate, in percent (e.g. 1.5)
    pub monthly_rate_percent: Decimal,
    /// Display label, e.g. "standard"
    pub label: String,
}

/// Full shop configuration consumed by the rule engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Purity reference table
    pub purity_rates: Vec<PurityRate>,
    /// Interest schedule, ascending thresholds
    pub interest_tiers: Vec<InterestTier>,
    /// Days past the forfeiture window before items become auction-eligible
    pub grace_period_days: i64,
    /// Months past due date before a pledge forfeits
    pub forfeiture_window_months: i64,
    /// Months added to the due date on each renewal
    pub renewal_term_months: i64,
}

impl ShopConfig {
    /// Look up a purity rate by code
    pub fn purity(&self, code: &str) -> Option<&PurityRate> {
        self.purity_rates.iter().find(|p| p.code == code)
    }

    /// Load configuration from a JSON file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PledgebookError::Config(format!("Failed to read config file: {}", e)))?;

        let config: ShopConfig = serde_json::from_str(&content)
            .map_err(|e| PledgebookError::Config(format!("Failed to parse config JSON: {}", e)))?;

        config.validate()?;
        tracing::debug!(
            purities = config.purity_rates.len(),
            tiers = config.interest_tiers.len(),
            "Loaded shop configuration"
        );
        Ok(config)
    }

    /// Validate configuration invariants
    ///
    /// Checks: at least one interest tier, tiers strictly ascending,
    /// non-negative rates, purity multipliers and margins in (0, 1],
    /// non-negative lifecycle windows, positive renewal term.
    pub fn validate(&self) -> Result<()> {
        if self.interest_tiers.is_empty() {
            return Err(PledgebookError::Config(
                "At least one interest tier is required".to_string(),
            ));
        }

        let mut last_threshold: Option<i64> = None;
        for tier in &self.interest_tiers {
            if tier.monthly_rate_percent < Decimal::ZERO {
                return Err(PledgebookError::Config(format!(
                    "Negative monthly rate in tier '{}'",
                    tier.label
                )));
            }
            if let Some(prev) = last_threshold {
                if tier.threshold_months <= prev {
                    return Err(PledgebookError::Config(format!(
                        "Tier thresholds must ascend: {} after {}",
                        tier.threshold_months, prev
                    )));
                }
            }
            last_threshold = Some(tier.threshold_months);
        }

        for purity in &self.purity_rates {
            if purity.multiplier <= Decimal::ZERO || purity.multiplier > Decimal::ONE {
                return Err(PledgebookError::Config(format!(
                    "Purity '{}' multiplier {} outside (0, 1]",
                    purity.code, purity.multiplier
                )));
            }
            if purity.margin_rate <= Decimal::ZERO || purity.margin_rate > Decimal::ONE {
                return Err(PledgebookError::Config(format!(
                    "Purity '{}' margin rate {} outside (0, 1]",
                    purity.code, purity.margin_rate
                )));
            }
        }

        if self.grace_period_days < 0 {
            return Err(PledgebookError::Config(
                "Grace period cannot be negative".to_string(),
            ));
        }
        if self.forfeiture_window_months < 0 {
            return Err(PledgebookError::Config(
                "Forfeiture window cannot be negative".to_string(),
            ));
        }
        if self.renewal_term_months <= 0 {
            return Err(PledgebookError::Config(
                "Renewal term must be at least one month".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ShopConfig {
    /// Stock configuration matching the shop's standard terms
    fn default() -> Self {
        Self {
            purity_rates: vec![
                PurityRate {
                    code: "999".to_string(),
                    label: "24K (999)".to_string(),
                    multiplier: Decimal::new(999, 3),
                    margin_rate: Decimal::new(75, 2),
                },
                PurityRate {
                    code: "916".to_string(),
                    label: "22K (916)".to_string(),
                    multiplier: Decimal::new(916, 3),
                    margin_rate: Decimal::new(70, 2),
                },
                PurityRate {
                    code: "750".to_string(),
                    label: "18K (750)".to_string(),
                    multiplier: Decimal::new(750, 3),
                    margin_rate: Decimal::new(65, 2),
                },
                PurityRate {
                    code: "585".to_string(),
                    label: "14K (585)".to_string(),
                    multiplier: Decimal::new(585, 3),
                    margin_rate: Decimal::new(60, 2),
                },
            ],
            interest_tiers: vec![
                InterestTier {
                    threshold_months: 3,
                    monthly_rate_percent: Decimal::new(15, 1),
                    label: "standard".to_string(),
                },
                InterestTier {
                    threshold_months: 6,
                    monthly_rate_percent: Decimal::new(20, 1),
                    label: "extended".to_string(),
                },
                InterestTier {
                    threshold_months: 9999,
                    monthly_rate_percent: Decimal::new(25, 1),
                    label: "overdue".to_string(),
                },
            ],
            grace_period_days: 7,
            forfeiture_window_months: 6,
            renewal_term_months: 1,
        }
    }
}
