//! # Pledgebook Common
//!
//! Shared domain types, configuration, and errors for the Pledgebook pawn
//! ledger.
//!
//! ## Core Types
//!
//! - [`Pledge`]: the pawn transaction aggregate (items, principal, dates)
//! - [`PledgeStatus`]: derived lifecycle state
//! - [`ShopConfig`]: purity table, interest schedule, lifecycle windows
//! - [`PledgeId`]/[`PledgeIdAllocator`]: human-readable pledge identifiers
//!
//! ## Conventions
//!
//! Monetary amounts, weights, and rates are `rust_decimal::Decimal`;
//! business dates are `chrono::NaiveDate`. Date-sensitive logic never reads
//! a clock: "today" always arrives as an explicit parameter.

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{
    InterestError, LifecycleError, PledgeError, PledgebookError, RedemptionError, Result,
    ValuationError,
};
pub use types::{
    config::{InterestTier, PurityRate, ShopConfig},
    id::{PledgeId, PledgeIdAllocator},
    pledge::{AuctionRecord, Pledge, PledgeItem, PledgeStatus, RenewalEvent},
};

/// Pledgebook version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Billing month length used for interest accrual, in days
pub const DAYS_PER_BILLING_MONTH: i64 = 30;

/// Minimum whole months of interest charged on any open pledge
pub const MIN_INTEREST_MONTHS: i64 = 1;
