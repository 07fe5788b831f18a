//! # Pledgebook Engine
//!
//! The pawn ledger's rule engine: pure, synchronous functions over the
//! domain types in `pledgebook-common`. Four cooperating components:
//!
//! - [`valuation`]: weight + purity + live gold price -> assessed value and
//!   loan offer
//! - [`interest`]: tiered simple interest over whole 30-day months
//! - [`redemption`]: amounts due to close, split, or extend a pledge
//! - [`lifecycle`]: the pledge state machine and its transition appliers
//! - [`report`]: one-pass portfolio aggregation
//!
//! Every date-sensitive function takes "today" explicitly; the engine never
//! reads a clock, performs I/O, or holds state. Callers own persistence and
//! supply the [`pledgebook_common::ShopConfig`] on every call.

pub mod interest;
pub mod lifecycle;
pub mod redemption;
pub mod report;
pub mod valuation;

// Re-export the common crate so callers need a single dependency
pub use pledgebook_common as common;

pub use interest::{elapsed_months, monthly_interest, months_from_days, select_tier, total_interest};
pub use lifecycle::{
    apply_auction, apply_forfeiture, apply_full_redemption, apply_renewal, can_transition,
    derive_status, forfeiture_deadline,
};
pub use redemption::{
    full_redemption_amount, partial_redemption_amount, quote_full_redemption,
    quote_partial_redemption, quote_renewal, renewal_amount, RedemptionQuote,
};
pub use report::{summarize, PortfolioSummary};
pub use valuation::{assess_item, assess_value, propose_loan_amount};
