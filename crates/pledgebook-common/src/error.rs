//! Error types for Pledgebook
//!
//! Provides a unified error type and domain-specific error variants.
//! Every variant is a deterministic input-validation failure: nothing here
//! is retried internally, and the caller treats each error as a rejected
//! single request.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::pledge::PledgeStatus;

/// Result type alias using PledgebookError
pub type Result<T> = std::result::Result<T, PledgebookError>;

/// Unified error type for Pledgebook operations
#[derive(Debug, Error)]
pub enum PledgebookError {
    // Valuation errors
    #[error("Valuation error: {0}")]
    Valuation(#[from] ValuationError),

    // Interest accrual errors
    #[error("Interest error: {0}")]
    Interest(#[from] InterestError),

    // Redemption/renewal errors
    #[error("Redemption error: {0}")]
    Redemption(#[from] RedemptionError),

    // Lifecycle errors
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    // Pledge record validation errors
    #[error("Pledge error: {0}")]
    Pledge(#[from] PledgeError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Valuation input errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValuationError {
    #[error("Weight and price per gram must be positive")]
    InvalidWeight,

    #[error("Unknown purity code: {code}")]
    InvalidPurity { code: String },

    #[error("Margin rate must be in (0, 1], got {rate}")]
    InvalidMargin { rate: Decimal },
}

/// Interest configuration and input errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InterestError {
    #[error("No interest tiers configured")]
    NoTiersConfigured,

    #[error("Invalid date order: {to} is before {from}")]
    InvalidDateOrder { from: NaiveDate, to: NaiveDate },
}

/// Redemption request errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RedemptionError {
    #[error("Invalid item count: requested {requested} of {total}")]
    InvalidItemCount { requested: u32, total: u32 },
}

/// Lifecycle state machine errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LifecycleError {
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: PledgeStatus,
        to: PledgeStatus,
    },
}

/// Pledge record validation errors (issuance time)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PledgeError {
    #[error("Principal must be positive, got {principal}")]
    InvalidPrincipal { principal: Decimal },

    #[error("A pledge must hold at least one item")]
    EmptyPledge,

    #[error("Principal {principal} exceeds total assessed value {assessed}")]
    PrincipalExceedsValue {
        principal: Decimal,
        assessed: Decimal,
    },

    #[error("Due date {due_date} is before creation date {created_at}")]
    DueDateBeforeCreation {
        created_at: NaiveDate,
        due_date: NaiveDate,
    },

    #[error("Invalid pledge id: {0}")]
    InvalidId(String),
}

// Implement From for common external error types
impl From<serde_json::Error> for PledgebookError {
    fn from(err: serde_json::Error) -> Self {
        PledgebookError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for PledgebookError {
    fn from(err: std::io::Error) -> Self {
        PledgebookError::Config(err.to_string())
    }
}

impl From<anyhow::Error> for PledgebookError {
    fn from(err: anyhow::Error) -> Self {
        PledgebookError::Internal(err.to_string())
    }
}
