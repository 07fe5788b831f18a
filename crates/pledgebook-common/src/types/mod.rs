//! Shared domain types

pub mod config;
pub mod id;
pub mod pledge;

pub use config::{InterestTier, PurityRate, ShopConfig};
pub use id::{PledgeId, PledgeIdAllocator};
pub use pledge::{AuctionRecord, Pledge, PledgeItem, PledgeStatus, RenewalEvent};
