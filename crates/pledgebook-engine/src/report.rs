//! Portfolio reporting - one-pass aggregation over the pledge book
//!
//! Statuses are derived per pledge as of the report date; cached status
//! fields are ignored, so a summary is consistent even over stale records.

use chrono::NaiveDate;
use pledgebook_common::{Pledge, PledgeStatus, ShopConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::derive_status;

/// Aggregated view of the pledge book as of a report date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Total pledges seen
    pub total_pledges: u64,
    /// Counts by derived status
    pub active: u64,
    pub overdue: u64,
    pub redeemed: u64,
    pub forfeited: u64,
    pub auctioned: u64,
    /// Principal still out on non-terminal pledges
    pub principal_outstanding: Decimal,
    /// Interest collected across renewals and full redemptions
    pub interest_collected: Decimal,
    /// Hammer prices of completed auctions
    pub auction_proceeds: Decimal,
}

/// Summarize the pledge book as of `today`
pub fn summarize(pledges: &[Pledge], today: NaiveDate, config: &ShopConfig) -> PortfolioSummary {
    let mut summary = PortfolioSummary::default();

    for pledge in pledges {
        summary.total_pledges += 1;

        let status = derive_status(pledge, today, config);
        match status {
            PledgeStatus::Active => summary.active += 1,
            PledgeStatus::Overdue => summary.overdue += 1,
            PledgeStatus::Redeemed => summary.redeemed += 1,
            PledgeStatus::Forfeited => summary.forfeited += 1,
            PledgeStatus::Auctioned => summary.auctioned += 1,
        }

        if !status.is_terminal() {
            summary.principal_outstanding += pledge.principal;
        }

        summary.interest_collected += pledge
            .renewal_history
            .iter()
            .map(|r| r.interest_paid)
            .sum::<Decimal>();

        if let Some(amount) = pledge.redemption_amount {
            // Redemption collects principal plus interest; only the excess
            // over principal is interest income
            summary.interest_collected += (amount - pledge.principal).max(Decimal::ZERO);
        }

        if let Some(auction) = &pledge.auction {
            summary.auction_proceeds += auction.price;
        }
    }

    summary
}
