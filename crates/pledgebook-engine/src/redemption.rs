//! Redemption/Renewal Calculator - amounts due to close, split, or extend
//!
//! Three settlement paths, all pure arithmetic over the accrual rules in
//! [`crate::interest`]:
//!
//! - Full redemption: principal plus accrued interest, items returned
//! - Partial redemption: an equal-split share of principal plus interest on
//!   that share, for a subset of items
//! - Renewal: accrued interest only; principal stays out, maturity extends
//!
//! Nothing here mutates a pledge. Quotes are returned to the caller, who
//! records the resulting transition through [`crate::lifecycle`].

use chrono::NaiveDate;
use pledgebook_common::{Pledge, RedemptionError, Result, ShopConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interest::{elapsed_months, months_from_days, select_tier, total_interest};

/// Breakdown of an amount quoted for redemption or renewal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedemptionQuote {
    /// Principal component (zero for renewals)
    pub principal_due: Decimal,
    /// Interest component
    pub interest_due: Decimal,
    /// Total payable
    pub total_due: Decimal,
    /// Whole months charged
    pub months_charged: i64,
    /// Monthly rate applied, in percent
    pub monthly_rate_percent: Decimal,
    /// Label of the tier the rate came from
    pub tier_label: String,
    /// Date the quote was computed for
    pub quoted_at: NaiveDate,
}

/// Amount to fully redeem: principal plus interest for the elapsed time
///
/// The rate must be the one already selected for the elapsed tier; tier
/// selection happens before this call.
pub fn full_redemption_amount(
    principal: Decimal,
    rate_percent: Decimal,
    days_elapsed: i64,
) -> Decimal {
    principal + total_interest(principal, rate_percent, months_from_days(days_elapsed))
}

/// Amount to redeem a subset of items
///
/// Principal is split equally across items regardless of individual assessed
/// value, and interest accrues on the redeemed share only. The equal split
/// is a modeling approximation inherited from the shop's books; weighting by
/// assessed value would change quoted amounts and is intentionally not done
/// here. Fails with `InvalidItemCount` when the requested count is zero or
/// exceeds the total.
pub fn partial_redemption_amount(
    total_item_count: u32,
    items_to_redeem: u32,
    principal: Decimal,
    rate_percent: Decimal,
    days_elapsed: i64,
) -> Result<Decimal> {
    if items_to_redeem == 0 || items_to_redeem > total_item_count {
        return Err(RedemptionError::InvalidItemCount {
            requested: items_to_redeem,
            total: total_item_count,
        }
        .into());
    }

    let portion = principal * Decimal::from(items_to_redeem) / Decimal::from(total_item_count);
    Ok(portion + total_interest(portion, rate_percent, months_from_days(days_elapsed)))
}

/// Amount to renew: interest only, principal stays outstanding
pub fn renewal_amount(principal: Decimal, rate_percent: Decimal, days_elapsed: i64) -> Decimal {
    total_interest(principal, rate_percent, months_from_days(days_elapsed))
}

/// Quote a full redemption of the pledge as of `today`
///
/// Elapsed time runs from the interest basis date (issuance, or the last
/// renewal since that settled interest through its date). The tier is
/// selected from the shop schedule for that elapsed time.
pub fn quote_full_redemption(
    pledge: &Pledge,
    config: &ShopConfig,
    today: NaiveDate,
) -> Result<RedemptionQuote> {
    let months = elapsed_months(pledge.interest_basis_date(), today)?;
    let tier = select_tier(months, &config.interest_tiers)?;
    let interest = total_interest(pledge.principal, tier.monthly_rate_percent, months);

    let quote = RedemptionQuote {
        principal_due: pledge.principal,
        interest_due: interest,
        total_due: pledge.principal + interest,
        months_charged: months,
        monthly_rate_percent: tier.monthly_rate_percent,
        tier_label: tier.label.clone(),
        quoted_at: today,
    };
    debug!(pledge = %pledge.id, total = %quote.total_due, months, "Quoted full redemption");
    Ok(quote)
}

/// Quote redemption of `items_to_redeem` of the pledge's items as of `today`
pub fn quote_partial_redemption(
    pledge: &Pledge,
    items_to_redeem: u32,
    config: &ShopConfig,
    today: NaiveDate,
) -> Result<RedemptionQuote> {
    let total_items = pledge.item_count();
    if items_to_redeem == 0 || items_to_redeem > total_items {
        return Err(RedemptionError::InvalidItemCount {
            requested: items_to_redeem,
            total: total_items,
        }
        .into());
    }

    let months = elapsed_months(pledge.interest_basis_date(), today)?;
    let tier = select_tier(months, &config.interest_tiers)?;
    let portion = pledge.principal * Decimal::from(items_to_redeem) / Decimal::from(total_items);
    let interest = total_interest(portion, tier.monthly_rate_percent, months);

    let quote = RedemptionQuote {
        principal_due: portion,
        interest_due: interest,
        total_due: portion + interest,
        months_charged: months,
        monthly_rate_percent: tier.monthly_rate_percent,
        tier_label: tier.label.clone(),
        quoted_at: today,
    };
    debug!(
        pledge = %pledge.id,
        items_to_redeem,
        total = %quote.total_due,
        "Quoted partial redemption"
    );
    Ok(quote)
}

/// Quote a renewal of the pledge as of `today`: interest only
pub fn quote_renewal(
    pledge: &Pledge,
    config: &ShopConfig,
    today: NaiveDate,
) -> Result<RedemptionQuote> {
    let months = elapsed_months(pledge.interest_basis_date(), today)?;
    let tier = select_tier(months, &config.interest_tiers)?;
    let interest = total_interest(pledge.principal, tier.monthly_rate_percent, months);

    let quote = RedemptionQuote {
        principal_due: Decimal::ZERO,
        interest_due: interest,
        total_due: interest,
        months_charged: months,
        monthly_rate_percent: tier.monthly_rate_percent,
        tier_label: tier.label.clone(),
        quoted_at: today,
    };
    debug!(pledge = %pledge.id, interest = %interest, months, "Quoted renewal");
    Ok(quote)
}
