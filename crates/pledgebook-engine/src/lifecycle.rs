//! Pledge Lifecycle State Machine
//!
//! States: active -> overdue -> (redeemed | forfeited -> auctioned), with
//! renewals re-entering active. Status is always derived from the stored
//! dates and shop configuration; the cached `status` field on the pledge is
//! display-only and never consulted here.
//!
//! The appliers in this module are the only code that mutates a pledge.
//! Each one re-derives the current status, checks the transition table, and
//! fails with `InvalidTransition` before touching anything.

use chrono::{Days, Months, NaiveDate};
use pledgebook_common::{
    AuctionRecord, LifecycleError, Pledge, PledgeStatus, RenewalEvent, Result, ShopConfig,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Date arithmetic saturating at the calendar bounds
fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    date.checked_add_months(Months::new(months.max(0) as u32))
        .unwrap_or(NaiveDate::MAX)
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_days(Days::new(days.max(0) as u64))
        .unwrap_or(NaiveDate::MAX)
}

/// Last day before a pledge becomes auction-eligible
///
/// The forfeiture window (months past due) plus the grace period (days)
/// both have to elapse before forfeiture.
pub fn forfeiture_deadline(due_date: NaiveDate, config: &ShopConfig) -> NaiveDate {
    add_days(
        add_months(due_date, config.forfeiture_window_months),
        config.grace_period_days,
    )
}

/// Derive the logical status of a pledge as of `today`
///
/// Recorded terminal facts win over any date arithmetic; after those, the
/// status is a pure function of `today` against the stored dates.
pub fn derive_status(pledge: &Pledge, today: NaiveDate, config: &ShopConfig) -> PledgeStatus {
    if pledge.redeemed_at.is_some() {
        return PledgeStatus::Redeemed;
    }
    if pledge.auction.is_some() {
        return PledgeStatus::Auctioned;
    }
    if pledge.forfeited_at.is_some() {
        return PledgeStatus::Forfeited;
    }
    if today > forfeiture_deadline(pledge.due_date, config) {
        return PledgeStatus::Forfeited;
    }
    if today > pledge.due_date {
        return PledgeStatus::Overdue;
    }
    PledgeStatus::Active
}

/// Whether the state machine admits the transition
///
/// Renewal re-enters `Active` from either live state; redemption closes
/// either live state; forfeiture only follows `Overdue`; auction only
/// follows `Forfeited`. Nothing leaves a terminal state.
pub fn can_transition(from: PledgeStatus, to: PledgeStatus) -> bool {
    use PledgeStatus::*;
    matches!(
        (from, to),
        (Active, Active)
            | (Active, Overdue)
            | (Active, Redeemed)
            | (Overdue, Active)
            | (Overdue, Redeemed)
            | (Overdue, Forfeited)
            | (Forfeited, Auctioned)
    )
}

/// Record a renewal: interest collected, maturity extended
///
/// Appends a [`RenewalEvent`] and advances `due_date` by the configured
/// renewal term, measured from the later of the old due date and `today` so
/// the due date never moves backward. Allowed from `Active` and `Overdue`.
pub fn apply_renewal(
    pledge: &mut Pledge,
    today: NaiveDate,
    interest_paid: Decimal,
    config: &ShopConfig,
) -> Result<()> {
    let from = derive_status(pledge, today, config);
    if !can_transition(from, PledgeStatus::Active) {
        return Err(LifecycleError::InvalidTransition {
            from,
            to: PledgeStatus::Active,
        }
        .into());
    }

    let extend_from = pledge.due_date.max(today);
    let new_due_date = add_months(extend_from, config.renewal_term_months);

    pledge
        .renewal_history
        .push(RenewalEvent::new(today, interest_paid, new_due_date));
    pledge.due_date = new_due_date;
    pledge.status = PledgeStatus::Active;

    debug!(pledge = %pledge.id, %new_due_date, "Renewed pledge");
    Ok(())
}

/// Record a full redemption: principal and interest collected, terminal
pub fn apply_full_redemption(
    pledge: &mut Pledge,
    today: NaiveDate,
    amount_paid: Decimal,
    config: &ShopConfig,
) -> Result<()> {
    let from = derive_status(pledge, today, config);
    if !can_transition(from, PledgeStatus::Redeemed) {
        return Err(LifecycleError::InvalidTransition {
            from,
            to: PledgeStatus::Redeemed,
        }
        .into());
    }

    pledge.redeemed_at = Some(today);
    pledge.redemption_amount = Some(amount_paid);
    pledge.status = PledgeStatus::Redeemed;

    debug!(pledge = %pledge.id, %amount_paid, "Redeemed pledge");
    Ok(())
}

/// Materialize an automatic, date-driven forfeiture
///
/// Once `today` passes the forfeiture deadline the derived status is
/// already `Forfeited`; this records the fact on the pledge so it survives
/// later due-date reads. Idempotent when already recorded. Fails with
/// `InvalidTransition` while the pledge is still redeemable or already
/// closed.
pub fn apply_forfeiture(
    pledge: &mut Pledge,
    today: NaiveDate,
    config: &ShopConfig,
) -> Result<()> {
    if pledge.forfeited_at.is_some() {
        return Ok(());
    }

    let from = derive_status(pledge, today, config);
    if from != PledgeStatus::Forfeited {
        return Err(LifecycleError::InvalidTransition {
            from,
            to: PledgeStatus::Forfeited,
        }
        .into());
    }

    pledge.forfeited_at = Some(today);
    pledge.status = PledgeStatus::Forfeited;

    warn!(
        pledge = %pledge.id,
        due_date = %pledge.due_date,
        "Pledge forfeited, items auction-eligible"
    );
    Ok(())
}

/// Record an auction completion on a forfeited pledge, terminal
pub fn apply_auction(
    pledge: &mut Pledge,
    today: NaiveDate,
    price: Decimal,
    buyer: impl Into<String>,
    config: &ShopConfig,
) -> Result<()> {
    let from = derive_status(pledge, today, config);
    if !can_transition(from, PledgeStatus::Auctioned) {
        return Err(LifecycleError::InvalidTransition {
            from,
            to: PledgeStatus::Auctioned,
        }
        .into());
    }

    pledge.auction = Some(AuctionRecord {
        auctioned_at: today,
        price,
        buyer: buyer.into(),
    });
    pledge.status = PledgeStatus::Auctioned;

    debug!(pledge = %pledge.id, %price, "Auctioned pledge");
    Ok(())
}
