//! Interest Accrual Engine - tiered simple interest over whole months
//!
//! Interest is simple (non-compounding): every month charges the same
//! amount, computed on the original principal. Elapsed time is measured in
//! whole 30-day months rounded up, never fractional, with a minimum of one
//! month: the shop always charges a full month even for a same-day
//! redemption. These rounding rules are policy and must be preserved
//! exactly.

use chrono::NaiveDate;
use pledgebook_common::{
    InterestError, InterestTier, Result, DAYS_PER_BILLING_MONTH, MIN_INTEREST_MONTHS,
};
use rust_decimal::Decimal;

/// Interest owed for one month: `principal x rate / 100`
pub fn monthly_interest(principal: Decimal, rate_percent: Decimal) -> Decimal {
    principal * rate_percent / Decimal::ONE_HUNDRED
}

/// Simple interest for the given number of whole months
pub fn total_interest(principal: Decimal, rate_percent: Decimal, months: i64) -> Decimal {
    monthly_interest(principal, rate_percent) * Decimal::from(months)
}

/// Convert elapsed days to billable whole months
///
/// Rounds up to the next 30-day month and never returns less than one.
pub fn months_from_days(days: i64) -> i64 {
    if days <= 0 {
        return MIN_INTEREST_MONTHS;
    }
    let months = (days + DAYS_PER_BILLING_MONTH - 1) / DAYS_PER_BILLING_MONTH;
    months.max(MIN_INTEREST_MONTHS)
}

/// Billable whole months between two dates
///
/// Fails with `InvalidDateOrder` when `to` precedes `from`.
pub fn elapsed_months(from: NaiveDate, to: NaiveDate) -> Result<i64> {
    if to < from {
        return Err(InterestError::InvalidDateOrder { from, to }.into());
    }
    let days = (to - from).num_days();
    Ok(months_from_days(days))
}

/// Select the interest tier covering the given elapsed months
///
/// Walks the tiers in ascending threshold order and returns the first whose
/// threshold is >= the elapsed months (inclusive boundary); anything beyond
/// the schedule falls into the last, catch-all tier. Fails with
/// `NoTiersConfigured` on an empty schedule.
pub fn select_tier(elapsed_months: i64, tiers: &[InterestTier]) -> Result<&InterestTier> {
    let last = tiers.last().ok_or(InterestError::NoTiersConfigured)?;
    let tier = tiers
        .iter()
        .find(|t| t.threshold_months >= elapsed_months)
        .unwrap_or(last);
    Ok(tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pledgebook_common::{PledgebookError, ShopConfig};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tier(threshold: i64, rate: Decimal) -> InterestTier {
        InterestTier {
            threshold_months: threshold,
            monthly_rate_percent: rate,
            label: format!("<= {} months", threshold),
        }
    }

    #[test]
    fn test_monthly_interest() {
        assert_eq!(monthly_interest(dec!(1000), dec!(1.5)), dec!(15));
        assert_eq!(monthly_interest(dec!(1000), dec!(0)), dec!(0));
    }

    #[test]
    fn test_total_interest_is_simple_not_compound() {
        // 3 months on original principal: 3 * 15, not 1000 * 1.015^3 - 1000
        assert_eq!(total_interest(dec!(1000), dec!(1.5), 3), dec!(45));
    }

    #[test]
    fn test_months_from_days_rounds_up() {
        assert_eq!(months_from_days(1), 1);
        assert_eq!(months_from_days(30), 1);
        assert_eq!(months_from_days(31), 2);
        assert_eq!(months_from_days(45), 2);
        assert_eq!(months_from_days(60), 2);
        assert_eq!(months_from_days(61), 3);
    }

    #[test]
    fn test_months_from_days_minimum_one() {
        assert_eq!(months_from_days(0), 1);
    }

    #[test]
    fn test_elapsed_months() {
        let from = date(2026, 1, 1);
        assert_eq!(elapsed_months(from, date(2026, 1, 2)).unwrap(), 1);
        assert_eq!(elapsed_months(from, date(2026, 2, 1)).unwrap(), 2); // 31 days
        assert_eq!(elapsed_months(from, date(2026, 1, 31)).unwrap(), 1); // 30 days
    }

    #[test]
    fn test_elapsed_months_monotone() {
        let from = date(2026, 1, 1);
        let mut last = 0;
        for offset in 0..400 {
            let to = from + chrono::Days::new(offset);
            let months = elapsed_months(from, to).unwrap();
            assert!(months >= last);
            assert!(months >= 1);
            last = months;
        }
    }

    #[test]
    fn test_elapsed_months_rejects_reversed_dates() {
        let result = elapsed_months(date(2026, 2, 1), date(2026, 1, 1));
        assert!(matches!(
            result,
            Err(PledgebookError::Interest(InterestError::InvalidDateOrder { .. }))
        ));
    }

    #[test]
    fn test_select_tier_inclusive_boundaries() {
        let tiers = vec![
            tier(6, dec!(0.5)),
            tier(12, dec!(1.5)),
            tier(999, dec!(2.0)),
        ];

        assert_eq!(select_tier(5, &tiers).unwrap().monthly_rate_percent, dec!(0.5));
        assert_eq!(select_tier(6, &tiers).unwrap().monthly_rate_percent, dec!(0.5));
        assert_eq!(select_tier(7, &tiers).unwrap().monthly_rate_percent, dec!(1.5));
        assert_eq!(select_tier(13, &tiers).unwrap().monthly_rate_percent, dec!(2.0));
    }

    #[test]
    fn test_select_tier_falls_back_to_last() {
        let tiers = vec![tier(3, dec!(1.0)), tier(6, dec!(2.0))];
        assert_eq!(select_tier(48, &tiers).unwrap().monthly_rate_percent, dec!(2.0));
    }

    #[test]
    fn test_select_tier_rejects_empty_schedule() {
        let result = select_tier(1, &[]);
        assert!(matches!(
            result,
            Err(PledgebookError::Interest(InterestError::NoTiersConfigured))
        ));
    }

    #[test]
    fn test_default_schedule_selects() {
        let config = ShopConfig::default();
        let tier = select_tier(2, &config.interest_tiers).unwrap();
        assert_eq!(tier.label, "standard");
        let tier = select_tier(8, &config.interest_tiers).unwrap();
        assert_eq!(tier.label, "overdue");
    }
}
