//! Valuation Calculator - assessed value and loan offers
//!
//! Converts raw item attributes (weight, purity, live gold price) into an
//! assessed value, and derives a loan offer from it:
//!
//! - Assessed value: `weight x price_per_gram x purity multiplier`
//! - Loan offer: `floor(assessed_value x margin_rate)`
//!
//! The floor on the loan offer is a deliberate margin-of-safety policy for
//! the lender and must never be replaced with rounding.

use pledgebook_common::{PurityRate, Result, ValuationError};
use rust_decimal::Decimal;
use tracing::debug;

/// Assess the value of gold of the given weight and purity
///
/// Fails with `InvalidWeight` when the weight or price is not positive, and
/// `InvalidPurity` when the code is absent from the table.
pub fn assess_value(
    weight_grams: Decimal,
    purity_code: &str,
    price_per_gram: Decimal,
    purity_rates: &[PurityRate],
) -> Result<Decimal> {
    if weight_grams <= Decimal::ZERO || price_per_gram <= Decimal::ZERO {
        return Err(ValuationError::InvalidWeight.into());
    }

    let purity = purity_rates
        .iter()
        .find(|p| p.code == purity_code)
        .ok_or_else(|| ValuationError::InvalidPurity {
            code: purity_code.to_string(),
        })?;

    let assessed = weight_grams * price_per_gram * purity.multiplier;
    debug!(%weight_grams, purity_code, %price_per_gram, %assessed, "Assessed value");
    Ok(assessed)
}

/// Assess one item, counting only weight net of any stone deduction
///
/// Stones set in jewellery carry no melt value, so their share of the gross
/// weight is deducted before valuation.
pub fn assess_item(
    weight_grams: Decimal,
    stone_deduction_grams: Option<Decimal>,
    purity_code: &str,
    price_per_gram: Decimal,
    purity_rates: &[PurityRate],
) -> Result<Decimal> {
    let net_weight = weight_grams - stone_deduction_grams.unwrap_or(Decimal::ZERO);
    assess_value(net_weight, purity_code, price_per_gram, purity_rates)
}

/// Derive the loan offer from an assessed value
///
/// The amount is floored to whole currency units; flooring (never rounding
/// up) protects the lender. Fails with `InvalidMargin` when the margin rate
/// is outside `(0, 1]`.
pub fn propose_loan_amount(assessed_value: Decimal, margin_rate: Decimal) -> Result<Decimal> {
    if margin_rate <= Decimal::ZERO || margin_rate > Decimal::ONE {
        return Err(ValuationError::InvalidMargin { rate: margin_rate }.into());
    }
    Ok((assessed_value * margin_rate).floor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pledgebook_common::{PledgebookError, ShopConfig};
    use rust_decimal_macros::dec;

    #[test]
    fn test_assess_value_formula() {
        let config = ShopConfig::default();
        // 10g of 916 at 100/g: 10 * 100 * 0.916 = 916
        let assessed = assess_value(dec!(10), "916", dec!(100), &config.purity_rates).unwrap();
        assert_eq!(assessed, dec!(916));
    }

    #[test]
    fn test_assess_value_monotone_in_weight_and_price() {
        let config = ShopConfig::default();
        let base = assess_value(dec!(10), "750", dec!(100), &config.purity_rates).unwrap();
        let heavier = assess_value(dec!(11), "750", dec!(100), &config.purity_rates).unwrap();
        let pricier = assess_value(dec!(10), "750", dec!(110), &config.purity_rates).unwrap();
        assert!(heavier > base);
        assert!(pricier > base);
    }

    #[test]
    fn test_assess_value_rejects_bad_inputs() {
        let config = ShopConfig::default();
        let result = assess_value(dec!(0), "916", dec!(100), &config.purity_rates);
        assert!(matches!(
            result,
            Err(PledgebookError::Valuation(ValuationError::InvalidWeight))
        ));

        let result = assess_value(dec!(10), "916", dec!(-1), &config.purity_rates);
        assert!(matches!(
            result,
            Err(PledgebookError::Valuation(ValuationError::InvalidWeight))
        ));

        let result = assess_value(dec!(10), "917", dec!(100), &config.purity_rates);
        assert!(matches!(
            result,
            Err(PledgebookError::Valuation(ValuationError::InvalidPurity { .. }))
        ));
    }

    #[test]
    fn test_assess_item_deducts_stones() {
        let config = ShopConfig::default();
        // (10 - 2)g of 999 at 100/g: 8 * 100 * 0.999 = 799.2
        let assessed =
            assess_item(dec!(10), Some(dec!(2)), "999", dec!(100), &config.purity_rates).unwrap();
        assert_eq!(assessed, dec!(799.2));
    }

    #[test]
    fn test_loan_amount_floors_exactly() {
        // Boundary from the shop policy: 100 * 0.7 = 70, not 70.0000001
        assert_eq!(propose_loan_amount(dec!(100), dec!(0.7)).unwrap(), dec!(70));
        // 916 * 0.7 = 641.2 -> 641
        assert_eq!(propose_loan_amount(dec!(916), dec!(0.7)).unwrap(), dec!(641));
    }

    #[test]
    fn test_loan_never_exceeds_assessed_value() {
        for margin in [dec!(0.1), dec!(0.5), dec!(0.99), dec!(1)] {
            let loan = propose_loan_amount(dec!(916), margin).unwrap();
            assert!(loan <= dec!(916));
        }
    }

    #[test]
    fn test_loan_rejects_bad_margin() {
        for margin in [dec!(0), dec!(-0.5), dec!(1.01)] {
            let result = propose_loan_amount(dec!(916), margin);
            assert!(matches!(
                result,
                Err(PledgebookError::Valuation(ValuationError::InvalidMargin { .. }))
            ));
        }
    }
}
