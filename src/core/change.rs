//! Percentage change between two adjacent price observations.
use rust_decimal::{Decimal, RoundingStrategy};

/// Signed change from `previous` to `current`, in percent, rounded to two
/// decimal places (half away from zero).
///
/// A zero previous price yields `0` rather than an error. That is a display
/// policy, not a mathematical identity.
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    let Some(change) = current
        .checked_sub(previous)
        .and_then(|delta| delta.checked_div(previous))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    else {
        return Decimal::ZERO;
    };
    change.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_change() {
        assert_eq!(percent_change(dec!(110), dec!(100)), dec!(10.00));
    }

    #[test]
    fn test_negative_change() {
        assert_eq!(percent_change(dec!(142.68), dec!(143.90)), dec!(-0.85));
    }

    #[test]
    fn test_rounds_to_two_places() {
        // 1/3 of a percent
        assert_eq!(percent_change(dec!(100.3333), dec!(100)), dec!(0.33));
        assert_eq!(percent_change(dec!(100.005), dec!(100)), dec!(0.01));
        assert_eq!(percent_change(dec!(99.995), dec!(100)), dec!(-0.01));
    }

    #[test]
    fn test_zero_previous_price() {
        assert_eq!(percent_change(dec!(110), dec!(0)), Decimal::ZERO);
        assert_eq!(percent_change(dec!(0), dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn test_no_change() {
        assert_eq!(percent_change(dec!(4850.25), dec!(4850.25)), Decimal::ZERO);
    }

    #[test]
    fn test_out_of_range_prices_yield_zero() {
        assert_eq!(percent_change(Decimal::MAX, Decimal::MIN), Decimal::ZERO);
        assert_eq!(percent_change(Decimal::MIN, Decimal::MAX), Decimal::ZERO);
        // difference fits but the ratio times 100 does not
        assert_eq!(percent_change(Decimal::MAX, dec!(0.0000001)), Decimal::ZERO);
    }
}
