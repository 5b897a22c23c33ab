use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fairflex::{Tier, compute_price, compute_savings, compute_total};
use crate::input::{AmountInput, MonthsInput, billable_months, non_negative_amount, whole_months};

/// Everything a booking needs to persist about its price.
///
/// `duration_months` is the stay as requested (`None` when it is not a whole
/// number) and always rederives `adjustment_percent`; `billed_months` is what
/// the total was charged for, at least one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentQuote {
    pub base_rent: Decimal,
    pub duration_months: Option<i64>,
    pub billed_months: u64,
    pub tier: Tier,
    pub adjustment_percent: i32,
    pub monthly_rate: Decimal,
    pub total_amount: Decimal,
    pub savings: Decimal,
}

impl RentQuote {
    pub fn new(base_rent: impl AmountInput, duration_months: impl MonthsInput) -> Self {
        let base_rent = non_negative_amount(&base_rent);
        let tier = Tier::for_duration(&duration_months);
        let price = compute_price(base_rent, &duration_months);

        Self {
            base_rent,
            duration_months: whole_months(&duration_months),
            billed_months: billable_months(&duration_months),
            tier,
            adjustment_percent: price.adjustment_percent,
            monthly_rate: price.monthly_rate,
            total_amount: compute_total(price.monthly_rate, &duration_months),
            savings: compute_savings(base_rent, &duration_months),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fairflex::compute_adjustment;

    fn money(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    #[test]
    fn long_stay_quote() {
        let quote = RentQuote::new(25000, 6);
        assert_eq!(quote.tier, Tier::LongTerm);
        assert_eq!(quote.adjustment_percent, -10);
        assert_eq!(quote.monthly_rate, money("22500.00"));
        assert_eq!(quote.total_amount, money("135000.00"));
        assert_eq!(quote.savings, money("15000.00"));
        assert_eq!(quote.duration_months, Some(6));
        assert_eq!(quote.billed_months, 6);
    }

    #[test]
    fn short_stay_quote_has_no_savings() {
        let quote = RentQuote::new("18000", "2");
        assert_eq!(quote.adjustment_percent, 10);
        assert_eq!(quote.monthly_rate, money("19800.00"));
        assert_eq!(quote.total_amount, money("39600.00"));
        assert_eq!(quote.savings, Decimal::ZERO);
    }

    #[test]
    fn garbage_input_quotes_one_standard_month_at_zero() {
        let quote = RentQuote::new("", f64::NAN);
        assert_eq!(quote.tier, Tier::Standard);
        assert_eq!(quote.base_rent, Decimal::ZERO);
        assert_eq!(quote.duration_months, None);
        assert_eq!(quote.billed_months, 1);
        assert_eq!(quote.total_amount, Decimal::ZERO);
    }

    #[test]
    fn stored_duration_rederives_the_adjustment() {
        for months in [0, 1, 2, 5, 6, 12, 13] {
            let quote = RentQuote::new(25000, months);
            assert_eq!(
                compute_adjustment(quote.duration_months),
                quote.adjustment_percent,
                "{months} months"
            );
        }

        let zero = RentQuote::new(25000, 0);
        assert_eq!(zero.duration_months, Some(0));
        assert_eq!(zero.billed_months, 1);
        assert_eq!(zero.adjustment_percent, 0);
    }

    #[test]
    fn quotes_are_deterministic() {
        assert_eq!(RentQuote::new(31250.5, 9), RentQuote::new(31250.5, 9));
    }
}
