use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::input::{AmountInput, MonthsInput, billable_months, non_negative_amount, whole_months};

/// FairFlex adjustment tiers, keyed by stay length in whole months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// 1–2 months: +10%.
    ShortTerm,
    /// 3–5 months, and any duration we cannot place: no adjustment.
    Standard,
    /// 6–12 months: −10%.
    LongTerm,
}

impl Tier {
    pub fn for_duration<M: MonthsInput + ?Sized>(duration_months: &M) -> Self {
        match whole_months(duration_months) {
            Some(1..=2) => Tier::ShortTerm,
            Some(3..=5) => Tier::Standard,
            Some(6..=12) => Tier::LongTerm,
            _ => Tier::Standard,
        }
    }

    pub const fn adjustment_percent(self) -> i32 {
        match self {
            Tier::ShortTerm => 10,
            Tier::Standard => 0,
            Tier::LongTerm => -10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Tier::ShortTerm => "short-term premium",
            Tier::Standard => "standard rate",
            Tier::LongTerm => "long-term discount",
        }
    }
}

/// Adjusted monthly rate for a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub adjustment_percent: i32,
    pub monthly_rate: Decimal,
}

pub fn compute_adjustment(duration_months: impl MonthsInput) -> i32 {
    Tier::for_duration(&duration_months).adjustment_percent()
}

/// `base_rent * (1 + adjustment/100)`, rounded half-up to paisa.
pub fn compute_price(base_rent: impl AmountInput, duration_months: impl MonthsInput) -> Price {
    let base_rent = non_negative_amount(&base_rent);
    let adjustment_percent = compute_adjustment(duration_months);

    let monthly_rate = base_rent
        .checked_mul(Decimal::from(100 + adjustment_percent))
        .map_or(Decimal::MAX, |scaled| scaled / Decimal::ONE_HUNDRED);

    Price {
        adjustment_percent,
        monthly_rate: round_money(monthly_rate),
    }
}

/// `monthly_rate * months`, billing at least one month.
pub fn compute_total(monthly_rate: impl AmountInput, duration_months: impl MonthsInput) -> Decimal {
    let monthly_rate = non_negative_amount(&monthly_rate);
    let months = billable_months(&duration_months);

    let total = monthly_rate
        .checked_mul(Decimal::from(months))
        .unwrap_or(Decimal::MAX);

    round_money(total)
}

/// What a long stay saves against the unadjusted rent. Zero unless the stay
/// earns a discount.
pub fn compute_savings(base_rent: impl AmountInput, duration_months: impl MonthsInput) -> Decimal {
    let adjustment_percent = compute_adjustment(&duration_months);
    if adjustment_percent >= 0 {
        return Decimal::ZERO;
    }

    let base_rent = non_negative_amount(&base_rent);
    let months = billable_months(&duration_months);

    let savings = base_rent
        .checked_mul(Decimal::from(adjustment_percent.unsigned_abs()))
        .and_then(|scaled| scaled.checked_mul(Decimal::from(months)))
        .map_or(Decimal::MAX, |scaled| scaled / Decimal::ONE_HUNDRED);

    round_money(savings)
}

/// Half-up to two places, applied once at the end of a calculation.
pub(crate) fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
