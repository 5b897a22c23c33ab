use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Anything a booking form may hand us as a stay length.
///
/// `as_months` returns the raw numeric value, or `None` when the input is not
/// numeric at all. Range and integrality checks happen in the pricer.
pub trait MonthsInput {
    fn as_months(&self) -> Option<f64>;
}

/// Anything a booking form or listing may hand us as a money amount.
pub trait AmountInput {
    fn as_amount(&self) -> Option<Decimal>;
}

macro_rules! integer_inputs {
    ($($ty:ty),*) => {
        $(
            impl MonthsInput for $ty {
                fn as_months(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }

            impl AmountInput for $ty {
                fn as_amount(&self) -> Option<Decimal> {
                    Some(Decimal::from(*self))
                }
            }
        )*
    };
}

integer_inputs!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl MonthsInput for f64 {
    fn as_months(&self) -> Option<f64> {
        Some(*self)
    }
}

impl MonthsInput for f32 {
    fn as_months(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl MonthsInput for Decimal {
    fn as_months(&self) -> Option<f64> {
        self.to_f64()
    }
}

impl MonthsInput for str {
    fn as_months(&self) -> Option<f64> {
        self.trim().parse().ok()
    }
}

impl MonthsInput for String {
    fn as_months(&self) -> Option<f64> {
        self.as_str().as_months()
    }
}

impl<T: MonthsInput + ?Sized> MonthsInput for &T {
    fn as_months(&self) -> Option<f64> {
        (**self).as_months()
    }
}

impl<T: MonthsInput> MonthsInput for Option<T> {
    fn as_months(&self) -> Option<f64> {
        self.as_ref().and_then(MonthsInput::as_months)
    }
}

impl AmountInput for Decimal {
    fn as_amount(&self) -> Option<Decimal> {
        Some(*self)
    }
}

impl AmountInput for f64 {
    fn as_amount(&self) -> Option<Decimal> {
        // NaN and the infinities have no decimal representation
        Decimal::from_f64(*self)
    }
}

impl AmountInput for f32 {
    fn as_amount(&self) -> Option<Decimal> {
        Decimal::from_f32(*self)
    }
}

impl AmountInput for str {
    fn as_amount(&self) -> Option<Decimal> {
        let trimmed = self.trim();
        Decimal::from_str(trimmed)
            .ok()
            .or_else(|| trimmed.parse::<f64>().ok().and_then(Decimal::from_f64))
    }
}

impl AmountInput for String {
    fn as_amount(&self) -> Option<Decimal> {
        self.as_str().as_amount()
    }
}

impl<T: AmountInput + ?Sized> AmountInput for &T {
    fn as_amount(&self) -> Option<Decimal> {
        (**self).as_amount()
    }
}

impl<T: AmountInput> AmountInput for Option<T> {
    fn as_amount(&self) -> Option<Decimal> {
        self.as_ref().and_then(AmountInput::as_amount)
    }
}

/// The duration as a whole number of months, if it is one.
pub(crate) fn whole_months<M: MonthsInput + ?Sized>(input: &M) -> Option<i64> {
    let value = input.as_months()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Months to bill for: finite values are truncated, anything below one
/// month or unreadable bills a single month. Capped at `u64::MAX`.
pub(crate) fn billable_months<M: MonthsInput + ?Sized>(input: &M) -> u64 {
    match input.as_months() {
        Some(value) if value.is_finite() && value >= 1.0 => value.trunc() as u64,
        _ => 1,
    }
}

/// Finite non-negative amount, or zero.
pub(crate) fn non_negative_amount<A: AmountInput + ?Sized>(input: &A) -> Decimal {
    match input.as_amount() {
        Some(amount) if !amount.is_sign_negative() => amount,
        _ => Decimal::ZERO,
    }
}
