//! RentNest FairFlex pricing.
//!
//! Short stays carry a premium, long stays a discount. Every function here is
//! total: unvalidated form input (empty strings, NaN, negative rents) degrades
//! to the standard rate instead of failing, so callers can quote on every
//! keystroke.

pub mod fairflex;
pub mod input;
pub mod quote;

pub use fairflex::{Price, Tier, compute_adjustment, compute_price, compute_savings, compute_total};
pub use input::{AmountInput, MonthsInput};
pub use quote::RentQuote;
