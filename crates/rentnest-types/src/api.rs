use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// -- Bookings --

/// A booking request as submitted by a renter. Pricing is derived from the
/// property's rent and `duration_months`; clients never send amounts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookingDraft {
    pub renter: String,
    pub property: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub duration_months: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    pub id: String,
    pub adjustment_percent: i32,
    pub monthly_rate: Decimal,
    pub total_amount: Decimal,
    pub savings: Decimal,
}
