use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Renter,
    Owner,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub title: String,
    pub location: String,
    /// Monthly base rent in NPR, before any FairFlex adjustment.
    pub rent: Decimal,
    pub owner: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Status names written before the booking schema change.
    pub fn from_legacy(value: &str) -> Option<Self> {
        match value {
            "approved" => Some(BookingStatus::Confirmed),
            "rejected" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

/// A booking in the current schema.
///
/// Records written before the schema change may still carry `user`,
/// `checkInDate`/`checkOutDate`, legacy status names and no `owner`; those
/// only become readable as a `Booking` once migrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub renter: String,
    pub owner: Option<String>,
    pub property: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    pub base_rent: Decimal,
    pub duration_months: u32,
    pub adjustment_percent: i32,
    pub monthly_rate: Decimal,
    pub total_amount: Decimal,
}
