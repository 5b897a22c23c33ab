use rentnest_types::collections::{BOOKINGS, PROPERTIES, USERS};

use crate::migrator::Migration;
use crate::rules::{FieldRule, recode_status};

/// `accountType` was superseded by `role`. The old field is kept.
pub fn users_role() -> Migration {
    Migration {
        name: "users-role",
        description: "Copy legacy accountType into role",
        collection: USERS,
        rules: vec![FieldRule::rename("role", "accountType")],
    }
}

/// Booking schema v2: renamed renter and stay dates, confirmed/cancelled
/// statuses, and a denormalized owner copied from the property.
pub fn bookings_schema() -> Migration {
    Migration {
        name: "bookings-schema",
        description: "Rename legacy booking fields, recode statuses and backfill owner",
        collection: BOOKINGS,
        rules: vec![
            FieldRule::rename("renter", "user"),
            FieldRule::rename("checkIn", "checkInDate"),
            FieldRule::rename("checkOut", "checkOutDate"),
            FieldRule::recode("status", recode_status),
            FieldRule::backfill("owner", "property", PROPERTIES, "owner"),
        ],
    }
}

/// Every built-in migration, in the order they should run.
pub fn all() -> Vec<Migration> {
    vec![users_role(), bookings_schema()]
}
