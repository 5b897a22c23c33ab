use std::ops::RangeInclusive;

use anyhow::{Result, anyhow, bail};
use rentnest_pricing::RentQuote;
use rentnest_types::api::{BookingCreated, BookingDraft};
use rentnest_types::collections::{BOOKINGS, PROPERTIES};
use rentnest_types::document::{Document, reference_key};
use rentnest_types::models::{Booking, BookingStatus};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::Database;

/// Durations FairFlex has a tier for. Anything else would be priced at the
/// standard-rate fallback, which is for quoting, not for booking.
const BOOKABLE_MONTHS: RangeInclusive<u32> = 1..=12;

impl Database {
    /// Price a booking request against the property's current rent and store
    /// it as pending. The owner is copied from the property so later reads
    /// never need the join.
    pub fn create_booking(&self, draft: &BookingDraft) -> Result<BookingCreated> {
        if draft.check_out <= draft.check_in {
            bail!("Check-out must be after check-in");
        }
        if !BOOKABLE_MONTHS.contains(&draft.duration_months) {
            bail!(
                "Bookings run {} to {} months, got {}",
                BOOKABLE_MONTHS.start(),
                BOOKABLE_MONTHS.end(),
                draft.duration_months
            );
        }

        let property = self
            .get_document(PROPERTIES, &draft.property)?
            .ok_or_else(|| anyhow!("Property not found: {}", draft.property))?;

        let rent = property.present("rent").and_then(amount_text);
        let quote = RentQuote::new(rent.as_deref(), draft.duration_months);

        let booking = Booking {
            renter: draft.renter.clone(),
            owner: property.present("owner").map(reference_key),
            property: draft.property.clone(),
            check_in: draft.check_in,
            check_out: draft.check_out,
            status: BookingStatus::Pending,
            base_rent: quote.base_rent,
            duration_months: draft.duration_months,
            adjustment_percent: quote.adjustment_percent,
            monthly_rate: quote.monthly_rate,
            total_amount: quote.total_amount,
        };

        let id = Uuid::new_v4().to_string();
        self.insert_document(BOOKINGS, &Document::from_model(id.clone(), &booking)?)?;

        info!(
            "Booking {} created: {} months at {} ({:+}%)",
            id, draft.duration_months, quote.monthly_rate, quote.adjustment_percent
        );

        Ok(BookingCreated {
            id,
            adjustment_percent: quote.adjustment_percent,
            monthly_rate: quote.monthly_rate,
            total_amount: quote.total_amount,
            savings: quote.savings,
        })
    }
}

/// Rent may have been stored as a JSON number or as a string.
fn amount_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
