//! Integration tests for booking creation: FairFlex pricing is applied from
//! the stored property rent and persisted on the new booking.

use chrono::NaiveDate;
use rentnest_db::Database;
use rentnest_pricing::compute_adjustment;
use rentnest_types::api::BookingDraft;
use rentnest_types::collections::{BOOKINGS, PROPERTIES};
use rentnest_types::document::Document;
use rentnest_types::models::{Booking, BookingStatus, Property};
use rust_decimal::Decimal;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn money(raw: &str) -> Decimal {
    raw.parse().unwrap()
}

fn seeded() -> (Database, String) {
    let db = Database::open_in_memory().unwrap();
    let property = db
        .insert_property(&Property {
            title: "Flat in Jhamsikhel".into(),
            location: "Lalitpur".into(),
            rent: Decimal::from(25000),
            owner: "owner-1".into(),
        })
        .unwrap();
    (db, property)
}

fn draft(property: &str, months: u32) -> BookingDraft {
    BookingDraft {
        renter: "renter-1".into(),
        property: property.into(),
        check_in: date(2025, 1, 1),
        check_out: date(2025, 7, 1),
        duration_months: months,
    }
}

#[test]
fn long_stay_is_discounted_and_persisted() {
    let (db, property) = seeded();

    let created = db.create_booking(&draft(&property, 6)).unwrap();
    assert_eq!(created.adjustment_percent, -10);
    assert_eq!(created.monthly_rate, money("22500.00"));
    assert_eq!(created.total_amount, money("135000.00"));
    assert_eq!(created.savings, money("15000.00"));

    let stored: Booking = db
        .get_document(BOOKINGS, &created.id)
        .unwrap()
        .unwrap()
        .to_model()
        .unwrap();
    assert_eq!(stored.status, BookingStatus::Pending);
    assert_eq!(stored.owner.as_deref(), Some("owner-1"));
    assert_eq!(stored.renter, "renter-1");
    assert_eq!(stored.base_rent, Decimal::from(25000));
    assert_eq!(stored.total_amount, money("135000.00"));
}

#[test]
fn short_stay_carries_premium() {
    let (db, property) = seeded();
    let created = db.create_booking(&draft(&property, 1)).unwrap();
    assert_eq!(created.adjustment_percent, 10);
    assert_eq!(created.monthly_rate, money("27500.00"));
    assert_eq!(created.total_amount, money("27500.00"));
}

#[test]
fn numeric_rent_on_legacy_property_is_priced() {
    let db = Database::open_in_memory().unwrap();
    let fields = match json!({ "title": "Room", "rent": 12000, "owner": "o1" }) {
        serde_json::Value::Object(fields) => fields,
        _ => unreachable!(),
    };
    db.insert_document(PROPERTIES, &Document::new("p1", fields)).unwrap();

    let created = db.create_booking(&draft("p1", 4)).unwrap();
    assert_eq!(created.monthly_rate, money("12000.00"));
    assert_eq!(created.total_amount, money("48000.00"));
}

#[test]
fn missing_property_is_rejected() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.create_booking(&draft("nope", 3)).is_err());
    assert!(db.find_all(BOOKINGS).unwrap().is_empty());
}

#[test]
fn inverted_dates_are_rejected() {
    let (db, property) = seeded();
    let mut request = draft(&property, 3);
    request.check_out = request.check_in;
    assert!(db.create_booking(&request).is_err());
}

#[test]
fn out_of_range_durations_are_rejected() {
    let (db, property) = seeded();
    for months in [0, 13] {
        assert!(db.create_booking(&draft(&property, months)).is_err(), "{months} months");
    }
    assert!(db.find_all(BOOKINGS).unwrap().is_empty());
}

#[test]
fn stored_duration_rederives_the_stored_adjustment() {
    let (db, property) = seeded();
    for months in 1..=12 {
        let created = db.create_booking(&draft(&property, months)).unwrap();
        let stored: Booking = db
            .get_document(BOOKINGS, &created.id)
            .unwrap()
            .unwrap()
            .to_model()
            .unwrap();
        assert_eq!(stored.duration_months, months);
        assert_eq!(
            compute_adjustment(stored.duration_months),
            stored.adjustment_percent,
            "{months} months"
        );
    }
}
