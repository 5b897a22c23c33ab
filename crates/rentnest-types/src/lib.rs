pub mod api;
pub mod document;
pub mod models;

/// Collection names shared by the store, the booking flow and the migrations.
pub mod collections {
    pub const USERS: &str = "users";
    pub const PROPERTIES: &str = "properties";
    pub const BOOKINGS: &str = "bookings";
}
