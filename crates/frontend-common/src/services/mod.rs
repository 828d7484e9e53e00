//! Application services built on the session and the auth gate

pub mod booking;

pub use booking::{BookingError, BookingService, BookingSummary, CheckoutRedirect};
