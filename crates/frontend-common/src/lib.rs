//! Client-side state for the clinic booking frontend
//!
//! Session lifecycle, route guards, layout asset management and the
//! checkout/payment flow, wired together by [`AppContext`].

pub mod config;
pub mod context;
pub mod guards;
pub mod layout;
pub mod logging;
pub mod payment;
pub mod runtime;
pub mod services;
pub mod session;
pub mod storage;

pub use config::AuthConfig;
pub use context::AppContext;
pub use guards::{GuardOutcome, Navigator, auth_guard, guest_guard};
pub use layout::{AssetHost, LayoutAssetManager, LayoutAssets, Widget};
pub use payment::{BookingResult, PaymentCallback};
pub use services::{BookingService, CheckoutRedirect};
pub use session::{RefreshScheduler, SessionError, SessionStore};
