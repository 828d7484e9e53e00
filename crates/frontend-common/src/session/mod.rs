//! Session lifecycle: persisted credentials, change notifications and
//! proactive token refresh

mod error;
mod scheduler;
mod store;

pub use error::SessionError;
pub use scheduler::RefreshScheduler;
pub use store::SessionStore;
