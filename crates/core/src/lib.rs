//! Clinic booking core types and utilities

pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;
pub mod token;
#[cfg(all(feature = "tracing", not(target_arch = "wasm32")))]
pub mod tracing;

pub use config::ClinicSettings;
pub use error::{CoreError, CoreResult};
pub use session::{Credentials, Role, UserInfo};
pub use storage::{CredentialVault, KeyValueStore, MemoryStore, StorageKeys};
pub use token::TokenClaims;
