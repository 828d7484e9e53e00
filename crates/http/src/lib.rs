//! Clinic HTTP module providing the typed backend client and auth gate
//!
//! Every backend call goes through [`client::AuthGate`], which attaches the
//! bearer token and recovers from an expired access token with one silent
//! refresh and retry.

pub mod types;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "client")]
pub use client::{AuthGate, ClinicClient, CredentialProvider, error::ClientError};
