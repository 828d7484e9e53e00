use clinic_core::CoreError;
use clinic_http::ClientError;
use thiserror::Error;

/// Session operation errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("No refresh token stored")]
    NoRefreshToken,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SessionError {
    /// Message suitable for display next to a form
    pub fn user_message(&self) -> String {
        match self {
            Self::Client(error) => error.user_message(),
            Self::NoRefreshToken => "Your session has expired, please sign in again".to_string(),
            Self::Core(_) => "Something went wrong, please try again".to_string(),
        }
    }
}
