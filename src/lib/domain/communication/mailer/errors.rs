//! Mailer errors

use std::time::Duration;

use lettre::{address::AddressError, error::Error as MessageError, transport::smtp};
use thiserror::Error;
use tracing::debug;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The relay rejected the message or could not be reached
    #[error(transparent)]
    SendError(#[from] smtp::Error),

    /// The relay did not answer in time
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Invalid email address
    #[error("invalid email address")]
    InvalidEmail,

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}

impl From<AddressError> for MailerError {
    fn from(_err: AddressError) -> Self {
        debug!("AddressError -> MailerError");

        MailerError::InvalidEmail
    }
}

impl From<MessageError> for MailerError {
    fn from(err: MessageError) -> Self {
        debug!("lettre::error::Error -> MailerError");

        MailerError::UnknownError(err.into())
    }
}
