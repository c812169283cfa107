//! Mailer port

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::{EmailMessage, InlineAttachment};

/// Delivers composed messages
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send an email
    ///
    /// # Arguments
    /// * `message` - The fully composed [`EmailMessage`].
    ///
    /// # Returns
    /// [`Ok`] once the relay accepted the message, a [`MailerError`] otherwise.
    async fn send_email(&self, message: EmailMessage) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send_email(&self, message: EmailMessage) -> Result<(), MailerError>;
    }
}
