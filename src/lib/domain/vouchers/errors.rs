//! Voucher email errors

use css_inline::InlineError;
use thiserror::Error;
use tracing::debug;

use crate::domain::{communication::mailer::MailerError, vouchers::QrCodeError};

/// Errors that can occur when sending a voucher email
///
/// Every variant displays with a `[Mail] ` prefix.
#[derive(Debug, Error)]
pub enum VoucherEmailError {
    /// The relay did not accept the message
    #[error("[Mail] {0}")]
    Delivery(#[source] MailerError),

    /// The QR code could not be generated
    #[error("[Mail] {0}")]
    QrCode(#[from] QrCodeError),

    /// The HTML body could not be rendered
    #[error("[Mail] could not render email: {0}")]
    Render(String),
}

impl From<MailerError> for VoucherEmailError {
    fn from(err: MailerError) -> Self {
        debug!("MailerError -> VoucherEmailError");

        VoucherEmailError::Delivery(err)
    }
}

impl From<askama::Error> for VoucherEmailError {
    fn from(err: askama::Error) -> Self {
        debug!("askama::Error -> VoucherEmailError");

        VoucherEmailError::Render(err.to_string())
    }
}

impl From<InlineError> for VoucherEmailError {
    fn from(err: InlineError) -> Self {
        debug!("InlineError -> VoucherEmailError");

        VoucherEmailError::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_delivery_error_is_prefixed() {
        let err = VoucherEmailError::from(MailerError::from(anyhow!("Connection refused")));

        assert_eq!(err.to_string(), "[Mail] Connection refused");
    }

    #[test]
    fn test_qr_error_is_prefixed() {
        let err = VoucherEmailError::from(QrCodeError::Encode("data too long".to_string()));

        assert_eq!(err.to_string(), "[Mail] could not encode QR code: data too long");
    }
}
