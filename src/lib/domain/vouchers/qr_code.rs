//! QR code port

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

#[cfg(test)]
use mockall::mock;

/// Errors that can occur while generating a QR code
#[derive(Debug, Error)]
pub enum QrCodeError {
    /// The payload does not fit into a QR symbol
    #[error("could not encode QR code: {0}")]
    Encode(String),

    /// The symbol could not be written as an image
    #[error("could not write QR image: {0}")]
    Image(String),
}

/// Turns text into a scannable QR code image
pub trait QrCodeEncoder: Send + Sync + 'static {
    /// Encodes `text` as PNG bytes
    fn png(&self, text: &str) -> Result<Vec<u8>, QrCodeError>;

    /// Encodes `text` as a `data:image/png;base64,...` URL
    fn data_url(&self, text: &str) -> Result<String, QrCodeError> {
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(self.png(text)?)))
    }
}

#[cfg(test)]
mock! {
    pub QrCodeEncoder {}

    impl QrCodeEncoder for QrCodeEncoder {
        fn png(&self, text: &str) -> Result<Vec<u8>, QrCodeError>;
    }
}
