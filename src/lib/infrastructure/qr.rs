//! PNG QR code encoder

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::domain::vouchers::{QrCodeEncoder, QrCodeError};

/// Smallest edge length of generated images, in pixels
pub const DEFAULT_QR_SIZE: u32 = 256;

/// Renders QR codes as grayscale PNG images
#[derive(Clone, Copy, Debug)]
pub struct PngQrCodeEncoder {
    size: u32,
}

impl PngQrCodeEncoder {
    /// Creates an encoder producing images at least `size` pixels wide
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl Default for PngQrCodeEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_QR_SIZE)
    }
}

impl QrCodeEncoder for PngQrCodeEncoder {
    fn png(&self, text: &str) -> Result<Vec<u8>, QrCodeError> {
        let code = QrCode::new(text.as_bytes()).map_err(|e| QrCodeError::Encode(e.to_string()))?;

        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.size, self.size)
            .build();

        let mut png = Vec::new();

        DynamicImage::ImageLuma8(image)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| QrCodeError::Image(e.to_string()))?;

        Ok(png)
    }
}
