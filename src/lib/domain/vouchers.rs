//! Guest WiFi vouchers and their notification email

pub mod emails;
pub mod formatting;

mod config;
mod errors;
mod qr_code;
mod service;
mod voucher;

pub use config::{resolve_logo_url, VoucherEmailConfig, DEFAULT_LOGO_URL};
pub use errors::VoucherEmailError;
pub use qr_code::{QrCodeEncoder, QrCodeError};
pub use service::{VoucherEmailRequest, VoucherMailer, VoucherMailerImpl};
pub use voucher::{Voucher, VoucherCode, VoucherCodeError};
