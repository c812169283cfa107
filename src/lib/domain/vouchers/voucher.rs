//! Voucher

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

lazy_static! {
    static ref VOUCHER_CODE_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]{6,}$").unwrap();
}

/// Number of characters shown before the dash of a formatted code
const CODE_GROUP_LEN: usize = 5;

/// An error that can occur when creating a voucher code
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoucherCodeError {
    /// The code contains something other than ASCII letters and digits, or is too short
    #[error("voucher code must be at least 6 alphanumeric characters")]
    InvalidVoucherCode,
}

/// A voucher code as issued by the controller, e.g. `ABCDE12345`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct VoucherCode(String);

impl VoucherCode {
    /// Create a new voucher code
    pub fn new(raw: &str) -> Result<Self, VoucherCodeError> {
        let trimmed = raw.trim();

        if !VOUCHER_CODE_REGEX.is_match(trimmed) {
            return Err(VoucherCodeError::InvalidVoucherCode);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Wraps a string without validating it
    #[cfg(test)]
    pub(crate) fn new_unchecked(raw: &str) -> Self {
        Self(raw.to_string())
    }

    /// The raw code, as encoded in the QR code
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The code split for display, e.g. `ABCDE-12345`
    pub fn formatted(&self) -> String {
        match self.0.char_indices().nth(CODE_GROUP_LEN) {
            Some((split, _)) => format!("{}-{}", &self.0[..split], &self.0[split..]),
            None => self.0.clone(),
        }
    }
}

impl TryFrom<String> for VoucherCode {
    type Error = VoucherCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl fmt::Display for VoucherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A guest voucher
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Voucher {
    /// The access code
    pub code: VoucherCode,

    /// Validity once activated, in minutes
    #[serde(default)]
    pub duration_minutes: u64,

    /// `0` for multi-use, otherwise the number of allowed uses
    #[serde(default)]
    pub quota: u32,

    /// Data usage quota in megabytes
    #[serde(default)]
    pub data_limit_mb: Option<u64>,

    /// Download rate limit in Kbps
    #[serde(default)]
    pub download_limit_kbps: Option<u64>,

    /// Upload rate limit in Kbps
    #[serde(default)]
    pub upload_limit_kbps: Option<u64>,

    /// Free text printed with the voucher
    #[serde(default)]
    pub note: Option<String>,
}

impl Voucher {
    /// Creates a single-use voucher without limits
    pub fn new(code: VoucherCode, duration_minutes: u64) -> Self {
        Self {
            code,
            duration_minutes,
            quota: 1,
            data_limit_mb: None,
            download_limit_kbps: None,
            upload_limit_kbps: None,
            note: None,
        }
    }

    /// Whether a single guest may use the voucher
    pub fn is_single_use(&self) -> bool {
        self.quota == 1
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_formatted_code() -> TestResult {
        let code = VoucherCode::new("ABCDE12345")?;

        assert_eq!(code.formatted(), "ABCDE-12345");

        Ok(())
    }

    #[test]
    fn test_formatted_shortest_code() -> TestResult {
        let code = VoucherCode::new("123456")?;

        assert_eq!(code.formatted(), "12345-6");

        Ok(())
    }

    #[test]
    fn test_short_code_is_invalid() {
        assert_eq!(
            VoucherCode::new("ABC12"),
            Err(VoucherCodeError::InvalidVoucherCode)
        );
    }

    #[test]
    fn test_code_with_symbols_is_invalid() {
        assert_eq!(
            VoucherCode::new("ABCDE-12345"),
            Err(VoucherCodeError::InvalidVoucherCode)
        );
    }

    #[test]
    fn test_voucher_from_json() -> TestResult {
        let voucher: Voucher = serde_json::from_str(
            r#"{"code": "1234567890", "duration_minutes": 1440, "quota": 0, "data_limit_mb": 2048}"#,
        )?;

        assert_eq!(voucher.code.as_str(), "1234567890");
        assert_eq!(voucher.duration_minutes, 1440);
        assert!(!voucher.is_single_use());
        assert_eq!(voucher.data_limit_mb, Some(2048));
        assert_eq!(voucher.download_limit_kbps, None);

        Ok(())
    }

    #[test]
    fn test_voucher_from_json_rejects_bad_code() {
        let result = serde_json::from_str::<Voucher>(r#"{"code": "abc"}"#);

        assert!(result.is_err());
    }
}
