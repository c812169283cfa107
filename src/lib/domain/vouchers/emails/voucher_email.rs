//! Voucher email template

use askama::Template;

use crate::domain::{
    i18n::Translator,
    vouchers::{
        formatting::{bytes_convert, time_convert},
        Voucher,
    },
};

/// Content-ID of the QR code image
pub const QR_CONTENT_ID: &str = "qr-code";

/// File name of the QR code image
pub const QR_FILENAME: &str = "qr.png";

/// Voucher email template
#[derive(Debug, Template)]
#[template(path = "email/voucher.html")]
pub struct VoucherEmailTemplate<'a> {
    /// Language code of the rendered email
    pub language: &'a str,

    /// Strings for `language`
    pub translator: &'a Translator,

    /// The voucher being sent
    pub voucher: &'a Voucher,

    /// Guest network name
    pub unifi_ssid: &'a str,

    /// Guest network password
    pub unifi_ssid_password: Option<&'a str>,

    /// Header logo
    pub logo_url: &'a str,

    /// Content-ID the QR code image is attached under
    pub qr_content_id: &'a str,
}

impl<'a> VoucherEmailTemplate<'a> {
    /// Translates `key`
    pub fn t(&self, key: &str) -> String {
        self.translator.t(key)
    }

    /// Formats minutes for display
    pub fn time_convert(&self, minutes: &u64) -> String {
        time_convert(*minutes)
    }

    /// Formats a quantity for display, see [`bytes_convert`]
    pub fn bytes_convert(&self, value: u64, unit_offset: usize, per_second: bool) -> String {
        bytes_convert(value, unit_offset, per_second)
    }

    /// Translated usage type of the voucher
    pub fn usage(&self) -> String {
        if self.voucher.is_single_use() {
            self.t("singleUse")
        } else {
            self.t("multiUse")
        }
    }

    /// Data quota, if limited
    pub fn data_limit(&self) -> Option<String> {
        self.voucher
            .data_limit_mb
            .map(|mb| self.bytes_convert(mb, 2, false))
    }

    /// Download rate, if limited
    pub fn download_limit(&self) -> Option<String> {
        self.voucher
            .download_limit_kbps
            .map(|kbps| self.bytes_convert(kbps, 1, true))
    }

    /// Upload rate, if limited
    pub fn upload_limit(&self) -> Option<String> {
        self.voucher
            .upload_limit_kbps
            .map(|kbps| self.bytes_convert(kbps, 1, true))
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        format!(
            "{greeting},\n\n{intro}:\n\n{code}",
            greeting = self.t("greeting"),
            intro = self.t("intro"),
            code = self.voucher.code.formatted()
        )
    }
}
