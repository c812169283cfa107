//! Voucher email configuration

use clap::Parser;

/// Logo shown in the email header when no override is configured
pub const DEFAULT_LOGO_URL: &str =
    "https://github.com/glenndehaan/unifi-voucher-site/blob/master/public/images/icon/logo_192x192.png?raw=true";

/// Display-only settings rendered into every voucher email
#[derive(Clone, Debug, Default, Parser)]
pub struct VoucherEmailConfig {
    /// The guest network name
    #[clap(long, env = "UNIFI_SSID")]
    pub ssid: String,

    /// The guest network password, if the network is secured
    #[clap(long, env = "UNIFI_SSID_PASSWORD")]
    pub ssid_password: Option<String>,

    /// Overrides the logo shown in the email header
    #[clap(long, env = "EMAIL_LOGO_URL")]
    pub logo_url: Option<String>,
}

impl VoucherEmailConfig {
    /// The logo URL to render
    pub fn logo_url(&self) -> &str {
        resolve_logo_url(self.logo_url.as_deref())
    }
}

/// Uses `override_url` verbatim unless it is missing or blank.
pub fn resolve_logo_url(override_url: Option<&str>) -> &str {
    match override_url {
        Some(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_LOGO_URL,
    }
}
