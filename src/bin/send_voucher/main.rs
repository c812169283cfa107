#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Sends a guest WiFi voucher by email

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use voucher_mailer::{
    domain::{
        communication::email_addresses::EmailAddress,
        i18n::DEFAULT_LANGUAGE,
        vouchers::{
            Voucher, VoucherCode, VoucherEmailConfig, VoucherEmailRequest, VoucherMailer,
            VoucherMailerImpl,
        },
    },
    infrastructure::{
        email::smtp::{SMTPConfig, SMTPMailer},
        qr::PngQrCodeEncoder,
    },
};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The SMTP relay configuration
    #[clap(flatten)]
    pub smtp: SMTPConfig,

    /// What the email shows besides the voucher
    #[clap(flatten)]
    pub email: VoucherEmailConfig,

    /// The recipient
    #[clap(long)]
    pub to: EmailAddress,

    /// The voucher code
    #[clap(long, value_parser = parse_code)]
    pub code: VoucherCode,

    /// Language of the email
    #[clap(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Validity in minutes
    #[clap(long, default_value_t = 480)]
    pub duration: u64,

    /// `0` for multi-use, otherwise the number of uses
    #[clap(long, default_value_t = 1)]
    pub quota: u32,

    /// Data limit in megabytes
    #[clap(long)]
    pub data_limit: Option<u64>,

    /// Download limit in Kbps
    #[clap(long)]
    pub download_limit: Option<u64>,

    /// Upload limit in Kbps
    #[clap(long)]
    pub upload_limit: Option<u64>,

    /// Note printed with the voucher
    #[clap(long)]
    pub note: Option<String>,
}

impl Args {
    fn voucher(&self) -> Voucher {
        Voucher {
            code: self.code.clone(),
            duration_minutes: self.duration,
            quota: self.quota,
            data_limit_mb: self.data_limit,
            download_limit_kbps: self.download_limit,
            upload_limit_kbps: self.upload_limit,
            note: self.note.clone(),
        }
    }
}

fn parse_code(raw: &str) -> Result<VoucherCode, String> {
    VoucherCode::new(raw).map_err(|e| e.to_string())
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let request =
        VoucherEmailRequest::new(args.to.clone(), args.voucher()).with_language(&args.language);

    let mailer = Arc::new(SMTPMailer::new(args.smtp)?);

    let service = VoucherMailerImpl::new(mailer, Arc::new(PngQrCodeEncoder::default()), args.email);

    service.send_voucher(&request).await?;

    Ok(())
}
