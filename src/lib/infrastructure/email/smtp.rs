//! SMTP email service implementation

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clap::{ArgAction, Parser};
use lettre::{
    message::{
        header::{ContentDisposition, ContentId, ContentType},
        Mailbox, MultiPart, SinglePart,
    },
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use crate::domain::communication::mailer::{EmailMessage, InlineAttachment, Mailer, MailerError};

/// SMTP configuration
#[derive(Clone, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long = "smtp-host", env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[clap(long = "smtp-port", env = "SMTP_PORT", default_value_t = 25)]
    pub port: u16,

    /// Use implicit TLS instead of STARTTLS
    #[clap(long = "smtp-secure", env = "SMTP_SECURE", default_value_t = false, action = ArgAction::Set)]
    pub secure: bool,

    /// Verify the TLS certificate
    #[clap(long = "smtp-verify-tls", env = "SMTP_VERIFY_TLS", default_value_t = true, action = ArgAction::Set)]
    pub verify_tls: bool,

    /// The SMTP username
    #[clap(long = "smtp-username", env = "SMTP_USERNAME")]
    pub username: Option<String>,

    /// The SMTP password
    #[clap(long = "smtp-password", env = "SMTP_PASSWORD")]
    pub password: Option<String>,

    /// The sender email address
    #[clap(long = "smtp-from", env = "SMTP_FROM")]
    pub sender: String,

    /// Seconds to wait for the relay before giving up on a message
    #[clap(long = "smtp-timeout", env = "SMTP_TIMEOUT", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// SMTP mailer
///
/// Holds one pooled transport; clones share its connections.
#[derive(Debug, Clone)]
pub struct SMTPMailer {
    sender: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
    timeout: Duration,
}

impl SMTPMailer {
    /// Create a new SMTP mailer. Must be called from within a Tokio runtime.
    pub fn new(config: SMTPConfig) -> Result<Self> {
        let sender: Mailbox = config.sender.parse()?;

        let tls = TlsParameters::builder(config.host.clone())
            .dangerous_accept_invalid_certs(!config.verify_tls)
            .build()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(if config.secure {
                Tls::Wrapper(tls)
            } else {
                Tls::Opportunistic(tls)
            });

        if let Some(username) = config.username.filter(|u| !u.is_empty()) {
            builder = builder.credentials(Credentials::new(
                username,
                config.password.unwrap_or_default(),
            ));
        }

        debug!(
            "SMTP relay {}:{} (secure: {})",
            config.host, config.port, config.secure
        );

        Ok(Self {
            sender,
            transport: builder.build(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    fn build_message(&self, message: EmailMessage) -> Result<Message, MailerError> {
        let mut related = MultiPart::related().singlepart(SinglePart::html(message.html_body));

        for attachment in message.attachments {
            related = related.singlepart(inline_part(attachment)?);
        }

        Ok(Message::builder()
            .from(self.sender.clone())
            .to(message.to.as_str().parse()?)
            .subject(message.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::plain(message.plain_body))
                    .multipart(related),
            )?)
    }
}

fn inline_part(attachment: InlineAttachment) -> Result<SinglePart, MailerError> {
    let content_type = ContentType::parse(&attachment.content_type)
        .map_err(|e| anyhow!("invalid content type {}: {e}", attachment.content_type))?;

    Ok(SinglePart::builder()
        .header(content_type)
        .header(ContentDisposition::inline_with_name(&attachment.filename))
        .header(ContentId::from(format!("<{}>", attachment.content_id)))
        .body(attachment.content))
}

#[async_trait]
impl Mailer for SMTPMailer {
    async fn send_email(&self, message: EmailMessage) -> Result<(), MailerError> {
        let email = self.build_message(message)?;

        match tokio::time::timeout(self.timeout, self.transport.send(email)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(MailerError::Timeout(self.timeout)),
        }
    }
}
