//! Voucher email service

use std::{fmt, sync::Arc};

use askama::Template;
use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::{
    communication::{
        email_addresses::EmailAddress,
        mailer::{EmailMessage, InlineAttachment, Mailer},
    },
    i18n::{Translator, DEFAULT_LANGUAGE},
    vouchers::{
        emails::voucher_email::{VoucherEmailTemplate, QR_CONTENT_ID, QR_FILENAME},
        QrCodeEncoder, Voucher, VoucherEmailConfig, VoucherEmailError,
    },
};

/// Translation domain of the voucher email
const TRANSLATION_DOMAIN: &str = "email";

/// A request to email one voucher to one recipient
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoucherEmailRequest {
    /// Who receives the email
    pub recipient: EmailAddress,

    /// The voucher to send
    pub voucher: Voucher,

    /// Language code of the email, `en` unless set
    pub language: String,
}

impl VoucherEmailRequest {
    /// Creates an English request
    pub fn new(recipient: EmailAddress, voucher: Voucher) -> Self {
        Self {
            recipient,
            voucher,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Sets the language of the email
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }
}

/// Voucher email service
#[async_trait]
pub trait VoucherMailer: Clone + Send + Sync + 'static {
    /// Sends a voucher to a guest.
    ///
    /// # Arguments
    /// * `request` - Recipient, voucher and language of the email.
    ///
    /// # Returns
    /// - [`Ok`] once the relay accepted the email.
    /// - [`Err`] containing a [`VoucherEmailError`] if it could not be composed or delivered.
    async fn send_voucher(&self, request: &VoucherEmailRequest) -> Result<(), VoucherEmailError>;
}

/// Voucher email service implementation
pub struct VoucherMailerImpl<M, Q>
where
    M: Mailer,
    Q: QrCodeEncoder,
{
    mailer: Arc<M>,
    qr_codes: Arc<Q>,
    config: VoucherEmailConfig,
}

impl<M, Q> VoucherMailerImpl<M, Q>
where
    M: Mailer,
    Q: QrCodeEncoder,
{
    /// Creates a new voucher email service around a shared transport.
    pub fn new(mailer: Arc<M>, qr_codes: Arc<Q>, config: VoucherEmailConfig) -> Self {
        Self {
            mailer,
            qr_codes,
            config,
        }
    }

    /// Builds the message for `request` without sending it.
    pub fn compose(&self, request: &VoucherEmailRequest) -> Result<EmailMessage, VoucherEmailError> {
        let translator = Translator::new(TRANSLATION_DOMAIN, &request.language);

        let qr_code = self.qr_codes.png(request.voucher.code.as_str())?;

        let template = VoucherEmailTemplate {
            language: translator.language(),
            translator: &translator,
            voucher: &request.voucher,
            unifi_ssid: &self.config.ssid,
            unifi_ssid_password: self
                .config
                .ssid_password
                .as_deref()
                .filter(|password| !password.trim().is_empty()),
            logo_url: self.config.logo_url(),
            qr_content_id: QR_CONTENT_ID,
        };

        let html = css_inline::inline(&template.render()?)?;
        let plain = template.render_plain();

        Ok(EmailMessage {
            to: request.recipient.clone(),
            subject: translator.t("title"),
            html_body: html,
            plain_body: plain,
            attachments: vec![InlineAttachment {
                filename: QR_FILENAME.to_string(),
                content: qr_code,
                content_id: QR_CONTENT_ID.to_string(),
                content_type: "image/png".to_string(),
            }],
        })
    }
}

impl<M, Q> Clone for VoucherMailerImpl<M, Q>
where
    M: Mailer,
    Q: QrCodeEncoder,
{
    fn clone(&self) -> Self {
        Self {
            mailer: Arc::clone(&self.mailer),
            qr_codes: Arc::clone(&self.qr_codes),
            config: self.config.clone(),
        }
    }
}

impl<M, Q> fmt::Debug for VoucherMailerImpl<M, Q>
where
    M: Mailer,
    Q: QrCodeEncoder,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoucherMailerImpl")
            .field("mailer", &"Mailer")
            .field("qr_codes", &"QrCodeEncoder")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl<M, Q> VoucherMailer for VoucherMailerImpl<M, Q>
where
    M: Mailer,
    Q: QrCodeEncoder,
{
    async fn send_voucher(&self, request: &VoucherEmailRequest) -> Result<(), VoucherEmailError> {
        let message = self.compose(request).map_err(|e| {
            error!("[Mail] Error when composing mail: {e}");
            e
        })?;

        if let Err(e) = self.mailer.send_email(message).await {
            error!("[Mail] Error when sending mail");
            error!("{e:?}");

            return Err(e.into());
        }

        info!("[Mail] Sent to: {}", request.recipient);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::anyhow;
    use testresult::TestResult;
    use tracing::{
        field::{Field, Visit},
        Event, Level, Subscriber,
    };
    use tracing_subscriber::{
        layer::{Context, SubscriberExt},
        Layer,
    };

    use crate::domain::{
        communication::mailer::{tests::MockMailer, MailerError},
        vouchers::{tests::MockQrCodeEncoder, QrCodeError, VoucherCode},
    };

    use super::*;

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G'];

    /// Collects `(level, message)` of every event
    #[derive(Clone, Default)]
    struct CapturedEvents(Arc<Mutex<Vec<(Level, String)>>>);

    impl CapturedEvents {
        fn at(&self, level: Level) -> Vec<String> {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, message)| message.clone())
                .collect()
        }
    }

    impl<S: Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);

            self.0
                .lock()
                .unwrap()
                .push((*event.metadata().level(), visitor.0));
        }
    }

    #[derive(Default)]
    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    fn config() -> VoucherEmailConfig {
        VoucherEmailConfig {
            ssid: "Hotel Guests".to_string(),
            ssid_password: Some("welcome123".to_string()),
            logo_url: None,
        }
    }

    fn qr_codes() -> MockQrCodeEncoder {
        let mut qr_codes = MockQrCodeEncoder::new();

        qr_codes
            .expect_png()
            .withf(|text| text == "ABCDE12345")
            .returning(|_| Ok(PNG.to_vec()));

        qr_codes
    }

    fn request(language: &str) -> VoucherEmailRequest {
        VoucherEmailRequest::new(
            EmailAddress::new_unchecked("user@example.com"),
            Voucher::new(VoucherCode::new_unchecked("ABCDE12345"), 480),
        )
        .with_language(language)
    }

    #[test]
    fn test_request_defaults_to_english() {
        let request = VoucherEmailRequest::new(
            EmailAddress::new_unchecked("user@example.com"),
            Voucher::new(VoucherCode::new_unchecked("ABCDE12345"), 480),
        );

        assert_eq!(request.language, "en");
    }

    #[test]
    fn test_compose_message() -> TestResult {
        let service =
            VoucherMailerImpl::new(Arc::new(MockMailer::new()), Arc::new(qr_codes()), config());

        let message = service.compose(&request("en"))?;

        assert_eq!(message.to.as_str(), "user@example.com");
        assert_eq!(message.subject, "WiFi Voucher Code");
        assert_eq!(
            message.plain_body,
            "Hello,\n\nHere is your voucher code:\n\nABCDE-12345"
        );
        assert!(message.html_body.contains("ABCDE-12345"));
        assert!(message.html_body.contains("cid:qr-code"));
        assert!(message.html_body.contains("Hotel Guests"));
        assert!(message.html_body.contains("logo_192x192.png"));

        assert_eq!(message.attachments.len(), 1);
        assert_eq!(message.attachments[0].filename, "qr.png");
        assert_eq!(message.attachments[0].content_id, "qr-code");
        assert_eq!(message.attachments[0].content_type, "image/png");
        assert_eq!(message.attachments[0].content, PNG);

        Ok(())
    }

    #[test]
    fn test_compose_inlines_styles() -> TestResult {
        let service =
            VoucherMailerImpl::new(Arc::new(MockMailer::new()), Arc::new(qr_codes()), config());

        let message = service.compose(&request("en"))?;

        assert!(!message.html_body.contains("<style>"));
        assert!(message.html_body.contains("letter-spacing: 4px"));

        Ok(())
    }

    #[test]
    fn test_compose_localized_message() -> TestResult {
        let service =
            VoucherMailerImpl::new(Arc::new(MockMailer::new()), Arc::new(qr_codes()), config());

        let message = service.compose(&request("nl"))?;

        assert_eq!(message.subject, "WiFi Vouchercode");
        assert_eq!(
            message.plain_body,
            "Hallo,\n\nHier is je vouchercode:\n\nABCDE-12345"
        );
        assert!(message.html_body.contains(r#"lang="nl""#));

        Ok(())
    }

    #[test]
    fn test_compose_unsupported_language_falls_back() -> TestResult {
        let service =
            VoucherMailerImpl::new(Arc::new(MockMailer::new()), Arc::new(qr_codes()), config());

        let message = service.compose(&request("tlh"))?;

        assert_eq!(message.subject, "WiFi Voucher Code");
        assert!(message.html_body.contains(r#"lang="en""#));

        Ok(())
    }

    #[test]
    fn test_compose_uses_logo_override() -> TestResult {
        let mut config = config();
        config.logo_url = Some("https://cdn.example.com/logo.png".to_string());

        let service = VoucherMailerImpl::new(Arc::new(MockMailer::new()), Arc::new(qr_codes()), config);

        let message = service.compose(&request("en"))?;

        assert!(message.html_body.contains("https://cdn.example.com/logo.png"));
        assert!(!message.html_body.contains("logo_192x192.png"));

        Ok(())
    }

    #[test]
    fn test_compose_blank_ssid_password_is_hidden() -> TestResult {
        let mut config = config();
        config.ssid_password = Some("   ".to_string());

        let service = VoucherMailerImpl::new(Arc::new(MockMailer::new()), Arc::new(qr_codes()), config);

        let message = service.compose(&request("en"))?;

        assert!(message.html_body.contains("Hotel Guests"));
        assert!(!message.html_body.contains("Password"));

        Ok(())
    }

    #[tokio::test]
    async fn test_send_voucher_success() -> TestResult {
        let events = CapturedEvents::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(events.clone()));

        let mut mailer = MockMailer::new();

        mailer
            .expect_send_email()
            .withf(|message| {
                message.to.as_str() == "user@example.com"
                    && message.plain_body == "Hello,\n\nHere is your voucher code:\n\nABCDE-12345"
                    && message.attachments.len() == 1
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = VoucherMailerImpl::new(Arc::new(mailer), Arc::new(qr_codes()), config());

        service.send_voucher(&request("en")).await?;

        assert_eq!(
            events.at(Level::INFO),
            vec!["[Mail] Sent to: user@example.com".to_string()]
        );
        assert!(events.at(Level::ERROR).is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_send_voucher_transport_failure() -> TestResult {
        let events = CapturedEvents::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(events.clone()));

        let mut mailer = MockMailer::new();

        mailer
            .expect_send_email()
            .times(1)
            .returning(|_| Err(MailerError::UnknownError(anyhow!("Connection refused"))));

        let service = VoucherMailerImpl::new(Arc::new(mailer), Arc::new(qr_codes()), config());

        let result = service.send_voucher(&request("en")).await;

        let err = result.expect_err("delivery should fail");
        assert_eq!(err.to_string(), "[Mail] Connection refused");
        assert!(matches!(err, VoucherEmailError::Delivery(_)));

        assert!(events.at(Level::INFO).is_empty());

        let errors = events.at(Level::ERROR);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "[Mail] Error when sending mail");
        assert!(errors[1].contains("Connection refused"));

        Ok(())
    }

    #[tokio::test]
    async fn test_send_voucher_qr_failure_is_not_sent() -> TestResult {
        let mut qr_codes = MockQrCodeEncoder::new();

        qr_codes
            .expect_png()
            .times(1)
            .returning(|_| Err(QrCodeError::Encode("data too long".to_string())));

        let mut mailer = MockMailer::new();

        mailer.expect_send_email().times(0);

        let service = VoucherMailerImpl::new(Arc::new(mailer), Arc::new(qr_codes), config());

        let result = service.send_voucher(&request("en")).await;

        let err = result.expect_err("QR generation should fail");
        assert!(err.to_string().starts_with("[Mail] "));
        assert!(matches!(err, VoucherEmailError::QrCode(_)));

        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_sends_share_transport() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer.expect_send_email().times(3).returning(|_| Ok(()));

        let service = VoucherMailerImpl::new(Arc::new(mailer), Arc::new(qr_codes()), config());

        let requests = ["en", "de", "fr"].map(request);

        let (a, b, c) = tokio::join!(
            service.send_voucher(&requests[0]),
            service.send_voucher(&requests[1]),
            service.send_voucher(&requests[2]),
        );

        a?;
        b?;
        c?;

        Ok(())
    }
}
