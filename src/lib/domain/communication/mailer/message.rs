//! Email message

use crate::domain::communication::email_addresses::EmailAddress;

/// A binary part referenced from the HTML body through its content id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineAttachment {
    /// File name offered to mail clients
    pub filename: String,

    /// Raw content
    pub content: Vec<u8>,

    /// Content-ID without angle brackets, referenced as `cid:<id>`
    pub content_id: String,

    /// MIME type of the content
    pub content_type: String,
}

/// Email message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    /// The recipient of the email
    pub to: EmailAddress,

    /// The subject of the email
    pub subject: String,

    /// The HTML body of the email
    pub html_body: String,

    /// The plain text body of the email
    pub plain_body: String,

    /// Inline attachments for the HTML body
    pub attachments: Vec<InlineAttachment>,
}
