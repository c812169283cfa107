//! Email templates

pub mod voucher_email;
