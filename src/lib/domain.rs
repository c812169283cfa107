//! Domain layer

pub mod communication;
pub mod i18n;
pub mod vouchers;
