//! Localized strings

mod translator;

pub use translator::{Translator, DEFAULT_LANGUAGE};
