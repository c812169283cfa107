//! Catalog backed translator
//!
//! Catalogs live in `locales/<language>/<domain>.json` and are embedded at
//! compile time. Lookups fall back to [`DEFAULT_LANGUAGE`] and finally to the
//! key itself.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::warn;

/// Language used when a catalog or key is missing
pub const DEFAULT_LANGUAGE: &str = "en";

type Catalog = HashMap<String, String>;

macro_rules! catalog {
    ($language:literal, $domain:literal) => {
        (
            ($language, $domain),
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/locales/",
                $language,
                "/",
                $domain,
                ".json"
            )),
        )
    };
}

const SOURCES: &[((&str, &str), &str)] = &[
    catalog!("en", "email"),
    catalog!("de", "email"),
    catalog!("nl", "email"),
    catalog!("fr", "email"),
];

lazy_static! {
    static ref CATALOGS: HashMap<(&'static str, &'static str), Catalog> = SOURCES
        .iter()
        .map(|(key, source)| {
            let catalog: Catalog = serde_json::from_str(source)
                .unwrap_or_else(|e| panic!("invalid catalog {}/{}: {e}", key.0, key.1));
            (*key, catalog)
        })
        .collect();
}

/// Looks up localized strings for one domain and language
#[derive(Debug, Clone)]
pub struct Translator {
    domain: String,
    language: String,
    catalog: Option<&'static Catalog>,
    fallback: Option<&'static Catalog>,
}

impl Translator {
    /// Binds a translator to `domain` and `language`.
    ///
    /// Unknown languages resolve to [`DEFAULT_LANGUAGE`].
    pub fn new(domain: &str, language: &str) -> Self {
        let fallback = lookup(domain, DEFAULT_LANGUAGE).map(|(_, catalog)| catalog);

        let (language, catalog) = match lookup(domain, language) {
            Some((language, catalog)) => (language, Some(catalog)),
            None => {
                warn!("[Translation] no '{domain}' catalog for '{language}', using '{DEFAULT_LANGUAGE}'");
                (DEFAULT_LANGUAGE, fallback)
            }
        };

        Self {
            domain: domain.to_string(),
            language: language.to_string(),
            catalog,
            fallback,
        }
    }

    /// Languages that ship a catalog for `domain`
    pub fn languages(domain: &str) -> Vec<&'static str> {
        SOURCES
            .iter()
            .filter(|((_, d), _)| *d == domain)
            .map(|((language, _), _)| *language)
            .collect()
    }

    /// The resolved language code
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translates `key`
    pub fn t(&self, key: &str) -> String {
        if let Some(value) = self.catalog.and_then(|c| c.get(key)) {
            return value.clone();
        }

        if let Some(value) = self.fallback.and_then(|c| c.get(key)) {
            return value.clone();
        }

        warn!("[Translation] missing key '{key}' in '{}'", self.domain);

        key.to_string()
    }
}

fn lookup(domain: &str, language: &str) -> Option<(&'static str, &'static Catalog)> {
    let language = language.trim().to_ascii_lowercase();

    CATALOGS
        .iter()
        .find(|((l, d), _)| *l == language && *d == domain)
        .map(|((l, _), catalog)| (*l, catalog))
}
