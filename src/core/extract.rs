//! Translation call-site scanning.
//!
//! Recognizes `t('key')`, `t("key")` and ``t(`key`)`` where the key is made
//! of ASCII word characters, `.` and `-`. The closing quote must match the
//! opening one. Escaped or nested quotes inside the key are not supported.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::KeyOccurrence;

/// Finds translation keys in buffer text.
///
/// Implementations are stateless: every call rescans the whole text and
/// returns occurrences in left-to-right order.
pub trait KeyExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<KeyOccurrence>;
}

/// One capture group per quote style, since the regex crate has no
/// backreferences. `\b` keeps `format('x')` from matching.
static CALL_SITE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bt\((?:'([A-Za-z0-9_.\-]+)'|"([A-Za-z0-9_.\-]+)"|`([A-Za-z0-9_.\-]+)`)\)"#)
        .expect("call site regex is valid")
});

/// The fixed-pattern `t(<quote>key<quote>)` extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallSiteExtractor;

impl KeyExtractor for CallSiteExtractor {
    fn extract(&self, text: &str) -> Vec<KeyOccurrence> {
        CALL_SITE_REGEX
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let key = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(3))?;
                Some(KeyOccurrence::new(key.as_str(), whole.end()))
            })
            .collect()
    }
}
