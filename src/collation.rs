//! Locale-aware string ordering for catalog listings.
//!
//! Artist and album names are sorted the way a Spanish-speaking reader
//! expects: accents and case do not push "Álvaro" after "Zoe" or "abba"
//! after "Bee Gees". When two strings collate equal, code-point order
//! decides, so sorting never depends on input order.

use std::cmp::Ordering;
use std::fmt;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use tracing::warn;

/// String comparator used for every sorted listing.
pub struct Collation {
    collator: Option<Collator>,
}

impl Collation {
    /// Spanish collation, falling back to code-point order if the collator
    /// data is unavailable.
    pub fn spanish() -> Self {
        match Collator::try_new(&locale!("es").into(), CollatorOptions::new()) {
            Ok(collator) => Self {
                collator: Some(collator),
            },
            Err(e) => {
                warn!("Spanish collator unavailable, using code-point order: {}", e);
                Self::codepoint()
            }
        }
    }

    /// Plain code-point order.
    pub fn codepoint() -> Self {
        Self { collator: None }
    }

    /// Whether locale rules are in effect.
    pub fn is_locale_aware(&self) -> bool {
        self.collator.is_some()
    }

    /// Compare two strings. Total: only identical strings compare equal.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => Ordering::Equal,
        };
        primary.then_with(|| a.cmp(b))
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::spanish()
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation")
            .field("locale_aware", &self.is_locale_aware())
            .finish()
    }
}
