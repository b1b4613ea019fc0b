use std::cmp::Ordering;
use std::fmt::Debug;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use icu_provider::DataLocale;
use log::debug;

use crate::config::LookupErrors;

/// A string comparison used to order the runners.
///
/// Any `Fn(&str, &str) -> Ordering` is a collation, which makes it easy to
/// plug in a plain code point comparison with `|a: &str, b: &str| a.cmp(b)`.
pub trait Collation {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

impl<F> Collation for F
where
    F: Fn(&str, &str) -> Ordering,
{
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}

/// Linguistic ordering following the conventions of a locale (Unicode
/// collation with the CLDR tailoring for that language).
pub struct LocaleCollation {
    locale: String,
    collator: Collator,
}

impl LocaleCollation {
    /// Builds a collation for a BCP-47 language tag such as `sv` or `nb-NO`.
    ///
    /// Languages without a specific tailoring fall back to the root
    /// collation.
    pub fn new(tag: &str) -> Result<LocaleCollation, LookupErrors> {
        let locale: Locale = tag
            .parse()
            .map_err(|_| LookupErrors::InvalidLocale(tag.to_string()))?;
        let data_locale: DataLocale = (&locale).into();
        let collator = Collator::try_new(&data_locale, CollatorOptions::new())
            .map_err(|e| {
                debug!("LocaleCollation::new: {:?}: {:?}", tag, e);
                LookupErrors::CollatorUnavailable(tag.to_string())
            })?;
        Ok(LocaleCollation {
            locale: locale.to_string(),
            collator,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Collation for LocaleCollation {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

impl Debug for LocaleCollation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleCollation")
            .field("locale", &self.locale)
            .finish()
    }
}
