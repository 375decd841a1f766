//! Per-language values.
//!
//! Every human-readable field of the fixture carries one value per supported
//! language. `Localized<T>` is a fixed-arity record rather than an open map:
//! a fixture entry missing a language (or naming an unknown one) fails to
//! deserialize, so a missing translation is caught when the dataset loads.

use crate::i18n::Language;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Localized<T> {
    pub en: T,
    pub ar: T,
}

impl<T> Localized<T> {
    pub fn new(en: T, ar: T) -> Self {
        Self { en, ar }
    }

    /// Value for the given language.
    pub fn get(&self, language: Language) -> &T {
        if language == Language::ARABIC {
            &self.ar
        } else {
            &self.en
        }
    }

    /// Iterate over `(language, value)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Language, &T)> {
        [(Language::ENGLISH, &self.en), (Language::ARABIC, &self.ar)].into_iter()
    }

    pub fn map<U, F: Fn(&T) -> U>(&self, f: F) -> Localized<U> {
        Localized {
            en: f(&self.en),
            ar: f(&self.ar),
        }
    }
}

impl<T: Clone> Localized<T> {
    /// Owned copy of the value for the given language.
    pub fn resolve(&self, language: Language) -> T {
        self.get(language).clone()
    }
}
