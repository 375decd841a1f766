//! `Language`: a language code that is known to be enabled.
//!
//! Values only come from the registry (`from_code`, `canonical`, `all`) or the
//! two constants, so every `Language` selects a real field of a `Localized`
//! record.

use crate::i18n::{LanguageConfig, LanguageRegistry, TextDirection};
use anyhow::{bail, Result};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const ARABIC: Language = Language { code: "ar" };

    /// Exact, case-sensitive lookup. Unknown and disabled codes are errors.
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    pub fn canonical() -> Language {
        Language {
            code: LanguageRegistry::get().canonical().code,
        }
    }

    /// Enabled languages, canonical first.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Registry entry for this language.
    ///
    /// # Panics
    /// Only if the constants and the registry table disagree.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn direction(&self) -> TextDirection {
        self.config().direction
    }

    pub fn is_rtl(&self) -> bool {
        self.direction() == TextDirection::Rtl
    }

    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

/// Serialized as the bare code (`"en"`).
impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Language::ENGLISH.code(), "en");
        assert_eq!(Language::ARABIC.code(), "ar");
        assert!(Language::ENGLISH.is_canonical());
        assert!(!Language::ARABIC.is_canonical());
    }

    #[test]
    fn test_from_code_arabic() {
        let language = Language::from_code("ar").unwrap();
        assert_eq!(language, Language::ARABIC);
        assert_eq!(language.name(), "Arabic");
        assert_eq!(language.native_name(), "العربية");
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        assert!(Language::from_code("AR").is_err());
    }

    #[test]
    fn test_canonical_and_default_are_english() {
        assert_eq!(Language::canonical(), Language::ENGLISH);
        assert_eq!(Language::default(), Language::ENGLISH);
    }

    #[test]
    fn test_all_languages() {
        assert_eq!(Language::all(), vec![Language::ENGLISH, Language::ARABIC]);
    }

    #[test]
    fn test_direction() {
        assert!(!Language::ENGLISH.is_rtl());
        assert!(Language::ARABIC.is_rtl());
        assert_eq!(Language::ARABIC.direction().as_str(), "rtl");
    }

    #[test]
    fn test_display_and_serialize_use_code() {
        assert_eq!(Language::ARABIC.to_string(), "ar");
        assert_eq!(
            serde_json::to_string(&Language::ENGLISH).unwrap(),
            "\"en\""
        );
    }
}
