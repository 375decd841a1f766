//! Language registry: the languages the event catalogue is published in.
//!
//! The table is static. `LanguageRegistry::get()` resolves the canonical
//! entry once, on first access, and hands out the same instance afterwards.

use std::sync::OnceLock;

/// Writing direction of a language, used by clients to lay out text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// HTML `dir` attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 code, also the key of every `Localized` field
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub direction: TextDirection,
    /// Fallback when a request names no usable language
    pub is_canonical: bool,
    pub enabled: bool,
}

static LANGUAGES: [LanguageConfig; 2] = [
    LanguageConfig {
        code: "en",
        name: "English",
        native_name: "English",
        direction: TextDirection::Ltr,
        is_canonical: true,
        enabled: true,
    },
    LanguageConfig {
        code: "ar",
        name: "Arabic",
        native_name: "العربية",
        direction: TextDirection::Rtl,
        is_canonical: false,
        enabled: true,
    },
];

pub struct LanguageRegistry {
    languages: &'static [LanguageConfig],
    canonical: usize,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry::from_table(&LANGUAGES))
    }

    /// The first entry marked canonical wins; a table with none falls back
    /// to its first entry.
    fn from_table(languages: &'static [LanguageConfig]) -> Self {
        let canonical = languages
            .iter()
            .position(|lang| lang.is_canonical)
            .unwrap_or(0);

        Self {
            languages,
            canonical,
        }
    }

    pub fn get_by_code(&self, code: &str) -> Option<&'static LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Enabled languages, canonical first.
    pub fn list_enabled(&self) -> Vec<&'static LanguageConfig> {
        let canonical = self.canonical();
        std::iter::once(canonical)
            .chain(
                self.languages
                    .iter()
                    .filter(|lang| lang.enabled && lang.code != canonical.code),
            )
            .collect()
    }

    pub fn canonical(&self) -> &'static LanguageConfig {
        &self.languages[self.canonical]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static NO_CANONICAL: [LanguageConfig; 1] = [LanguageConfig {
        code: "fr",
        name: "French",
        native_name: "Français",
        direction: TextDirection::Ltr,
        is_canonical: false,
        enabled: true,
    }];

    #[test]
    fn test_registry_is_shared() {
        assert!(std::ptr::eq(LanguageRegistry::get(), LanguageRegistry::get()));
    }

    #[test]
    fn test_english_is_canonical_ltr() {
        let config = LanguageRegistry::get().get_by_code("en").unwrap();

        assert_eq!(config.name, "English");
        assert_eq!(config.direction, TextDirection::Ltr);
        assert!(config.is_canonical);
        assert_eq!(LanguageRegistry::get().canonical().code, "en");
    }

    #[test]
    fn test_arabic_is_rtl() {
        let config = LanguageRegistry::get().get_by_code("ar").unwrap();

        assert_eq!(config.native_name, "العربية");
        assert_eq!(config.direction.as_str(), "rtl");
        assert!(!config.is_canonical);
    }

    #[test]
    fn test_unknown_code() {
        assert!(LanguageRegistry::get().get_by_code("fr").is_none());
        assert!(LanguageRegistry::get().get_by_code("EN").is_none());
    }

    #[test]
    fn test_list_enabled_puts_canonical_first() {
        let codes: Vec<_> = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|lang| lang.code)
            .collect();

        assert_eq!(codes, vec!["en", "ar"]);
    }

    #[test]
    fn test_table_without_canonical_uses_first_entry() {
        let registry = LanguageRegistry::from_table(&NO_CANONICAL);
        assert_eq!(registry.canonical().code, "fr");
    }
}
