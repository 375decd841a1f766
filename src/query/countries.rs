//! Country groups for the grouped country filter.
//!
//! Clients filter by a stable key (`"uae"`), not by a display name. Each key
//! owns the display names shown in the filter dropdown and the substrings that
//! identify the country in either language of the fixture.

use crate::i18n::{Language, Localized};

#[derive(Debug)]
pub struct CountryGroup {
    pub key: &'static str,
    name_en: &'static str,
    name_ar: &'static str,
    aliases: &'static [&'static str],
}

impl CountryGroup {
    /// Display name in `language`.
    pub fn name(&self, language: Language) -> &'static str {
        Localized::new(self.name_en, self.name_ar).resolve(language)
    }

    /// Case-insensitive check whether `country` contains any alias.
    pub fn matches(&self, country: &str) -> bool {
        let country = country.to_lowercase();
        self.aliases
            .iter()
            .any(|alias| country.contains(&alias.to_lowercase()))
    }
}

pub static COUNTRY_GROUPS: &[CountryGroup] = &[
    CountryGroup {
        key: "egypt",
        name_en: "Egypt",
        name_ar: "مصر",
        aliases: &["Egypt", "مصر"],
    },
    CountryGroup {
        key: "saudi",
        name_en: "Saudi Arabia",
        name_ar: "السعودية",
        aliases: &["Saudi", "KSA", "السعودية"],
    },
    CountryGroup {
        key: "uae",
        name_en: "United Arab Emirates",
        name_ar: "الإمارات",
        aliases: &["United Arab Emirates", "UAE", "Emirates", "الإمارات"],
    },
    CountryGroup {
        key: "qatar",
        name_en: "Qatar",
        name_ar: "قطر",
        aliases: &["Qatar", "قطر"],
    },
    CountryGroup {
        key: "kuwait",
        name_en: "Kuwait",
        name_ar: "الكويت",
        aliases: &["Kuwait", "الكويت"],
    },
    CountryGroup {
        key: "bahrain",
        name_en: "Bahrain",
        name_ar: "البحرين",
        aliases: &["Bahrain", "البحرين"],
    },
    CountryGroup {
        key: "jordan",
        name_en: "Jordan",
        name_ar: "الأردن",
        aliases: &["Jordan", "الأردن"],
    },
    CountryGroup {
        key: "lebanon",
        name_en: "Lebanon",
        name_ar: "لبنان",
        aliases: &["Lebanon", "لبنان"],
    },
    CountryGroup {
        key: "morocco",
        name_en: "Morocco",
        name_ar: "المغرب",
        aliases: &["Morocco", "Maroc", "المغرب"],
    },
    CountryGroup {
        key: "tunisia",
        name_en: "Tunisia",
        name_ar: "تونس",
        aliases: &["Tunisia", "Tunisie", "تونس"],
    },
];

/// Look up a group by its key.
pub fn find_group(key: &str) -> Option<&'static CountryGroup> {
    COUNTRY_GROUPS.iter().find(|group| group.key == key)
}

/// The first group whose aliases match a country display value.
pub fn group_for_country(country: &str) -> Option<&'static CountryGroup> {
    COUNTRY_GROUPS.iter().find(|group| group.matches(country))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = COUNTRY_GROUPS.iter().map(|g| g.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), COUNTRY_GROUPS.len());
    }

    #[test]
    fn test_find_group() {
        assert_eq!(find_group("uae").unwrap().name(Language::ENGLISH), "United Arab Emirates");
        assert_eq!(find_group("uae").unwrap().name(Language::ARABIC), "الإمارات");
        assert!(find_group("UAE").is_none());
        assert!(find_group("atlantis").is_none());
    }

    #[test]
    fn test_matches_both_languages() {
        let uae = find_group("uae").unwrap();
        assert!(uae.matches("United Arab Emirates"));
        assert!(uae.matches("الإمارات العربية المتحدة"));
        assert!(uae.matches("uae"));
        assert!(!uae.matches("Qatar"));

        let saudi = find_group("saudi").unwrap();
        assert!(saudi.matches("Saudi Arabia"));
        assert!(saudi.matches("المملكة العربية السعودية"));
    }

    #[test]
    fn test_group_for_country() {
        assert_eq!(group_for_country("Egypt").map(|g| g.key), Some("egypt"));
        assert_eq!(group_for_country("المغرب").map(|g| g.key), Some("morocco"));
        assert!(group_for_country("Japan").is_none());
    }

    #[test]
    fn test_every_group_matches_its_own_names() {
        for group in COUNTRY_GROUPS {
            for language in Language::all() {
                assert!(
                    group.matches(group.name(language)),
                    "{} does not match its {} name",
                    group.key,
                    language
                );
            }
        }
    }
}
