//! Projection of fixture records onto a single language.

use crate::i18n::Language;
use crate::model::{Event, LocalizedEvent, LocalizedLocation, LocalizedOrganizer, Location, Organizer};

impl LocalizedEvent {
    /// Flatten every localized field to `language`. Language-independent
    /// fields are copied unchanged; `end_date` stays `None` when absent.
    pub fn localize(&self, language: Language) -> Event {
        Event {
            id: self.id.clone(),
            slug: self.slug.resolve(language),
            title: self.title.resolve(language),
            description: self.description.resolve(language),
            long_description: self.long_description.resolve(language),
            date: self.date,
            end_date: self.end_date,
            location: self.location.localize(language),
            category: self.category.resolve(language),
            tags: self.tags.resolve(language),
            image_url: self.image_url.clone(),
            price: self.price,
            attendee_count: self.attendee_count,
            max_attendees: self.max_attendees,
            organizer: self.organizer.localize(language),
            featured: self.featured,
            created_at: self.created_at,
        }
    }
}

impl LocalizedLocation {
    pub fn localize(&self, language: Language) -> Location {
        Location {
            venue: self.venue.resolve(language),
            city: self.city.resolve(language),
            state: self.state.resolve(language),
            country: self.country.resolve(language),
        }
    }
}

impl LocalizedOrganizer {
    pub fn localize(&self, language: Language) -> Organizer {
        Organizer {
            name: self.name.resolve(language),
            avatar: self.avatar.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Localized;
    use crate::model::Price;

    fn text(en: &str, ar: &str) -> Localized<String> {
        Localized::new(en.to_string(), ar.to_string())
    }

    fn record() -> LocalizedEvent {
        LocalizedEvent {
            id: "evt-1".to_string(),
            slug: text("tech-summit-dubai", "قمة-التقنية-دبي"),
            title: text("Tech Summit Dubai", "قمة التقنية دبي"),
            description: text("Innovation", "ابتكار"),
            long_description: text("Three days", "ثلاثة أيام"),
            date: "2025-12-15T09:00:00Z".parse().unwrap(),
            end_date: Some("2025-12-17T18:00:00Z".parse().unwrap()),
            location: LocalizedLocation {
                venue: text("World Trade Centre", "مركز التجارة العالمي"),
                city: text("Dubai", "دبي"),
                state: text("Dubai", "دبي"),
                country: text("United Arab Emirates", "الإمارات العربية المتحدة"),
            },
            category: text("Technology", "تقنية"),
            tags: Localized::new(
                vec!["AI".to_string(), "Cloud".to_string()],
                vec!["ذكاء اصطناعي".to_string()],
            ),
            image_url: "https://img.example.com/tech.jpg".to_string(),
            price: Price::Amount(499.0),
            attendee_count: 1200,
            max_attendees: 5000,
            organizer: LocalizedOrganizer {
                name: text("Dubai Tech Council", "مجلس دبي للتقنية"),
                avatar: "https://img.example.com/council.png".to_string(),
            },
            featured: true,
            created_at: "2025-09-01T10:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_localize_english() {
        let event = record().localize(Language::ENGLISH);

        assert_eq!(event.id, "evt-1");
        assert_eq!(event.slug, "tech-summit-dubai");
        assert_eq!(event.title, "Tech Summit Dubai");
        assert_eq!(event.location.country, "United Arab Emirates");
        assert_eq!(event.organizer.name, "Dubai Tech Council");
        assert_eq!(event.tags, vec!["AI", "Cloud"]);
    }

    #[test]
    fn test_localize_arabic_resolves_nested_fields() {
        let event = record().localize(Language::ARABIC);

        assert_eq!(event.title, "قمة التقنية دبي");
        assert_eq!(event.category, "تقنية");
        assert_eq!(event.location.venue, "مركز التجارة العالمي");
        assert_eq!(event.location.city, "دبي");
        assert_eq!(event.organizer.name, "مجلس دبي للتقنية");
        assert_eq!(event.tags, vec!["ذكاء اصطناعي"]);
    }

    #[test]
    fn test_language_independent_fields_pass_through() {
        let source = record();
        let en = source.localize(Language::ENGLISH);
        let ar = source.localize(Language::ARABIC);

        for event in [&en, &ar] {
            assert_eq!(event.date, source.date);
            assert_eq!(event.end_date, source.end_date);
            assert_eq!(event.price, Price::Amount(499.0));
            assert_eq!(event.attendee_count, 1200);
            assert_eq!(event.max_attendees, 5000);
            assert_eq!(event.image_url, source.image_url);
            assert_eq!(event.organizer.avatar, source.organizer.avatar);
            assert!(event.featured);
            assert_eq!(event.created_at, source.created_at);
        }
    }

    #[test]
    fn test_missing_end_date_stays_absent() {
        let mut source = record();
        source.end_date = None;

        let event = source.localize(Language::ENGLISH);
        assert!(event.end_date.is_none());

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("endDate").is_none());
    }

    #[test]
    fn test_projection_is_idempotent() {
        let source = record();
        for language in Language::all() {
            assert_eq!(source.localize(language), source.localize(language));
        }
    }
}
