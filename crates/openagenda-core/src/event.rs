//! Event record as served by the OpenAgenda API.
//!
//! This module defines [`Event`], the decoded shape of one event as returned
//! by the event endpoints (with `detailed=1`). Everything except the uid is
//! optional on the wire; unknown JSON keys are ignored so that upstream
//! additions do not break decoding.
//!
//! The event is consumed by the snippet builder, which turns it into a
//! Schema.org [`EventSnippet`](crate::schema::EventSnippet).

use serde::{Deserialize, Serialize};

use crate::locale::LocalizedText;

/// One occurrence of an event, as begin/end timestamps.
///
/// Timestamps are carried verbatim: the API serves ISO 8601 text and the
/// snippet builder copies it through without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// When this occurrence starts.
    pub begin: String,
    /// When this occurrence ends.
    pub end: String,
}

impl Timing {
    /// Creates a timing from begin/end timestamps.
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }
}

/// The `attendanceMode` field: a numeric id plus an optional display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceModeInfo {
    /// Numeric mode id (1 offline, 2 online, 3 mixed).
    pub id: Option<i64>,
    /// Human-readable label, localized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<LocalizedText>,
}

/// The `status` field: a numeric id plus an optional display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInfo {
    /// Numeric status id (1 scheduled .. 6 cancelled).
    pub id: Option<i64>,
    /// Human-readable label, localized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<LocalizedText>,
}

/// One registration channel (ticket link, phone number, email, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEntry {
    /// The channel kind as served by the API (e.g. "link", "phone", "email").
    #[serde(rename = "type")]
    pub kind: String,
    /// The channel value (URL, phone number, ...).
    pub value: String,
}

impl RegistrationEntry {
    /// Creates a registration entry.
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// The event illustration, split into a CDN base and a filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventImage {
    /// CDN base, usually ending with a slash.
    #[serde(default)]
    pub base: String,
    /// Filename appended to the base.
    #[serde(default)]
    pub filename: String,
}

impl EventImage {
    /// Creates an image reference from a base and a filename.
    pub fn new(base: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            filename: filename.into(),
        }
    }

    /// Returns the full image URL (plain concatenation, as the API intends).
    pub fn url(&self) -> String {
        format!("{}{}", self.base, self.filename)
    }
}

/// The physical venue of an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLocation {
    /// Venue name.
    pub name: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Region or state.
    pub region: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// ISO country code.
    pub country_code: Option<String>,
    /// Latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    pub longitude: Option<f64>,
}

/// The audience age range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeRange {
    /// Minimum age in years. Missing values decode as 0.
    #[serde(default)]
    pub min: f64,
    /// Maximum age in years. Missing values decode as 0.
    #[serde(default)]
    pub max: f64,
}

/// A decoded OpenAgenda event.
///
/// Field names follow the API's camelCase JSON keys. Translatable fields
/// decode through [`LocalizedText`], which accepts both the plain-string and
/// the per-locale-map shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event identifier.
    pub uid: u64,

    /// URL slug of the event.
    pub slug: Option<String>,

    /// Moderation state.
    pub state: Option<i64>,

    /// Event title.
    pub title: Option<LocalizedText>,

    /// Short description.
    pub description: Option<LocalizedText>,

    /// Long-form description (served with `detailed=1`).
    pub long_description: Option<LocalizedText>,

    /// Occurrences in chronological order.
    #[serde(default)]
    pub timings: Vec<Timing>,

    /// Whether the event happens on site, online, or both.
    pub attendance_mode: Option<AttendanceModeInfo>,

    /// Scheduling status.
    pub status: Option<StatusInfo>,

    /// Registration channels in document order.
    #[serde(default)]
    pub registration: Vec<RegistrationEntry>,

    /// Illustration image.
    pub image: Option<EventImage>,

    /// Physical venue.
    pub location: Option<EventLocation>,

    /// Join URL for online attendance.
    pub online_access_link: Option<String>,

    /// Audience age range.
    pub age: Option<AgeRange>,

    /// Creation timestamp, verbatim.
    pub created_at: Option<String>,

    /// Last-update timestamp, verbatim.
    pub updated_at: Option<String>,
}

impl Event {
    /// Creates a new event with the given uid and everything else unset.
    pub fn new(uid: u64) -> Self {
        Self {
            uid,
            slug: None,
            state: None,
            title: None,
            description: None,
            long_description: None,
            timings: Vec::new(),
            attendance_mode: None,
            status: None,
            registration: Vec::new(),
            image: None,
            location: None,
            online_access_link: None,
            age: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<LocalizedText>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<LocalizedText>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the long description.
    pub fn with_long_description(mut self, long_description: impl Into<LocalizedText>) -> Self {
        self.long_description = Some(long_description.into());
        self
    }

    /// Builder method to set the slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Builder method to append an occurrence.
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timings.push(timing);
        self
    }

    /// Builder method to set the attendance mode id.
    pub fn with_attendance_mode(mut self, id: i64) -> Self {
        self.attendance_mode = Some(AttendanceModeInfo {
            id: Some(id),
            label: None,
        });
        self
    }

    /// Builder method to set the status id.
    pub fn with_status(mut self, id: i64) -> Self {
        self.status = Some(StatusInfo {
            id: Some(id),
            label: None,
        });
        self
    }

    /// Builder method to append a registration channel.
    pub fn with_registration_entry(mut self, entry: RegistrationEntry) -> Self {
        self.registration.push(entry);
        self
    }

    /// Builder method to set the image.
    pub fn with_image(mut self, image: EventImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Builder method to set the venue.
    pub fn with_location(mut self, location: EventLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Builder method to set the online access link.
    pub fn with_online_access_link(mut self, link: impl Into<String>) -> Self {
        self.online_access_link = Some(link.into());
        self
    }

    /// Builder method to set the age range.
    pub fn with_age(mut self, min: f64, max: f64) -> Self {
        self.age = Some(AgeRange { min, max });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_creation() {
        let event = Event::new(123456);
        assert_eq!(event.uid, 123456);
        assert!(event.title.is_none());
        assert!(event.timings.is_empty());
        assert!(event.registration.is_empty());
    }

    #[test]
    fn event_builder() {
        let event = Event::new(123456)
            .with_title("Concert")
            .with_slug("concert-au-parc")
            .with_timing(Timing::new("2024-06-01T20:00:00+02:00", "2024-06-01T22:00:00+02:00"))
            .with_attendance_mode(2)
            .with_status(1)
            .with_online_access_link("https://live.example.test/concert")
            .with_age(6.0, 12.0);

        assert_eq!(event.title, Some(LocalizedText::plain("Concert")));
        assert_eq!(event.slug, Some("concert-au-parc".to_string()));
        assert_eq!(event.timings.len(), 1);
        assert_eq!(event.attendance_mode.as_ref().and_then(|m| m.id), Some(2));
        assert_eq!(event.status.as_ref().and_then(|s| s.id), Some(1));
        assert_eq!(event.age, Some(AgeRange { min: 6.0, max: 12.0 }));
    }

    #[test]
    fn image_url_is_plain_concatenation() {
        let image = EventImage::new("https://cdn.openagenda.com/main/", "evt.jpg");
        assert_eq!(image.url(), "https://cdn.openagenda.com/main/evt.jpg");
    }

    #[test]
    fn decodes_detailed_event() {
        let json = r#"{
            "uid": 12345678,
            "slug": "atelier-velo",
            "state": 2,
            "title": {"fr": "Atelier vélo", "en": "Bike workshop"},
            "description": {"fr": "Réparation participative"},
            "longDescription": {"fr": "Venez avec votre vélo."},
            "timings": [
                {"begin": "2024-06-01T10:00:00+02:00", "end": "2024-06-01T12:00:00+02:00"},
                {"begin": "2024-06-08T10:00:00+02:00", "end": "2024-06-08T12:00:00+02:00"}
            ],
            "attendanceMode": {"id": 3, "label": {"fr": "Mixte"}},
            "status": {"id": 1, "label": {"fr": "Programmé"}},
            "registration": [
                {"type": "link", "value": "https://billetterie.example.test/atelier"},
                {"type": "phone", "value": "+33102030405"}
            ],
            "image": {"base": "https://cdn.openagenda.com/main/", "filename": "atelier.jpg"},
            "location": {
                "name": "Maison du vélo",
                "address": "12 rue des Cyclistes",
                "city": "Nantes",
                "postalCode": "44000",
                "countryCode": "FR",
                "latitude": 47.2184,
                "longitude": -1.5536
            },
            "onlineAccessLink": "https://visio.example.test/atelier",
            "age": {"min": 8, "max": 99},
            "createdAt": "2024-05-01T09:00:00.000Z",
            "updatedAt": "2024-05-20T09:00:00.000Z"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.uid, 12345678);
        assert_eq!(event.state, Some(2));
        assert_eq!(event.timings.len(), 2);
        assert_eq!(event.attendance_mode.as_ref().and_then(|m| m.id), Some(3));
        assert_eq!(event.registration.len(), 2);
        assert_eq!(event.registration[0].kind, "link");
        assert_eq!(event.image.as_ref().map(|i| i.url()).as_deref(),
            Some("https://cdn.openagenda.com/main/atelier.jpg"));
        let location = event.location.as_ref().unwrap();
        assert_eq!(location.city, Some("Nantes".to_string()));
        assert_eq!(location.latitude, Some(47.2184));
        assert_eq!(event.age, Some(AgeRange { min: 8.0, max: 99.0 }));
    }

    #[test]
    fn decodes_minimal_event() {
        let json = r#"{"uid": 1, "title": "Concert"}"#;
        let event: Event = serde_json::from_str(json).unwrap();

        assert_eq!(event.uid, 1);
        assert_eq!(event.title, Some(LocalizedText::plain("Concert")));
        assert!(event.timings.is_empty());
        assert!(event.registration.is_empty());
        assert!(event.location.is_none());
    }

    #[test]
    fn ignores_unknown_fields() {
        let json = r#"{"uid": 1, "keywords": {"fr": ["vélo"]}, "originAgenda": {"uid": 2}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.uid, 1);
    }

    #[test]
    fn age_range_tolerates_missing_bounds() {
        let json = r#"{"uid": 1, "age": {"max": 10}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.age, Some(AgeRange { min: 0.0, max: 10.0 }));
    }

    #[test]
    fn serde_roundtrip() {
        let event = Event::new(42)
            .with_title(LocalizedText::by_locale([("fr", "Concert"), ("en", "Concert")]))
            .with_timing(Timing::new("2024-06-01T20:00:00+02:00", "2024-06-01T22:00:00+02:00"))
            .with_status(5)
            .with_image(EventImage::new("https://cdn.openagenda.com/main/", "concert.jpg"));

        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
