//! Schema.org vocabulary for event structured data.
//!
//! This module defines the output side of the snippet builder: the
//! attendance-mode and status id tables with their Schema.org labels, and
//! the serializable types making up an [`EventSnippet`] (offers, places,
//! virtual locations).
//!
//! Everything serializes to the exact JSON-LD keys structured-data tooling
//! expects (`@context`, `@type`, camelCase property names); optional keys
//! are omitted when absent, never emitted as null.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use tracing::debug;

/// Root of the Schema.org vocabulary, also the value of `@context`.
pub const SCHEMA_ORG: &str = "https://schema.org";

/// How an event can be attended, per the numeric attendance-mode table.
///
/// Unknown and missing ids resolve to [`AttendanceMode::Offline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendanceMode {
    /// On-site attendance (id 1).
    Offline,
    /// Online attendance (id 2).
    Online,
    /// Both on-site and online (id 3).
    Mixed,
}

impl AttendanceMode {
    /// Resolves a raw attendance-mode id, defaulting to offline.
    pub fn from_id(id: Option<i64>) -> Self {
        match id {
            None | Some(1) => Self::Offline,
            Some(2) => Self::Online,
            Some(3) => Self::Mixed,
            Some(other) => {
                debug!("unknown attendance mode id {}, defaulting to offline", other);
                Self::Offline
            }
        }
    }

    /// Returns the Schema.org label for this mode.
    pub fn schema_label(&self) -> &'static str {
        match self {
            Self::Offline => "OfflineEventAttendanceMode",
            Self::Online => "OnlineEventAttendanceMode",
            Self::Mixed => "MixedEventAttendanceMode",
        }
    }

    /// Returns the full Schema.org URL for this mode.
    pub fn schema_url(&self) -> String {
        format!("{}/{}", SCHEMA_ORG, self.schema_label())
    }
}

impl Serialize for AttendanceMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.schema_url())
    }
}

/// Scheduling status of an event, per the numeric status table.
///
/// Unknown and missing ids resolve to [`EventStatus::Scheduled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    /// The event happens as planned (id 1).
    Scheduled,
    /// The event was rescheduled (id 2).
    Rescheduled,
    /// The event moved online (id 3).
    MovedOnline,
    /// The event is postponed (id 4).
    Postponed,
    /// The event is scheduled but at capacity (id 5).
    ///
    /// Schema.org has no dedicated status for this, so the label collapses
    /// to `EventScheduled`; the sold-out signal moves to offer availability.
    Full,
    /// The event is cancelled (id 6).
    Cancelled,
}

impl EventStatus {
    /// Resolves a raw status id, defaulting to scheduled.
    pub fn from_id(id: Option<i64>) -> Self {
        match id {
            None | Some(1) => Self::Scheduled,
            Some(2) => Self::Rescheduled,
            Some(3) => Self::MovedOnline,
            Some(4) => Self::Postponed,
            Some(5) => Self::Full,
            Some(6) => Self::Cancelled,
            Some(other) => {
                debug!("unknown event status id {}, defaulting to scheduled", other);
                Self::Scheduled
            }
        }
    }

    /// Returns the Schema.org label for this status.
    pub fn schema_label(&self) -> &'static str {
        match self {
            Self::Scheduled | Self::Full => "EventScheduled",
            Self::Rescheduled => "EventRescheduled",
            Self::MovedOnline => "EventMovedOnline",
            Self::Postponed => "EventPostponed",
            Self::Cancelled => "EventCancelled",
        }
    }

    /// Returns the full Schema.org URL for this status.
    pub fn schema_url(&self) -> String {
        format!("{}/{}", SCHEMA_ORG, self.schema_label())
    }

    /// Returns true when the event is at capacity.
    pub fn is_sold_out(&self) -> bool {
        matches!(self, Self::Full)
    }
}

impl Serialize for EventStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.schema_url())
    }
}

/// Ticket availability on an [`Offer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferAvailability {
    /// Tickets are available.
    InStock,
    /// The event is at capacity.
    SoldOut,
}

impl OfferAvailability {
    /// Returns the Schema.org label for this availability.
    pub fn schema_label(&self) -> &'static str {
        match self {
            Self::InStock => "InStock",
            Self::SoldOut => "SoldOut",
        }
    }

    /// Returns the full Schema.org URL for this availability.
    pub fn schema_url(&self) -> String {
        format!("{}/{}", SCHEMA_ORG, self.schema_label())
    }
}

impl Serialize for OfferAvailability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.schema_url())
    }
}

/// A registration offer pointing at a ticketing URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offer {
    /// Always "Offer".
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    /// Registration URL.
    pub url: String,
    /// Ticket availability.
    pub availability: OfferAvailability,
}

impl Offer {
    /// Creates an offer for a registration URL.
    pub fn new(url: impl Into<String>, availability: OfferAvailability) -> Self {
        Self {
            schema_type: "Offer",
            url: url.into(),
            availability,
        }
    }
}

/// A postal address embedded in a [`Place`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    /// Always "PostalAddress".
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_locality: Option<String>,
    /// Region or state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_region: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// ISO country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
}

impl PostalAddress {
    /// Creates an empty postal address.
    pub fn new() -> Self {
        Self {
            schema_type: "PostalAddress",
            street_address: None,
            address_locality: None,
            address_region: None,
            postal_code: None,
            address_country: None,
        }
    }
}

impl Default for PostalAddress {
    fn default() -> Self {
        Self::new()
    }
}

/// Geographic coordinates embedded in a [`Place`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoCoordinates {
    /// Always "GeoCoordinates".
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    /// Latitude in decimal degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl GeoCoordinates {
    /// Creates empty coordinates.
    pub fn new() -> Self {
        Self {
            schema_type: "GeoCoordinates",
            latitude: None,
            longitude: None,
        }
    }
}

impl Default for GeoCoordinates {
    fn default() -> Self {
        Self::new()
    }
}

/// A physical venue.
///
/// The address and geo sub-objects are always embedded, even when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    /// Always "Place".
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    /// Venue name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Postal address.
    pub address: PostalAddress,
    /// Geographic coordinates.
    pub geo: GeoCoordinates,
}

impl Place {
    /// Creates an empty place.
    pub fn new() -> Self {
        Self {
            schema_type: "Place",
            name: None,
            address: PostalAddress::new(),
            geo: GeoCoordinates::new(),
        }
    }
}

impl Default for Place {
    fn default() -> Self {
        Self::new()
    }
}

/// An online access point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualLocation {
    /// Always "VirtualLocation".
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    /// Join URL.
    pub url: String,
}

impl VirtualLocation {
    /// Creates a virtual location for a join URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            schema_type: "VirtualLocation",
            url: url.into(),
        }
    }
}

/// The `location` value of a snippet.
///
/// Offline events carry a single place, online events a single virtual
/// location, and mixed events always carry the ordered pair
/// `[place, virtualLocation]` where a missing side serializes as `{}`.
#[derive(Debug, Clone, PartialEq)]
pub enum SnippetLocation {
    /// A physical venue.
    Place(Place),
    /// An online access point.
    Virtual(VirtualLocation),
    /// The mixed-mode pair, in `[place, virtual]` order.
    Mixed {
        /// Physical side of the pair.
        place: Option<Place>,
        /// Online side of the pair.
        virtual_location: Option<VirtualLocation>,
    },
}

impl Serialize for SnippetLocation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Place(place) => place.serialize(serializer),
            Self::Virtual(virtual_location) => virtual_location.serialize(serializer),
            Self::Mixed {
                place,
                virtual_location,
            } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                match place {
                    Some(place) => seq.serialize_element(place)?,
                    None => seq.serialize_element(&EmptyObject)?,
                }
                match virtual_location {
                    Some(virtual_location) => seq.serialize_element(virtual_location)?,
                    None => seq.serialize_element(&EmptyObject)?,
                }
                seq.end()
            }
        }
    }
}

/// Serializes as the empty JSON object.
struct EmptyObject;

impl Serialize for EmptyObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_map(Some(0))?.end()
    }
}

/// Schema.org `Event` structured data, ready for JSON-LD embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSnippet {
    /// Always [`SCHEMA_ORG`].
    #[serde(rename = "@context")]
    pub context: &'static str,

    /// Always "Event".
    #[serde(rename = "@type")]
    pub schema_type: &'static str,

    /// Canonical identity, mirrored into `url`.
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Event name in the requested locale.
    pub name: String,

    /// Event description in the requested locale.
    pub description: String,

    /// Begin of the first occurrence.
    pub start_date: String,

    /// End of the last occurrence.
    pub end_date: String,

    /// How the event can be attended.
    pub event_attendance_mode: AttendanceMode,

    /// Scheduling status.
    pub event_status: EventStatus,

    /// Canonical URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Illustration URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Registration offers, in document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers: Option<Vec<Offer>>,

    /// Venue and/or online access point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SnippetLocation>,

    /// Audience age range as `"<min>-<max>"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typical_age_range: Option<String>,
}

impl EventSnippet {
    /// Creates a snippet with the always-present keys set.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        event_attendance_mode: AttendanceMode,
        event_status: EventStatus,
    ) -> Self {
        Self {
            context: SCHEMA_ORG,
            schema_type: "Event",
            id: None,
            name: name.into(),
            description: description.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            event_attendance_mode,
            event_status,
            url: None,
            image: None,
            offers: None,
            location: None,
            typical_age_range: None,
        }
    }

    /// Serializes the snippet to a JSON string for JSON-LD embedding.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod attendance_mode_table {
        use super::*;

        #[test]
        fn maps_known_ids() {
            assert_eq!(AttendanceMode::from_id(Some(1)), AttendanceMode::Offline);
            assert_eq!(AttendanceMode::from_id(Some(2)), AttendanceMode::Online);
            assert_eq!(AttendanceMode::from_id(Some(3)), AttendanceMode::Mixed);
        }

        #[test]
        fn missing_id_defaults_to_offline() {
            assert_eq!(AttendanceMode::from_id(None), AttendanceMode::Offline);
        }

        #[test]
        fn unknown_id_defaults_to_offline() {
            assert_eq!(AttendanceMode::from_id(Some(9)), AttendanceMode::Offline);
            assert_eq!(AttendanceMode::from_id(Some(0)), AttendanceMode::Offline);
        }

        #[test]
        fn schema_urls() {
            assert_eq!(
                AttendanceMode::Offline.schema_url(),
                "https://schema.org/OfflineEventAttendanceMode"
            );
            assert_eq!(
                AttendanceMode::Online.schema_url(),
                "https://schema.org/OnlineEventAttendanceMode"
            );
            assert_eq!(
                AttendanceMode::Mixed.schema_url(),
                "https://schema.org/MixedEventAttendanceMode"
            );
        }
    }

    mod event_status_table {
        use super::*;

        #[test]
        fn maps_known_ids() {
            assert_eq!(EventStatus::from_id(Some(1)), EventStatus::Scheduled);
            assert_eq!(EventStatus::from_id(Some(2)), EventStatus::Rescheduled);
            assert_eq!(EventStatus::from_id(Some(3)), EventStatus::MovedOnline);
            assert_eq!(EventStatus::from_id(Some(4)), EventStatus::Postponed);
            assert_eq!(EventStatus::from_id(Some(5)), EventStatus::Full);
            assert_eq!(EventStatus::from_id(Some(6)), EventStatus::Cancelled);
        }

        #[test]
        fn missing_and_unknown_ids_default_to_scheduled() {
            assert_eq!(EventStatus::from_id(None), EventStatus::Scheduled);
            assert_eq!(EventStatus::from_id(Some(42)), EventStatus::Scheduled);
        }

        #[test]
        fn full_collapses_to_scheduled_label() {
            assert_eq!(EventStatus::Full.schema_label(), "EventScheduled");
            assert_eq!(EventStatus::Full.schema_url(), "https://schema.org/EventScheduled");
            assert!(EventStatus::Full.is_sold_out());
            assert!(!EventStatus::Scheduled.is_sold_out());
        }

        #[test]
        fn cancelled_label() {
            assert_eq!(EventStatus::Cancelled.schema_url(), "https://schema.org/EventCancelled");
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn offer_shape() {
            let offer = Offer::new("https://billetterie.example.test", OfferAvailability::InStock);
            assert_eq!(
                serde_json::to_value(&offer).unwrap(),
                json!({
                    "@type": "Offer",
                    "url": "https://billetterie.example.test",
                    "availability": "https://schema.org/InStock"
                })
            );
        }

        #[test]
        fn sold_out_availability() {
            let offer = Offer::new("https://billetterie.example.test", OfferAvailability::SoldOut);
            let value = serde_json::to_value(&offer).unwrap();
            assert_eq!(value["availability"], "https://schema.org/SoldOut");
        }

        #[test]
        fn virtual_location_shape() {
            let location = VirtualLocation::new("https://visio.example.test");
            assert_eq!(
                serde_json::to_value(&location).unwrap(),
                json!({"@type": "VirtualLocation", "url": "https://visio.example.test"})
            );
        }

        #[test]
        fn empty_place_keeps_address_and_geo() {
            let value = serde_json::to_value(Place::new()).unwrap();
            assert_eq!(
                value,
                json!({
                    "@type": "Place",
                    "address": {"@type": "PostalAddress"},
                    "geo": {"@type": "GeoCoordinates"}
                })
            );
        }

        #[test]
        fn mixed_pair_fills_missing_sides_with_empty_objects() {
            let location = SnippetLocation::Mixed {
                place: Some(Place::new()),
                virtual_location: None,
            };
            let value = serde_json::to_value(&location).unwrap();

            let pair = value.as_array().unwrap();
            assert_eq!(pair.len(), 2);
            assert_eq!(pair[0]["@type"], "Place");
            assert_eq!(pair[1], json!({}));
        }

        #[test]
        fn mixed_pair_with_no_data_is_two_empty_objects() {
            let location = SnippetLocation::Mixed {
                place: None,
                virtual_location: None,
            };
            assert_eq!(serde_json::to_value(&location).unwrap(), json!([{}, {}]));
        }

        #[test]
        fn snippet_minimal_keys() {
            let snippet = EventSnippet::new(
                "Concert",
                "Au parc",
                "2024-06-01T20:00:00+02:00",
                "2024-06-01T22:00:00+02:00",
                AttendanceMode::Offline,
                EventStatus::Scheduled,
            );
            let value = serde_json::to_value(&snippet).unwrap();

            assert_eq!(value["@context"], "https://schema.org");
            assert_eq!(value["@type"], "Event");
            assert_eq!(value["name"], "Concert");
            assert_eq!(value["startDate"], "2024-06-01T20:00:00+02:00");
            assert_eq!(value["endDate"], "2024-06-01T22:00:00+02:00");
            assert_eq!(
                value["eventAttendanceMode"],
                "https://schema.org/OfflineEventAttendanceMode"
            );
            assert_eq!(value["eventStatus"], "https://schema.org/EventScheduled");

            let object = value.as_object().unwrap();
            for absent in ["@id", "url", "image", "offers", "location", "typicalAgeRange"] {
                assert!(!object.contains_key(absent), "unexpected key {}", absent);
            }
        }

        #[test]
        fn snippet_json_string() {
            let snippet = EventSnippet::new(
                "Concert",
                "",
                "2024-06-01T20:00:00+02:00",
                "2024-06-01T22:00:00+02:00",
                AttendanceMode::Offline,
                EventStatus::Scheduled,
            );
            let json = snippet.to_json_string().unwrap();
            assert!(json.starts_with(r#"{"@context":"https://schema.org","@type":"Event""#));
        }
    }
}
