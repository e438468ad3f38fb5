//! Event to Schema.org snippet transform.
//!
//! [`build_event_snippet`] maps a decoded [`Event`] to an [`EventSnippet`]
//! through a fixed set of rules: the temporal span comes from the first and
//! last timing, attendance mode and status resolve through the id tables in
//! [`crate::schema`], registration links become offers, and the location
//! shape follows the attendance mode.
//!
//! The transform is pure and deterministic. It is total over any decodable
//! event except for one explicit precondition: an event without timings
//! cannot carry the mandatory startDate/endDate pair and is rejected with
//! [`SnippetError::EmptyTimings`].

use thiserror::Error;

use crate::event::{Event, EventLocation};
use crate::locale::{DEFAULT_LOCALE, resolve_localized};
use crate::schema::{
    AttendanceMode, EventSnippet, EventStatus, GeoCoordinates, Offer, OfferAvailability, Place,
    PostalAddress, SnippetLocation, VirtualLocation,
};

/// Options controlling snippet construction.
#[derive(Debug, Clone)]
pub struct SnippetOptions {
    /// Canonical URL of the event page.
    ///
    /// When non-empty, the snippet carries it as both `@id` and `url`; an
    /// empty string behaves like an absent URL.
    pub canonical_url: Option<String>,

    /// Locale used to resolve translatable fields.
    pub locale: String,
}

impl SnippetOptions {
    /// Creates options with no canonical URL and the default locale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the canonical URL.
    pub fn with_canonical_url(mut self, url: impl Into<String>) -> Self {
        self.canonical_url = Some(url.into());
        self
    }

    /// Builder method to set the locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

impl Default for SnippetOptions {
    fn default() -> Self {
        Self {
            canonical_url: None,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Errors from snippet construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnippetError {
    /// The event has no timings, so `startDate`/`endDate` cannot be built.
    #[error("event {uid} has no timings, cannot derive startDate/endDate")]
    EmptyTimings {
        /// Uid of the offending event.
        uid: u64,
    },
}

/// Builds a Schema.org snippet from an event.
///
/// Reads the event, allocates a fresh snippet, and never touches shared
/// state, so identical inputs yield structurally equal outputs.
///
/// # Errors
///
/// Returns [`SnippetError::EmptyTimings`] when the event carries no
/// occurrence at all.
pub fn build_event_snippet(
    event: &Event,
    options: &SnippetOptions,
) -> Result<EventSnippet, SnippetError> {
    let Some(first) = event.timings.first() else {
        return Err(SnippetError::EmptyTimings { uid: event.uid });
    };
    let last = event.timings.last().unwrap_or(first);

    let attendance_mode =
        AttendanceMode::from_id(event.attendance_mode.as_ref().and_then(|mode| mode.id));
    let status = EventStatus::from_id(event.status.as_ref().and_then(|status| status.id));

    let mut snippet = EventSnippet::new(
        resolve_localized(event.title.as_ref(), &options.locale),
        resolve_localized(event.description.as_ref(), &options.locale),
        first.begin.clone(),
        last.end.clone(),
        attendance_mode,
        status,
    );

    if let Some(url) = options.canonical_url.as_deref().filter(|url| !url.is_empty()) {
        snippet.id = Some(url.to_string());
        snippet.url = Some(url.to_string());
    }

    if let Some(ref image) = event.image {
        snippet.image = Some(image.url());
    }

    snippet.offers = build_offers(event, status);
    snippet.location = build_location(event, attendance_mode);

    if let Some(ref age) = event.age {
        snippet.typical_age_range = Some(format!("{}-{}", age.min as i64, age.max as i64));
    }

    Ok(snippet)
}

/// Collects ticketing offers from registration entries of kind "link".
///
/// Returns None when no link entry exists, so the `offers` key is omitted.
fn build_offers(event: &Event, status: EventStatus) -> Option<Vec<Offer>> {
    let availability = if status.is_sold_out() {
        OfferAvailability::SoldOut
    } else {
        OfferAvailability::InStock
    };

    let offers: Vec<Offer> = event
        .registration
        .iter()
        .filter(|entry| entry.kind == "link")
        .map(|entry| Offer::new(entry.value.clone(), availability))
        .collect();

    if offers.is_empty() { None } else { Some(offers) }
}

/// Builds the location union driven by the attendance mode.
///
/// Offline events use the place, online events the virtual location. Mixed
/// events always emit the `[place, virtual]` pair; an empty side stays in
/// the pair instead of collapsing it to the other shape.
fn build_location(event: &Event, mode: AttendanceMode) -> Option<SnippetLocation> {
    let place = event.location.as_ref().map(build_place);
    let virtual_location = event
        .online_access_link
        .as_ref()
        .map(|link| VirtualLocation::new(link.clone()));

    match mode {
        AttendanceMode::Offline => place.map(SnippetLocation::Place),
        AttendanceMode::Online => virtual_location.map(SnippetLocation::Virtual),
        AttendanceMode::Mixed => Some(SnippetLocation::Mixed {
            place,
            virtual_location,
        }),
    }
}

/// Maps the venue record to a Place; address and geo are always embedded.
fn build_place(location: &EventLocation) -> Place {
    let mut place = Place::new();
    place.name = location.name.clone();
    place.address = PostalAddress {
        street_address: location.address.clone(),
        address_locality: location.city.clone(),
        address_region: location.region.clone(),
        postal_code: location.postal_code.clone(),
        address_country: location.country_code.clone(),
        ..PostalAddress::new()
    };
    place.geo = GeoCoordinates {
        latitude: location.latitude,
        longitude: location.longitude,
        ..GeoCoordinates::new()
    };
    place
}
