//! Core types: localized text, events, agendas, Schema.org snippets

pub mod agenda;
pub mod event;
pub mod locale;
pub mod schema;
pub mod snippet;

pub use agenda::Agenda;
pub use event::{
    AgeRange, AttendanceModeInfo, Event, EventImage, EventLocation, RegistrationEntry, StatusInfo,
    Timing,
};
pub use locale::{DEFAULT_LOCALE, LocalizedText, resolve_localized};
pub use schema::{
    AttendanceMode, EventSnippet, EventStatus, GeoCoordinates, Offer, OfferAvailability, Place,
    PostalAddress, SCHEMA_ORG, SnippetLocation, VirtualLocation,
};
pub use snippet::{SnippetError, SnippetOptions, build_event_snippet};
