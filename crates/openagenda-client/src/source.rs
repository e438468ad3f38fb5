//! EventSource trait definition.
//!
//! [`EventSource`] is the seam between event retrieval and snippet
//! building: [`Client`] implements it over HTTP, and [`StaticEventSource`]
//! serves events from memory for tests and offline callers. Code that only
//! needs "an event by uid" should take `&dyn EventSource` instead of a
//! concrete client.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use openagenda_core::{Event, EventSnippet, SnippetOptions, build_event_snippet};

use crate::client::Client;
use crate::error::{ClientError, ClientResult};

/// A boxed future for async trait methods.
///
/// Async functions in traits do not mix with dynamic dispatch, so the trait
/// returns boxed futures to stay object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read access to events by agenda and event uid.
pub trait EventSource: Send + Sync {
    /// Fetches one event.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the agenda has no such event, and
    /// transport errors when retrieval itself fails.
    fn fetch_event(&self, agenda_uid: u64, event_uid: u64) -> BoxFuture<'_, ClientResult<Event>>;
}

impl EventSource for Client {
    fn fetch_event(&self, agenda_uid: u64, event_uid: u64) -> BoxFuture<'_, ClientResult<Event>> {
        Box::pin(async move { self.get_event(agenda_uid, event_uid).await })
    }
}

/// An in-memory [`EventSource`] backed by a uid map.
#[derive(Debug, Default)]
pub struct StaticEventSource {
    events: HashMap<(u64, u64), Event>,
}

impl StaticEventSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add an event under an agenda uid.
    pub fn with_event(mut self, agenda_uid: u64, event: Event) -> Self {
        self.events.insert((agenda_uid, event.uid), event);
        self
    }
}

impl EventSource for StaticEventSource {
    fn fetch_event(&self, agenda_uid: u64, event_uid: u64) -> BoxFuture<'_, ClientResult<Event>> {
        let result = match self.events.get(&(agenda_uid, event_uid)) {
            Some(event) => Ok(event.clone()),
            None => Err(ClientError::not_found(format!(
                "event {} not found in agenda {}",
                event_uid, agenda_uid
            ))),
        };
        Box::pin(async move { result })
    }
}

/// Fetches an event from a source and builds its Schema.org snippet.
///
/// A snippet-construction failure (an event without timings) surfaces as an
/// invalid-response error carrying the underlying cause.
pub async fn snippet_from_source(
    source: &dyn EventSource,
    agenda_uid: u64,
    event_uid: u64,
    options: &SnippetOptions,
) -> ClientResult<EventSnippet> {
    let event = source.fetch_event(agenda_uid, event_uid).await?;
    build_event_snippet(&event, options).map_err(|e| {
        ClientError::invalid_response(format!("event {}: {}", event_uid, e)).with_source(e)
    })
}
