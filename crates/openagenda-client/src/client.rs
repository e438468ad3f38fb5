//! OpenAgenda API client.
//!
//! This module provides the HTTP client for the OpenAgenda v2 API: request
//! building from the endpoint table, key injection, status-code mapping to
//! [`ClientError`], and typed decoding of the response envelopes.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use openagenda_core::{Agenda, Event, EventSnippet, SnippetOptions};

use crate::config::ClientConfig;
use crate::endpoints::Endpoint;
use crate::error::{ClientError, ClientResult};
use crate::query::{AgendaQuery, EventQuery};
use crate::source::snippet_from_source;

/// OpenAgenda API client.
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl Client {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the configuration does not
    /// validate or the HTTP client cannot be constructed from it.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate().map_err(ClientError::configuration)?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());

        if let Some(ref proxy) = config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| ClientError::configuration(format!("invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let http_client = builder.build().map_err(|e| {
            ClientError::configuration(format!("failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Lists public agendas.
    pub async fn list_agendas(&self, query: &AgendaQuery) -> ClientResult<AgendaList> {
        let list: AgendaList = self
            .request_json(Endpoint::Agendas, &[], &query.to_pairs())
            .await?;
        debug!("fetched {} of {} agendas", list.agendas.len(), list.total);
        Ok(list)
    }

    /// Lists the agendas attached to the configured API key.
    ///
    /// A response without an `items` key decodes as an empty list.
    pub async fn list_my_agendas(&self) -> ClientResult<Vec<Agenda>> {
        let response: MyAgendasResponse = self.request_json(Endpoint::MyAgendas, &[], &[]).await?;
        Ok(response.items)
    }

    /// Returns the uids of the agendas attached to the configured API key.
    pub async fn my_agenda_uids(&self) -> ClientResult<Vec<u64>> {
        let agendas = self.list_my_agendas().await?;
        Ok(agendas.iter().map(|agenda| agenda.uid).collect())
    }

    /// Returns true when the configured API key is attached to the agenda.
    pub async fn has_permission(&self, agenda_uid: u64) -> ClientResult<bool> {
        let uids = self.my_agenda_uids().await?;
        Ok(uids.contains(&agenda_uid))
    }

    /// Fetches one agenda's metadata.
    pub async fn get_agenda(&self, agenda_uid: u64) -> ClientResult<Agenda> {
        self.request_json(
            Endpoint::Agenda,
            &[("agendaUid", agenda_uid.to_string())],
            &[],
        )
        .await
    }

    /// Lists events of an agenda.
    ///
    /// `detailed=1` and `includeLabels=1` are injected when the query does
    /// not already carry them, so decoded events have the full field set.
    pub async fn list_events(
        &self,
        agenda_uid: u64,
        query: &EventQuery,
    ) -> ClientResult<EventList> {
        let params = with_event_defaults(query.to_pairs());
        let list: EventList = self
            .request_json(
                Endpoint::Events,
                &[("agendaUid", agenda_uid.to_string())],
                &params,
            )
            .await?;
        debug!(
            "fetched {} events from agenda {}",
            list.events.len(),
            agenda_uid
        );
        Ok(list)
    }

    /// Fetches one event.
    ///
    /// The endpoint wraps the event in a `{success, event}` envelope; a
    /// failed or empty envelope maps to a not-found error.
    pub async fn get_event(&self, agenda_uid: u64, event_uid: u64) -> ClientResult<Event> {
        let params = with_event_defaults(Vec::new());
        let envelope: EventEnvelope = self
            .request_json(
                Endpoint::Event,
                &[
                    ("agendaUid", agenda_uid.to_string()),
                    ("eventUid", event_uid.to_string()),
                ],
                &params,
            )
            .await?;

        match envelope.event {
            Some(event) if envelope.success => Ok(event),
            _ => Err(ClientError::not_found(format!(
                "event {} not found in agenda {}",
                event_uid, agenda_uid
            ))),
        }
    }

    /// Fetches one event and builds its Schema.org snippet.
    pub async fn event_rich_snippet(
        &self,
        agenda_uid: u64,
        event_uid: u64,
        options: &SnippetOptions,
    ) -> ClientResult<EventSnippet> {
        snippet_from_source(self, agenda_uid, event_uid, options).await
    }

    /// Sends a GET request and decodes the JSON response.
    ///
    /// The API key is appended as the `key` query parameter unless the
    /// caller already set one.
    async fn request_json<T>(
        &self,
        endpoint: Endpoint,
        placeholders: &[(&str, String)],
        params: &[(String, String)],
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let path = endpoint.path(placeholders);
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);

        let mut request = self
            .http_client
            .request(endpoint.method(), &url)
            .query(params);

        if !params.iter().any(|(name, _)| name == "key") {
            request = request.query(&[("key", self.config.public_key.as_str())]);
        }

        let response = request.send().await.map_err(|e| {
            let error = if e.is_timeout() {
                ClientError::network("request timeout")
            } else if e.is_connect() {
                ClientError::network(format!("connection failed: {}", e))
            } else {
                ClientError::network(format!("request failed: {}", e))
            };
            error.with_endpoint(&path)
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(
                ClientError::authentication("invalid or expired API key").with_endpoint(&path)
            );
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(
                ClientError::authentication("API key not allowed on this resource")
                    .with_endpoint(&path),
            );
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::not_found("no such resource").with_endpoint(&path));
        }

        if status == reqwest::StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            return Err(
                ClientError::bad_request(format!("rejected request: {}", body))
                    .with_endpoint(&path),
            );
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(ClientError::rate_limited(format!(
                "rate limit exceeded{}",
                retry_after
                    .map(|s| format!(", retry after {} seconds", s))
                    .unwrap_or_default()
            ))
            .with_endpoint(&path));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(
                ClientError::server(format!("API error ({}): {}", status, body))
                    .with_endpoint(&path),
            );
        }

        let body = response.text().await.map_err(|e| {
            ClientError::network(format!("failed to read response: {}", e)).with_endpoint(&path)
        })?;

        serde_json::from_str(&body).map_err(|e| {
            ClientError::invalid_response(format!("failed to parse response: {}", e))
                .with_endpoint(&path)
        })
    }
}

/// Appends the event-endpoint default parameters.
///
/// Caller-provided values win over the defaults.
fn with_event_defaults(mut params: Vec<(String, String)>) -> Vec<(String, String)> {
    for (name, value) in [("detailed", "1"), ("includeLabels", "1")] {
        if !params.iter().any(|(existing, _)| existing == name) {
            params.push((name.to_string(), value.to_string()));
        }
    }
    params
}

/// One page of the agenda listing.
#[derive(Debug, Clone, Deserialize)]
pub struct AgendaList {
    /// Agendas on this page.
    #[serde(default)]
    pub agendas: Vec<Agenda>,
    /// Total number of matching agendas.
    #[serde(default)]
    pub total: u64,
    /// Opaque cursor to request the next page.
    #[serde(default)]
    pub after: Option<serde_json::Value>,
}

/// One page of the event listing.
#[derive(Debug, Clone, Deserialize)]
pub struct EventList {
    /// Events on this page.
    #[serde(default)]
    pub events: Vec<Event>,
    /// Total number of matching events.
    #[serde(default)]
    pub total: u64,
    /// Opaque cursor to request the next page.
    #[serde(default)]
    pub after: Option<serde_json::Value>,
}

/// Response from the key's agenda listing.
#[derive(Debug, Deserialize)]
struct MyAgendasResponse {
    #[serde(default)]
    items: Vec<Agenda>,
}

/// Envelope of the single-event endpoint.
#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(default)]
    success: bool,
    event: Option<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientErrorCode;

    #[test]
    fn decodes_agenda_list() {
        let json = r#"{
            "total": 2,
            "agendas": [
                {"uid": 123, "title": "Agenda de Nantes", "slug": "nantes", "official": true},
                {"uid": 456, "title": "Agenda associatif"}
            ],
            "after": [1718000000000, 456]
        }"#;

        let list: AgendaList = serde_json::from_str(json).unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.agendas.len(), 2);
        assert_eq!(list.agendas[0].uid, 123);
        assert!(list.agendas[0].official);
        assert!(list.after.is_some());
    }

    #[test]
    fn decodes_event_list() {
        let json = r#"{
            "total": 1,
            "events": [
                {
                    "uid": 789,
                    "title": {"fr": "Concert au parc"},
                    "timings": [
                        {"begin": "2024-06-01T20:00:00+02:00", "end": "2024-06-01T22:00:00+02:00"}
                    ]
                }
            ]
        }"#;

        let list: EventList = serde_json::from_str(json).unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.events[0].uid, 789);
        assert_eq!(list.events[0].timings.len(), 1);
        assert!(list.after.is_none());
    }

    #[test]
    fn decodes_my_agendas_items() {
        let json = r#"{"items": [{"uid": 1}, {"uid": 2}]}"#;
        let response: MyAgendasResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[1].uid, 2);
    }

    #[test]
    fn missing_items_key_decodes_as_empty() {
        let response: MyAgendasResponse = serde_json::from_str("{}").unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn event_envelope_with_event() {
        let json = r#"{"success": true, "event": {"uid": 42, "title": "Concert"}}"#;
        let envelope: EventEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.event.unwrap().uid, 42);
    }

    #[test]
    fn event_envelope_without_event() {
        let json = r#"{"success": false}"#;
        let envelope: EventEnvelope = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.event.is_none());
    }

    #[test]
    fn event_defaults_injected_when_absent() {
        let params = with_event_defaults(Vec::new());
        assert_eq!(
            params,
            vec![
                ("detailed".to_string(), "1".to_string()),
                ("includeLabels".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn event_defaults_yield_to_caller_values() {
        let params = with_event_defaults(vec![("detailed".to_string(), "0".to_string())]);
        assert_eq!(
            params,
            vec![
                ("detailed".to_string(), "0".to_string()),
                ("includeLabels".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_invalid_configuration() {
        let error = Client::new(ClientConfig::new("")).unwrap_err();
        assert_eq!(error.code(), ClientErrorCode::ConfigurationError);
    }

    #[test]
    fn builds_with_valid_configuration() {
        let client = Client::new(ClientConfig::new("test-key")).unwrap();
        assert_eq!(client.config().public_key, "test-key");
    }
}
