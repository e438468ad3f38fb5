//! Async client for the OpenAgenda v2 API.
//!
//! This crate provides the HTTP layer over the `openagenda-core` domain
//! types:
//!
//! - [`Client`] - typed methods over the read endpoints
//! - [`ClientConfig`] - API key, base URL, timeout, proxy
//! - [`AgendaQuery`] / [`EventQuery`] - typed listing filters
//! - [`EventSource`] - retrieval seam implemented by [`Client`] and
//!   [`StaticEventSource`]
//! - [`ClientError`] - error taxonomy for API operations
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐      ┌────────────────────┐
//! │ OpenAgenda API   │      │ in-memory fixtures │
//! └────────┬─────────┘      └─────────┬──────────┘
//!          │                          │
//!          ▼                          ▼
//! ┌──────────────────┐      ┌────────────────────┐
//! │      Client      │      │  StaticEventSource │
//! └────────┬─────────┘      └─────────┬──────────┘
//!          │        EventSource       │
//!          └────────────┬─────────────┘
//!                       │
//!                       ▼
//!                 ┌───────────┐
//!                 │   Event   │
//!                 └─────┬─────┘
//!                       │ build_event_snippet()
//!                       ▼
//!               ┌──────────────┐
//!               │ EventSnippet │
//!               └──────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use openagenda_client::{Client, ClientConfig};
//! use openagenda_core::SnippetOptions;
//!
//! let client = Client::new(ClientConfig::new("my-public-key"))?;
//! let options = SnippetOptions::new()
//!     .with_canonical_url("https://example.org/events/67890")
//!     .with_locale("fr");
//! let snippet = client.event_rich_snippet(12345, 67890, &options).await?;
//! println!("{}", snippet.to_json_string()?);
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod query;
pub mod source;

// Re-export main types at crate root
pub use client::{AgendaList, Client, EventList};
pub use config::ClientConfig;
pub use endpoints::Endpoint;
pub use error::{ClientError, ClientErrorCode, ClientResult};
pub use query::{AgendaQuery, EventQuery};
pub use source::{BoxFuture, EventSource, StaticEventSource, snippet_from_source};
