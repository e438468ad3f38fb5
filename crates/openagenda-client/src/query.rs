//! Typed query options for the listing endpoints.
//!
//! [`AgendaQuery`] and [`EventQuery`] cover the common filters with typed
//! builder methods and keep a raw-parameter escape hatch for everything
//! else the API accepts. `to_pairs` flattens a query into wire-format
//! key/value pairs; boolean flags serialize as `1`/`0` and time bounds as
//! RFC 3339.

use chrono::{DateTime, Utc};

/// Query options for the agenda listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct AgendaQuery {
    /// Free-text search over agenda titles and descriptions.
    pub search: Option<String>,
    /// Page size.
    pub size: Option<usize>,
    /// Restrict to official (or non-official) agendas.
    pub official: Option<bool>,
    /// Restrict to one agenda slug.
    pub slug: Option<String>,
    /// Restrict to agendas of a network.
    pub network_uid: Option<u64>,
    /// Raw parameters appended after the typed options.
    pub extra: Vec<(String, String)>,
}

impl AgendaQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Builder method to set the page size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Builder method to filter on official agendas.
    pub fn with_official(mut self, official: bool) -> Self {
        self.official = Some(official);
        self
    }

    /// Builder method to filter on an agenda slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Builder method to filter on a network uid.
    pub fn with_network_uid(mut self, network_uid: u64) -> Self {
        self.network_uid = Some(network_uid);
        self
    }

    /// Builder method to append a raw query parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }

    /// Flattens the query into wire-format pairs, typed options first.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(ref search) = self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        if let Some(official) = self.official {
            pairs.push(("official".to_string(), bool_flag(official)));
        }
        if let Some(ref slug) = self.slug {
            pairs.push(("slug".to_string(), slug.clone()));
        }
        if let Some(network_uid) = self.network_uid {
            pairs.push(("network".to_string(), network_uid.to_string()));
        }
        pairs.extend(self.extra.iter().cloned());
        pairs
    }

    /// Returns true when the query already carries the given parameter.
    pub fn has_param(&self, name: &str) -> bool {
        self.to_pairs().iter().any(|(key, _)| key == name)
    }
}

/// Query options for the event listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Free-text search over event titles and descriptions.
    pub search: Option<String>,
    /// Page size.
    pub size: Option<usize>,
    /// Sort order (e.g. "timings.asc", "updatedAt.desc").
    pub sort: Option<String>,
    /// Whether to request the detailed event shape.
    ///
    /// Left unset, the client injects `detailed=1` on event requests.
    pub detailed: Option<bool>,
    /// Whether to request localized labels alongside numeric ids.
    ///
    /// Left unset, the client injects `includeLabels=1` on event requests.
    pub include_labels: Option<bool>,
    /// Keep events with at least one occurrence ending after this instant.
    pub timings_after: Option<DateTime<Utc>>,
    /// Keep events with at least one occurrence starting before this instant.
    pub timings_before: Option<DateTime<Utc>>,
    /// Keep events updated after this instant.
    pub updated_after: Option<DateTime<Utc>>,
    /// Keep events updated before this instant.
    pub updated_before: Option<DateTime<Utc>>,
    /// Raw parameters appended after the typed options.
    pub extra: Vec<(String, String)>,
}

impl EventQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Builder method to set the page size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Builder method to set the sort order.
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Builder method to set the detailed flag explicitly.
    pub fn with_detailed(mut self, detailed: bool) -> Self {
        self.detailed = Some(detailed);
        self
    }

    /// Builder method to set the label inclusion flag explicitly.
    pub fn with_include_labels(mut self, include_labels: bool) -> Self {
        self.include_labels = Some(include_labels);
        self
    }

    /// Builder method to set the lower timings bound.
    pub fn with_timings_after(mut self, instant: DateTime<Utc>) -> Self {
        self.timings_after = Some(instant);
        self
    }

    /// Builder method to set the upper timings bound.
    pub fn with_timings_before(mut self, instant: DateTime<Utc>) -> Self {
        self.timings_before = Some(instant);
        self
    }

    /// Builder method to set the lower update-time bound.
    pub fn with_updated_after(mut self, instant: DateTime<Utc>) -> Self {
        self.updated_after = Some(instant);
        self
    }

    /// Builder method to set the upper update-time bound.
    pub fn with_updated_before(mut self, instant: DateTime<Utc>) -> Self {
        self.updated_before = Some(instant);
        self
    }

    /// Builder method to append a raw query parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }

    /// Flattens the query into wire-format pairs, typed options first.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(ref search) = self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        if let Some(ref sort) = self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(detailed) = self.detailed {
            pairs.push(("detailed".to_string(), bool_flag(detailed)));
        }
        if let Some(include_labels) = self.include_labels {
            pairs.push(("includeLabels".to_string(), bool_flag(include_labels)));
        }
        if let Some(after) = self.timings_after {
            pairs.push(("timings[gte]".to_string(), after.to_rfc3339()));
        }
        if let Some(before) = self.timings_before {
            pairs.push(("timings[lte]".to_string(), before.to_rfc3339()));
        }
        if let Some(after) = self.updated_after {
            pairs.push(("updatedAt[gte]".to_string(), after.to_rfc3339()));
        }
        if let Some(before) = self.updated_before {
            pairs.push(("updatedAt[lte]".to_string(), before.to_rfc3339()));
        }
        pairs.extend(self.extra.iter().cloned());
        pairs
    }

    /// Returns true when the query already carries the given parameter.
    pub fn has_param(&self, name: &str) -> bool {
        self.to_pairs().iter().any(|(key, _)| key == name)
    }
}

/// The API expects boolean flags as "1"/"0".
fn bool_flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}
