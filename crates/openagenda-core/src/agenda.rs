//! Agenda record as served by the OpenAgenda API.

use serde::{Deserialize, Serialize};

/// A decoded OpenAgenda agenda.
///
/// Served by the agenda endpoints; everything except the uid is optional so
/// both the summary and the detailed shape decode into the same type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agenda {
    /// Unique agenda identifier.
    pub uid: u64,

    /// Agenda title.
    pub title: Option<String>,

    /// URL slug of the agenda.
    pub slug: Option<String>,

    /// Free-form description.
    pub description: Option<String>,

    /// Public website of the agenda.
    pub url: Option<String>,

    /// Illustration image URL.
    pub image: Option<String>,

    /// Whether this is an official agenda.
    #[serde(default)]
    pub official: bool,

    /// Owning network identifier, when the agenda belongs to one.
    pub network_uid: Option<i64>,

    /// Creation timestamp, verbatim.
    pub created_at: Option<String>,

    /// Last-update timestamp, verbatim.
    pub updated_at: Option<String>,
}

impl Agenda {
    /// Creates a new agenda with the given uid and everything else unset.
    pub fn new(uid: u64) -> Self {
        Self {
            uid,
            title: None,
            slug: None,
            description: None,
            url: None,
            image: None,
            official: false,
            network_uid: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to set the slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}
