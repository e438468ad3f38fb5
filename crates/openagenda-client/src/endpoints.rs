//! OpenAgenda v2 API endpoints.
//!
//! Every operation the client exposes maps to one [`Endpoint`] variant. The
//! path templates are kept in one table so that request building and error
//! reporting agree on the path of each operation.

/// A read endpoint of the OpenAgenda v2 API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Public agenda listing.
    Agendas,
    /// Agendas attached to the API key.
    MyAgendas,
    /// One agenda by uid.
    Agenda,
    /// Events of an agenda.
    Events,
    /// One event by uid.
    Event,
}

impl Endpoint {
    /// Returns the HTTP method for this endpoint.
    ///
    /// Every endpoint the client exposes today is a read.
    pub fn method(&self) -> reqwest::Method {
        reqwest::Method::GET
    }

    /// Returns the path template, relative to the API base URL.
    ///
    /// Templates carry `{placeholder}` segments filled in by [`Endpoint::path`].
    pub fn template(&self) -> &'static str {
        match self {
            Self::Agendas => "agendas",
            Self::MyAgendas => "me/agendas",
            Self::Agenda => "agendas/{agendaUid}",
            Self::Events => "agendas/{agendaUid}/events",
            Self::Event => "agendas/{agendaUid}/events/{eventUid}",
        }
    }

    /// Builds the concrete path by substituting `{placeholder}` segments.
    ///
    /// Values are percent-encoded so that they stay single path segments.
    pub fn path(&self, placeholders: &[(&str, String)]) -> String {
        let mut path = self.template().to_string();
        for (name, value) in placeholders {
            let marker = format!("{{{}}}", name);
            path = path.replace(&marker, &urlencoding::encode(value));
        }
        path
    }
}
