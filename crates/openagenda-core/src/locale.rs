//! Localized text fields and locale fallback resolution.
//!
//! OpenAgenda serves translatable fields either as a plain string or as an
//! object keyed by locale code (e.g. `{"fr": "...", "en": "..."}`). This
//! module decodes both shapes into [`LocalizedText`] and resolves them to a
//! concrete string through a fixed fallback chain.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Locale tried as the fallback translation when the requested one is missing.
pub const DEFAULT_LOCALE: &str = "en";

/// A translatable API field.
///
/// Map entries keep the document order of the JSON payload; the last resort
/// of the fallback chain depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalizedText {
    /// A plain untranslated string.
    Plain(String),
    /// Per-locale translations in document order.
    ByLocale(Vec<(String, String)>),
}

impl LocalizedText {
    /// Creates a plain untranslated value.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Creates a per-locale value from `(locale, text)` pairs.
    pub fn by_locale<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::ByLocale(
            entries
                .into_iter()
                .map(|(locale, text)| (locale.into(), text.into()))
                .collect(),
        )
    }

    /// Returns the translation for `locale` if that exact key is present.
    pub fn get(&self, locale: &str) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::ByLocale(entries) => entries
                .iter()
                .find(|(key, _)| key == locale)
                .map(|(_, text)| text.as_str()),
        }
    }

    /// Resolves this value to a concrete string for `locale`.
    ///
    /// The fallback chain is:
    /// 1. a plain string is returned as-is;
    /// 2. if the requested locale key exists, its value wins, even when it is
    ///    the empty string;
    /// 3. otherwise a non-empty `"en"` translation;
    /// 4. otherwise the first entry in document order;
    /// 5. an empty map resolves to `""`.
    pub fn resolve(&self, locale: &str) -> String {
        let entries = match self {
            Self::Plain(text) => return text.clone(),
            Self::ByLocale(entries) => entries,
        };

        if let Some(text) = self.get(locale) {
            return text.to_string();
        }

        if let Some(text) = self.get(DEFAULT_LOCALE) {
            if !text.is_empty() {
                return text.to_string();
            }
        }

        entries
            .first()
            .map(|(_, text)| text.clone())
            .unwrap_or_default()
    }
}

/// Resolves an optional localized field to a concrete string.
///
/// Absent fields resolve to `""` so callers can treat every translatable
/// field uniformly.
pub fn resolve_localized(field: Option<&LocalizedText>, locale: &str) -> String {
    field.map(|text| text.resolve(locale)).unwrap_or_default()
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

impl From<String> for LocalizedText {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TextVisitor;

        impl<'de> Visitor<'de> for TextVisitor {
            type Value = LocalizedText;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a map of locale codes to strings")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<LocalizedText, E> {
                Ok(LocalizedText::Plain(value.to_string()))
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<LocalizedText, M::Error> {
                // serde_json's Map sorts keys, so collect pairs directly to
                // keep document order.
                let mut entries: Vec<(String, String)> = Vec::new();
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(LocalizedText::ByLocale(entries))
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}

impl Serialize for LocalizedText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Plain(text) => serializer.serialize_str(text),
            Self::ByLocale(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (locale, text) in entries {
                    map.serialize_entry(locale, text)?;
                }
                map.end()
            }
        }
    }
}
