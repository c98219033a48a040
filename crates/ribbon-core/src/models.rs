//! Data models for Ribbon
//!
//! Defines the bookmark record and the ordered collection that holds them.
//! The serialized form is a JSON array of `{title, url, dateAdded}` objects.

use std::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::error::{Field, ValidationError};

/// A saved bookmark
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    /// Display title, stored as typed (never escaped)
    pub title: String,
    /// Absolute URL with an explicit http(s) scheme
    pub url: String,
    /// When this bookmark was added
    #[serde(rename = "dateAdded")]
    pub date_added: Timestamp,
}

impl Bookmark {
    /// Create a bookmark stamped with the current time
    ///
    /// Inputs are taken as-is; use `Bookmark::parse` for user input.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::with_date(title, url, Utc::now())
    }

    /// Create a bookmark with a specific timestamp
    ///
    /// The timestamp is truncated to milliseconds, the precision it is stored at.
    pub fn with_date(
        title: impl Into<String>,
        url: impl Into<String>,
        date_added: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            date_added: Timestamp::from_datetime(date_added),
        }
    }

    /// Validate and normalize raw user input into a new bookmark
    pub fn parse(title: &str, raw_url: &str) -> Result<Self, ValidationError> {
        let title = title.trim();
        let raw_url = raw_url.trim();

        if title.is_empty() {
            return Err(ValidationError::EmptyField {
                field: Field::Title,
            });
        }
        if raw_url.is_empty() {
            return Err(ValidationError::EmptyField { field: Field::Url });
        }

        let url = normalize_url(raw_url);
        check_url(&url)?;

        Ok(Self::new(title, url))
    }

    /// Check the record invariants (non-empty title, absolute http(s) url)
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: Field::Title,
            });
        }
        if self.url.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: Field::Url });
        }
        if !has_http_scheme(&self.url) {
            return Err(ValidationError::InvalidUrl {
                url: self.url.clone(),
                source: url::ParseError::RelativeUrlWithoutBase,
            });
        }
        check_url(&self.url)
    }

    /// Case-insensitive substring match against title or url
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.url.to_lowercase().contains(needle)
    }
}

/// Prepend `https://` unless the url already starts with `http://` or `https://`
///
/// The scheme check ignores case; the input is otherwise left untouched.
pub fn normalize_url(raw: &str) -> String {
    if has_http_scheme(raw) {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

fn has_http_scheme(url: &str) -> bool {
    let starts_with = |prefix: &str| {
        url.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts_with("http://") || starts_with("https://")
}

fn check_url(url: &str) -> Result<(), ValidationError> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|source| ValidationError::InvalidUrl {
            url: url.to_string(),
            source,
        })
}

/// Ordered bookmark sequence, newest first
///
/// Position is the only addressing mechanism: an index is valid for exactly
/// the sequence state it was computed from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BookmarkCollection {
    items: Vec<Bookmark>,
}

impl BookmarkCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the persisted JSON representation
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to the persisted JSON representation
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Bookmark> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bookmark> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Bookmark] {
        &self.items
    }

    /// Insert at position 0
    pub fn prepend(&mut self, bookmark: Bookmark) {
        self.items.insert(0, bookmark);
    }

    /// Insert at a position (used to undo a removal)
    ///
    /// Panics if `index > len`, like `Vec::insert`.
    pub(crate) fn insert(&mut self, index: usize, bookmark: Bookmark) {
        self.items.insert(index, bookmark);
    }

    /// Remove and return the element at `index`, if it exists
    pub fn remove(&mut self, index: usize) -> Option<Bookmark> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Remove the first element (used to undo a prepend)
    pub(crate) fn pop_front(&mut self) -> Option<Bookmark> {
        self.remove(0)
    }
}

impl From<Vec<Bookmark>> for BookmarkCollection {
    fn from(items: Vec<Bookmark>) -> Self {
        Self { items }
    }
}

impl From<BookmarkCollection> for Vec<Bookmark> {
    fn from(collection: BookmarkCollection) -> Self {
        collection.items
    }
}

impl<'a> IntoIterator for &'a BookmarkCollection {
    type Item = &'a Bookmark;
    type IntoIter = std::slice::Iter<'a, Bookmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Creation time of a bookmark
///
/// New timestamps are truncated to milliseconds and written as ISO-8601 with
/// a `Z` suffix. A loaded timestamp keeps the exact text it was read from, so
/// saving never rewrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    text: String,
}

impl Timestamp {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(date: DateTime<Utc>) -> Self {
        let instant = date.trunc_subsecs(3);
        Self {
            instant,
            text: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Parse an RFC 3339 timestamp, keeping the input text
    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        let instant = DateTime::parse_from_rfc3339(text)?.with_timezone(&Utc);
        Ok(Self {
            instant,
            text: text.to_string(),
        })
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The persisted text
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_prepends_https() {
        let bookmark = Bookmark::parse("Example", "example.com").unwrap();
        assert_eq!(bookmark.url, "https://example.com");
        assert_eq!(bookmark.title, "Example");
    }

    #[test]
    fn test_parse_keeps_existing_scheme() {
        let http = Bookmark::parse("Plain", "http://example.com/a").unwrap();
        assert_eq!(http.url, "http://example.com/a");

        let upper = Bookmark::parse("Shouty", "HTTPS://Example.com").unwrap();
        assert_eq!(upper.url, "HTTPS://Example.com");
    }

    #[test]
    fn test_parse_trims_input() {
        let bookmark = Bookmark::parse("  Rust  ", "  rust-lang.org ").unwrap();
        assert_eq!(bookmark.title, "Rust");
        assert_eq!(bookmark.url, "https://rust-lang.org");
    }

    #[test]
    fn test_parse_empty_fields() {
        assert_eq!(
            Bookmark::parse("", "x.com").unwrap_err(),
            ValidationError::EmptyField {
                field: Field::Title
            }
        );
        assert_eq!(
            Bookmark::parse("Title", "   ").unwrap_err(),
            ValidationError::EmptyField { field: Field::Url }
        );
    }

    #[test]
    fn test_parse_invalid_url() {
        let err = Bookmark::parse("Broken", "exa mple.com").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUrl { .. }));

        let err = Bookmark::parse("No host", "https://").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUrl { .. }));
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://a.io"), "http://a.io");
        assert_eq!(normalize_url("HtTp://a.io"), "HtTp://a.io");
        assert_eq!(normalize_url("ftp://a.io"), "https://ftp://a.io");
        assert_eq!(normalize_url("é"), "https://é");
    }

    #[test]
    fn test_validate() {
        let good = Bookmark::new("Example", "https://example.com");
        assert!(good.validate().is_ok());

        let no_title = Bookmark::new(" ", "https://example.com");
        assert!(no_title.validate().is_err());

        let no_scheme = Bookmark::new("Example", "example.com");
        assert!(no_scheme.validate().is_err());

        let other_scheme = Bookmark::new("Mail", "mailto:someone@example.com");
        assert!(other_scheme.validate().is_err());
    }

    #[test]
    fn test_timestamp_truncated_to_millis() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let bookmark = Bookmark::with_date("T", "https://t.io", date);
        assert_eq!(
            bookmark.date_added.as_datetime().timestamp_subsec_nanos(),
            123_000_000
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let bookmark = Bookmark::with_date("Example", "https://example.com", date);
        let json = serde_json::to_string(&bookmark).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Example","url":"https://example.com","dateAdded":"2024-05-01T12:00:00.000Z"}"#
        );
    }

    #[test]
    fn test_deserialize_browser_timestamp() {
        let json = r#"[{"title":"A","url":"https://a.io","dateAdded":"2023-11-02T08:15:30.250Z"}]"#;
        let collection = BookmarkCollection::from_json(json).unwrap();
        assert_eq!(collection.len(), 1);
        let date = collection.get(0).unwrap().date_added.as_datetime();
        assert_eq!(date.timestamp_subsec_millis(), 250);
        assert_eq!(collection.to_json().unwrap(), json);
    }

    #[test]
    fn test_loaded_timestamp_text_is_preserved() {
        let json = r#"[{"title":"A","url":"https://a.io","dateAdded":"2024-01-01T02:00:00.123456+02:00"}]"#;
        let collection = BookmarkCollection::from_json(json).unwrap();

        let stamp = &collection.get(0).unwrap().date_added;
        assert_eq!(
            stamp.as_datetime(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::microseconds(123_456)
        );
        assert_eq!(stamp.as_str(), "2024-01-01T02:00:00.123456+02:00");
        assert_eq!(collection.to_json().unwrap(), json);
    }

    #[test]
    fn test_deserialize_rejects_bad_timestamp() {
        let json = r#"[{"title":"A","url":"https://a.io","dateAdded":"yesterday"}]"#;
        assert!(BookmarkCollection::from_json(json).is_err());
    }

    #[test]
    fn test_collection_prepend_and_remove() {
        let mut collection = BookmarkCollection::new();
        collection.prepend(Bookmark::new("first", "https://1.io"));
        collection.prepend(Bookmark::new("second", "https://2.io"));

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(0).unwrap().title, "second");

        assert!(collection.remove(5).is_none());
        let removed = collection.remove(0).unwrap();
        assert_eq!(removed.title, "second");
        assert_eq!(collection.get(0).unwrap().title, "first");
    }

    #[test]
    fn test_matches_lowercase() {
        let bookmark = Bookmark::new("Rust Book", "https://doc.rust-lang.org/book");
        assert!(bookmark.matches_lowercase(""));
        assert!(bookmark.matches_lowercase("rust book"));
        assert!(bookmark.matches_lowercase("lang.org"));
        assert!(!bookmark.matches_lowercase("python"));
    }
}
