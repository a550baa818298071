//! Request-scoped cache of sanitized input values.
//!
//! An [`InputCache`] holds three layers of request input: values explicitly
//! written through [`set`] (trimmed and memoized), the live request
//! parameter set the host seeded it with (read on demand, never memoized),
//! and the raw request body. One cache should be constructed per request;
//! reusing a cache across requests leaks the previous request's values.
//!
//! [`set`]: InputCache::set

use std::collections::HashMap;
use std::io::Read;

/// A request input value: a single string or a list of strings.
///
/// ```
/// use pagematch::{InputCache, Value};
///
/// let mut cache = InputCache::new();
/// cache.set("name", " John ");
/// cache.set("tags", vec![" a", "b "]);
///
/// assert_eq!(cache.get("name"), Some(Value::from("John")));
/// assert_eq!(cache.get("tags"), Some(Value::from(vec!["a", "b"])));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    List(Vec<String>),
}

impl Value {
    /// The contained string, if this is a scalar value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::List(_) => None,
        }
    }

    /// The contained strings, if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::Text(_) => None,
            Value::List(items) => Some(items),
        }
    }

    // Trims a scalar, or every element of a list individually.
    fn trimmed(self) -> Value {
        match self {
            Value::Text(text) => Value::Text(text.trim().to_owned()),
            Value::List(items) => {
                Value::List(items.into_iter().map(|item| item.trim().to_owned()).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(str::to_owned).collect())
    }
}

/// A request-scoped store of sanitized input values.
#[derive(Default)]
pub struct InputCache {
    sanitised: HashMap<String, Value>,
    live: HashMap<String, Value>,
    body: Option<Vec<u8>>,
    body_source: Option<Box<dyn Read + Send>>,
}

impl InputCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache over the request's combined parameter set.
    ///
    /// Live parameters are read through on [`get`] misses; they are never
    /// copied into the cache.
    ///
    /// [`get`]: InputCache::get
    pub fn with_request_params<I, N, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<Value>,
    {
        InputCache {
            live: params
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Set an input value.
    ///
    /// The name and the value are trimmed (every element of a list
    /// individually); any prior entry for the name is overwritten.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.sanitised
            .insert(name.trim().to_owned(), value.into().trimmed());
    }

    /// Retrieve an input value.
    ///
    /// Cached values (previously [`set`]) win over the live request
    /// parameters. A live scalar is trimmed on the way out, a live list is
    /// passed through untouched; neither is memoized.
    ///
    /// [`set`]: InputCache::set
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.sanitised.get(name) {
            return Some(value.clone());
        }
        self.live_value(name)
    }

    /// Retrieve an input value, or a default.
    pub fn get_or(&self, name: &str, default: impl Into<Value>) -> Value {
        self.get(name).unwrap_or_else(|| default.into())
    }

    /// Retrieve an input value, filtering live reads.
    ///
    /// The filter applies only to values read from the live request
    /// parameters; a cached value is returned exactly as stored, without
    /// reapplying the filter. Live reads are still not memoized, so a later
    /// lookup with a different filter sees the unfiltered live value again.
    pub fn get_filtered<F>(&self, name: &str, filter: F) -> Option<Value>
    where
        F: FnOnce(Value) -> Value,
    {
        if let Some(value) = self.sanitised.get(name) {
            return Some(value.clone());
        }
        self.live_value(name).map(filter)
    }

    /// Parse a query string and write each pair through [`set`].
    ///
    /// Pairs are percent-decoded with `+` as space; existing cache entries
    /// of the same name are overwritten unconditionally.
    ///
    /// [`set`]: InputCache::set
    pub fn ingest_query(&mut self, query: &str) {
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            trace!("query parameter \"{name}\"");
            self.set(name.as_ref(), value.as_ref());
        }
    }

    /// Seed the buffered raw request body.
    pub fn set_body(&mut self, bytes: impl Into<Vec<u8>>) {
        self.body = Some(bytes.into());
    }

    /// Seed the streaming raw-body fallback, consulted when no buffered
    /// body bytes are available.
    pub fn set_body_source(&mut self, source: impl Read + Send + 'static) {
        self.body_source = Some(Box::new(source));
    }

    /// The raw request body, if any bytes were obtainable.
    ///
    /// The buffered body is consulted first, then the streaming source is
    /// drained as a fallback.
    pub fn raw_body(&mut self) -> Option<Vec<u8>> {
        let mut body = self.body.clone().unwrap_or_default();

        if body.is_empty() {
            if let Some(mut source) = self.body_source.take() {
                if source.read_to_end(&mut body).is_err() {
                    return None;
                }
            }
        }

        if body.is_empty() {
            return None;
        }
        Some(body)
    }

    /// The raw request body with a filter applied.
    ///
    /// The filter runs only when the body is non-empty.
    pub fn raw_body_filtered<F>(&mut self, filter: F) -> Option<Vec<u8>>
    where
        F: FnOnce(Vec<u8>) -> Vec<u8>,
    {
        self.raw_body().map(filter)
    }

    // Live parameters: scalars are trimmed on the way out, lists are left
    // structurally untouched.
    fn live_value(&self, name: &str) -> Option<Value> {
        self.live.get(name).map(|value| match value {
            Value::Text(text) => Value::Text(text.trim().to_owned()),
            Value::List(_) => value.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_trims_name_and_value() {
        let mut cache = InputCache::new();
        cache.set(" name ", " John ");
        assert_eq!(cache.get("name"), Some(Value::from("John")));
    }

    #[test]
    fn set_trims_every_list_element() {
        let mut cache = InputCache::new();
        cache.set("tags", vec![" a", "b "]);
        assert_eq!(cache.get("tags"), Some(Value::from(vec!["a", "b"])));
    }

    #[test]
    fn filter_is_not_reapplied_to_cached_values() {
        let mut cache = InputCache::new();
        cache.set("name", "John");

        let got = cache.get_filtered("name", |_| Value::from("filtered"));
        assert_eq!(got, Some(Value::from("John")));
    }

    #[test]
    fn live_reads_are_filtered_but_not_memoized() {
        let cache = InputCache::with_request_params([("name", " John ")]);

        let got = cache.get_filtered("name", |value| match value {
            Value::Text(text) => Value::Text(text.to_uppercase()),
            list => list,
        });
        assert_eq!(got, Some(Value::from("JOHN")));

        // the unfiltered live value is still visible
        assert_eq!(cache.get("name"), Some(Value::from("John")));
    }

    #[test]
    fn live_lists_pass_through_untrimmed() {
        let cache = InputCache::with_request_params([("tags", vec![" a", "b "])]);
        assert_eq!(cache.get("tags"), Some(Value::from(vec![" a", "b "])));
    }

    #[test]
    fn missing_name_falls_back_to_default() {
        let cache = InputCache::new();
        assert_eq!(cache.get("missing"), None);
        assert_eq!(cache.get_or("missing", "fallback"), Value::from("fallback"));
    }

    #[test]
    fn ingest_query_decodes_and_overwrites() {
        let mut cache = InputCache::new();
        cache.set("name", "old");
        cache.ingest_query("name=+John+&q=a%2Fb");

        assert_eq!(cache.get("name"), Some(Value::from("John")));
        assert_eq!(cache.get("q"), Some(Value::from("a/b")));
    }

    #[test]
    fn buffered_body_wins_over_source() {
        let mut cache = InputCache::new();
        cache.set_body(b"buffered".to_vec());
        cache.set_body_source(std::io::Cursor::new(b"streamed".to_vec()));

        assert_eq!(cache.raw_body(), Some(b"buffered".to_vec()));
    }

    #[test]
    fn empty_buffer_falls_back_to_source() {
        let mut cache = InputCache::new();
        cache.set_body(Vec::new());
        cache.set_body_source(std::io::Cursor::new(b"streamed".to_vec()));

        assert_eq!(cache.raw_body(), Some(b"streamed".to_vec()));
    }

    #[test]
    fn absent_body_is_none() {
        let mut cache = InputCache::new();
        assert_eq!(cache.raw_body(), None);
        assert_eq!(cache.raw_body_filtered(|body| body), None);
    }

    #[test]
    fn body_filter_applies_to_nonempty_body() {
        let mut cache = InputCache::new();
        cache.set_body(b"abc".to_vec());

        let got = cache.raw_body_filtered(|mut body| {
            body.make_ascii_uppercase();
            body
        });
        assert_eq!(got, Some(b"ABC".to_vec()));
    }
}
