//! The dispatch entry point.

use crate::error::RouteError;
use crate::handler::Outcome;
use crate::input::InputCache;
use crate::registry::Registry;

/// Dispatch a request URI against a registry.
///
/// The portion of the URI after the first `?` is parsed and ingested into
/// the cache *before* the path is resolved, so query parameters are
/// observable through the cache whether or not resolution succeeds.
///
/// Three failure classes exist, and a caller surfacing HTTP statuses maps
/// them separately:
///
/// * `Err(RouteError::NotFound)` — no registered ancestor; 404 class.
/// * `Err(RouteError::NotCallable)` — a registration exists but nothing
///   callable is attached; 503 class.
/// * `Ok(Outcome::Failure)` — the handler ran but declined the request;
///   503 class, as a normal return rather than an error.
///
/// ```
/// use pagematch::{dispatch, InputCache, Outcome, Registry, Value};
///
/// let mut registry = Registry::new();
/// registry.register("foo/bar", |_: &str, _: &[String]| ());
///
/// let mut cache = InputCache::new();
/// let outcome = dispatch(&registry, &mut cache, "foo/bar/baz?page=2");
///
/// assert_eq!(outcome, Ok(Outcome::Success));
/// assert_eq!(cache.get("page"), Some(Value::from("2")));
/// ```
pub fn dispatch(
    registry: &Registry,
    cache: &mut InputCache,
    uri: &str,
) -> Result<Outcome, RouteError> {
    let (path, query) = match uri.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (uri, None),
    };

    if let Some(query) = query {
        cache.ingest_query(query);
    }

    registry.call(path)
}
