//! Page registration and ancestor-first path resolution.

use crate::error::RouteError;
use crate::handler::{BoxedHandler, Handler, Outcome};

use std::collections::HashMap;
use std::sync::Mutex;

/// A registered page entry.
enum Entry {
    Handler(BoxedHandler),
    /// A key reserved without a callable attached. Resolving to it fails
    /// with [`RouteError::NotCallable`].
    Placeholder,
}

/// A successful resolution: the matched registration key and the residual
/// subpage segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The matched key, without any trailing slash the registration may
    /// have carried.
    pub key: String,
    /// The path segments remaining after the matched key.
    pub subpages: Vec<String>,
}

/// Maps registered page prefixes to handlers and resolves incoming paths
/// against them.
///
/// Registrations are keyed by the exact string given to [`register`], with
/// no normalization: `"foo/bar"` and `"foo/bar/"` are distinct keys, and
/// registering the same key twice silently overwrites the earlier handler.
///
/// The registry is intended to be populated once at startup and shared
/// immutably afterwards; only the page context uses interior mutability.
///
/// [`register`]: Registry::register
#[derive(Default)]
pub struct Registry {
    pages: HashMap<String, Entry>,
    context: Mutex<Option<String>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a page.
    ///
    /// The key is stored exactly as given, trailing slash included. A later
    /// registration for the same key replaces the earlier one.
    pub fn register<H>(&mut self, page: impl Into<String>, handler: H)
    where
        H: Handler + Send + Sync + 'static,
    {
        self.pages.insert(page.into(), Entry::Handler(Box::new(handler)));
    }

    /// Reserve a page key without attaching a handler.
    ///
    /// Resolving a path to a reserved key fails with
    /// [`RouteError::NotCallable`], distinct from
    /// [`RouteError::NotFound`].
    pub fn reserve(&mut self, page: impl Into<String>) {
        self.pages.insert(page.into(), Entry::Placeholder);
    }

    /// Resolve an incoming path to its registered ancestor.
    ///
    /// The path segments are scanned left to right, accumulating a candidate
    /// key; after each segment the candidate is tested bare and with a
    /// trailing slash appended. The scan stops at the *first* hit, so the
    /// shortest registered ancestor always wins. This is deliberately not
    /// longest-prefix matching: if both `"foo"` and `"foo/bar"` are
    /// registered, `"foo/bar/baz"` resolves to `"foo"`, and the longer
    /// registration is unreachable through that path.
    ///
    /// On success the page context is set to the matched key and the
    /// remainder of the path, trimmed of surrounding `/` and `?`, becomes
    /// the subpage list. An empty remainder yields an empty list.
    pub fn resolve(&self, path: &str) -> Result<Match, RouteError> {
        let mut key = String::new();
        let mut matched = false;

        for segment in path.split('/') {
            key.push_str(segment);
            if self.pages.contains_key(&key) || self.pages.contains_key(&format!("{key}/")) {
                matched = true;
                break;
            }
            key.push('/');
        }

        // The accumulated candidate is never itself a match.
        if !matched {
            debug!("no registered ancestor for \"{path}\"");
            return Err(RouteError::NotFound {
                path: path.to_owned(),
            });
        }

        let remainder = path[key.len()..].trim_matches(|c| c == '/' || c == '?');
        let subpages = if remainder.is_empty() {
            Vec::new()
        } else {
            remainder.split('/').map(str::to_owned).collect()
        };

        match self.entry(&key) {
            Some(Entry::Handler(_)) => {}
            Some(Entry::Placeholder) => {
                debug!("page \"{key}\" is reserved but has no handler");
                return Err(RouteError::NotCallable { key });
            }
            None => {
                return Err(RouteError::NotFound {
                    path: path.to_owned(),
                })
            }
        }

        self.set_context(key.clone());

        Ok(Match { key, subpages })
    }

    /// Resolve a path and invoke its handler with
    /// `(matched_key, subpages)`.
    ///
    /// Returns the handler's [`Outcome`]: an explicit
    /// [`Outcome::Failure`] means the handler ran but declined the
    /// request, which is a normal return rather than an error.
    pub fn call(&self, path: &str) -> Result<Outcome, RouteError> {
        let m = self.resolve(path)?;

        let handler = match self.entry(&m.key) {
            Some(Entry::Handler(handler)) => handler,
            _ => return Err(RouteError::NotCallable { key: m.key }),
        };

        trace!(
            "dispatching \"{path}\" to \"{}\" with {} subpage(s)",
            m.key,
            m.subpages.len()
        );

        Ok(handler.handle(&m.key, &m.subpages))
    }

    /// Set the page context.
    ///
    /// Contexts define an arbitrary grouping for pages, useful for menu
    /// rendering and similar presentation concerns outside this crate.
    pub fn set_context(&self, context: impl Into<String>) {
        *self.context.lock().unwrap() = Some(context.into());
    }

    /// The most recently matched page key, if any dispatch has succeeded.
    pub fn context(&self) -> Option<String> {
        self.context.lock().unwrap().clone()
    }

    // Two-candidate lookup: the bare key first, then with a trailing slash.
    fn entry(&self, key: &str) -> Option<&Entry> {
        self.pages
            .get(key)
            .or_else(|| self.pages.get(&format!("{key}/")))
    }
}
