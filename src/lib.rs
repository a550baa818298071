//! `pagematch` dispatches an incoming hierarchical path (e.g. `foo/bar/baz`)
//! to a previously registered handler, passing along the unmatched trailing
//! segments as "subpage" arguments, and keeps a request-scoped cache of
//! sanitized input values drawn from the query string and request parameters.
//!
//! Resolution is *ancestor-first*: the scan walks the path segments left to
//! right and stops at the first registered prefix, so the shortest registered
//! ancestor always wins over a more specific registration reachable through
//! the same path. See [`Registry::resolve`] for the details.
//!
//! ```
//! use pagematch::{dispatch, InputCache, Outcome, Registry, Value};
//!
//! let mut registry = Registry::new();
//! registry.register("foo/bar", |page: &str, subpages: &[String]| {
//!     assert_eq!(page, "foo/bar");
//!     assert_eq!(subpages, ["baz", "qux"]);
//! });
//!
//! let mut cache = InputCache::new();
//! let outcome = dispatch(&registry, &mut cache, "foo/bar/baz/qux?name=+John+").unwrap();
//!
//! assert_eq!(outcome, Outcome::Success);
//! assert_eq!(registry.context().as_deref(), Some("foo/bar"));
//! assert_eq!(cache.get("name"), Some(Value::from("John")));
//! ```

#![deny(clippy::all)]
#![forbid(unsafe_code)]

pub mod dispatch;
pub mod error;
pub mod handler;
pub mod input;
pub mod registry;

#[cfg(feature = "hyper-server")]
pub mod service;

#[macro_use]
extern crate log;

pub use crate::dispatch::dispatch;
pub use crate::error::RouteError;
pub use crate::handler::{BoxedHandler, Handler, IntoOutcome, Outcome};
pub use crate::input::{InputCache, Value};
pub use crate::registry::{Match, Registry};
