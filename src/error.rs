use http::StatusCode;

use std::fmt;

/// A failed dispatch attempt.
///
/// Both variants are terminal for the current dispatch. Constructing an
/// error has no side effects; the status class a caller should surface is a
/// separate, pure mapping ([`RouteError::status`]).
///
/// ```
/// use pagematch::{Registry, RouteError};
///
/// let mut registry = Registry::new();
/// registry.register("home", |_: &str, _: &[String]| ());
///
/// // no registered ancestor matches
/// if let Err(err) = registry.resolve("foobar") {
///     assert_eq!(err, RouteError::NotFound { path: "foobar".into() });
///     assert_eq!(err.status(), http::StatusCode::NOT_FOUND);
/// }
/// ```
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum RouteError {
    /// No ancestor registration matched the incoming path.
    NotFound {
        /// The path that failed to resolve.
        path: String,
    },
    /// A registration exists at the matched key, but nothing callable is
    /// attached to it.
    NotCallable {
        /// The matched registration key.
        key: String,
    },
}

impl RouteError {
    /// The externally visible status class for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::NotCallable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "page \"{path}\" not found"),
            Self::NotCallable { key } => {
                write!(f, "handler for page \"{key}\" is not callable")
            }
        }
    }
}

impl std::error::Error for RouteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let not_found = RouteError::NotFound { path: "a/b".into() };
        let not_callable = RouteError::NotCallable { key: "a".into() };
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_callable.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
