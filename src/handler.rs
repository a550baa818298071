//! The page handler contract.
//!
//! A handler is any callable invoked with the matched registration key and
//! the residual subpage segments. Its return value converts into an
//! [`Outcome`] through [`IntoOutcome`], so plain `()`-returning closures work
//! out of the box and are treated as successful.

/// What a handler reports back to the dispatcher.
///
/// An explicit [`Outcome::Failure`] means the handler ran to completion but
/// declined the request; callers should surface it as a
/// service-unavailable class result. It is a normal return value, distinct
/// from the [`RouteError`](crate::RouteError) conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Conversion of a handler's return value into an [`Outcome`].
///
/// `()` converts to [`Outcome::Success`] (a void return is a success), and
/// `bool` converts by value.
pub trait IntoOutcome {
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Outcome {
        self
    }
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome {
        Outcome::Success
    }
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> Outcome {
        if self {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

/// A page handler.
///
/// Implemented for every `Fn(&str, &[String]) -> R` where `R` converts into
/// an [`Outcome`], so closures and free functions register directly:
///
/// ```
/// use pagematch::Registry;
///
/// let mut registry = Registry::new();
/// registry.register("blog", |_: &str, subpages: &[String]| {
///     println!("rendering blog entry {:?}", subpages);
/// });
/// ```
pub trait Handler {
    fn handle(&self, page: &str, subpages: &[String]) -> Outcome;
}

impl<F, R> Handler for F
where
    F: Fn(&str, &[String]) -> R,
    R: IntoOutcome,
{
    fn handle(&self, page: &str, subpages: &[String]) -> Outcome {
        self(page, subpages).into_outcome()
    }
}

pub type BoxedHandler = Box<dyn Handler + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_return_is_success() {
        let handler = |_: &str, _: &[String]| ();
        assert_eq!(handler.handle("home", &[]), Outcome::Success);
    }

    #[test]
    fn bool_return_converts_by_value() {
        let ok = |_: &str, _: &[String]| true;
        let declined = |_: &str, _: &[String]| false;
        assert_eq!(ok.handle("home", &[]), Outcome::Success);
        assert_eq!(declined.handle("home", &[]), Outcome::Failure);
    }
}
