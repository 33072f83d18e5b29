/*!
Truth normalization.

A raw comparison result is not necessarily a definite boolean. A payload type may compare
elementwise and return a mask, for example. Normalization is the single point where a raw result is
coerced into a definite boolean. A failure to coerce is propagated as
[`ComparisonError::Raised`] and is never reinterpreted as unsupported.

Normalization only ever applies to a definite raw result. The unsupported signal is produced before
any predicate runs and bypasses normalization entirely.
*/

use std::fmt;
use std::sync::Arc;

use crate::errors::{BoxError, ComparisonError};

/**
Conversion of a raw comparison result into a definite boolean.

This is the default normalization used when an adapter type is built without an explicit
normalizer.
*/
pub trait TruthValue {
    /**
    Return the truth value of `self`.

    Types without a meaningful truth value should return an error instead of guessing.
    */
    fn truth(self) -> Result<bool, ComparisonError>;
}

impl TruthValue for bool {
    fn truth(self) -> Result<bool, ComparisonError> {
        Ok(self)
    }
}

impl<E> TruthValue for Result<bool, E>
where
    E: Into<BoxError>,
{
    fn truth(self) -> Result<bool, ComparisonError> {
        self.map_err(ComparisonError::raised)
    }
}

/// A user supplied coercion from a raw comparison result `R` to a definite boolean.
pub struct Normalizer<R> {
    coerce: Arc<dyn Fn(R) -> Result<bool, ComparisonError> + Send + Sync>,
}

/// Public methods
impl<R: 'static> Normalizer<R> {
    /// Construct a new [`Normalizer`] from a fallible coercion.
    pub fn new<F, E>(coerce: F) -> Self
    where
        F: Fn(R) -> Result<bool, E> + Send + Sync + 'static,
        E: Into<BoxError> + 'static,
    {
        Self {
            coerce: Arc::new(move |raw| coerce(raw).map_err(ComparisonError::raised)),
        }
    }

    /// Construct a new [`Normalizer`] from a coercion that cannot fail.
    pub fn infallible<F>(coerce: F) -> Self
    where
        F: Fn(R) -> bool + Send + Sync + 'static,
    {
        Self {
            coerce: Arc::new(move |raw| Ok(coerce(raw))),
        }
    }

    /// Coerce a raw result into a definite boolean.
    pub fn apply(&self, raw: R) -> Result<bool, ComparisonError> {
        (self.coerce)(raw)
    }
}

impl<R: TruthValue + 'static> Normalizer<R> {
    /// The normalizer that defers to the [`TruthValue`] implementation of the raw result.
    pub fn truth_value() -> Self {
        Self {
            coerce: Arc::new(<R as TruthValue>::truth),
        }
    }
}

impl<R> Clone for Normalizer<R> {
    fn clone(&self) -> Self {
        Self {
            coerce: Arc::clone(&self.coerce),
        }
    }
}

impl<R> fmt::Debug for Normalizer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}
