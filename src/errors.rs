/*!
This module contains the error types for comparator construction and comparison evaluation as well
as `From` implementations for common errors to enable error propagation.

There are two families of errors:

1. [`FactoryError`] is reported synchronously while an adapter type is being built. No adapter type
   is produced when one of these is returned.
1. [`ComparisonError`] is reported by the relational operators of an adapter instance. The
   [`ComparisonError::Raised`] variant carries a failure produced by user code (a key function, a
   predicate or a normalizer) exactly as it was raised.

Note that "unsupported" is not an error. It is the
[`Comparison::Unsupported`](crate::Comparison::Unsupported) value.
*/

use std::error::Error;
use std::fmt;

use crate::operator::Operator;

/// Boxed error type accepted from user supplied functions.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Alias for a [`Result`] that wraps a [`FactoryError`].
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Errors raised while building a comparator adapter type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FactoryError {
    /// Variant for predicate sets that were built without an equality predicate.
    MissingEquality,

    /// Variant for predicate sets where the same operator was supplied more than once.
    DuplicatePredicate(Operator),

    /**
    Variant for attempts to supply a predicate for an operator that is always derived.

    Only [`Operator::Ne`] falls in this category. It is always the negation of equality.
    */
    DerivedOnly(Operator),

    /// Variant for operator names that could not be parsed.
    UnknownOperator(String),
}

impl Error for FactoryError {}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryError::MissingEquality => write!(
                f,
                "An equality predicate is required to build a comparator from predicates."
            ),
            FactoryError::DuplicatePredicate(operator) => write!(
                f,
                "A predicate for `{}` was supplied more than once.",
                operator.name()
            ),
            FactoryError::DerivedOnly(operator) => write!(
                f,
                "The `{}` operator is always derived and cannot be supplied directly.",
                operator.name()
            ),
            FactoryError::UnknownOperator(name) => {
                write!(f, "`{}` is not a relational operator name.", name)
            }
        }
    }
}

/// Errors surfaced by the relational operators of a comparator.
#[derive(Debug)]
pub enum ComparisonError {
    /**
    Variant for failures raised by user code during a comparison.

    The wrapped value is the original error. It is never reinterpreted and can be recovered with
    [`ComparisonError::downcast_ref`] or [`ComparisonError::into_inner`].
    */
    Raised(BoxError),

    /**
    Variant for comparisons that neither operand supports.

    This is only produced by [`crate::dispatch`] after both sides of the fallback protocol
    declined. The relational operators themselves never return it.
    */
    NotSupported {
        /// The operator requested by the caller.
        operator: Operator,
        /// The payload type name of the left operand.
        left: &'static str,
        /// The payload type name of the right operand.
        right: &'static str,
    },
}

/// Public methods
impl ComparisonError {
    /// Wrap a failure raised by user code.
    pub fn raised<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        ComparisonError::Raised(err.into())
    }

    /// Returns a reference to the original error if it was raised with type `E`.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            ComparisonError::Raised(base_err) => base_err.downcast_ref::<E>(),
            ComparisonError::NotSupported { .. } => None,
        }
    }

    /// Returns the original error raised by user code, if any.
    pub fn into_inner(self) -> Option<BoxError> {
        match self {
            ComparisonError::Raised(base_err) => Some(base_err),
            ComparisonError::NotSupported { .. } => None,
        }
    }
}

impl Error for ComparisonError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ComparisonError::Raised(base_err) => Some(base_err.as_ref()),
            ComparisonError::NotSupported { .. } => None,
        }
    }
}

impl fmt::Display for ComparisonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonError::Raised(base_err) => write!(f, "{}", base_err),
            ComparisonError::NotSupported {
                operator,
                left,
                right,
            } => write!(
                f,
                "'{}' not supported between instances of '{}' and '{}'",
                operator.symbol(),
                left,
                right
            ),
        }
    }
}

impl From<BoxError> for ComparisonError {
    fn from(err: BoxError) -> Self {
        ComparisonError::Raised(err)
    }
}

impl From<String> for ComparisonError {
    fn from(msg: String) -> Self {
        ComparisonError::Raised(msg.into())
    }
}

impl From<&str> for ComparisonError {
    fn from(msg: &str) -> Self {
        ComparisonError::Raised(msg.into())
    }
}
