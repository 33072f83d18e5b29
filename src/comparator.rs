/*!
Comparator adapter types and their instances.

A [`ComparatorType`] is the artifact produced by a factory call. It holds the completed table of
relational operators and is immutable once built. Instances are created with
[`ComparatorType::wrap`] and hold exactly one payload.

Every relational call on a [`Comparator`] runs in the same order:

1. The type-compatibility guard. Payloads of different types report [`Comparison::Unsupported`].
1. The operator from the completed table. Tombstoned operators report [`Comparison::Unsupported`].
1. Supplied operators run the key function or predicate and then the normalizer.
*/

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::completion::{CompletedOperators, OperatorKind};
use crate::errors::ComparisonError;
use crate::guard::{self, Compatibility};
use crate::operator::{Comparison, ComparisonResult, Operator};
use crate::options::ComparatorOptions;
use crate::payload::Payload;

/**
A comparator adapter type.

Cloning is cheap and clones share the same operator table. The type is `Send` and `Sync` so it can
be shared across threads without synchronization.
*/
#[derive(Clone)]
pub struct ComparatorType {
    /// The name of the adapter type.
    name: Arc<str>,

    /// The completed relational operators.
    operators: Arc<CompletedOperators>,
}

/// Public methods
impl ComparatorType {
    /// Get the name of the adapter type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return a copy of this adapter type with a different name. The operators are shared.
    pub fn renamed<N: AsRef<str>>(&self, name: N) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            operators: Arc::clone(&self.operators),
        }
    }

    /// Wrap `value` in a new instance of this adapter type.
    pub fn wrap<T: Any + Send + Sync>(&self, value: T) -> Comparator {
        Comparator {
            payload: Payload::new(value),
            adapter: self.clone(),
        }
    }

    /// Get how the `operator` was produced for this adapter type.
    pub fn operator_kind(&self, operator: Operator) -> OperatorKind {
        self.operators.kind(operator)
    }

    /// Returns true if the `operator` is not tombstoned.
    pub fn supports(&self, operator: Operator) -> bool {
        self.operator_kind(operator) != OperatorKind::Tombstone
    }

    /// Returns true if the ordering operators are installed.
    pub fn is_ordered(&self) -> bool {
        self.operators.root().is_some()
    }

    /// Get the supplied ordering operator that the missing ones were derived from.
    pub fn ordering_root(&self) -> Option<Operator> {
        self.operators.root()
    }
}

/// Crate-only methods
impl ComparatorType {
    /// Construct a new [`ComparatorType`] from a completed operator table.
    pub(crate) fn new(options: &ComparatorOptions, operators: CompletedOperators) -> Self {
        log::debug!(
            "Built comparator type {} with operators {:?}",
            options.type_name(),
            operators
        );

        Self {
            name: Arc::from(options.type_name()),
            operators: Arc::new(operators),
        }
    }
}

impl fmt::Debug for ComparatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparatorType")
            .field("name", &self.name)
            .field("operators", &self.operators)
            .finish()
    }
}

/**
An instance of a comparator adapter type holding one payload.

The payload is immutable by contract. There is no way to get a mutable reference to it.
*/
pub struct Comparator {
    /// The wrapped value.
    payload: Payload,

    /// The adapter type this instance belongs to.
    adapter: ComparatorType,
}

/// Public methods
impl Comparator {
    /// Get the payload if it is of type `T`.
    pub fn value<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Unwrap the payload if it is of type `T`. Returns the comparator unchanged otherwise.
    pub fn into_value<T: Any>(self) -> Result<T, Self> {
        let Comparator { payload, adapter } = self;
        payload
            .downcast::<T>()
            .map_err(|payload| Comparator { payload, adapter })
    }

    /// Get the name of the payload's type.
    pub fn payload_type_name(&self) -> &'static str {
        self.payload.type_name()
    }

    /// Get the adapter type of this instance.
    pub fn adapter(&self) -> &ComparatorType {
        &self.adapter
    }

    /// Run the type-compatibility guard against `other`.
    pub fn compatibility(&self, other: &Comparator) -> Compatibility {
        guard::check(&self.payload, &other.payload)
    }

    /**
    Evaluate `self <operator> other`.

    The operator table of `self` is used. `other` only contributes its payload.
    */
    pub fn apply(&self, operator: Operator, other: &Comparator) -> ComparisonResult {
        if self.compatibility(other) == Compatibility::Unsupported {
            return Ok(Comparison::Unsupported);
        }

        self.adapter
            .operators
            .evaluate(operator, &self.payload, &other.payload)
    }

    /// Evaluate `self == other`.
    pub fn eq(&self, other: &Comparator) -> ComparisonResult {
        self.apply(Operator::Eq, other)
    }

    /// Evaluate `self != other`.
    pub fn ne(&self, other: &Comparator) -> ComparisonResult {
        self.apply(Operator::Ne, other)
    }

    /// Evaluate `self < other`.
    pub fn lt(&self, other: &Comparator) -> ComparisonResult {
        self.apply(Operator::Lt, other)
    }

    /// Evaluate `self <= other`.
    pub fn le(&self, other: &Comparator) -> ComparisonResult {
        self.apply(Operator::Le, other)
    }

    /// Evaluate `self > other`.
    pub fn gt(&self, other: &Comparator) -> ComparisonResult {
        self.apply(Operator::Gt, other)
    }

    /// Evaluate `self >= other`.
    pub fn ge(&self, other: &Comparator) -> ComparisonResult {
        self.apply(Operator::Ge, other)
    }

    /**
    Compute an [`Ordering`] between `self` and `other`.

    Returns `None` if the operands are not comparable, either because the payload types differ, the
    adapter type has no ordering or neither `eq`, `lt` nor `gt` holds.
    */
    pub fn try_partial_cmp(&self, other: &Comparator) -> Result<Option<Ordering>, ComparisonError> {
        match self.eq(other)? {
            Comparison::True => return Ok(Some(Ordering::Equal)),
            Comparison::Unsupported => return Ok(None),
            Comparison::False => {}
        }

        match self.lt(other)? {
            Comparison::True => return Ok(Some(Ordering::Less)),
            Comparison::Unsupported => return Ok(None),
            Comparison::False => {}
        }

        match self.gt(other)? {
            Comparison::True => Ok(Some(Ordering::Greater)),
            Comparison::False | Comparison::Unsupported => Ok(None),
        }
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.adapter.name())
            .field("value", &format_args!("<{}>", self.payload.type_name()))
            .finish()
    }
}
