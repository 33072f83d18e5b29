/*!
Two-sided operator dispatch.

The relational operators of a [`Comparator`] only report [`Comparison::Unsupported`] when they cannot
decide. This module implements the protocol a host uses to turn that signal into a final answer:

1. Evaluate the operator on the left operand.
1. If it is unsupported, evaluate the reflected operator on the right operand, e.g. `a < b` is
   retried as `b > a`.
1. If both sides decline, equality falls back to identity, inequality to non-identity and the
   ordering operators fail with [`ComparisonError::NotSupported`].

Failures raised by either side propagate immediately and the other side is not consulted.
*/

use std::ptr;

use crate::comparator::Comparator;
use crate::errors::ComparisonError;
use crate::operator::{Comparison, Operator};

/**
Evaluate `left <operator> right` using the two-sided fallback protocol.

# Example

```
use cmpwrap::{dispatch, using_key, Operator};

let unordered = using_key(|value: &i32| *value, false);
let one = unordered.wrap(1);
let two = unordered.wrap(2);

assert!(!dispatch::rich_compare(&one, Operator::Eq, &two).unwrap());
assert!(dispatch::rich_compare(&one, Operator::Lt, &two).is_err());
```
*/
pub fn rich_compare(
    left: &Comparator,
    operator: Operator,
    right: &Comparator,
) -> Result<bool, ComparisonError> {
    if let Some(outcome) = left.apply(operator, right)?.as_bool() {
        return Ok(outcome);
    }

    let reflected = operator.reflected();
    log::trace!(
        "{:?} declined `{}`. Trying the reflected `{}` on {:?}.",
        left,
        operator,
        reflected,
        right
    );
    if let Some(outcome) = right.apply(reflected, left)?.as_bool() {
        return Ok(outcome);
    }

    match operator {
        Operator::Eq => Ok(ptr::eq(left, right)),
        Operator::Ne => Ok(!ptr::eq(left, right)),
        _ => Err(ComparisonError::NotSupported {
            operator,
            left: left.payload_type_name(),
            right: right.payload_type_name(),
        }),
    }
}

/// Evaluate `left <operator> right` and keep the unsupported signal instead of falling back.
pub fn try_both_sides(
    left: &Comparator,
    operator: Operator,
    right: &Comparator,
) -> Result<Comparison, ComparisonError> {
    match left.apply(operator, right)? {
        Comparison::Unsupported => right.apply(operator.reflected(), left),
        outcome => Ok(outcome),
    }
}
