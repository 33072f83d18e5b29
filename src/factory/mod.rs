/*!
The comparator factories.

All factories produce a [`ComparatorType`](crate::ComparatorType) and funnel through the same
steps:

1. Raw typed predicates are built, either from a key function or from caller supplied predicates.
1. Each raw predicate is wrapped with the type-compatibility guard and the normalizer, producing a
   type-erased procedure.
1. The procedures are handed to the total-order completion algorithm.
*/

use std::any::Any;
use std::sync::Arc;

use crate::completion::Procedure;
use crate::errors::ComparisonError;
use crate::guard;
use crate::normalize::Normalizer;
use crate::operator::Comparison;

pub mod key;
pub mod legacy;
pub mod predicates;

/// A typed comparison producing a raw, not yet normalized, result.
pub(crate) type RawPredicate<T, R> =
    Arc<dyn Fn(&T, &T) -> Result<R, ComparisonError> + Send + Sync>;

/**
Wrap a raw predicate over `T` with the guard and the normalizer.

The guard runs first. The raw predicate and the normalizer are only invoked for a pair of `T`
payloads. Failures from either propagate unchanged.
*/
pub(crate) fn guarded<T, R>(raw: RawPredicate<T, R>, normalizer: Normalizer<R>) -> Procedure
where
    T: Any + Send + Sync,
    R: 'static,
{
    Arc::new(move |left, right| {
        let (left, right) = match guard::narrow::<T>(left, right) {
            Some(operands) => operands,
            None => return Ok(Comparison::Unsupported),
        };

        let raw_result = raw(left, right)?;
        Ok(normalizer.apply(raw_result)?.into())
    })
}
