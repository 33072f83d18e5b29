/*!
The legacy combined comparator factory.

This factory combines an optional key function, an optional result normalizer (historically called
`nonzero`) and an `order` flag. Unlike the key based factory, the raw comparison of keys comes from
[`RichCompare`], so it may produce a non-boolean result such as an elementwise mask. Every raw
result goes through the normalizer before it is interpreted. When no normalizer is set, the
[`TruthValue`] implementation of the raw result type is used instead.
*/

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::comparator::ComparatorType;
use crate::completion::{CompletedOperators, OrderingProcedures};
use crate::factory::{guarded, RawPredicate};
use crate::normalize::{Normalizer, TruthValue};
use crate::operator::Operator;
use crate::options::ComparatorOptions;
use crate::utils::comparator::RichCompare;

/**
Builder for a comparator adapter type using the legacy combined mode.

# Example

```
use cmpwrap::{Compare, Comparison, Normalizer};

// Compare vectors by their length and treat any comparison as a definite boolean.
let cmp = Compare::with_key(|value: &Vec<u8>| value.len())
    .nonzero(Normalizer::infallible(|raw: bool| raw))
    .build();

assert_eq!(cmp.wrap(vec![1_u8]).lt(&cmp.wrap(vec![0_u8, 0])).unwrap(), Comparison::True);
```
*/
pub struct Compare<T, R> {
    /// Raw equality of two payloads.
    raw_eq: RawPredicate<T, R>,

    /// Raw less-than of two payloads.
    raw_lt: RawPredicate<T, R>,

    /// Coerces raw results into definite booleans.
    nonzero: Normalizer<R>,

    /// Options for the adapter type.
    options: ComparatorOptions,
}

/// Public methods
impl<T> Compare<T, T::Output>
where
    T: RichCompare + Any + Send + Sync,
    T::Output: TruthValue + 'static,
{
    /// Construct a new [`Compare`] builder comparing payloads directly.
    pub fn new() -> Self {
        Self::from_raw(
            Arc::new(|left: &T, right: &T| Ok(left.rich_eq(right))),
            Arc::new(|left: &T, right: &T| Ok(left.rich_lt(right))),
        )
    }
}

/// Public methods
impl<T, R> Compare<T, R>
where
    T: Any + Send + Sync,
    R: TruthValue + 'static,
{
    /// Construct a new [`Compare`] builder comparing payloads by `key`.
    pub fn with_key<K, F>(key: F) -> Self
    where
        K: RichCompare<Output = R> + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let key = Arc::new(key);
        let lt_key = Arc::clone(&key);

        Self::from_raw(
            Arc::new(move |left: &T, right: &T| {
                let left_key = key(left);
                Ok(left_key.rich_eq(&key(right)))
            }),
            Arc::new(move |left: &T, right: &T| {
                let left_key = lt_key(left);
                Ok(left_key.rich_lt(&lt_key(right)))
            }),
        )
    }

    /// Set the normalizer applied to every raw comparison result.
    pub fn nonzero(mut self, nonzero: Normalizer<R>) -> Self {
        self.nonzero = nonzero;
        self
    }

    /**
    Set whether ordering operators are installed.

    **This defaults to true.**
    */
    pub fn order(mut self, order: bool) -> Self {
        self.options = self.options.with_order(order);
        self
    }

    /// Set the name of the adapter type.
    pub fn named<N: Into<String>>(mut self, type_name: N) -> Self {
        self.options = self.options.with_type_name(type_name);
        self
    }

    /// Build the comparator adapter type.
    pub fn build(self) -> ComparatorType {
        let eq = guarded(self.raw_eq, self.nonzero.clone());

        let mut ordering = OrderingProcedures::new();
        if self.options.order() {
            ordering.insert(Operator::Lt, guarded(self.raw_lt, self.nonzero));
        }

        ComparatorType::new(&self.options, CompletedOperators::complete(eq, ordering))
    }
}

/// Private methods
impl<T, R> Compare<T, R>
where
    T: Any + Send + Sync,
    R: TruthValue + 'static,
{
    fn from_raw(raw_eq: RawPredicate<T, R>, raw_lt: RawPredicate<T, R>) -> Self {
        Self {
            raw_eq,
            raw_lt,
            nonzero: Normalizer::truth_value(),
            options: ComparatorOptions::default(),
        }
    }
}

impl<T> Default for Compare<T, T::Output>
where
    T: RichCompare + Any + Send + Sync,
    T::Output: TruthValue + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> fmt::Debug for Compare<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compare")
            .field("nonzero", &self.nonzero)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::fmt;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::ComparisonError;
    use crate::operator::Comparison;

    /// A value whose comparisons produce another value instead of a boolean, like array types do.
    #[derive(Clone, Debug)]
    struct NoTruthValue(i32);

    /// The raw outcome of comparing two [`NoTruthValue`]s.
    #[derive(Debug)]
    struct Outcome(bool);

    #[derive(Debug)]
    struct AmbiguousTruthValue;

    impl fmt::Display for AmbiguousTruthValue {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "NoTruthValue has no truth value.")
        }
    }

    impl Error for AmbiguousTruthValue {}

    impl TruthValue for Outcome {
        fn truth(self) -> Result<bool, ComparisonError> {
            Err(ComparisonError::raised(AmbiguousTruthValue))
        }
    }

    impl RichCompare for NoTruthValue {
        type Output = Outcome;

        fn rich_eq(&self, other: &Self) -> Outcome {
            Outcome(self.0 == other.0)
        }

        fn rich_lt(&self, other: &Self) -> Outcome {
            Outcome(self.0 < other.0)
        }
    }

    fn outcome_value() -> Normalizer<Outcome> {
        Normalizer::infallible(|outcome: Outcome| outcome.0)
    }

    #[test]
    fn plain_values_compare_natively() {
        let cmp = Compare::<i32, bool>::new().build();

        assert_eq!(cmp.wrap(1).eq(&cmp.wrap(1)).unwrap(), Comparison::True);
        assert_eq!(cmp.wrap(1).lt(&cmp.wrap(2)).unwrap(), Comparison::True);
        assert_eq!(cmp.wrap(2).ge(&cmp.wrap(2)).unwrap(), Comparison::True);
    }

    #[test]
    fn keys_are_applied_before_comparing() {
        let cmp = Compare::with_key(|value: &String| value.to_lowercase()).build();

        assert_eq!(
            cmp.wrap("abc".to_string())
                .eq(&cmp.wrap("ABC".to_string()))
                .unwrap(),
            Comparison::True
        );
        assert_eq!(
            cmp.wrap("b".to_string())
                .gt(&cmp.wrap("A".to_string()))
                .unwrap(),
            Comparison::True
        );
    }

    #[test]
    fn missing_truth_value_raises_without_a_normalizer() {
        let cmp = Compare::<NoTruthValue, Outcome>::new().build();
        let one = cmp.wrap(NoTruthValue(1));

        for operator in Operator::ALL {
            let err = one
                .apply(operator, &cmp.wrap(NoTruthValue(2)))
                .unwrap_err();
            assert!(err.downcast_ref::<AmbiguousTruthValue>().is_some());
        }
    }

    #[test]
    fn normalizer_makes_non_boolean_results_comparable() {
        let cmp = Compare::<NoTruthValue, Outcome>::new()
            .nonzero(outcome_value())
            .build();

        assert_eq!(
            cmp.wrap(NoTruthValue(1))
                .eq(&cmp.wrap(NoTruthValue(1)))
                .unwrap(),
            Comparison::True
        );
        assert_eq!(
            cmp.wrap(NoTruthValue(2))
                .ne(&cmp.wrap(NoTruthValue(1)))
                .unwrap(),
            Comparison::True
        );
        assert_eq!(
            cmp.wrap(NoTruthValue(1))
                .ge(&cmp.wrap(NoTruthValue(1)))
                .unwrap(),
            Comparison::True
        );
        assert_eq!(
            cmp.wrap(NoTruthValue(1))
                .le(&cmp.wrap(NoTruthValue(1)))
                .unwrap(),
            Comparison::True
        );
        assert_eq!(
            cmp.wrap(NoTruthValue(0))
                .lt(&cmp.wrap(NoTruthValue(1)))
                .unwrap(),
            Comparison::True
        );
        assert_eq!(
            cmp.wrap(NoTruthValue(2))
                .gt(&cmp.wrap(NoTruthValue(1)))
                .unwrap(),
            Comparison::True
        );
    }

    #[test]
    fn normalizer_is_skipped_for_unsupported_comparisons() {
        let cmp = Compare::<NoTruthValue, Outcome>::new()
            .nonzero(Normalizer::new(|_: Outcome| {
                Err::<bool, _>("the normalizer should not run")
            }))
            .build();

        assert_eq!(
            cmp.wrap(NoTruthValue(1)).eq(&cmp.wrap(1_i32)).unwrap(),
            Comparison::Unsupported
        );
    }

    #[test]
    fn ordering_can_be_disabled() {
        let cmp = Compare::<u8, bool>::new().order(false).named("Unordered").build();

        assert_eq!(cmp.name(), "Unordered");
        assert!(!cmp.is_ordered());
        assert_eq!(cmp.wrap(1_u8).lt(&cmp.wrap(2_u8)).unwrap(), Comparison::Unsupported);
        assert_eq!(cmp.wrap(1_u8).ne(&cmp.wrap(2_u8)).unwrap(), Comparison::True);
    }
}
