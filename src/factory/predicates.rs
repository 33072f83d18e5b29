/*!
The predicate based comparator factory.

Equality and ordering are defined by caller supplied two-argument predicates, one per relational
operator the caller wishes to define explicitly. Equality is mandatory. Any subset of `lt`, `le`, `gt`
and `ge` may be supplied and the missing ones are derived by total-order completion.

Predicates may return any raw result type `R`. The raw result is turned into a definite boolean by
the set's [`Normalizer`], which defaults to the [`TruthValue`] implementation of `R`.
*/

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::comparator::ComparatorType;
use crate::completion::{CompletedOperators, OrderingProcedures};
use crate::errors::{FactoryError, FactoryResult};
use crate::factory::{guarded, RawPredicate};
use crate::normalize::{Normalizer, TruthValue};
use crate::operator::Operator;
use crate::options::ComparatorOptions;

/**
A set of relational predicates over payloads of type `T`, at most one per operator.

Misuse, such as registering an operator twice, is recorded and reported by
[`PredicateSet::build`]. No adapter type is produced in that case.

# Example

```
use cmpwrap::{Comparison, PredicateSet};

let cmp = PredicateSet::new()
    .eq(|a: &i32, b: &i32| a == b)
    .lt(|a: &i32, b: &i32| a < b)
    .build()
    .unwrap();

assert_eq!(cmp.wrap(1).le(&cmp.wrap(1)).unwrap(), Comparison::True);
assert_eq!(cmp.wrap(2).gt(&cmp.wrap(1)).unwrap(), Comparison::True);
```
*/
pub struct PredicateSet<T, R = bool> {
    /// The mandatory equality predicate.
    eq: Option<RawPredicate<T, R>>,

    /// The supplied ordering predicates in registration order.
    ordering: Vec<(Operator, RawPredicate<T, R>)>,

    /// Coerces raw predicate results into definite booleans.
    normalizer: Normalizer<R>,

    /// Options for the adapter type.
    options: ComparatorOptions,

    /// The first misuse encountered while registering predicates.
    misuse: Option<FactoryError>,
}

/// Public methods
impl<T, R> PredicateSet<T, R>
where
    T: Any + Send + Sync,
    R: TruthValue + 'static,
{
    /// Construct an empty [`PredicateSet`] that normalizes with [`TruthValue`].
    pub fn new() -> Self {
        Self::with_normalizer(Normalizer::truth_value())
    }
}

/// Public methods
impl<T, R> PredicateSet<T, R>
where
    T: Any + Send + Sync,
    R: 'static,
{
    /// Construct an empty [`PredicateSet`] that normalizes raw results with `normalizer`.
    pub fn with_normalizer(normalizer: Normalizer<R>) -> Self {
        Self {
            eq: None,
            ordering: vec![],
            normalizer,
            options: ComparatorOptions::default(),
            misuse: None,
        }
    }

    /// Replace the normalizer.
    pub fn normalize(mut self, normalizer: Normalizer<R>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Set the name of the adapter type.
    pub fn named<N: Into<String>>(mut self, type_name: N) -> Self {
        self.options = self.options.with_type_name(type_name);
        self
    }

    /// Supply the equality predicate.
    pub fn eq<F>(self, predicate: F) -> Self
    where
        F: Fn(&T, &T) -> R + Send + Sync + 'static,
    {
        self.with(Operator::Eq, predicate)
    }

    /// Supply the less-than predicate.
    pub fn lt<F>(self, predicate: F) -> Self
    where
        F: Fn(&T, &T) -> R + Send + Sync + 'static,
    {
        self.with(Operator::Lt, predicate)
    }

    /// Supply the less-than-or-equal predicate.
    pub fn le<F>(self, predicate: F) -> Self
    where
        F: Fn(&T, &T) -> R + Send + Sync + 'static,
    {
        self.with(Operator::Le, predicate)
    }

    /// Supply the greater-than predicate.
    pub fn gt<F>(self, predicate: F) -> Self
    where
        F: Fn(&T, &T) -> R + Send + Sync + 'static,
    {
        self.with(Operator::Gt, predicate)
    }

    /// Supply the greater-than-or-equal predicate.
    pub fn ge<F>(self, predicate: F) -> Self
    where
        F: Fn(&T, &T) -> R + Send + Sync + 'static,
    {
        self.with(Operator::Ge, predicate)
    }

    /**
    Supply the predicate for `operator`.

    Supplying [`Operator::Ne`] is misuse since it is always the negation of equality.
    */
    pub fn with<F>(mut self, operator: Operator, predicate: F) -> Self
    where
        F: Fn(&T, &T) -> R + Send + Sync + 'static,
    {
        let raw: RawPredicate<T, R> = Arc::new(move |left, right| Ok(predicate(left, right)));

        match operator {
            Operator::Ne => self.record_misuse(FactoryError::DerivedOnly(operator)),
            Operator::Eq if self.eq.is_some() => {
                self.record_misuse(FactoryError::DuplicatePredicate(operator))
            }
            Operator::Eq => self.eq = Some(raw),
            _ if self.ordering.iter().any(|(supplied, _)| *supplied == operator) => {
                self.record_misuse(FactoryError::DuplicatePredicate(operator))
            }
            _ => self.ordering.push((operator, raw)),
        }

        self
    }

    /// Supply the predicate for the operator called `name` e.g. `lt` or `__lt__`.
    pub fn with_named<F>(self, name: &str, predicate: F) -> Self
    where
        F: Fn(&T, &T) -> R + Send + Sync + 'static,
    {
        match name.parse::<Operator>() {
            Ok(operator) => self.with(operator, predicate),
            Err(err) => {
                let mut this = self;
                this.record_misuse(err);
                this
            }
        }
    }

    /**
    Build the comparator adapter type.

    Fails with [`FactoryError::MissingEquality`] if no equality predicate was supplied, or with the
    first misuse recorded while predicates were registered.
    */
    pub fn build(self) -> FactoryResult<ComparatorType> {
        if let Some(misuse) = self.misuse {
            log::debug!("Refusing to build a comparator type: {}", misuse);
            return Err(misuse);
        }

        let eq = match self.eq {
            Some(eq) => eq,
            None => {
                log::debug!("Refusing to build a comparator type without an equality predicate.");
                return Err(FactoryError::MissingEquality);
            }
        };

        let eq = guarded(eq, self.normalizer.clone());
        let mut ordering = OrderingProcedures::new();
        for (operator, raw) in self.ordering {
            ordering.insert(operator, guarded(raw, self.normalizer.clone()));
        }

        Ok(ComparatorType::new(
            &self.options,
            CompletedOperators::complete(eq, ordering),
        ))
    }
}

/// Private methods
impl<T, R> PredicateSet<T, R> {
    /// Keep the first misuse. Later ones are usually consequences of it.
    fn record_misuse(&mut self, misuse: FactoryError) {
        if self.misuse.is_none() {
            self.misuse = Some(misuse);
        }
    }
}

impl<T, R> Default for PredicateSet<T, R>
where
    T: Any + Send + Sync,
    R: TruthValue + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> fmt::Debug for PredicateSet<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ordering: Vec<&str> = self
            .ordering
            .iter()
            .map(|(operator, _)| operator.name())
            .collect();

        f.debug_struct("PredicateSet")
            .field("eq", &self.eq.is_some())
            .field("ordering", &ordering)
            .field("options", &self.options)
            .field("misuse", &self.misuse)
            .finish()
    }
}

/**
Build a comparator adapter type from a set of predicates.

This is equivalent to [`PredicateSet::build`].
*/
pub fn using_functions<T, R>(predicates: PredicateSet<T, R>) -> FactoryResult<ComparatorType>
where
    T: Any + Send + Sync,
    R: 'static,
{
    predicates.build()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::completion::OperatorKind;
    use crate::operator::Comparison;

    fn setup() {
        let _ = env_logger::builder()
            // Include all events in tests
            .filter_level(log::LevelFilter::max())
            // Ensure events are captured by `cargo test`
            .is_test(true)
            // Ignore errors initializing the logger if tests race to configure it
            .try_init();
    }

    fn natural_eq() -> PredicateSet<i32> {
        PredicateSet::new().eq(|a: &i32, b: &i32| a == b)
    }

    #[test]
    fn equality_only_has_no_ordering() {
        setup();

        let cmp = using_functions(natural_eq()).unwrap();

        assert_eq!(cmp.wrap(1).eq(&cmp.wrap(1)).unwrap(), Comparison::True);
        assert_eq!(cmp.wrap(1).ne(&cmp.wrap(-1)).unwrap(), Comparison::True);
        assert_eq!(cmp.wrap(1).lt(&cmp.wrap(2)).unwrap(), Comparison::Unsupported);
        assert_eq!(cmp.wrap(2).gt(&cmp.wrap(1)).unwrap(), Comparison::Unsupported);
        assert_eq!(cmp.wrap(1).le(&cmp.wrap(1)).unwrap(), Comparison::Unsupported);
        assert_eq!(cmp.wrap(1).ge(&cmp.wrap(1)).unwrap(), Comparison::Unsupported);
    }

    #[test]
    fn unusual_equality_is_honored() {
        let cmp = PredicateSet::new()
            .eq(|a: &i32, b: &i32| *a == -*b)
            .build()
            .unwrap();

        assert_eq!(cmp.wrap(1).ne(&cmp.wrap(1)).unwrap(), Comparison::True);
        assert_eq!(cmp.wrap(1).eq(&cmp.wrap(-1)).unwrap(), Comparison::True);
    }

    #[test]
    fn less_than_derives_the_rest() {
        setup();

        let cmp = natural_eq().lt(|a, b| a < b).build().unwrap();

        assert_eq!(cmp.wrap(1).le(&cmp.wrap(1)).unwrap(), Comparison::True);
        assert_eq!(cmp.wrap(2).gt(&cmp.wrap(1)).unwrap(), Comparison::True);
        assert_eq!(cmp.operator_kind(Operator::Le), OperatorKind::Derived);
    }

    #[test]
    fn any_single_ordering_predicate_derives_the_rest() {
        setup();

        let sets = vec![
            natural_eq().lt(|a, b| a < b),
            natural_eq().le(|a, b| a <= b),
            natural_eq().gt(|a, b| a > b),
            natural_eq().ge(|a, b| a >= b),
        ];

        for set in sets {
            let cmp = set.build().unwrap();

            assert_eq!(cmp.wrap(1).eq(&cmp.wrap(1)).unwrap(), Comparison::True);
            assert_eq!(cmp.wrap(1).ne(&cmp.wrap(-1)).unwrap(), Comparison::True);

            assert_eq!(cmp.wrap(1).lt(&cmp.wrap(3)).unwrap(), Comparison::True);
            assert_eq!(cmp.wrap(1).gt(&cmp.wrap(0)).unwrap(), Comparison::True);

            assert_eq!(cmp.wrap(1).ge(&cmp.wrap(1)).unwrap(), Comparison::True);
            assert_eq!(cmp.wrap(1).ge(&cmp.wrap(0)).unwrap(), Comparison::True);
            assert_eq!(cmp.wrap(1).le(&cmp.wrap(1)).unwrap(), Comparison::True);
            assert_eq!(cmp.wrap(1).le(&cmp.wrap(3)).unwrap(), Comparison::True);

            assert_eq!(cmp.wrap(1).lt(&cmp.wrap(1)).unwrap(), Comparison::False);
            assert_eq!(cmp.wrap(1).gt(&cmp.wrap(1)).unwrap(), Comparison::False);
        }
    }

    #[test]
    fn all_four_ordering_predicates_are_used_as_is() {
        let cmp = natural_eq()
            .lt(|a, b| a < b)
            .le(|a, b| a <= b)
            .gt(|a, b| a > b)
            .ge(|a, b| a >= b)
            .build()
            .unwrap();

        for operator in Operator::ORDERING {
            assert_eq!(cmp.operator_kind(operator), OperatorKind::Supplied);
        }
        assert_eq!(cmp.wrap(3).ge(&cmp.wrap(2)).unwrap(), Comparison::True);
    }

    #[test]
    fn predicates_never_see_mismatched_payloads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let eq_calls = Arc::clone(&calls);
        let lt_calls = Arc::clone(&calls);
        let cmp = PredicateSet::new()
            .eq(move |a: &i32, b: &i32| {
                eq_calls.fetch_add(1, Ordering::SeqCst);
                a == b
            })
            .lt(move |a: &i32, b: &i32| {
                lt_calls.fetch_add(1, Ordering::SeqCst);
                a < b
            })
            .build()
            .unwrap();

        for operator in Operator::ALL {
            assert_eq!(
                cmp.wrap(1).apply(operator, &cmp.wrap(1_u32)).unwrap(),
                Comparison::Unsupported
            );
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_equality_is_a_factory_error() {
        let result = PredicateSet::<i32, bool>::new().lt(|a, b| a < b).build();

        assert_eq!(result.unwrap_err(), FactoryError::MissingEquality);
    }

    #[test]
    fn duplicate_predicates_are_a_factory_error() {
        let result = natural_eq().lt(|a, b| a < b).lt(|a, b| a > b).build();
        assert_eq!(
            result.unwrap_err(),
            FactoryError::DuplicatePredicate(Operator::Lt)
        );

        let result = natural_eq().eq(|a, b| a != b).build();
        assert_eq!(
            result.unwrap_err(),
            FactoryError::DuplicatePredicate(Operator::Eq)
        );
    }

    #[test]
    fn not_equal_cannot_be_supplied() {
        let result = natural_eq().with(Operator::Ne, |a, b| a != b).build();

        assert_eq!(result.unwrap_err(), FactoryError::DerivedOnly(Operator::Ne));
    }

    #[test]
    fn predicates_can_be_registered_by_name() {
        let cmp = PredicateSet::new()
            .with_named("__eq__", |a: &i32, b: &i32| a == b)
            .with_named("ge", |a: &i32, b: &i32| a >= b)
            .named("Named")
            .build()
            .unwrap();

        assert_eq!(cmp.name(), "Named");
        assert_eq!(cmp.ordering_root(), Some(Operator::Ge));
        assert_eq!(cmp.wrap(1).lt(&cmp.wrap(2)).unwrap(), Comparison::True);

        let result = natural_eq().with_named("cmp", |a, b| a < b).build();
        assert_eq!(
            result.unwrap_err(),
            FactoryError::UnknownOperator("cmp".to_string())
        );
    }

    #[test]
    fn fallible_predicates_propagate_failures() {
        let cmp = PredicateSet::new()
            .eq(|a: &i32, b: &i32| -> Result<bool, String> {
                if *a == 0 || *b == 0 {
                    return Err("zero is not comparable".to_string());
                }
                Ok(a == b)
            })
            .build()
            .unwrap();

        assert_eq!(cmp.wrap(1).eq(&cmp.wrap(1)).unwrap(), Comparison::True);

        let err = cmp.wrap(1).ne(&cmp.wrap(0)).unwrap_err();
        assert_eq!(err.to_string(), "zero is not comparable");
    }
}
