/*!
The key based comparator factory.

Equality and ordering are defined by comparing `key(a)` against `key(b)` with the key type's native
[`PartialEq`] and [`PartialOrd`] implementations. The key is computed for the right operand first;
if that fails the left operand's key is not computed.

Keys that only support equality are accepted by [`using_key_eq`] and [`try_using_key_eq`], which
always tombstone the ordering operators.
*/

use std::any::Any;
use std::sync::Arc;

use crate::comparator::ComparatorType;
use crate::completion::{CompletedOperators, OrderingProcedures};
use crate::errors::{BoxError, ComparisonError};
use crate::factory::{guarded, RawPredicate};
use crate::normalize::Normalizer;
use crate::operator::Operator;
use crate::options::ComparatorOptions;

/// A key function whose failures are already wrapped.
type KeyFn<T, K> = Arc<dyn Fn(&T) -> Result<K, ComparisonError> + Send + Sync>;

/**
Build a comparator adapter type that compares payloads by `key`.

If `order` is false the ordering operators are tombstoned, even if `K` could be ordered.

# Example

```
use cmpwrap::{using_key, Comparison};

let case_insensitive = using_key(|value: &String| value.to_lowercase(), true);
let abc = case_insensitive.wrap("abc".to_string());

assert_eq!(abc.eq(&case_insensitive.wrap("ABC".to_string())).unwrap(), Comparison::True);
assert_eq!(abc.lt(&case_insensitive.wrap("abd".to_string())).unwrap(), Comparison::True);
```
*/
pub fn using_key<T, K, F>(key: F, order: bool) -> ComparatorType
where
    T: Any + Send + Sync,
    K: PartialOrd + 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    build_ordered(
        Arc::new(move |value: &T| Ok(key(value))),
        &ComparatorOptions::default().with_order(order),
    )
}

/**
Build a comparator adapter type that compares payloads by a fallible `key`.

An error returned by `key` surfaces from the relational operator as
[`ComparisonError::Raised`] and is never turned into unsupported.
*/
pub fn try_using_key<T, K, E, F>(key: F, order: bool) -> ComparatorType
where
    T: Any + Send + Sync,
    K: PartialOrd + 'static,
    E: Into<BoxError> + 'static,
    F: Fn(&T) -> Result<K, E> + Send + Sync + 'static,
{
    build_ordered(
        Arc::new(move |value: &T| key(value).map_err(ComparisonError::raised)),
        &ComparatorOptions::default().with_order(order),
    )
}

/// Build a comparator adapter type that compares payloads by `key` with the provided `options`.
pub fn using_key_with_options<T, K, F>(key: F, options: &ComparatorOptions) -> ComparatorType
where
    T: Any + Send + Sync,
    K: PartialOrd + 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    build_ordered(Arc::new(move |value: &T| Ok(key(value))), options)
}

/**
Build an unordered comparator adapter type that compares payloads by a `key` that only supports
equality.

# Example

```
use std::collections::HashSet;

use cmpwrap::{using_key_eq, Comparison};

let as_set = using_key_eq(|value: &Vec<i32>| value.iter().copied().collect::<HashSet<i32>>());

assert_eq!(as_set.wrap(vec![1, 2, 2]).eq(&as_set.wrap(vec![2, 1])).unwrap(), Comparison::True);
assert_eq!(as_set.wrap(vec![1]).lt(&as_set.wrap(vec![2])).unwrap(), Comparison::Unsupported);
```
*/
pub fn using_key_eq<T, K, F>(key: F) -> ComparatorType
where
    T: Any + Send + Sync,
    K: PartialEq + 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    build(
        key_eq(Arc::new(move |value: &T| Ok(key(value)))),
        None,
        &ComparatorOptions::default().with_order(false),
    )
}

/// Build an unordered comparator adapter type that compares payloads by a fallible `key` that only
/// supports equality.
pub fn try_using_key_eq<T, K, E, F>(key: F) -> ComparatorType
where
    T: Any + Send + Sync,
    K: PartialEq + 'static,
    E: Into<BoxError> + 'static,
    F: Fn(&T) -> Result<K, E> + Send + Sync + 'static,
{
    build(
        key_eq(Arc::new(move |value: &T| {
            key(value).map_err(ComparisonError::raised)
        })),
        None,
        &ComparatorOptions::default().with_order(false),
    )
}

fn build_ordered<T, K>(key: KeyFn<T, K>, options: &ComparatorOptions) -> ComparatorType
where
    T: Any + Send + Sync,
    K: PartialOrd + 'static,
{
    let raw_lt = if options.order() {
        Some(key_lt(Arc::clone(&key)))
    } else {
        None
    };

    build(key_eq(key), raw_lt, options)
}

fn build<T>(
    raw_eq: RawPredicate<T, bool>,
    raw_lt: Option<RawPredicate<T, bool>>,
    options: &ComparatorOptions,
) -> ComparatorType
where
    T: Any + Send + Sync,
{
    let eq = guarded(raw_eq, Normalizer::truth_value());

    let mut ordering = OrderingProcedures::new();
    if let Some(raw_lt) = raw_lt {
        ordering.insert(Operator::Lt, guarded(raw_lt, Normalizer::truth_value()));
    }

    ComparatorType::new(options, CompletedOperators::complete(eq, ordering))
}

fn key_eq<T, K>(key: KeyFn<T, K>) -> RawPredicate<T, bool>
where
    T: Any + Send + Sync,
    K: PartialEq + 'static,
{
    Arc::new(move |left, right| {
        let right_key = key(right)?;
        let left_key = key(left)?;
        Ok(left_key == right_key)
    })
}

fn key_lt<T, K>(key: KeyFn<T, K>) -> RawPredicate<T, bool>
where
    T: Any + Send + Sync,
    K: PartialOrd + 'static,
{
    Arc::new(move |left, right| {
        let right_key = key(right)?;
        let left_key = key(left)?;
        Ok(left_key < right_key)
    })
}
