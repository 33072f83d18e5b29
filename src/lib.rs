/*!
cmpwrap is a comparator factory. Given either a single key-extraction function or an explicit set of
pairwise relational predicates, it produces a reusable comparator adapter type that wraps a payload
value and implements all six relational operators (`eq`, `ne`, `lt`, `le`, `gt`, `ge`) with
consistent semantics, even when only some of the predicates were supplied.

The pieces, leaves first:

- The type-compatibility guard ([`Comparator::compatibility`]) refuses to compare payloads of
  different types.
- The truth normalizer ([`Normalizer`], [`TruthValue`]) turns raw comparison results into definite
  booleans.
- The factories ([`using_key`], [`PredicateSet`], [`Compare`]) build typed predicates.
- Total-order completion derives the missing ordering operators from whichever one was supplied.

Every operator returns a [`Comparison`], which is `True`, `False` or `Unsupported`, or a
[`ComparisonError`] carrying a failure raised by user code. Unsupported is a signal, not an error.
See [`dispatch`] for the two-sided protocol that turns it into a final answer.

```
use cmpwrap::{using_key, Comparison};

let by_magnitude = using_key(|value: &i32| value.abs(), true);

assert_eq!(by_magnitude.wrap(1).lt(&by_magnitude.wrap(-3)).unwrap(), Comparison::True);
assert_eq!(by_magnitude.wrap(1).ge(&by_magnitude.wrap(0)).unwrap(), Comparison::True);
assert_eq!(
    by_magnitude.wrap(1).eq(&by_magnitude.wrap("1")).unwrap(),
    Comparison::Unsupported
);
```
*/

#![warn(missing_debug_implementations, missing_docs)]

mod comparator;
pub use comparator::{Comparator, ComparatorType};

mod completion;
pub use completion::OperatorKind;

mod config;

pub mod dispatch;

mod errors;
pub use errors::{BoxError, ComparisonError, FactoryError, FactoryResult};

pub mod factory;
pub use factory::key::{
    try_using_key, try_using_key_eq, using_key, using_key_eq, using_key_with_options,
};
pub use factory::legacy::Compare;
pub use factory::predicates::{using_functions, PredicateSet};

mod guard;
pub use guard::Compatibility;

mod normalize;
pub use normalize::{Normalizer, TruthValue};

mod operator;
pub use operator::{Comparison, ComparisonResult, Operator};

pub mod options;
pub use options::ComparatorOptions;

mod payload;

mod utils;
pub use utils::comparator::RichCompare;
