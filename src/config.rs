/*!
This module contains global configuration constants for comparator construction.
*/

use crate::operator::Operator;

/// The name given to adapter types that are not explicitly named.
pub(crate) const DEFAULT_TYPE_NAME: &str = "Comparator";

/**
The order in which supplied ordering operators are considered when picking the root that missing
operators are derived from.

This matches the choice made by total-ordering decorators that pick the lexicographically largest
dunder name i.e. `__lt__` > `__le__` > `__gt__` > `__ge__`.
*/
pub(crate) const ROOT_PRIORITY: [Operator; 4] =
    [Operator::Lt, Operator::Le, Operator::Gt, Operator::Ge];

/// Whether key based factories install ordering operators when not told otherwise.
pub(crate) const DEFAULT_ORDER: bool = true;
