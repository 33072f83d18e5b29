/*!
The closed set of relational operators and the tri-state result every one of them produces.
*/

use std::fmt;
use std::str::FromStr;

use crate::errors::{ComparisonError, FactoryError};

/// Alias for the result of evaluating a relational operator.
pub type ComparisonResult = Result<Comparison, ComparisonError>;

/**
The six relational operators installed on every comparator adapter type.

The discriminant is used as an index into the completed operator table so existing values should
not be reordered.
*/
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Operator {
    /// Equal.
    Eq = 0,
    /// Not equal. Always derived from [`Operator::Eq`].
    Ne,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
}

/// Public methods
impl Operator {
    /// All operators in table order.
    pub const ALL: [Operator; 6] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Lt,
        Operator::Le,
        Operator::Gt,
        Operator::Ge,
    ];

    /// The ordering operators.
    pub const ORDERING: [Operator; 4] = [Operator::Lt, Operator::Le, Operator::Gt, Operator::Ge];

    /// The short name of the operator e.g. `lt`.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
        }
    }

    /// The infix symbol of the operator e.g. `<`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
        }
    }

    /**
    The operator to try on the right-hand operand when the left-hand operand declines.

    `a < b` is retried as `b > a`. Equality operators reflect onto themselves.
    */
    pub fn reflected(&self) -> Operator {
        match self {
            Operator::Eq => Operator::Eq,
            Operator::Ne => Operator::Ne,
            Operator::Lt => Operator::Gt,
            Operator::Le => Operator::Ge,
            Operator::Gt => Operator::Lt,
            Operator::Ge => Operator::Le,
        }
    }

    /// Returns true if this is one of `lt`, `le`, `gt` or `ge`.
    pub fn is_ordering(&self) -> bool {
        !matches!(self, Operator::Eq | Operator::Ne)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Operator {
    type Err = FactoryError;

    /// Parses short names (`lt`) as well as dunder names (`__lt__`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let name = value
            .strip_prefix("__")
            .and_then(|stripped| stripped.strip_suffix("__"))
            .unwrap_or(value);

        let operator = match name {
            "eq" => Operator::Eq,
            "ne" => Operator::Ne,
            "lt" => Operator::Lt,
            "le" => Operator::Le,
            "gt" => Operator::Gt,
            "ge" => Operator::Ge,
            _ => return Err(FactoryError::UnknownOperator(value.to_string())),
        };

        Ok(operator)
    }
}

/**
The outcome of a relational operator.

[`Comparison::Unsupported`] is a structural signal and not an error. It means that the comparison is
not defined for the operands, either because their payload types differ or because the operator was
never supplied and could not be derived. Callers following a two-sided protocol should try the
reflected operator on the other operand before concluding that the comparison is undefined (see
[`crate::dispatch`]).
*/
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Comparison {
    /// The relation holds.
    True,
    /// The relation does not hold.
    False,
    /// The relation is not defined for the operands.
    Unsupported,
}

/// Public methods
impl Comparison {
    /// Returns the definite boolean, or `None` for [`Comparison::Unsupported`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Comparison::True => Some(true),
            Comparison::False => Some(false),
            Comparison::Unsupported => None,
        }
    }

    /// Returns true if the relation definitely holds.
    pub fn is_true(&self) -> bool {
        matches!(self, Comparison::True)
    }

    /// Returns true if the relation is not defined for the operands.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Comparison::Unsupported)
    }

    /// Logical negation. [`Comparison::Unsupported`] stays unsupported.
    pub fn negate(self) -> Comparison {
        match self {
            Comparison::True => Comparison::False,
            Comparison::False => Comparison::True,
            Comparison::Unsupported => Comparison::Unsupported,
        }
    }
}

/// Crate-only methods
impl Comparison {
    /**
    Short-circuiting disjunction used by the completion identities.

    `other` is only evaluated when `self` is [`Comparison::False`].
    */
    pub(crate) fn or_else<F>(self, other: F) -> ComparisonResult
    where
        F: FnOnce() -> ComparisonResult,
    {
        match self {
            Comparison::True => Ok(Comparison::True),
            Comparison::False => other(),
            Comparison::Unsupported => Ok(Comparison::Unsupported),
        }
    }

    /**
    Short-circuiting `self and not other` used by the completion identities.

    `other` is only evaluated when `self` is [`Comparison::True`].
    */
    pub(crate) fn and_not<F>(self, other: F) -> ComparisonResult
    where
        F: FnOnce() -> ComparisonResult,
    {
        match self {
            Comparison::True => Ok(other()?.negate()),
            Comparison::False => Ok(Comparison::False),
            Comparison::Unsupported => Ok(Comparison::Unsupported),
        }
    }
}

impl From<bool> for Comparison {
    fn from(value: bool) -> Self {
        if value {
            Comparison::True
        } else {
            Comparison::False
        }
    }
}
