/*!
Rich comparisons. Useful for key types whose native comparison does not produce a definite boolean
e.g. an elementwise comparison producing a mask.
*/

/**
An interface for types that can be compared with a possibly non-boolean outcome.

The legacy combined factory ([`crate::Compare`]) uses this trait for its raw `eq` and `lt`
comparisons before the result is normalized.

Invariants:

1. `rich_eq` is reflexive once normalized
1. `rich_lt` is irreflexive once normalized
1. `rich_eq` and `rich_lt` jointly form a strict weak order once normalized
*/
pub trait RichCompare {
    /// The raw result of a comparison.
    type Output;

    /// Compare `self` and `other` for equality.
    fn rich_eq(&self, other: &Self) -> Self::Output;

    /// Return the outcome of `self` < `other`.
    fn rich_lt(&self, other: &Self) -> Self::Output;
}

macro_rules! impl_native_rich_compare {
    ($($native:ty),* $(,)?) => {
        $(
            impl RichCompare for $native {
                type Output = bool;

                fn rich_eq(&self, other: &Self) -> bool {
                    self == other
                }

                fn rich_lt(&self, other: &Self) -> bool {
                    self < other
                }
            }
        )*
    };
}

impl_native_rich_compare!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    &'static str,
);

impl<T: PartialOrd> RichCompare for Vec<T> {
    type Output = bool;

    fn rich_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn rich_lt(&self, other: &Self) -> bool {
        self < other
    }
}

impl<T: PartialOrd> RichCompare for Option<T> {
    type Output = bool;

    fn rich_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn rich_lt(&self, other: &Self) -> bool {
        self < other
    }
}
