/*!
The type-compatibility guard.

The guard runs first on every relational call. It compares the exact runtime types of the two
payloads; there is no notion of subtype compatibility. When the types differ the operator reports
[`Comparison::Unsupported`](crate::Comparison::Unsupported) without running a predicate, a key
function or a normalizer.
*/

use std::any::{Any, TypeId};

use crate::payload::Payload;

/// The verdict of the type-compatibility guard.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Compatibility {
    /// The payloads share the same type and may be handed to predicates.
    Compatible,
    /// The payloads have different types.
    Unsupported,
}

/// Check whether two payloads may be compared with each other.
pub(crate) fn check(left: &Payload, right: &Payload) -> Compatibility {
    if left.type_id() == right.type_id() {
        return Compatibility::Compatible;
    }

    log::trace!(
        "Guard rejected a comparison between payloads of type {} and {}.",
        left.type_name(),
        right.type_name()
    );
    Compatibility::Unsupported
}

/**
Downcast both payloads to the declared payload type `T` of a predicate.

Returns `None` if the payloads are incompatible with each other or if they share a type that is not
`T`. Predicates never see anything but a pair of `T`s.
*/
pub(crate) fn narrow<'a, T: Any>(left: &'a Payload, right: &'a Payload) -> Option<(&'a T, &'a T)> {
    if check(left, right) == Compatibility::Unsupported || left.type_id() != TypeId::of::<T>() {
        return None;
    }

    Some((left.downcast_ref::<T>()?, right.downcast_ref::<T>()?))
}
