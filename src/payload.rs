/*!
The wrapped value held by every comparator instance.
*/

use std::any::{self, Any, TypeId};
use std::fmt;

/**
A container holding exactly one payload of any `'static` type.

The payload is immutable once wrapped. For comparison purposes its identity is its runtime type
together with its value. The type is recorded when the payload is wrapped because calling
[`Any::type_id`] through a box or reference is easy to get wrong.
*/
pub(crate) struct Payload {
    /// The wrapped value.
    value: Box<dyn Any + Send + Sync>,

    /// The exact type of `value`.
    type_id: TypeId,

    /// The name of the type of `value`, for diagnostics only.
    type_name: &'static str,
}

/// Crate-only methods
impl Payload {
    /// Construct a new [`Payload`].
    pub(crate) fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_id: TypeId::of::<T>(),
            type_name: any::type_name::<T>(),
        }
    }

    /// Get the exact type of the payload.
    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Get the name of the type of the payload.
    pub(crate) fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the payload if it is of type `T`.
    pub(crate) fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Unwrap the payload if it is of type `T`. Returns the payload unchanged otherwise.
    pub(crate) fn downcast<T: Any>(self) -> Result<T, Self> {
        let Payload {
            value,
            type_id,
            type_name,
        } = self;

        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Payload {
                value,
                type_id,
                type_name,
            }),
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("type_name", &self.type_name)
            .finish()
    }
}
