/*!
This module holds the option structures that can be passed to the comparator factories.
*/

use crate::config::{DEFAULT_ORDER, DEFAULT_TYPE_NAME};

/// Holds options that control how a comparator adapter type is built.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComparatorOptions {
    /**
    The name of the adapter type. Used in debug output and logs.

    **This defaults to `Comparator`.**
    */
    type_name: String,

    /**
    Whether ordering operators are installed.

    Only factories that derive ordering from a key consult this. The predicate based factory
    installs ordering if and only if an ordering predicate was supplied.

    **This defaults to true.**
    */
    order: bool,
}

/// Public methods
impl ComparatorOptions {
    /// Get the name of the adapter type.
    pub fn type_name(&self) -> &str {
        self.type_name.as_str()
    }

    /// Get whether ordering operators are installed.
    pub fn order(&self) -> bool {
        self.order
    }

    /// Set the name of the adapter type.
    pub fn with_type_name<N: Into<String>>(mut self, type_name: N) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Set whether ordering operators are installed.
    pub fn with_order(mut self, order: bool) -> Self {
        self.order = order;
        self
    }
}

impl Default for ComparatorOptions {
    fn default() -> Self {
        ComparatorOptions {
            type_name: DEFAULT_TYPE_NAME.to_string(),
            order: DEFAULT_ORDER,
        }
    }
}
