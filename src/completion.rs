/*!
Total-order completion.

Given equality and whichever subset of `lt`, `le`, `gt` and `ge` was supplied, this module derives
the missing ordering operators so that the full set of six relational operators is mutually
consistent. The supplied operators are used as-is. The missing ones are derived from the *root*,
the supplied operator that ranks highest in [`ROOT_PRIORITY`], using the standard identities:

| root | derived                                                                          |
|------|----------------------------------------------------------------------------------|
| `lt` | `le(a, b) = lt(a, b) or eq(a, b)`, `gt(a, b) = lt(b, a)`, `ge(a, b) = le(b, a)`       |
| `le` | `lt(a, b) = le(a, b) and not eq(a, b)`, `gt(a, b) = not le(a, b)`, `ge(a, b) = le(b, a)` |
| `gt` | `ge(a, b) = gt(a, b) or eq(a, b)`, `lt(a, b) = gt(b, a)`, `le(a, b) = ge(b, a)`       |
| `ge` | `gt(a, b) = ge(a, b) and not eq(a, b)`, `lt(a, b) = not ge(a, b)`, `le(a, b) = ge(b, a)` |

If no ordering operator was supplied, all four are tombstoned and always report
[`Comparison::Unsupported`].

The identities are evaluated pairwise on demand. Disjunctions short-circuit on a true left side,
`and not` short-circuits on a false left side and an unsupported or failed evaluation anywhere
propagates unchanged. Correctness depends on the supplied predicates forming a strict weak order
together with equality; this is not verified.
*/

use std::fmt;
use std::sync::Arc;

use crate::config::ROOT_PRIORITY;
use crate::operator::{Comparison, ComparisonResult, Operator};
use crate::payload::Payload;

/// A runnable comparison over two payloads. Guarding and normalization are already applied.
pub(crate) type Procedure = Arc<dyn Fn(&Payload, &Payload) -> ComparisonResult + Send + Sync>;

/// How an operator of a completed operator set came to be.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperatorKind {
    /// The operator was supplied to the factory, directly or through a key function.
    Supplied,
    /// The operator was derived from other operators.
    Derived,
    /// The operator is not defined and always reports unsupported.
    Tombstone,
}

/// An entry in the completed operator table.
#[derive(Clone)]
pub(crate) enum OperatorEntry {
    /// A procedure that was supplied to the factory.
    Supplied(Procedure),
    /// A procedure derived by the completion identities.
    Derived(Procedure),
    /// Marker for an operator that always reports unsupported.
    Tombstone,
}

/// Crate-only methods
impl OperatorEntry {
    /// Get the kind of the entry.
    pub(crate) fn kind(&self) -> OperatorKind {
        match self {
            OperatorEntry::Supplied(_) => OperatorKind::Supplied,
            OperatorEntry::Derived(_) => OperatorKind::Derived,
            OperatorEntry::Tombstone => OperatorKind::Tombstone,
        }
    }
}

impl fmt::Debug for OperatorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind())
    }
}

/**
The ordering procedures supplied to a factory, at most one per operator.

Equality is not part of this set because it is mandatory.
*/
#[derive(Clone, Default)]
pub(crate) struct OrderingProcedures {
    lt: Option<Procedure>,
    le: Option<Procedure>,
    gt: Option<Procedure>,
    ge: Option<Procedure>,
}

/// Crate-only methods
impl OrderingProcedures {
    /// Construct an empty set of ordering procedures.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /**
    Register `procedure` for the `operator`.

    Returns the previously registered procedure if there was one. `eq` and `ne` are not ordering
    operators and are handed back unchanged.
    */
    pub(crate) fn insert(&mut self, operator: Operator, procedure: Procedure) -> Option<Procedure> {
        match self.slot_mut(operator) {
            Some(slot) => slot.replace(procedure),
            None => Some(procedure),
        }
    }

    /// Get the procedure registered for `operator`.
    pub(crate) fn get(&self, operator: Operator) -> Option<&Procedure> {
        match operator {
            Operator::Lt => self.lt.as_ref(),
            Operator::Le => self.le.as_ref(),
            Operator::Gt => self.gt.as_ref(),
            Operator::Ge => self.ge.as_ref(),
            Operator::Eq | Operator::Ne => None,
        }
    }

    fn slot_mut(&mut self, operator: Operator) -> Option<&mut Option<Procedure>> {
        match operator {
            Operator::Lt => Some(&mut self.lt),
            Operator::Le => Some(&mut self.le),
            Operator::Gt => Some(&mut self.gt),
            Operator::Ge => Some(&mut self.ge),
            Operator::Eq | Operator::Ne => None,
        }
    }
}

impl fmt::Debug for OrderingProcedures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let supplied: Vec<&str> = Operator::ORDERING
            .iter()
            .filter(|operator| self.get(**operator).is_some())
            .map(|operator| operator.name())
            .collect();

        f.debug_struct("OrderingProcedures")
            .field("supplied", &supplied)
            .finish()
    }
}

/**
The table of all six relational operators of a comparator adapter type.

It is produced once per adapter type and is immutable afterward.
*/
pub(crate) struct CompletedOperators {
    /// Entries indexed by the discriminant of [`Operator`].
    entries: [OperatorEntry; 6],

    /// The ordering operator the missing ones were derived from.
    root: Option<Operator>,
}

/// Crate-only methods
impl CompletedOperators {
    /// Complete the operator table from equality and the supplied ordering procedures.
    pub(crate) fn complete(eq: Procedure, ordering: OrderingProcedures) -> Self {
        let root = ROOT_PRIORITY.iter().find_map(|operator| {
            ordering
                .get(*operator)
                .map(|procedure| (*operator, Arc::clone(procedure)))
        });

        let ne = negated(Arc::clone(&eq));
        let mut entries = [
            OperatorEntry::Supplied(eq.clone()),
            OperatorEntry::Derived(ne),
            OperatorEntry::Tombstone,
            OperatorEntry::Tombstone,
            OperatorEntry::Tombstone,
            OperatorEntry::Tombstone,
        ];

        let (root, root_procedure) = match root {
            Some(root) => root,
            None => {
                log::debug!("No ordering operator was supplied. Ordering is tombstoned.");
                return Self {
                    entries,
                    root: None,
                };
            }
        };

        for operator in Operator::ORDERING {
            if let Some(procedure) = ordering.get(operator) {
                entries[operator as usize] = OperatorEntry::Supplied(Arc::clone(procedure));
            }
        }

        let mut table = TableBuilder { entries };
        table.derive_from(root, root_procedure, eq);

        log::debug!(
            "Completed the ordering operators from the `{}` root: {:?}",
            root,
            table.entries
        );

        Self {
            entries: table.entries,
            root: Some(root),
        }
    }

    /// Run the `operator` on the two payloads.
    pub(crate) fn evaluate(
        &self,
        operator: Operator,
        left: &Payload,
        right: &Payload,
    ) -> ComparisonResult {
        match &self.entries[operator as usize] {
            OperatorEntry::Supplied(procedure) | OperatorEntry::Derived(procedure) => {
                procedure(left, right)
            }
            OperatorEntry::Tombstone => {
                log::trace!("The `{}` operator is tombstoned.", operator);
                Ok(Comparison::Unsupported)
            }
        }
    }

    /// Get how the `operator` was produced.
    pub(crate) fn kind(&self, operator: Operator) -> OperatorKind {
        self.entries[operator as usize].kind()
    }

    /// Get the ordering operator the missing ones were derived from, if any.
    pub(crate) fn root(&self) -> Option<Operator> {
        self.root
    }
}

impl fmt::Debug for CompletedOperators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("CompletedOperators");
        for operator in Operator::ALL {
            debug.field(operator.name(), &self.entries[operator as usize]);
        }

        debug.field("root", &self.root).finish()
    }
}

/// Scratch space used while filling in derived entries.
struct TableBuilder {
    entries: [OperatorEntry; 6],
}

impl TableBuilder {
    /// Fill in every ordering operator that was not supplied from the `root` procedure.
    fn derive_from(&mut self, root: Operator, root_procedure: Procedure, eq: Procedure) {
        debug_assert!(root.is_ordering(), "`{}` cannot be an ordering root", root);

        match root {
            Operator::Lt => {
                let lt = root_procedure;
                let le = self.fill(Operator::Le, || either(lt.clone(), eq));
                self.fill(Operator::Gt, || swapped(lt));
                self.fill(Operator::Ge, || swapped(le));
            }
            Operator::Le => {
                let le = root_procedure;
                self.fill(Operator::Lt, || but_not(le.clone(), eq));
                self.fill(Operator::Gt, || negated(le.clone()));
                self.fill(Operator::Ge, || swapped(le));
            }
            Operator::Gt => {
                let gt = root_procedure;
                let ge = self.fill(Operator::Ge, || either(gt.clone(), eq));
                self.fill(Operator::Lt, || swapped(gt));
                self.fill(Operator::Le, || swapped(ge));
            }
            Operator::Ge => {
                let ge = root_procedure;
                self.fill(Operator::Gt, || but_not(ge.clone(), eq));
                self.fill(Operator::Lt, || negated(ge.clone()));
                self.fill(Operator::Le, || swapped(ge));
            }
            Operator::Eq | Operator::Ne => {}
        }
    }

    /**
    Derive the `operator` with `derive` unless it was supplied.

    Returns the procedure now installed for the `operator`.
    */
    fn fill<F>(&mut self, operator: Operator, derive: F) -> Procedure
    where
        F: FnOnce() -> Procedure,
    {
        match &mut self.entries[operator as usize] {
            OperatorEntry::Supplied(procedure) | OperatorEntry::Derived(procedure) => {
                Arc::clone(procedure)
            }
            entry => {
                let procedure = derive();
                *entry = OperatorEntry::Derived(Arc::clone(&procedure));
                procedure
            }
        }
    }
}

/// `first(a, b) or second(a, b)`
fn either(first: Procedure, second: Procedure) -> Procedure {
    Arc::new(move |left, right| first(left, right)?.or_else(|| second(left, right)))
}

/// `first(a, b) and not second(a, b)`
fn but_not(first: Procedure, second: Procedure) -> Procedure {
    Arc::new(move |left, right| first(left, right)?.and_not(|| second(left, right)))
}

/// `procedure(b, a)`
fn swapped(procedure: Procedure) -> Procedure {
    Arc::new(move |left, right| procedure(right, left))
}

/// `not procedure(a, b)`
fn negated(procedure: Procedure) -> Procedure {
    Arc::new(move |left, right| Ok(procedure(left, right)?.negate()))
}
