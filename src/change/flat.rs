use core::fmt::{Debug, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single change in the script turning one flat sequence into another.
///
/// Indices are positions in the *original* sequences: `index`/`from` count
/// into the before side, `to` (and an insert's `index`) into the after side.
/// Insert, move, and update changes carry the item's value from the after
/// side; a delete carries the value that disappeared from the before side.
///
/// A row that changed both position and content is reported as a `Move` plus
/// an independent `Update` - the two are never folded into one change.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Change<T>
where
    T: PartialEq + Clone + Debug,
{
    Insert { index: usize, item: T },

    Delete { index: usize, item: T },

    Move { from: usize, to: usize, item: T },

    Update { from: usize, to: usize, item: T },
}

impl<T> Change<T>
where
    T: PartialEq + Clone + Debug,
{
    /// The item value the change carries: the after-side value for inserts,
    /// moves, and updates, the removed before-side value for deletes.
    pub fn item(&self) -> &T {
        match self {
            Change::Insert { item, .. }
            | Change::Delete { item, .. }
            | Change::Move { item, .. }
            | Change::Update { item, .. } => item,
        }
    }

    /// The slot the change vacates in the before sequence, if any.
    pub fn source_index(&self) -> Option<usize> {
        match self {
            Change::Insert { .. } => None,
            Change::Delete { index, .. } => Some(*index),
            Change::Move { from, .. } | Change::Update { from, .. } => Some(*from),
        }
    }

    /// The slot the change fills in the after sequence, if any.
    pub fn target_index(&self) -> Option<usize> {
        match self {
            Change::Delete { .. } => None,
            Change::Insert { index, .. } => Some(*index),
            Change::Move { to, .. } | Change::Update { to, .. } => Some(*to),
        }
    }
}

impl<T> Display for Change<T>
where
    T: PartialEq + Clone + Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Change::Insert { index, item } => {
                write!(f, "<insert {item:?} at index {index}>")
            }
            Change::Delete { index, item } => {
                write!(f, "<delete {item:?} from index {index}>")
            }
            Change::Move { from, to, item } => {
                write!(f, "<move {item:?} from index {from} to index {to}>")
            }
            Change::Update { from, to, item } => {
                write!(f, "<update {item:?} from index {from} to index {to}>")
            }
        }
    }
}

impl<T> Debug for Change<T>
where
    T: PartialEq + Clone + Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result { write!(f, "{self}") }
}
