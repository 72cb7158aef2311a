use core::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{change::Change, section::Section};

/// A two-dimensional position: a section index paired with an item index
/// within that section.
///
/// Positions order lexicographically (section first), which is also the
/// order insertions must be applied in.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemPosition {
    pub section: usize,
    pub item: usize,
}

impl ItemPosition {
    #[must_use]
    pub fn new(section: usize, item: usize) -> Self { Self { section, item } }
}

impl Display for ItemPosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.section, self.item)
    }
}

/// A single item-level change in a sectioned script. The variant shape
/// mirrors [`Change`]; only the coordinates are two-dimensional.
///
/// A move between sections and a move within one section are reported
/// identically - the coordinates alone tell them apart.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum SectionedChange<T>
where
    T: PartialEq + Clone + Debug,
{
    Insert { index: ItemPosition, item: T },

    Delete { index: ItemPosition, item: T },

    Move { from: ItemPosition, to: ItemPosition, item: T },

    Update { from: ItemPosition, to: ItemPosition, item: T },
}

impl<T> SectionedChange<T>
where
    T: PartialEq + Clone + Debug,
{
    /// The item value the change carries: the after-side value for inserts,
    /// moves, and updates, the removed before-side value for deletes.
    pub fn item(&self) -> &T {
        match self {
            SectionedChange::Insert { item, .. }
            | SectionedChange::Delete { item, .. }
            | SectionedChange::Move { item, .. }
            | SectionedChange::Update { item, .. } => item,
        }
    }

    /// The position the change vacates on the before side, if any.
    pub fn source_position(&self) -> Option<ItemPosition> {
        match self {
            SectionedChange::Insert { .. } => None,
            SectionedChange::Delete { index, .. } => Some(*index),
            SectionedChange::Move { from, .. } | SectionedChange::Update { from, .. } => {
                Some(*from)
            }
        }
    }

    /// The position the change fills on the after side, if any.
    pub fn target_position(&self) -> Option<ItemPosition> {
        match self {
            SectionedChange::Delete { .. } => None,
            SectionedChange::Insert { index, .. } => Some(*index),
            SectionedChange::Move { to, .. } | SectionedChange::Update { to, .. } => Some(*to),
        }
    }
}

impl<T> Display for SectionedChange<T>
where
    T: PartialEq + Clone + Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SectionedChange::Insert { index, item } => {
                write!(f, "<insert {item:?} at {index}>")
            }
            SectionedChange::Delete { index, item } => {
                write!(f, "<delete {item:?} from {index}>")
            }
            SectionedChange::Move { from, to, item } => {
                write!(f, "<move {item:?} from {from} to {to}>")
            }
            SectionedChange::Update { from, to, item } => {
                write!(f, "<update {item:?} from {from} to {to}>")
            }
        }
    }
}

impl<T> Debug for SectionedChange<T>
where
    T: PartialEq + Clone + Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result { write!(f, "{self}") }
}

/// The result of a sectioned diff: two parallel scripts, one over the
/// sections themselves and one over their items.
///
/// Section-level coordinates are flat indices into the section lists;
/// item-level coordinates are [`ItemPosition`]s. Both scripts must be
/// applied together (see `apply_sections`) - neither makes sense alone.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "S: Serialize, S::Item: Serialize",
        deserialize = "S: Deserialize<'de>, S::Item: Deserialize<'de>"
    ))
)]
#[derive(Debug, Clone, PartialEq)]
pub struct SectionedChanges<S>
where
    S: Section + PartialEq + Clone + Debug,
{
    pub sections: Vec<Change<S>>,
    pub items: Vec<SectionedChange<S::Item>>,
}

impl<S> SectionedChanges<S>
where
    S: Section + PartialEq + Clone + Debug,
{
    #[must_use]
    pub fn new(sections: Vec<Change<S>>, items: Vec<SectionedChange<S::Item>>) -> Self {
        Self { sections, items }
    }

    /// Total number of changes across both scripts.
    #[must_use]
    pub fn len(&self) -> usize { self.sections.len() + self.items.len() }

    /// True when the two snapshots were indistinguishable.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.sections.is_empty() && self.items.is_empty() }
}

impl<S> Default for SectionedChanges<S>
where
    S: Section + PartialEq + Clone + Debug,
{
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            items: Vec::new(),
        }
    }
}

impl<S> Eq for SectionedChanges<S>
where
    S: Section + Eq + Clone + Debug,
    S::Item: Eq,
{
}

impl<S> Hash for SectionedChanges<S>
where
    S: Section + PartialEq + Clone + Debug + Hash,
    S::Item: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sections.hash(state);
        self.items.hash(state);
    }
}
