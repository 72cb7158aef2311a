use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::identity::Identifiable;

/// An identifiable section owning an ordered run of identifiable items.
///
/// A section's identity and content are independent of its items: two
/// snapshots of "the same" section may carry entirely different item lists.
/// `content_eq` must therefore never look at the items - item-level changes
/// are reported separately by the sectioned diff, and a section whose item
/// order changed but whose own content did not must produce no section-level
/// change at all.
pub trait Section: Identifiable {
    type Item: Identifiable + PartialEq + Clone + Debug;

    fn items(&self) -> &[Self::Item];

    fn items_mut(&mut self) -> &mut Vec<Self::Item>;

    /// Compares the section's own content (title, collapsed state, ...)
    /// while ignoring the item list.
    fn content_eq(&self, other: &Self) -> bool;
}

/// A ready-made section: a header value paired with a `Vec` of items.
///
/// The header provides the section's identity and content; the item list is
/// excluded from `content_eq` by construction, so this type satisfies the
/// [`Section`] contract without the caller having to think about it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VecSection<H, T> {
    pub header: H,
    pub items: Vec<T>,
}

impl<H, T> VecSection<H, T> {
    #[must_use]
    pub fn new(header: H, items: Vec<T>) -> Self { Self { header, items } }
}

impl<H, T> Identifiable for VecSection<H, T>
where
    H: Identifiable,
{
    type Id = H::Id;

    fn id(&self) -> Self::Id { self.header.id() }
}

impl<H, T> Section for VecSection<H, T>
where
    H: Identifiable + PartialEq,
    T: Identifiable + PartialEq + Clone + Debug,
{
    type Item = T;

    fn items(&self) -> &[T] { &self.items }

    fn items_mut(&mut self) -> &mut Vec<T> { &mut self.items }

    fn content_eq(&self, other: &Self) -> bool { self.header == other.header }
}
