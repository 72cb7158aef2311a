use std::collections::HashSet;

use crate::{error::DiffError, identity::Identifiable, section::Section};

/// Verifies that no two elements of `items` share an identifier.
///
/// The diff functions only assert this precondition in debug builds; callers
/// that receive collections from untrusted sources can run this check
/// themselves in release builds before diffing.
///
/// # Errors
///
/// Returns [`DiffError::DuplicateId`] naming the first repeated identifier
/// and the `container` the caller passed in.
pub fn ensure_unique_ids<T>(items: &[T], container: &str) -> Result<(), DiffError>
where
    T: Identifiable,
{
    let mut seen: HashSet<T::Id> = HashSet::with_capacity(items.len());

    for item in items {
        let id = item.id();
        if !seen.insert(id.clone()) {
            return Err(DiffError::DuplicateId {
                container: container.to_owned(),
                id: format!("{id:?}"),
            });
        }
    }

    Ok(())
}

/// Verifies that no two items share an identifier across the *flattened*
/// item set of `sections`. Uniqueness within a single section is not enough:
/// an item's identity must survive a move to a different section.
///
/// # Errors
///
/// Returns [`DiffError::DuplicateId`] naming the first repeated identifier
/// and the `container` the caller passed in.
pub fn ensure_unique_item_ids<S>(sections: &[S], container: &str) -> Result<(), DiffError>
where
    S: Section,
{
    let mut seen: HashSet<<S::Item as Identifiable>::Id> = HashSet::new();

    for section in sections {
        for item in section.items() {
            let id = item.id();
            if !seen.insert(id.clone()) {
                return Err(DiffError::DuplicateId {
                    container: container.to_owned(),
                    id: format!("{id:?}"),
                });
            }
        }
    }

    Ok(())
}
