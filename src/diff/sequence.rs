//! Identity-based diff between two flat sequences.
//!
//! * time: expected `O(N)` for the set passes, `O(N * M)` worst case for the
//!   move pass where `M` is the number of reported moves (the working copy is
//!   spliced with a plain `Vec`)
//! * space: `O(N)`
//!
//! The quadratic ceiling only bites on pathological permutations of large
//! lists; for the UI-sized collections this crate targets the splice walk is
//! effectively linear.

use std::{collections::HashMap, fmt::Debug};

use crate::{change::Change, identity::Identifiable};

/// Computes the change script turning `before` into `after`, matching rows
/// by identifier and comparing content with `PartialEq`.
///
/// Both inputs must be free of duplicate identifiers; this is asserted in
/// debug builds and left unchecked in release builds (see
/// `ensure_unique_ids` for a release-mode check). The two sides do not have
/// to share any identifiers at all.
///
/// The relative order of the delete, insert, move, and update groups within
/// the returned script is an implementation detail - `apply` accepts any
/// ordering, and callers must not rely on it either.
///
/// ```
/// use reconcile_list::{Change, diff};
///
/// let before = [(1, "walk"), (2, "shop"), (3, "cook")];
/// let after = [(3, "cook"), (1, "walk, then rest")];
///
/// assert_eq!(diff(&before, &after), vec![
///     Change::Delete { index: 1, item: (2, "shop") },
///     Change::Move { from: 2, to: 0, item: (3, "cook") },
///     Change::Update { from: 0, to: 1, item: (1, "walk, then rest") },
/// ]);
/// ```
#[must_use]
pub fn diff<T>(before: &[T], after: &[T]) -> Vec<Change<T>>
where
    T: Identifiable + PartialEq + Clone + Debug,
{
    diff_with(before, after, T::eq)
}

/// Same as [`diff`] but with a caller-supplied content-equality relation,
/// for payloads whose `PartialEq` is unsuitable (or absent) for update
/// detection. Identity handling is unchanged.
#[must_use]
pub fn diff_with<T, F>(before: &[T], after: &[T], content_eq: F) -> Vec<Change<T>>
where
    T: Identifiable + PartialEq + Clone + Debug,
    F: Fn(&T, &T) -> bool,
{
    #[cfg(debug_assertions)]
    {
        if let Err(error) = crate::utils::validate::ensure_unique_ids(before, "before") {
            panic!("{error}");
        }
        if let Err(error) = crate::utils::validate::ensure_unique_ids(after, "after") {
            panic!("{error}");
        }
    }

    let before_indices = index_by_id(before);
    let after_indices = index_by_id(after);

    let mut changes = Vec::new();

    for (index, item) in before.iter().enumerate() {
        if !after_indices.contains_key(&item.id()) {
            changes.push(Change::Delete {
                index,
                item: item.clone(),
            });
        }
    }

    for (index, item) in after.iter().enumerate() {
        if !before_indices.contains_key(&item.id()) {
            changes.push(Change::Insert {
                index,
                item: item.clone(),
            });
        }
    }

    // Positional reconciliation over the identifiers present on both sides:
    // insertion-sort a working copy of the before order into the after order
    // and report every splice exactly once, in left-to-right discovery
    // order. An identifier whose relative order already matches is never
    // reported, no matter how its absolute index shifted.
    let mut working: Vec<T::Id> = before
        .iter()
        .map(Identifiable::id)
        .filter(|id| after_indices.contains_key(id))
        .collect();
    let required: Vec<T::Id> = after
        .iter()
        .map(Identifiable::id)
        .filter(|id| before_indices.contains_key(id))
        .collect();

    for (position, id) in required.iter().enumerate() {
        if working[position] == *id {
            continue;
        }

        let current = working
            .iter()
            .position(|other| other == id)
            .expect("an intersecting identifier is present in both orders");
        let moved = working.remove(current);
        working.insert(position, moved);

        let to = after_indices[id];
        changes.push(Change::Move {
            from: before_indices[id],
            to,
            item: after[to].clone(),
        });
    }

    for (to, item) in after.iter().enumerate() {
        let Some(&from) = before_indices.get(&item.id()) else {
            continue;
        };

        if !content_eq(&before[from], item) {
            changes.push(Change::Update {
                from,
                to,
                item: item.clone(),
            });
        }
    }

    changes
}

fn index_by_id<T>(items: &[T]) -> HashMap<T::Id, usize>
where
    T: Identifiable,
{
    items
        .iter()
        .enumerate()
        .map(|(index, item)| (item.id(), index))
        .collect()
}
