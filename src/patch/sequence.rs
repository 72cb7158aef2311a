use std::fmt::Debug;

use crate::change::Change;

/// Applies a change script to `target` in place, consuming the script.
///
/// `target` must be the before side the script was diffed against; the
/// result is the after side, regardless of the script's internal ordering.
/// Replaying changes one at a time would let earlier mutations invalidate
/// the indices later changes were recorded against, so the script is applied
/// in three strict passes instead:
///
/// 1. clear the source slot of every delete and move (a moved item
///    "disappears" first and reappears later), then compact,
/// 2. insert every inserted and moved item, ascending by target index so
///    earlier insertions keep later target indices valid,
/// 3. overwrite every updated slot at its target index.
///
/// A script is single-use: applying it to anything other than the sequence
/// it was diffed against - including its own output - is undefined.
///
/// # Panics
///
/// Panics when a change's index lies outside the sequence, which means the
/// script and the target disagree about the data.
pub fn apply<T>(script: Vec<Change<T>>, target: &mut Vec<T>)
where
    T: PartialEq + Clone + Debug,
{
    let mut removals: Vec<usize> = Vec::new();
    let mut insertions: Vec<(usize, T)> = Vec::new();
    let mut updates: Vec<(usize, T)> = Vec::new();

    for change in script {
        match change {
            Change::Delete { index, .. } => removals.push(index),
            Change::Insert { index, item } => insertions.push((index, item)),
            Change::Move { from, to, item } => {
                removals.push(from);
                insertions.push((to, item));
            }
            Change::Update { to, item, .. } => updates.push((to, item)),
        }
    }

    let mut slots: Vec<Option<T>> = target.drain(..).map(Some).collect();
    for index in removals {
        slots[index] = None;
    }

    let mut result: Vec<T> = slots.into_iter().flatten().collect();

    insertions.sort_by_key(|(index, _)| *index);
    for (index, item) in insertions {
        result.insert(index, item);
    }

    for (index, item) in updates {
        result[index] = item;
    }

    *target = result;
}
