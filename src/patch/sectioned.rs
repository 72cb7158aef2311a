use std::fmt::Debug;

use crate::{
    change::{Change, ItemPosition, SectionedChange, SectionedChanges},
    section::Section,
};

/// Applies a sectioned change script to `target` in place, consuming the
/// script. `target` must be the before side the script was diffed against;
/// the result is the after side.
///
/// The two-level generalisation of `apply`: indices recorded against the
/// original snapshots stay valid because every pass only performs mutations
/// whose coordinates it cannot have invalidated yet.
///
/// 1. clear the source slot of every item delete and item move, against the
///    before numbering, and compact each section,
/// 2. clear the source slot of every section delete and section move - a
///    moved section keeps the compacted items it holds at this point, while
///    taking its carried after value's own content,
/// 3. insert sections ascending by target index; an inserted section starts
///    with an empty item list, since its items arrive through the item
///    script (exactly the way the diff classifies them),
/// 4. insert every inserted and moved item, ascending by `(section, item)`
///    target position,
/// 5. overwrite updated items at their target positions,
/// 6. overwrite updated sections' content at their target indices,
///    preserving the item list the passes above produced - the item script
///    stays authoritative for items.
///
/// Like the flat variant, a sectioned script is single-use.
///
/// # Panics
///
/// Panics when a change's position lies outside the collection, which means
/// the script and the target disagree about the data.
pub fn apply_sections<S>(changes: SectionedChanges<S>, target: &mut Vec<S>)
where
    S: Section + PartialEq + Clone + Debug,
{
    let SectionedChanges { sections, items } = changes;

    let mut item_removals: Vec<ItemPosition> = Vec::new();
    let mut item_insertions: Vec<(ItemPosition, S::Item)> = Vec::new();
    let mut item_updates: Vec<(ItemPosition, S::Item)> = Vec::new();

    for change in items {
        match change {
            SectionedChange::Delete { index, .. } => item_removals.push(index),
            SectionedChange::Insert { index, item } => item_insertions.push((index, item)),
            SectionedChange::Move { from, to, item } => {
                item_removals.push(from);
                item_insertions.push((to, item));
            }
            SectionedChange::Update { to, item, .. } => item_updates.push((to, item)),
        }
    }

    let mut section_removals: Vec<usize> = Vec::new();
    let mut section_moves: Vec<(usize, usize, S)> = Vec::new();
    let mut section_inserts: Vec<(usize, S)> = Vec::new();
    let mut section_updates: Vec<(usize, S)> = Vec::new();

    for change in sections {
        match change {
            Change::Delete { index, .. } => section_removals.push(index),
            Change::Insert { index, item } => section_inserts.push((index, item)),
            Change::Move { from, to, item } => section_moves.push((from, to, item)),
            Change::Update { to, item, .. } => section_updates.push((to, item)),
        }
    }

    // Pass 1: item removals against the before numbering.
    let mut removals_by_section: Vec<Vec<usize>> = vec![Vec::new(); target.len()];
    for position in item_removals {
        removals_by_section[position.section].push(position.item);
    }
    for (section, removals) in target.iter_mut().zip(removals_by_section) {
        if removals.is_empty() {
            continue;
        }

        let items = section.items_mut();
        let mut slots: Vec<Option<S::Item>> = items.drain(..).map(Some).collect();
        for index in removals {
            slots[index] = None;
        }
        *items = slots.into_iter().flatten().collect();
    }

    // Pass 2: section removals. A moved section keeps the compacted item
    // run it holds at this point, while taking its carried after value's
    // own content.
    let mut slots: Vec<Option<S>> = target.drain(..).map(Some).collect();
    for index in section_removals {
        slots[index] = None;
    }

    let mut insertions: Vec<(usize, S)> = Vec::new();
    for (from, to, mut carried) in section_moves {
        let mut live = slots[from]
            .take()
            .expect("a moved section exists at its source index");
        *carried.items_mut() = std::mem::take(live.items_mut());
        insertions.push((to, carried));
    }

    for (index, mut section) in section_inserts {
        section.items_mut().clear();
        insertions.push((index, section));
    }

    // Pass 3: section insertions, ascending.
    let mut result: Vec<S> = slots.into_iter().flatten().collect();
    insertions.sort_by_key(|(index, _)| *index);
    for (index, section) in insertions {
        result.insert(index, section);
    }

    // Pass 4: item insertions, ascending by target position.
    item_insertions.sort_by_key(|(position, _)| *position);
    for (position, item) in item_insertions {
        result[position.section].items_mut().insert(position.item, item);
    }

    // Pass 5: item updates.
    for (position, item) in item_updates {
        result[position.section].items_mut()[position.item] = item;
    }

    // Pass 6: section content updates, keeping the items built so far.
    for (index, mut section) in section_updates {
        *section.items_mut() = std::mem::take(result[index].items_mut());
        result[index] = section;
    }

    *target = result;
}
