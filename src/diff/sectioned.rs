//! Section-aware diff: section-level changes plus item-level changes with
//! two-dimensional positions, with cross-section item moves reclassified.

use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
};

use super::sequence::{diff, diff_with};
use crate::{
    change::{Change, ItemPosition, SectionedChange, SectionedChanges},
    identity::Identifiable,
    section::Section,
    utils::flatten::{flatten, unflatten_index},
};

type ItemId<S> = <<S as Section>::Item as Identifiable>::Id;

/// Computes the pair of scripts turning one ordered section collection into
/// another: one script over the sections themselves, one over their items.
///
/// Sections are matched by identifier and compared with
/// [`Section::content_eq`], so a section whose item list changed but whose
/// own content did not produces no section-level change. Items are diffed
/// over the flattened item lists, then every change is expressed in
/// `(section, item)` coordinates; flat moves are reconstructed against the
/// section structure because relocating an item across a section boundary
/// must surface as a move even when the flattened order never changed.
///
/// Section identifiers must be unique per side, and item identifiers must be
/// unique across the flattened item set of each side - not merely within
/// their own section. Both preconditions are asserted in debug builds (see
/// `ensure_unique_ids` and `ensure_unique_item_ids` for release-mode
/// checks).
#[must_use]
pub fn diff_sections<S>(before: &[S], after: &[S]) -> SectionedChanges<S>
where
    S: Section + PartialEq + Clone + Debug,
{
    #[cfg(debug_assertions)]
    {
        use crate::utils::validate::{ensure_unique_ids, ensure_unique_item_ids};

        for (sections, label, item_label) in [
            (before, "before sections", "before items"),
            (after, "after sections", "after items"),
        ] {
            if let Err(error) = ensure_unique_ids(sections, label) {
                panic!("{error}");
            }
            if let Err(error) = ensure_unique_item_ids(sections, item_label) {
                panic!("{error}");
            }
        }
    }

    let section_changes = diff_with(before, after, S::content_eq);

    let before_flat = flatten(before);
    let after_flat = flatten(after);
    let flat_changes = diff(&before_flat, &after_flat);

    let mut deleted: HashSet<ItemId<S>> = HashSet::new();
    let mut inserted: HashSet<ItemId<S>> = HashSet::new();
    let mut items: Vec<SectionedChange<S::Item>> = Vec::new();

    for change in flat_changes {
        match change {
            Change::Delete { index, item } => {
                deleted.insert(item.id());
                items.push(SectionedChange::Delete {
                    index: unflatten_index(before, index),
                    item,
                });
            }
            Change::Insert { index, item } => {
                inserted.insert(item.id());
                items.push(SectionedChange::Insert {
                    index: unflatten_index(after, index),
                    item,
                });
            }
            Change::Update { from, to, item } => {
                items.push(SectionedChange::Update {
                    from: unflatten_index(before, from),
                    to: unflatten_index(after, to),
                    item,
                });
            }
            // A flat move cannot tell "reordered within a section" from
            // "relocated to a different section" - and an item can change
            // sections without its flattened order changing at all. Moves
            // are reconstructed against the section structure below.
            Change::Move { .. } => {}
        }
    }

    items.extend(reconstruct_moves(
        before,
        after,
        &section_changes,
        &deleted,
        &inserted,
    ));

    SectionedChanges::new(section_changes, items)
}

/// Surfaces intra- and cross-section item moves by walking the after side
/// over a working copy of before's sections that has the section script
/// already replayed.
///
/// The working copy holds item identifiers only: resolved deletes are
/// filtered out up front, items of deleted sections survive in an orphan
/// pool, inserted sections start empty, and moved sections carry their item
/// run with them. Every splice performed on the working copy is reported as
/// exactly one move with the item's true before and after positions;
/// splicing also keeps the copy aligned with the after side so the same
/// physical relocation is never reported twice while the sections are
/// walked one by one.
fn reconstruct_moves<S>(
    before: &[S],
    after: &[S],
    section_changes: &[Change<S>],
    deleted: &HashSet<ItemId<S>>,
    inserted: &HashSet<ItemId<S>>,
) -> Vec<SectionedChange<S::Item>>
where
    S: Section + PartialEq + Clone + Debug,
{
    let before_positions = positions(before);
    let after_positions = positions(after);

    let mut slots: Vec<Option<Vec<ItemId<S>>>> = before
        .iter()
        .map(|section| {
            Some(
                section
                    .items()
                    .iter()
                    .map(Identifiable::id)
                    .filter(|id| !deleted.contains(id))
                    .collect(),
            )
        })
        .collect();

    let mut orphans: Vec<ItemId<S>> = Vec::new();
    let mut insertions: Vec<(usize, Vec<ItemId<S>>)> = Vec::new();

    for change in section_changes {
        match change {
            Change::Delete { index, .. } => {
                let ids = slots[*index]
                    .take()
                    .expect("a section is deleted at most once");
                orphans.extend(ids);
            }
            Change::Move { from, to, .. } => {
                let ids = slots[*from]
                    .take()
                    .expect("a section is moved at most once");
                insertions.push((*to, ids));
            }
            Change::Insert { index, .. } => insertions.push((*index, Vec::new())),
            Change::Update { .. } => {}
        }
    }

    let mut working: Vec<Vec<ItemId<S>>> = slots.into_iter().flatten().collect();
    insertions.sort_by_key(|(index, _)| *index);
    for (index, ids) in insertions {
        working.insert(index, ids);
    }

    debug_assert_eq!(
        working.len(),
        after.len(),
        "replaying the section script must line the working copy up with the after side"
    );

    let mut moves = Vec::new();

    for (section_index, section) in after.iter().enumerate() {
        let required: Vec<ItemId<S>> = section
            .items()
            .iter()
            .map(Identifiable::id)
            .filter(|id| !inserted.contains(id))
            .collect();

        for (position, id) in required.iter().enumerate() {
            if working[section_index].get(position) == Some(id) {
                continue;
            }

            take_working_id(&mut working, &mut orphans, id);
            working[section_index].insert(position, id.clone());

            let to = after_positions[id];
            moves.push(SectionedChange::Move {
                from: before_positions[id],
                to,
                item: after[to.section].items()[to.item].clone(),
            });
        }
    }

    moves
}

fn take_working_id<Id>(working: &mut [Vec<Id>], orphans: &mut Vec<Id>, id: &Id)
where
    Id: Eq,
{
    for ids in working.iter_mut() {
        if let Some(index) = ids.iter().position(|other| other == id) {
            ids.remove(index);
            return;
        }
    }

    let index = orphans
        .iter()
        .position(|other| other == id)
        .expect("an intersecting item is present in the working copy");
    orphans.remove(index);
}

fn positions<S>(sections: &[S]) -> HashMap<ItemId<S>, ItemPosition>
where
    S: Section,
{
    let mut result = HashMap::new();

    for (section_index, section) in sections.iter().enumerate() {
        for (item_index, item) in section.items().iter().enumerate() {
            result.insert(item.id(), ItemPosition::new(section_index, item_index));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::section::VecSection;

    type Row = (u32, &'static str);
    type Group = VecSection<(char, &'static str), Row>;

    fn group(id: char, title: &'static str, items: Vec<Row>) -> Group {
        VecSection::new((id, title), items)
    }

    #[test]
    fn test_identical_sides_yield_empty_scripts() {
        let sections = vec![
            group('x', "Letters", vec![(1, "a"), (2, "b")]),
            group('y', "Digits", vec![(3, "7")]),
        ];

        let changes = diff_sections(&sections, &sections);

        assert!(changes.is_empty());
    }

    #[test]
    fn test_deleted_section_reports_item_deletes_and_rescues_the_survivor() {
        let before = vec![
            group('x', "First", vec![(1, "a"), (2, "b")]),
            group('y', "Second", vec![(3, "c")]),
        ];
        let after = vec![group('x', "First", vec![(3, "c")])];

        let changes = diff_sections(&before, &after);

        assert_eq!(changes.sections, vec![Change::Delete {
            index: 1,
            item: before[1].clone()
        }]);
        assert_eq!(changes.items, vec![
            SectionedChange::Delete {
                index: ItemPosition::new(0, 0),
                item: (1, "a")
            },
            SectionedChange::Delete {
                index: ItemPosition::new(0, 1),
                item: (2, "b")
            },
            SectionedChange::Move {
                from: ItemPosition::new(1, 0),
                to: ItemPosition::new(0, 0),
                item: (3, "c")
            },
        ]);
    }

    #[test]
    fn test_cross_section_move_is_one_move_and_nothing_else() {
        let before = vec![
            group('x', "First", vec![(1, "p"), (2, "q")]),
            group('y', "Second", vec![(3, "r")]),
        ];
        let after = vec![
            group('x', "First", vec![(1, "p")]),
            group('y', "Second", vec![(2, "q"), (3, "r")]),
        ];

        let changes = diff_sections(&before, &after);

        assert_eq!(changes.sections, vec![]);
        assert_eq!(changes.items, vec![SectionedChange::Move {
            from: ItemPosition::new(0, 1),
            to: ItemPosition::new(1, 0),
            item: (2, "q")
        }]);
    }

    #[test]
    fn test_reordered_items_leave_the_section_script_empty() {
        let before = vec![group('x', "Letters", vec![(1, "a"), (2, "b")])];
        let after = vec![group('x', "Letters", vec![(2, "b"), (1, "a")])];

        let changes = diff_sections(&before, &after);

        assert_eq!(changes.sections, vec![]);
        assert_eq!(changes.items, vec![SectionedChange::Move {
            from: ItemPosition::new(0, 1),
            to: ItemPosition::new(0, 0),
            item: (2, "b")
        }]);
    }

    #[test]
    fn test_moved_section_carries_its_items_silently() {
        let before = vec![
            group('x', "First", vec![(1, "a")]),
            group('y', "Second", vec![(2, "b")]),
        ];
        let after = vec![
            group('y', "Second", vec![(2, "b")]),
            group('x', "First", vec![(1, "a")]),
        ];

        let changes = diff_sections(&before, &after);

        assert_eq!(changes.sections, vec![Change::Move {
            from: 1,
            to: 0,
            item: after[0].clone()
        }]);
        assert_eq!(changes.items, vec![]);
    }

    #[test]
    fn test_item_moving_out_of_a_moved_section() {
        let before = vec![
            group('x', "First", vec![(1, "a")]),
            group('y', "Second", vec![(2, "b"), (3, "c")]),
        ];
        let after = vec![
            group('y', "Second", vec![(2, "b")]),
            group('x', "First", vec![(1, "a"), (3, "c")]),
        ];

        let changes = diff_sections(&before, &after);

        assert_eq!(changes.sections, vec![Change::Move {
            from: 1,
            to: 0,
            item: after[0].clone()
        }]);
        assert_eq!(changes.items, vec![SectionedChange::Move {
            from: ItemPosition::new(1, 1),
            to: ItemPosition::new(1, 1),
            item: (3, "c")
        }]);
    }

    #[test]
    fn test_new_section_items_arrive_as_inserts() {
        let before = vec![group('x', "First", vec![(1, "a")])];
        let after = vec![
            group('x', "First", vec![(1, "a")]),
            group('y', "Second", vec![(2, "b"), (3, "c")]),
        ];

        let changes = diff_sections(&before, &after);

        assert_eq!(changes.sections, vec![Change::Insert {
            index: 1,
            item: after[1].clone()
        }]);
        assert_eq!(changes.items, vec![
            SectionedChange::Insert {
                index: ItemPosition::new(1, 0),
                item: (2, "b")
            },
            SectionedChange::Insert {
                index: ItemPosition::new(1, 1),
                item: (3, "c")
            },
        ]);
    }

    #[test]
    fn test_section_content_update_does_not_touch_items() {
        let before = vec![group('x', "Letters", vec![(1, "a")])];
        let after = vec![group('x', "Letters, renamed", vec![(1, "a")])];

        let changes = diff_sections(&before, &after);

        assert_eq!(changes.sections, vec![Change::Update {
            from: 0,
            to: 0,
            item: after[0].clone()
        }]);
        assert_eq!(changes.items, vec![]);
    }

    #[test]
    fn test_cross_section_move_with_content_change_yields_move_and_update() {
        let before = vec![
            group('x', "First", vec![(1, "a")]),
            group('y', "Second", vec![(2, "b")]),
        ];
        let after = vec![
            group('x', "First", vec![(2, "b, changed"), (1, "a")]),
            group('y', "Second", vec![]),
        ];

        let changes = diff_sections(&before, &after);

        assert_eq!(changes.sections, vec![]);
        assert_eq!(changes.items, vec![
            SectionedChange::Update {
                from: ItemPosition::new(1, 0),
                to: ItemPosition::new(0, 0),
                item: (2, "b, changed")
            },
            SectionedChange::Move {
                from: ItemPosition::new(1, 0),
                to: ItemPosition::new(0, 0),
                item: (2, "b, changed")
            },
        ]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "duplicate identifier")]
    fn test_item_identifiers_must_be_unique_across_sections() {
        let before = vec![
            group('x', "First", vec![(1, "a")]),
            group('y', "Second", vec![(1, "a again")]),
        ];
        let _ = diff_sections(&before, &before);
    }
}
