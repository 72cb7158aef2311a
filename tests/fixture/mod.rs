use pretty_assertions::assert_eq;
use reconcile_list::{
    Change, SectionedChange, VecSection, apply_sections, diff_sections,
};
use serde::Deserialize;

pub type Group = VecSection<(String, String), (u32, String)>;

/// One YAML document from `tests/cases/`: two snapshots of a sectioned
/// collection, with optional expectations about the computed script.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureCase {
    pub name: String,
    pub before: Vec<FixtureSection>,
    pub after: Vec<FixtureSection>,
    #[serde(default)]
    pub expect: Option<ExpectedCounts>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<FixtureItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureItem {
    pub id: u32,
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectedCounts {
    #[serde(default)]
    pub section_inserts: usize,
    #[serde(default)]
    pub section_deletes: usize,
    #[serde(default)]
    pub section_moves: usize,
    #[serde(default)]
    pub section_updates: usize,
    #[serde(default)]
    pub item_inserts: usize,
    #[serde(default)]
    pub item_deletes: usize,
    #[serde(default)]
    pub item_moves: usize,
    #[serde(default)]
    pub item_updates: usize,
}

impl FixtureCase {
    pub fn before(&self) -> Vec<Group> { sections(&self.before) }

    pub fn after(&self) -> Vec<Group> { sections(&self.after) }

    /// Applying the computed script to the before snapshot must reproduce
    /// the after snapshot exactly.
    pub fn assert_round_trip(&self) {
        let before = self.before();
        let after = self.after();

        let changes = diff_sections(&before, &after);
        let mut patched = before;
        apply_sections(changes, &mut patched);

        assert_eq!(patched, after, "case `{}` did not round trip", self.name);
    }

    /// When the fixture pins down change counts, the script must match them
    /// per kind - this is what catches spurious moves and misclassified
    /// cross-section relocations.
    pub fn assert_change_counts(&self) {
        let Some(expect) = &self.expect else {
            return;
        };

        let changes = diff_sections(&self.before(), &self.after());

        let actual = ExpectedCounts {
            section_inserts: count(&changes.sections, |change| {
                matches!(change, Change::Insert { .. })
            }),
            section_deletes: count(&changes.sections, |change| {
                matches!(change, Change::Delete { .. })
            }),
            section_moves: count(&changes.sections, |change| {
                matches!(change, Change::Move { .. })
            }),
            section_updates: count(&changes.sections, |change| {
                matches!(change, Change::Update { .. })
            }),
            item_inserts: count(&changes.items, |change| {
                matches!(change, SectionedChange::Insert { .. })
            }),
            item_deletes: count(&changes.items, |change| {
                matches!(change, SectionedChange::Delete { .. })
            }),
            item_moves: count(&changes.items, |change| {
                matches!(change, SectionedChange::Move { .. })
            }),
            item_updates: count(&changes.items, |change| {
                matches!(change, SectionedChange::Update { .. })
            }),
        };

        assert_eq!(
            counts_as_tuple(&actual),
            counts_as_tuple(expect),
            "case `{}` produced an unexpected script: {:?} {:?}",
            self.name,
            changes.sections,
            changes.items
        );
    }
}

fn sections(list: &[FixtureSection]) -> Vec<Group> {
    list.iter()
        .map(|section| {
            VecSection::new(
                (section.id.clone(), section.title.clone()),
                section
                    .items
                    .iter()
                    .map(|item| (item.id, item.text.clone()))
                    .collect(),
            )
        })
        .collect()
}

fn count<T>(changes: &[T], predicate: impl Fn(&T) -> bool) -> usize {
    changes.iter().filter(|change| predicate(change)).count()
}

#[allow(clippy::type_complexity)]
fn counts_as_tuple(
    counts: &ExpectedCounts,
) -> (usize, usize, usize, usize, usize, usize, usize, usize) {
    (
        counts.section_inserts,
        counts.section_deletes,
        counts.section_moves,
        counts.section_updates,
        counts.item_inserts,
        counts.item_deletes,
        counts.item_moves,
        counts.item_updates,
    )
}
