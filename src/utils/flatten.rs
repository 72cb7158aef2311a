use crate::{change::ItemPosition, section::Section};

/// Flattens sections into one linear item list, preserving cross-section
/// relative order.
pub fn flatten<S>(sections: &[S]) -> Vec<S::Item>
where
    S: Section,
{
    sections
        .iter()
        .flat_map(|section| section.items().iter().cloned())
        .collect()
}

/// Maps an index into the flattened item list back onto its
/// `(section, item)` position, using the section boundaries of `sections`.
///
/// # Panics
///
/// Panics when `flat_index` lies beyond the total item count. The flattened
/// script and the section boundaries disagreeing about the data is an
/// internal invariant violation, not a recoverable condition.
pub fn unflatten_index<S>(sections: &[S], flat_index: usize) -> ItemPosition
where
    S: Section,
{
    let mut offset = flat_index;

    for (section, entry) in sections.iter().enumerate() {
        let length = entry.items().len();
        if offset < length {
            return ItemPosition::new(section, offset);
        }
        offset -= length;
    }

    panic!(
        "flattened index {flat_index} does not map into {} sections holding {} items",
        sections.len(),
        sections.iter().map(|entry| entry.items().len()).sum::<usize>()
    );
}
