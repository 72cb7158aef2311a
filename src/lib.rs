mod change;
mod diff;
mod error;
mod identity;
mod patch;
mod section;
mod utils;

pub use change::{Change, ItemPosition, SectionedChange, SectionedChanges};
pub use diff::{diff, diff_sections, diff_with};
pub use error::DiffError;
pub use identity::Identifiable;
pub use patch::{apply, apply_sections};
pub use section::{Section, VecSection};
pub use utils::validate::{ensure_unique_ids, ensure_unique_item_ids};
