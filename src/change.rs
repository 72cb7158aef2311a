mod flat;
mod sectioned;

pub use flat::Change;
pub use sectioned::{ItemPosition, SectionedChange, SectionedChanges};
