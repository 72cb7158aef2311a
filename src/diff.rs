mod sectioned;
mod sequence;

pub use sectioned::diff_sections;
pub use sequence::{diff, diff_with};
