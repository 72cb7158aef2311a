pub mod flatten;
pub mod validate;
