//! CLI command implementations

pub mod candidates;
pub mod check;
pub mod completions;
pub mod normalize;
pub mod scan;
