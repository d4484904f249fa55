//! Brickyard: which sets can a pile of bricks build?
//!
//! Normalizes a parts inventory, prefilters a set catalog by piece count and
//! checks each candidate either strictly (exact design and color) or with
//! color substitutions.

pub mod cli;
pub mod core;
pub mod entities;
pub mod logging;
pub mod payload;
