//! Small helpers shared across layers.

pub mod humanize;
pub mod parse;
pub mod validate;
