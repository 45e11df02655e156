//! Utility modules for the static site builder.

pub mod category;
pub mod minify;
