//! CLI command implementations.

pub(crate) mod sample;
pub(crate) mod summary;
