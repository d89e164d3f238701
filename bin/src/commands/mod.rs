//! CLI command implementations.

pub(crate) mod chart;
pub(crate) mod daily;
pub(crate) mod info;
