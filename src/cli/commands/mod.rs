//! CLI command implementations.

pub mod profile;
pub mod run;
pub mod trending;
