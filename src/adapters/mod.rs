//! Infrastructure adapters for external systems.

pub mod llm;
pub mod mock;
pub mod profiles;
pub mod trending;
