//! Domain layer for scriptforge
//!
//! Core models, errors and the collaborator ports the workflow engine drives.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{WorkflowError, WorkflowResult};
