//! Brand profile providers.

pub mod file_provider;

pub use file_provider::FileBrandProfileProvider;
