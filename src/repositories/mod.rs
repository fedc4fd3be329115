//! Repository layer for the notifier's persisted configuration.

mod config_store;

pub use config_store::{ConfigStore, MemoryStore, TomlFileStore};
#[cfg(test)]
pub use config_store::ReadOnlyStore;
