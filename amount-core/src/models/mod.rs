mod entry_config;

pub use entry_config::{EntryConfig, EntryConfigError};
