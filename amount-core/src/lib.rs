pub mod entry;
pub mod keys;
pub mod models;

pub use entry::*;
pub use keys::{KEYPAD_LAYOUT, Key, KeyParseError};
pub use models::*;
