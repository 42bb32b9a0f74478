pub mod logging;
pub mod report;
pub mod script;
pub mod settings;

pub use report::describe_expression;
pub use script::{KeyScript, ReplayStep, ScriptError};
pub use settings::{SettingsError, load_config, parse_config};
