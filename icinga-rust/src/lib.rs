#![forbid(unsafe_code)]

pub mod cli;
pub mod plugin;

// Re-exports
//
// The options mapping is produced by whatever front end parses the raw
// argument vector (normally the `cli` module) and is handed to plugins
// wholesale. Flags present without a value map to the empty string.
pub type ParsedOptions = std::collections::BTreeMap<String, String>;

///
/// Expose all structures required in virtually any Icinga plugin
///
/// ```
/// use icinga_rust::prelude::*;
/// ```
pub mod prelude {
    pub use crate::plugin::{
        CheckPlugin, CheckPluginWrapper, Family, NotificationPlugin, NotificationPluginWrapper,
        Plugin, PluginError, PluginResult, Report, Status,
    };
    pub use crate::ParsedOptions;
}
