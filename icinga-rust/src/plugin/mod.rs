mod _enums;
mod _traits;
mod check;
mod error;
mod lifecycle;
mod notification;
mod report;

// Re-exporting all public structures
pub use _enums::family::Family;
pub use _enums::status::Status;

pub use _traits::plugin::Plugin;

pub use error::{PluginError, PluginResult};
pub use report::Report;

pub use check::{CheckPlugin, CheckPluginWrapper};
pub use notification::{NotificationPlugin, NotificationPluginWrapper, MESSAGE_OPTIONS};
