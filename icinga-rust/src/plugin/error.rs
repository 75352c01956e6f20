use crate::plugin::Status;
use std::fmt;

/// Result type alias for plugin operations
pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// Failures a plugin run can produce.
///
/// None of these ever reach the caller of `run`; the lifecycle converts
/// every variant into the plugin's (message, code) result.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PluginError {
    /// The caller passed the `help` option; carries the configured help text.
    HelpRequested { help: String },

    /// Required option keys absent from the parsed options, in declared order.
    MissingParameters { missing: Vec<String> },

    /// The check or send operation failed with a plugin-chosen status.
    Failed { message: String, status: Status },
}

impl PluginError {
    /// Operation failure with an explicit status.
    pub fn failed(message: impl Into<String>, status: Status) -> Self {
        PluginError::Failed {
            message: message.into(),
            status,
        }
    }

    /// Plugin output this failure turns into.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Return code this failure turns into.
    pub fn status(&self) -> Status {
        match self {
            PluginError::HelpRequested { .. } | PluginError::MissingParameters { .. } => {
                Status::Unknown
            }
            PluginError::Failed { status, .. } => *status,
        }
    }
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginError::HelpRequested { help } => {
                write!(f, "{help}")
            }
            PluginError::MissingParameters { missing } => {
                write!(f, "Missing required parameters: {}", missing.join(", "))
            }
            PluginError::Failed { message, .. } => {
                write!(f, "{message}")
            }
        }
    }
}

impl std::error::Error for PluginError {}
