use strum_macros::{EnumString, VariantNames};

/// Icinga return codes, ordered by severity.
///
/// Every plugin run terminates in exactly one of these states. The numeric
/// value doubles as the process exit status the supervisor expects.
#[derive(EnumString, VariantNames, Debug, Clone, Copy, Eq, Hash, PartialEq, Default)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Status {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    #[default]
    Unknown = 3,
}

impl Status {
    /// Numeric code for the supervisor, by convention also the exit status.
    pub fn exit_code(self) -> i32 {
        self as i32
    }
}

use std::fmt;

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Warning => write!(f, "WARNING"),
            Status::Critical => write!(f, "CRITICAL"),
            Status::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl TryFrom<i32> for Status {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, String> {
        match value {
            0 => Ok(Status::Ok),
            1 => Ok(Status::Warning),
            2 => Ok(Status::Critical),
            3 => Ok(Status::Unknown),
            _ => Err(format!("Invalid plugin status: {value}")),
        }
    }
}
