use strum_macros::{EnumString, VariantNames};

/// The two plugin families the framework distinguishes.
///
/// Checks probe a resource and report its state; notifications forward a
/// state change to some delivery channel. Their lifecycle is identical.
#[derive(EnumString, VariantNames, Debug, Clone, Copy, Eq, Hash, PartialEq)]
#[strum(serialize_all = "kebab_case")]
pub enum Family {
    Check,
    Notification,
}

use std::fmt;

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Check => write!(f, "check"),
            Family::Notification => write!(f, "notification"),
        }
    }
}
