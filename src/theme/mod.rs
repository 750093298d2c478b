//! Theme preference values and the ThemeProvider configuration

mod config;

pub use config::{Attribute, ThemeConfigValidator, ThemeProviderConfig, HYDRATION_ATTRIBUTE};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A user's theme choice
///
/// The absence of a stored choice is expressed as `Option::<ThemePreference>::None`
/// everywhere in this crate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    /// Follow the operating system; only the client can resolve it
    System,
}

impl ThemePreference {
    /// Every recognized preference
    pub const ALL: [ThemePreference; 3] = [Self::Light, Self::Dark, Self::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Whether this names an actual palette rather than deferring to the OS
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Self::System)
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that is not one of the recognized theme names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized theme: {0:?}")]
pub struct ParseThemeError(pub String);

impl FromStr for ThemePreference {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| ParseThemeError(s.to_string()))
    }
}
