//! Options recognized by the ThemeProvider

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::component::props::{CompositeValidator, PropValidationError, PropValidator};
use crate::theme::ThemePreference;
use crate::Error;

/// Attribute carrying the JSON hydration payload on the ThemeProvider's root element
pub const HYDRATION_ATTRIBUTE: &str = "data-theme-config";

/// The HTML attribute the ThemeProvider writes the active theme into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Attribute {
    /// `class="dark"`
    Class,
    /// A `data-*` attribute, stored with its full name
    Data(String),
}

impl Attribute {
    pub fn name(&self) -> &str {
        match self {
            Self::Class => "class",
            Self::Data(name) => name,
        }
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::Data("data-theme".to_string())
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn data_attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^data-[a-z0-9]+(-[a-z0-9]+)*$").expect("data attribute pattern is valid")
    })
}

impl FromStr for Attribute {
    type Err = PropValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "class" {
            Ok(Self::Class)
        } else if s == HYDRATION_ATTRIBUTE {
            Err(PropValidationError::invalid(
                "attribute",
                format!("{s:?} is reserved for the hydration payload"),
            ))
        } else if data_attribute_pattern().is_match(s) {
            Ok(Self::Data(s.to_string()))
        } else {
            Err(PropValidationError::invalid(
                "attribute",
                format!("expected \"class\" or a data-* name, got {s:?}"),
            ))
        }
    }
}

impl TryFrom<String> for Attribute {
    type Error = PropValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Attribute> for String {
    fn from(attribute: Attribute) -> Self {
        attribute.name().to_string()
    }
}

/// Configuration forwarded untouched to the ThemeProvider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeProviderConfig {
    /// Concrete themes the provider accepts
    pub themes: Vec<ThemePreference>,
    /// Theme applied regardless of the stored preference
    pub forced_theme: Option<ThemePreference>,
    /// Whether `system` is an accepted preference
    pub enable_system: bool,
    /// Emit a `color-scheme` style for concrete themes
    pub enable_color_scheme: bool,
    /// Suppress CSS transitions while the client switches themes
    pub disable_transition_on_change: bool,
    /// Key the client uses to persist the preference
    pub storage_key: String,
    /// Theme used when nothing is stored; see [`ThemeProviderConfig::effective_default_theme`]
    pub default_theme: Option<ThemePreference>,
    /// Attribute the active theme is written into
    pub attribute: Attribute,
    /// Attribute value per theme, when it differs from the theme name
    pub value: BTreeMap<ThemePreference, String>,
}

impl Default for ThemeProviderConfig {
    fn default() -> Self {
        Self {
            themes: vec![ThemePreference::Light, ThemePreference::Dark],
            forced_theme: None,
            enable_system: true,
            enable_color_scheme: true,
            disable_transition_on_change: false,
            storage_key: "theme".to_string(),
            default_theme: None,
            attribute: Attribute::default(),
            value: BTreeMap::new(),
        }
    }
}

impl ThemeProviderConfig {
    /// Load a configuration from its JSON form (camelCase keys, all optional)
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// `default_theme`, or `system`/`light` depending on `enable_system`
    pub fn effective_default_theme(&self) -> ThemePreference {
        self.default_theme.unwrap_or(if self.enable_system {
            ThemePreference::System
        } else {
            ThemePreference::Light
        })
    }

    /// Whether `theme` may become the active theme under this configuration
    pub fn accepts(&self, theme: ThemePreference) -> bool {
        match theme {
            ThemePreference::System => self.enable_system,
            concrete => self.themes.contains(&concrete),
        }
    }

    /// Value written into [`ThemeProviderConfig::attribute`] for `theme`
    pub fn attribute_value(&self, theme: ThemePreference) -> &str {
        self.value
            .get(&theme)
            .map(String::as_str)
            .unwrap_or_else(|| theme.as_str())
    }

    pub fn validate(&self) -> Result<(), PropValidationError> {
        ThemeConfigValidator::new().validate(self)
    }
}

struct ThemesValidator;

impl PropValidator<ThemeProviderConfig> for ThemesValidator {
    fn validate(&self, config: &ThemeProviderConfig) -> Result<(), PropValidationError> {
        if config.themes.is_empty() {
            return Err(PropValidationError::MissingRequired("themes".to_string()));
        }
        if !config.themes.iter().all(ThemePreference::is_concrete) {
            return Err(PropValidationError::invalid(
                "themes",
                "\"system\" is enabled with enableSystem, not listed as a theme",
            ));
        }
        Ok(())
    }
}

/// Checks that an optional theme field names an accepted theme
struct AcceptedThemeValidator {
    name: &'static str,
    field: fn(&ThemeProviderConfig) -> Option<ThemePreference>,
}

impl PropValidator<ThemeProviderConfig> for AcceptedThemeValidator {
    fn validate(&self, config: &ThemeProviderConfig) -> Result<(), PropValidationError> {
        match (self.field)(config) {
            Some(theme) if !config.accepts(theme) => Err(PropValidationError::invalid(
                self.name,
                format!("{theme} is not one of the accepted themes"),
            )),
            _ => Ok(()),
        }
    }
}

/// Validation applied by the ThemeProvider before it renders
pub struct ThemeConfigValidator {
    inner: CompositeValidator<ThemeProviderConfig>,
}

impl ThemeConfigValidator {
    pub fn new() -> Self {
        Self {
            inner: CompositeValidator::new()
                .with(ThemesValidator)
                .with(AcceptedThemeValidator {
                    name: "forcedTheme",
                    field: |config| config.forced_theme,
                })
                .with(AcceptedThemeValidator {
                    name: "defaultTheme",
                    field: |config| config.default_theme,
                }),
        }
    }
}

impl Default for ThemeConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PropValidator<ThemeProviderConfig> for ThemeConfigValidator {
    fn validate(&self, config: &ThemeProviderConfig) -> Result<(), PropValidationError> {
        self.inner.validate(config)
    }
}
