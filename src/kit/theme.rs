// Theme support for OrbitKit

use crate::component::{Component, ComponentError, Context, Node};
use crate::theme::{ThemePreference, ThemeProviderConfig, HYDRATION_ATTRIBUTE};
use log::warn;
use serde::Serialize;
use std::any::Any;

/// Theme information published to descendants of a [`ThemeProvider`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    /// Preference the provider was given, before resolution
    pub preference: Option<ThemePreference>,
    /// Theme in effect; `System` until the client resolves it
    pub resolved: ThemePreference,
    /// Whether `resolved` comes from `forced_theme`
    pub forced: bool,
}

/// Read the theme published by the nearest [`ThemeProvider`]
pub fn use_theme(context: &Context) -> Option<ThemeState> {
    context.consume::<ThemeState>()
}

/// Theme provider props
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeProviderProps {
    /// Provider options
    pub config: ThemeProviderConfig,
    /// Stored preference, `None` when the user never chose one
    pub theme: Option<ThemePreference>,
    /// Child content
    pub children: Vec<Node>,
}

/// Applies a theme to its subtree
///
/// The provider renders one `div` around its children carrying the theme
/// attribute, a `color-scheme` style and a JSON hydration payload so the
/// client-side provider starts from the same configuration and preference.
#[derive(Debug)]
pub struct ThemeProvider {
    props: ThemeProviderProps,
    context: Context,
    state: ThemeState,
}

#[derive(Serialize)]
struct HydrationPayload<'a> {
    config: &'a ThemeProviderConfig,
    theme: Option<ThemePreference>,
}

impl ThemeProvider {
    fn resolve(config: &ThemeProviderConfig, preference: Option<ThemePreference>) -> ThemeState {
        if let Some(forced) = config.forced_theme {
            return ThemeState {
                preference,
                resolved: forced,
                forced: true,
            };
        }

        let resolved = match preference {
            Some(theme) if config.accepts(theme) => theme,
            Some(theme) => {
                warn!("stored theme {theme} is not accepted, using the default");
                config.effective_default_theme()
            }
            None => config.effective_default_theme(),
        };

        ThemeState {
            preference,
            resolved,
            forced: false,
        }
    }

    pub fn state(&self) -> ThemeState {
        self.state
    }

    pub fn props(&self) -> &ThemeProviderProps {
        &self.props
    }

    /// Context descendants should be created with to see this provider's theme
    pub fn context(&self) -> &Context {
        &self.context
    }
}

impl Component for ThemeProvider {
    type Props = ThemeProviderProps;

    fn create(props: Self::Props, context: Context) -> Self {
        let state = Self::resolve(&props.config, props.theme);
        Self {
            props,
            context,
            state,
        }
    }

    fn initialize(&mut self) -> Result<(), ComponentError> {
        self.props.config.validate()?;
        self.context.provide(self.state)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn render(&self) -> Result<Vec<Node>, ComponentError> {
        let config = &self.props.config;
        let resolved = self.state.resolved;
        let mut root = Node::element("div");

        // `system` is left for the client, which can query the OS preference
        if resolved.is_concrete() {
            root.add_attribute(config.attribute.name(), config.attribute_value(resolved));
            if config.enable_color_scheme {
                root.add_attribute("style", format!("color-scheme: {resolved}"));
            }
        }

        let payload = serde_json::to_string(&HydrationPayload {
            config,
            theme: self.props.theme,
        })
        .map_err(|e| ComponentError::RenderError(e.to_string()))?;
        root.add_attribute(HYDRATION_ATTRIBUTE, payload);

        Ok(vec![root.with_children(self.props.children.iter().cloned())])
    }
}
