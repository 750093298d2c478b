// Server-side theme resolution for the Orbit component model
pub mod component;
pub mod cookie;
pub mod request;
pub mod server;
pub mod theme;

pub mod kit; // OrbitKit components

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export of common types for convenience
pub mod prelude {
    pub use crate::component::{
        props::{PropValidationError, PropValidator},
        Component, ComponentError, ComponentInstance, Context, Node, Props,
    };
    pub use crate::cookie::{CookieStoreReader, CookieThemeReader, LookupError};
    pub use crate::kit::theme::{use_theme, ThemeProvider, ThemeProviderProps, ThemeState};
    pub use crate::request::RequestContext;
    pub use crate::server::ServerThemeProvider;
    pub use crate::theme::{Attribute, ThemePreference, ThemeProviderConfig};
    pub use crate::Error;
}

/// Errors that can occur while rendering a themed tree
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Theme lookup failed: {0}")]
    Lookup(#[from] cookie::LookupError),

    #[error("Component error: {0}")]
    Component(#[from] component::ComponentError),

    #[error("Configuration error: {0}")]
    Config(String),
}
