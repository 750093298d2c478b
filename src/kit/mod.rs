// OrbitKit components used during server rendering

pub mod theme;

/// Re-export of common components for convenience
pub mod prelude {
    pub use crate::kit::theme::{use_theme, ThemeProvider, ThemeProviderProps, ThemeState};
}
