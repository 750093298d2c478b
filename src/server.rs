//! Server-side entry point for themed rendering
//!
//! [`ServerThemeProvider`] looks up the stored theme preference for the
//! current request before anything is sent to the browser and hands it to
//! the [`ThemeProvider`], so the first paint already uses the user's theme.
//!
//! The lookup is the only suspension point. A failed lookup is returned to
//! the caller unchanged; no fallback theme is substituted here and nothing is
//! cached or retried.

use log::debug;

use crate::component::{ComponentInstance, Context, Node};
use crate::cookie::{CookieStoreReader, CookieThemeReader};
use crate::kit::theme::{ThemeProvider, ThemeProviderProps};
use crate::request::RequestContext;
use crate::theme::ThemeProviderConfig;
use crate::Error;

/// Resolves the theme cookie and wraps children in a [`ThemeProvider`]
#[derive(Debug, Clone)]
pub struct ServerThemeProvider<R = CookieStoreReader> {
    reader: R,
}

impl Default for ServerThemeProvider<CookieStoreReader> {
    fn default() -> Self {
        Self::new(CookieStoreReader::default())
    }
}

impl<R: CookieThemeReader> ServerThemeProvider<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Render `children` inside a [`ThemeProvider`] carrying the request's theme
    ///
    /// `config` is forwarded to the provider exactly as received. The returned
    /// node is the provider's component node; its props are available through
    /// [`Node::props`].
    pub async fn render(
        &self,
        request: &RequestContext,
        config: ThemeProviderConfig,
        children: Vec<Node>,
    ) -> Result<Node, Error> {
        let theme = self.reader.read_theme(request).await?;
        debug!(
            "rendering theme provider with stored theme {}",
            theme.map_or("<none>", |t| t.as_str())
        );

        let props = ThemeProviderProps {
            config,
            theme,
            children,
        };
        let provider = ComponentInstance::create::<ThemeProvider>(props, Context::new())?;
        Ok(Node::component(provider))
    }
}
