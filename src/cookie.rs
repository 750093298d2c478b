//! Reading the stored theme preference from request cookies

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, trace, warn};

use crate::request::RequestContext;
use crate::theme::ThemePreference;

/// Name of the cookie the theme is stored under unless configured otherwise
pub const DEFAULT_THEME_COOKIE: &str = "theme";

/// Failure to produce a theme preference for a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no request context is available to read cookies from")]
    NoRequestContext,

    #[error("cookie header is not valid: {0}")]
    MalformedHeader(String),

    #[error("cookie {name:?} has a malformed value {value:?}")]
    MalformedCookie { name: String, value: String },

    #[error("cookie {name:?} holds unrecognized theme {value:?}")]
    UnrecognizedTheme { name: String, value: String },
}

/// Source of the theme preference stored for a request
///
/// `Ok(None)` means the user has no stored preference.
#[async_trait]
pub trait CookieThemeReader: Send + Sync {
    async fn read_theme(
        &self,
        request: &RequestContext,
    ) -> Result<Option<ThemePreference>, LookupError>;
}

#[async_trait]
impl<R: CookieThemeReader + ?Sized> CookieThemeReader for Arc<R> {
    async fn read_theme(
        &self,
        request: &RequestContext,
    ) -> Result<Option<ThemePreference>, LookupError> {
        (**self).read_theme(request).await
    }
}

/// Reads the preference from a named cookie in the request's `Cookie` headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieStoreReader {
    cookie_name: String,
}

impl Default for CookieStoreReader {
    fn default() -> Self {
        Self::new(DEFAULT_THEME_COOKIE)
    }
}

impl CookieStoreReader {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Raw value of the first cookie named [`CookieStoreReader::cookie_name`]
    fn find_cookie<'a>(
        &self,
        headers: impl Iterator<Item = &'a http::HeaderValue>,
    ) -> Result<Option<&'a str>, LookupError> {
        for header in headers {
            let header = header
                .to_str()
                .map_err(|e| LookupError::MalformedHeader(e.to_string()))?;

            for pair in header.split(';') {
                let Some((name, value)) = pair.trim().split_once('=') else {
                    trace!("skipping cookie pair without '=': {pair:?}");
                    continue;
                };
                if name.trim() == self.cookie_name {
                    return Ok(Some(value.trim()));
                }
            }
        }
        Ok(None)
    }

    fn unquote<'a>(&self, value: &'a str) -> Result<&'a str, LookupError> {
        let starts = value.starts_with('"');
        let ends = value.len() >= 2 && value.ends_with('"');
        match (starts, ends) {
            (true, true) => Ok(&value[1..value.len() - 1]),
            (false, false) if !value.contains('"') => Ok(value),
            _ => Err(LookupError::MalformedCookie {
                name: self.cookie_name.clone(),
                value: value.to_string(),
            }),
        }
    }
}

#[async_trait]
impl CookieThemeReader for CookieStoreReader {
    async fn read_theme(
        &self,
        request: &RequestContext,
    ) -> Result<Option<ThemePreference>, LookupError> {
        let headers = request
            .cookie_headers()
            .ok_or(LookupError::NoRequestContext)?;

        let Some(raw) = self.find_cookie(headers)? else {
            debug!("no {:?} cookie on request", self.cookie_name);
            return Ok(None);
        };

        let value = self.unquote(raw)?;
        if value.is_empty() {
            debug!("{:?} cookie is empty, treating as unset", self.cookie_name);
            return Ok(None);
        }

        match value.parse::<ThemePreference>() {
            Ok(theme) => {
                debug!("{:?} cookie resolved to {theme}", self.cookie_name);
                Ok(Some(theme))
            }
            Err(_) => {
                warn!(
                    "{:?} cookie holds unrecognized theme {value:?}",
                    self.cookie_name
                );
                Err(LookupError::UnrecognizedTheme {
                    name: self.cookie_name.clone(),
                    value: value.to_string(),
                })
            }
        }
    }
}
