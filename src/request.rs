//! Per-request state handed explicitly to server-side rendering

use http::header::COOKIE;
use http::{HeaderMap, HeaderValue, Request};

/// The request a render pass belongs to
///
/// A detached context stands for rendering that happens outside any request,
/// such as static generation at build time.
#[derive(Debug, Clone)]
pub struct RequestContext {
    headers: Option<HeaderMap>,
}

impl RequestContext {
    /// Context for a request carrying `headers`
    pub fn from_headers(headers: HeaderMap) -> Self {
        Self {
            headers: Some(headers),
        }
    }

    /// Context for an incoming request; only the headers are kept
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::from_headers(request.headers().clone())
    }

    /// Context for rendering without a request
    pub fn detached() -> Self {
        Self { headers: None }
    }

    pub fn is_detached(&self) -> bool {
        self.headers.is_none()
    }

    pub fn headers(&self) -> Option<&HeaderMap> {
        self.headers.as_ref()
    }

    /// Every `Cookie` header in the order received, or `None` when detached
    pub fn cookie_headers(&self) -> Option<impl Iterator<Item = &HeaderValue>> {
        self.headers
            .as_ref()
            .map(|headers| headers.get_all(COOKIE).iter())
    }
}
