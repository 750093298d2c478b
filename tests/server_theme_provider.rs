// Server rendering of the theme provider against stub cookie readers

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::block_on;
use http::header::COOKIE;
use http::{HeaderMap, HeaderValue, Request};

use orbit_theme::prelude::*;
use orbit_theme::theme::HYDRATION_ATTRIBUTE;

/// Returns a fixed result and counts how often it was asked
struct StubReader {
    result: Result<Option<ThemePreference>, LookupError>,
    calls: AtomicUsize,
}

impl StubReader {
    fn new(result: Result<Option<ThemePreference>, LookupError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CookieThemeReader for StubReader {
    async fn read_theme(
        &self,
        _request: &RequestContext,
    ) -> Result<Option<ThemePreference>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Waits for the test to hand it a value, to observe the suspension point
struct DeferredReader {
    receiver: Mutex<Option<oneshot::Receiver<Option<ThemePreference>>>>,
}

#[async_trait]
impl CookieThemeReader for DeferredReader {
    async fn read_theme(
        &self,
        _request: &RequestContext,
    ) -> Result<Option<ThemePreference>, LookupError> {
        let receiver = self.receiver.lock().unwrap().take();
        match receiver {
            Some(receiver) => receiver.await.map_err(|_| LookupError::NoRequestContext),
            None => Err(LookupError::NoRequestContext),
        }
    }
}

fn request() -> RequestContext {
    RequestContext::from_headers(HeaderMap::new())
}

fn main_child() -> Vec<Node> {
    vec![Node::element("main")]
}

fn scenario_config() -> ThemeProviderConfig {
    ThemeProviderConfig {
        default_theme: Some(ThemePreference::System),
        attribute: Attribute::Class,
        ..Default::default()
    }
}

fn render_with(
    reader: Arc<StubReader>,
    config: ThemeProviderConfig,
    children: Vec<Node>,
) -> Result<Node, orbit_theme::Error> {
    let server = ServerThemeProvider::new(reader);
    block_on(server.render(&request(), config, children))
}

#[test]
fn test_scenario_dark_cookie_with_system_default() {
    let reader = StubReader::new(Ok(Some(ThemePreference::Dark)));
    let node = render_with(reader.clone(), scenario_config(), main_child()).unwrap();

    assert!(node.component_instance().unwrap().is::<ThemeProvider>());
    let props = node.props::<ThemeProviderProps>().unwrap();
    assert_eq!(props.config, scenario_config());
    assert_eq!(props.config.default_theme, Some(ThemePreference::System));
    assert_eq!(props.config.attribute, Attribute::Class);
    assert_eq!(props.theme, Some(ThemePreference::Dark));
    assert_eq!(props.children, main_child());
    assert_eq!(reader.calls(), 1);
}

#[test]
fn test_scenario_absent_cookie_is_not_replaced_by_default() {
    let reader = StubReader::new(Ok(None));
    let node = render_with(reader, scenario_config(), main_child()).unwrap();

    let props = node.props::<ThemeProviderProps>().unwrap();
    assert_eq!(props.theme, None);
    assert_eq!(props.config, scenario_config());
    assert_eq!(props.children, main_child());
}

#[test]
fn test_every_passthrough_field_is_forwarded_unchanged() {
    let mut config = ThemeProviderConfig {
        themes: vec![ThemePreference::Dark, ThemePreference::Light],
        forced_theme: Some(ThemePreference::Dark),
        enable_system: false,
        enable_color_scheme: false,
        disable_transition_on_change: true,
        storage_key: "site-theme".to_string(),
        default_theme: Some(ThemePreference::Light),
        attribute: "data-mode".parse().unwrap(),
        ..Default::default()
    };
    config
        .value
        .insert(ThemePreference::Light, "day".to_string());

    for stored in [None, Some(ThemePreference::Light), Some(ThemePreference::Dark)] {
        let node = render_with(StubReader::new(Ok(stored)), config.clone(), main_child()).unwrap();
        let props = node.props::<ThemeProviderProps>().unwrap();
        assert_eq!(props.config, config);
        assert_eq!(props.theme, stored);
    }
}

#[test]
fn test_children_are_nested_as_given() {
    let children = vec![
        Node::element("header").with_attribute("id", "top"),
        Node::text("between"),
        Node::element("main").with_child(Node::text("body")),
    ];
    let node = render_with(
        StubReader::new(Ok(Some(ThemePreference::Light))),
        ThemeProviderConfig::default(),
        children.clone(),
    )
    .unwrap();

    assert_eq!(node.props::<ThemeProviderProps>().unwrap().children, children);
    assert!(node
        .to_html()
        .unwrap()
        .ends_with(r#"><header id="top"></header>between<main>body</main></div>"#));
}

#[test]
fn test_lookup_failure_propagates_unchanged() {
    let failure = LookupError::MalformedCookie {
        name: "theme".to_string(),
        value: "\"dark".to_string(),
    };
    let reader = StubReader::new(Err(failure.clone()));

    let first = render_with(reader.clone(), scenario_config(), main_child()).unwrap_err();
    let second = render_with(reader.clone(), scenario_config(), main_child()).unwrap_err();

    match (first, second) {
        (orbit_theme::Error::Lookup(a), orbit_theme::Error::Lookup(b)) => {
            assert_eq!(a, failure);
            assert_eq!(a, b);
        }
        other => panic!("expected lookup errors, got {other:?}"),
    }
    // No retries: one lookup per render
    assert_eq!(reader.calls(), 2);
}

#[test]
fn test_detached_request_fails_with_default_reader() {
    let server = ServerThemeProvider::default();
    let err = block_on(server.render(
        &RequestContext::detached(),
        ThemeProviderConfig::default(),
        main_child(),
    ))
    .unwrap_err();
    assert!(matches!(
        err,
        orbit_theme::Error::Lookup(LookupError::NoRequestContext)
    ));
}

#[test]
fn test_render_waits_for_the_lookup() {
    let (sender, receiver) = oneshot::channel();
    let server = ServerThemeProvider::new(DeferredReader {
        receiver: Mutex::new(Some(receiver)),
    });
    let request = request();

    let (rendered, sent) = block_on(futures::future::join(
        server.render(&request, ThemeProviderConfig::default(), main_child()),
        async move { sender.send(Some(ThemePreference::Dark)) },
    ));

    assert!(sent.is_ok());
    let props = rendered.unwrap().props::<ThemeProviderProps>().unwrap();
    assert_eq!(props.theme, Some(ThemePreference::Dark));
}

#[test]
fn test_cookie_store_reader_end_to_end() {
    let request = Request::builder()
        .header(COOKIE, "session=1; theme=dark")
        .body(())
        .unwrap();
    let server = ServerThemeProvider::default();

    let node = block_on(server.render(
        &RequestContext::from_request(&request),
        scenario_config(),
        main_child(),
    ))
    .unwrap();

    let html = node.to_html().unwrap();
    assert!(html.starts_with(r#"<div class="dark" "#));
    assert!(html.contains(HYDRATION_ATTRIBUTE));
    assert!(html.ends_with("<main></main></div>"));
}

#[test]
fn test_resolved_theme_reaches_descendant_context() {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_static("theme=system"));
    let server = ServerThemeProvider::default();

    let node = block_on(server.render(
        &RequestContext::from_headers(headers),
        ThemeProviderConfig::default(),
        main_child(),
    ))
    .unwrap();

    let state = node
        .component_instance()
        .unwrap()
        .with_component(|provider: &ThemeProvider| use_theme(provider.context()))
        .unwrap()
        .unwrap();
    assert_eq!(state.preference, Some(ThemePreference::System));
    assert_eq!(state.resolved, ThemePreference::System);
}
