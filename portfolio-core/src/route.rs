use crate::config::TransportKind;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Main,
    Detail(String),
}

impl Route {
    pub fn from_project_id(project_id: Option<String>) -> Self {
        match project_id {
            Some(id) if !id.is_empty() => Route::Detail(id),
            _ => Route::Main,
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        match self {
            Route::Main => None,
            Route::Detail(id) => Some(id),
        }
    }
}

/// The parts of the address bar a transport reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl Location {
    pub fn new(pathname: &str, search: &str, hash: &str) -> Self {
        Self {
            pathname: pathname.to_string(),
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    pub fn path(pathname: &str) -> Self {
        Self::new(pathname, "", "")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavKind {
    Load,
    PopState,
    HashChange,
    LinkClick,
    Back,
}

/// A navigation event as seen by the router.
///
/// `project_id` only matters for [`NavKind::LinkClick`]: `Some` targets the
/// detail view, `None` the main page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEvent {
    pub kind: NavKind,
    pub project_id: Option<String>,
}

impl NavEvent {
    pub fn of(kind: NavKind) -> Self {
        Self {
            kind,
            project_id: None,
        }
    }

    pub fn link(project_id: Option<String>) -> Self {
        Self {
            kind: NavKind::LinkClick,
            project_id,
        }
    }
}

/// Maps between address-bar state and [`Route`].
pub trait Transport {
    fn kind(&self) -> TransportKind;
    fn parse(&self, location: &Location) -> Route;
    /// Address for `route`, relative to the current page.
    fn href(&self, route: &Route, location: &Location) -> String;
}

/// `#project/{id}`
#[derive(Clone, Copy, Debug, Default)]
pub struct HashTransport;

impl Transport for HashTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Hash
    }

    fn parse(&self, location: &Location) -> Route {
        parse_hash(&location.hash)
    }

    fn href(&self, route: &Route, location: &Location) -> String {
        let page = format!("{}{}", location.pathname, location.search);
        match route {
            Route::Main => page,
            Route::Detail(id) => format!("{page}#project/{id}"),
        }
    }
}

/// Parses a hash fragment (with or without the leading `#`).
pub fn parse_hash(hash: &str) -> Route {
    let mut parts = hash.trim_start_matches('#').split('/');
    match (parts.next(), parts.next()) {
        (Some("project"), Some(id)) if !id.is_empty() => Route::Detail(id.to_string()),
        _ => Route::Main,
    }
}

/// What a click on an anchor should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkAction {
    Navigate(Route),
    /// The detail view's back control.
    Back,
    /// In-page jump to the element with this id.
    ScrollTo(String),
    /// A bare `#`: swallow the click.
    Inert,
    /// Leave it to the browser.
    Passthrough,
}

/// Classifies an anchor from its `data-project-id`, `data-route` and `href`.
///
/// `data-route` is either `main` or `back`.
pub fn classify_link(
    project_id: Option<&str>,
    route: Option<&str>,
    href: Option<&str>,
) -> LinkAction {
    if let Some(id) = project_id.filter(|id| !id.is_empty()) {
        return LinkAction::Navigate(Route::Detail(id.to_string()));
    }
    match route {
        Some("main") => return LinkAction::Navigate(Route::Main),
        Some("back") => return LinkAction::Back,
        _ => {}
    }
    let Some(fragment) = href.and_then(|h| h.strip_prefix('#')) else {
        return LinkAction::Passthrough;
    };
    match parse_hash(fragment) {
        Route::Detail(id) => LinkAction::Navigate(Route::Detail(id)),
        Route::Main if fragment.is_empty() => LinkAction::Inert,
        Route::Main => LinkAction::ScrollTo(fragment.to_string()),
    }
}

/// `{path}?project={id}`
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryTransport;

const PROJECT_PARAM: &str = "project";

impl Transport for QueryTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Query
    }

    fn parse(&self, location: &Location) -> Route {
        let id = location
            .search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == PROJECT_PARAM)
            .map(|(_, value)| value.to_string());
        Route::from_project_id(id)
    }

    fn href(&self, route: &Route, location: &Location) -> String {
        let path = if location.pathname.is_empty() {
            "/"
        } else {
            location.pathname.as_str()
        };
        match route {
            Route::Main => path.to_string(),
            Route::Detail(id) => format!("{path}?{PROJECT_PARAM}={id}"),
        }
    }
}
