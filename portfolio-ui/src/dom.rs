use log::{error, warn};
use portfolio_core::fragment::Script;
use portfolio_core::{AddressBar, Dom, Location, SiteConfig};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, HtmlElement, HtmlScriptElement, Window,
};

pub const COMPONENT_LOADED: &str = "componentLoaded";
const CONFIG_ELEMENT_ID: &str = "portfolio-config";
const DETAIL_STYLESHEET_ID: &str = "project-detail-css";

/// `detail` of the `componentLoaded` event dispatched on the document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentLoadedDetail {
    pub component_name: String,
}

#[derive(Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Dom for WebDom {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn component_slots(&self) -> Vec<(String, Element)> {
        query_all(&self.document, "[data-component]")
            .into_iter()
            .filter_map(|el| {
                let name = el.get_attribute("data-component")?;
                (!name.is_empty()).then_some((name, el))
            })
            .collect()
    }

    fn set_inner_html(&self, target: &Element, html: &str) {
        target.set_inner_html(html);
    }

    fn append_script(&self, script: &Script) {
        let Some(body) = self.document.body() else {
            warn!("no <body> to run component script in");
            return;
        };
        let Ok(element) = self.document.create_element("script") else {
            return;
        };
        let Ok(element) = element.dyn_into::<HtmlScriptElement>() else {
            return;
        };
        match script {
            Script::External(src) => element.set_src(src),
            Script::Inline(text) => element.set_text_content(Some(text.as_str())),
        }
        if let Err(err) = body.append_child(&element) {
            error!("failed to append component script: {err:?}");
        }
    }

    fn component_loaded(&self, name: &str) {
        let detail = match serde_wasm_bindgen::to_value(&ComponentLoadedDetail {
            component_name: name.to_string(),
        }) {
            Ok(detail) => detail,
            Err(err) => {
                error!("componentLoaded detail for {name}: {err}");
                return;
            }
        };
        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_detail(&detail);
        match CustomEvent::new_with_event_init_dict(COMPONENT_LOADED, &init) {
            Ok(event) => {
                let _ = self.document.dispatch_event(&event);
            }
            Err(err) => error!("failed to create {COMPONENT_LOADED} event: {err:?}"),
        }
    }
}

#[derive(Clone)]
pub struct WebAddressBar {
    window: Window,
}

impl WebAddressBar {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl AddressBar for WebAddressBar {
    fn location(&self) -> Location {
        let location = self.window.location();
        Location {
            pathname: location.pathname().unwrap_or_default(),
            search: location.search().unwrap_or_default(),
            hash: location.hash().unwrap_or_default(),
        }
    }

    fn push(&mut self, href: &str) {
        let result = self
            .window
            .history()
            .and_then(|h| h.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(href)));
        if let Err(err) = result {
            warn!("pushState to {href} failed: {err:?}");
        }
    }

    fn replace(&mut self, href: &str) {
        let result = self
            .window
            .history()
            .and_then(|h| h.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(href)));
        if let Err(err) = result {
            warn!("replaceState to {href} failed: {err:?}");
        }
    }

    fn back(&mut self) {
        if let Err(err) = self.window.history().and_then(|h| h.back()) {
            warn!("history.back failed: {err:?}");
        }
    }
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_display(element: &Element, value: &str) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property("display", value);
    }
}

/// Reads `<script type="application/json" id="portfolio-config">`, if any.
pub fn read_config(document: &Document) -> SiteConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    SiteConfig::from_json(&text).unwrap_or_else(|err| {
        error!("{err}; using defaults");
        SiteConfig::default()
    })
}

/// Appends the detail stylesheet to `<head>` unless it is already there.
pub fn ensure_stylesheet(document: &Document, href: &str) {
    if document.get_element_by_id(DETAIL_STYLESHEET_ID).is_some() {
        return;
    }
    let (Some(head), Ok(link)) = (document.head(), document.create_element("link")) else {
        return;
    };
    link.set_id(DETAIL_STYLESHEET_ID);
    let _ = link.set_attribute("rel", "stylesheet");
    let _ = link.set_attribute("href", href);
    if let Err(err) = head.append_child(&link) {
        warn!("failed to add stylesheet {href}: {err:?}");
    }
}

/// The element with `id`, created at the end of `<body>` if missing.
pub fn mount_point(document: &Document, id: &str) -> Option<HtmlElement> {
    if let Some(existing) = document.get_element_by_id(id) {
        return existing.dyn_into::<HtmlElement>().ok();
    }
    let element = document.create_element("div").ok()?;
    element.set_id(id);
    element.set_class_name("project-detail-container");
    document.body()?.append_child(&element).ok()?;
    element.dyn_into::<HtmlElement>().ok()
}
