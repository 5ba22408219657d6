use crate::config::SiteConfig;
use crate::error::{FetchError, LoadError};
use crate::fragment::{escape_html, Fragment, Script};
use futures::future::join_all;
use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::future::Future;

/// HTTP GET returning the response body as text.
pub trait Fetch {
    fn get_text(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// The document the loader renders into.
pub trait Dom {
    type Element: Clone;

    fn query(&self, selector: &str) -> Option<Self::Element>;
    /// Elements carrying a `data-component` attribute, with its value.
    fn component_slots(&self) -> Vec<(String, Self::Element)>;
    fn set_inner_html(&self, target: &Self::Element, html: &str);
    /// Re-create `script` at the end of the body so it runs in document context.
    fn append_script(&self, script: &Script);
    fn component_loaded(&self, _name: &str) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentSlot {
    pub name: String,
    pub target: String,
}

impl ComponentSlot {
    pub fn new(name: &str, target: &str) -> Self {
        Self {
            name: name.to_string(),
            target: target.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    AlreadyLoaded,
    FromCache,
    Fetched,
    /// The error placeholder was rendered instead.
    Failed(LoadError),
    MissingTarget,
}

/// Fetches `{base}/components/{name}.html` fragments, caches them by name and
/// renders them into target elements.
pub struct ComponentLoader<F, D> {
    fetch: F,
    dom: D,
    config: SiteConfig,
    base_path: String,
    cache: RefCell<HashMap<String, String>>,
    loaded: RefCell<BTreeSet<String>>,
}

impl<F: Fetch, D: Dom> ComponentLoader<F, D> {
    pub fn new(fetch: F, dom: D, config: SiteConfig, pathname: &str) -> Self {
        let base_path = config.base_path(pathname);
        Self {
            fetch,
            dom,
            config,
            base_path,
            cache: RefCell::new(HashMap::new()),
            loaded: RefCell::new(BTreeSet::new()),
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub async fn load(&self, name: &str, target: &D::Element) -> LoadStatus {
        if self.has_component(name) {
            debug!("component {name} already loaded");
            return LoadStatus::AlreadyLoaded;
        }

        let cached = self.cache.borrow().get(name).cloned();
        if let Some(html) = cached {
            self.render(&html, target);
            self.mark_loaded(name);
            return LoadStatus::FromCache;
        }

        let url = self.config.component_url(&self.base_path, name);
        match self.fetch.get_text(&url).await {
            Ok(html) => {
                self.cache.borrow_mut().insert(name.to_string(), html.clone());
                self.render(&html, target);
                self.mark_loaded(name);
                info!("component {name} loaded from {url}");
                LoadStatus::Fetched
            }
            Err(source) => {
                let err = LoadError {
                    name: name.to_string(),
                    source,
                };
                error!("{err}");
                self.dom.set_inner_html(target, &error_placeholder(name));
                LoadStatus::Failed(err)
            }
        }
    }

    /// Loads every slot concurrently; a slot whose target is missing is skipped.
    pub async fn load_many(&self, slots: &[ComponentSlot]) -> Vec<LoadStatus> {
        join_all(slots.iter().map(|slot| async move {
            match self.dom.query(&slot.target) {
                Some(target) => self.load(&slot.name, &target).await,
                None => {
                    warn!("target element not found: {}", slot.target);
                    LoadStatus::MissingTarget
                }
            }
        }))
        .await
    }

    /// Loads every `data-component` element in the document.
    pub async fn auto_load(&self) -> Vec<LoadStatus> {
        let slots = self.dom.component_slots();
        join_all(slots.iter().map(|(name, target)| self.load(name, target))).await
    }

    pub async fn reload(&self, name: &str, target: &D::Element) -> LoadStatus {
        self.cache.borrow_mut().remove(name);
        self.loaded.borrow_mut().remove(name);
        self.load(name, target).await
    }

    pub fn loaded_components(&self) -> Vec<String> {
        self.loaded.borrow().iter().cloned().collect()
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.loaded.borrow().contains(name)
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.borrow().contains_key(name)
    }

    fn mark_loaded(&self, name: &str) {
        self.loaded.borrow_mut().insert(name.to_string());
        self.dom.component_loaded(name);
    }

    // Markup goes in first so scripts find their DOM.
    fn render(&self, html: &str, target: &D::Element) {
        let fragment = Fragment::parse(html);
        self.dom.set_inner_html(target, &fragment.markup);
        for script in &fragment.scripts {
            self.dom.append_script(script);
        }
    }
}

pub fn error_placeholder(name: &str) -> String {
    let name = escape_html(name);
    format!(
        r#"<div class="error">컴포넌트 로드 실패: {name} <button type="button" data-reload-component="{name}">다시 시도</button></div>"#
    )
}
