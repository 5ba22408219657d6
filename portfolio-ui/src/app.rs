use crate::bridge::HttpFetch;
use crate::dom::{self, ComponentLoadedDetail, WebAddressBar, WebDom, COMPONENT_LOADED};
use crate::sections;
use leptos::*;
use log::{debug, error, info, warn};
use portfolio_core::detail::{DetailField, DetailPage, ProjectPages};
use portfolio_core::section::Section;
use portfolio_core::{
    classify_link, Catalog, ComponentLoader, Dom, LinkAction, NavEvent, NavKind, Route, Router,
    SiteConfig, View,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CustomEvent, Document, Element, HtmlElement, MouseEvent, Window};

/// Owns everything that lives for the page session.
struct Portfolio {
    window: Window,
    document: Document,
    config: SiteConfig,
    loader: ComponentLoader<HttpFetch, WebDom>,
    router: RefCell<Router>,
    pages: Rc<ProjectPages<HttpFetch>>,
    page: RwSignal<Option<DetailPage>>,
    detail_visible: RwSignal<bool>,
    write_up: RwSignal<String>,
}

impl Portfolio {
    fn new(
        window: Window,
        document: Document,
        config: SiteConfig,
        catalog: Catalog,
        page: RwSignal<Option<DetailPage>>,
        detail_visible: RwSignal<bool>,
        write_up: RwSignal<String>,
    ) -> Self {
        let pathname = window.location().pathname().unwrap_or_default();
        let loader = ComponentLoader::new(
            HttpFetch,
            WebDom::new(document.clone()),
            config.clone(),
            &pathname,
        );
        let router = Router::new(config.clone(), catalog);
        info!(
            "router using {:?} addresses, component base path '{}'",
            router.transport(),
            loader.base_path()
        );
        Self {
            pages: Rc::new(ProjectPages::new(HttpFetch, config.clone())),
            router: RefCell::new(router),
            window,
            document,
            config,
            loader,
            page,
            detail_visible,
            write_up,
        }
    }

    fn listen(self: &Rc<Self>) {
        let app = self.clone();
        let _ = window_event_listener(ev::popstate, move |_| {
            app.dispatch(NavEvent::of(NavKind::PopState))
        });
        let app = self.clone();
        let _ = window_event_listener(ev::hashchange, move |_| {
            app.dispatch(NavEvent::of(NavKind::HashChange))
        });
        let app = self.clone();
        let _ = window_event_listener(ev::click, move |ev| app.on_click(&ev));
        let app = self.clone();
        let _ = window_event_listener(
            ev::Custom::<CustomEvent>::new(COMPONENT_LOADED),
            move |ev| app.on_component_loaded(&ev),
        );
    }

    fn view(&self) -> PageView {
        let main = self
            .loader
            .dom()
            .query(&self.config.main_selector)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        PageView {
            document: self.document.clone(),
            main,
            stylesheet: self.config.detail_stylesheet.clone(),
            pages: self.pages.clone(),
            page: self.page,
            detail_visible: self.detail_visible,
            write_up: self.write_up,
        }
    }

    fn dispatch(&self, event: NavEvent) {
        let mut bar = WebAddressBar::new(self.window.clone());
        let mut view = self.view();
        let mut router = self.router.borrow_mut();
        let route = router.handle(event, &mut bar, &mut view);
        debug!("route is {route:?}");
    }

    fn on_click(self: &Rc<Self>, ev: &MouseEvent) {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if let Some(button) = target.closest("[data-reload-component]").ok().flatten() {
            ev.prevent_default();
            self.reload_from(&button);
            return;
        }
        let Some(anchor) = target.closest("a").ok().flatten() else {
            return;
        };
        let action = classify_link(
            anchor.get_attribute("data-project-id").as_deref(),
            anchor.get_attribute("data-route").as_deref(),
            anchor.get_attribute("href").as_deref(),
        );
        match action {
            LinkAction::Navigate(route) => {
                ev.prevent_default();
                self.dispatch(NavEvent::link(route.project_id().map(str::to_string)));
            }
            LinkAction::Back => {
                ev.prevent_default();
                self.dispatch(NavEvent::of(NavKind::Back));
            }
            LinkAction::ScrollTo(id) => {
                ev.prevent_default();
                let on_detail = matches!(self.router.borrow().current(), Route::Detail(_));
                if on_detail {
                    self.dispatch(NavEvent::link(None));
                }
                sections::scroll_to(&self.document, &id);
            }
            LinkAction::Inert => ev.prevent_default(),
            LinkAction::Passthrough => {}
        }
    }

    fn reload_from(self: &Rc<Self>, button: &Element) {
        let Some(name) = button.get_attribute("data-reload-component") else {
            return;
        };
        let Some(slot) = button.closest("[data-component]").ok().flatten() else {
            warn!("no component slot around reload control for {name}");
            return;
        };
        let app = self.clone();
        spawn_local(async move {
            let status = app.loader.reload(&name, &slot).await;
            debug!("reload {name}: {status:?}");
        });
    }

    fn on_component_loaded(&self, ev: &CustomEvent) {
        let detail: ComponentLoadedDetail = match serde_wasm_bindgen::from_value(ev.detail()) {
            Ok(detail) => detail,
            Err(err) => {
                warn!("malformed {COMPONENT_LOADED} event: {err}");
                return;
            }
        };
        debug!("component ready: {}", detail.component_name);
        if let Some(section) = Section::from_component(&detail.component_name) {
            sections::run(section.init(), &self.document);
        }
    }
}

struct PageView {
    document: Document,
    main: Option<HtmlElement>,
    stylesheet: Option<String>,
    pages: Rc<ProjectPages<HttpFetch>>,
    page: RwSignal<Option<DetailPage>>,
    detail_visible: RwSignal<bool>,
    write_up: RwSignal<String>,
}

impl PageView {
    fn set_main_display(&self, value: &str) {
        if let Some(main) = &self.main {
            let _ = main.style().set_property("display", value);
        }
    }
}

impl View for PageView {
    fn show_main(&mut self) {
        self.detail_visible.set(false);
        self.set_main_display("block");
    }

    fn show_detail(&mut self, page: &DetailPage) {
        self.set_main_display("none");
        if let Some(href) = &self.stylesheet {
            dom::ensure_stylesheet(&self.document, href);
        }

        let same_project = self.page.with_untracked(|shown| {
            shown.as_ref().is_some_and(|p| p.project_id == page.project_id)
        });
        self.page.set(Some(page.clone()));
        self.detail_visible.set(true);
        if let Some(window) = self.document.default_view() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
        if same_project {
            return;
        }

        self.write_up.set(String::new());
        let id = page.project_id.clone();
        let pages = self.pages.clone();
        let shown = self.page;
        let write_up = self.write_up;
        spawn_local(async move {
            let html = pages.write_up(&id).await;
            let current = shown.with_untracked(|p| p.as_ref().is_some_and(|p| p.project_id == id));
            if current {
                write_up.set(html);
            } else {
                debug!("discarding write-up for {id}, route moved on");
            }
        });
    }

    fn set_title(&mut self, title: &str) {
        self.document.set_title(title);
    }
}

fn indexed(items: &[String]) -> Vec<(usize, String)> {
    items.iter().cloned().enumerate().collect()
}

#[component]
fn DetailPanel(
    page: RwSignal<Option<DetailPage>>,
    visible: RwSignal<bool>,
    write_up: RwSignal<String>,
) -> impl IntoView {
    let text = move |field: DetailField| {
        move || {
            page.with(|p| {
                p.as_ref()
                    .and_then(|p| p.text(field))
                    .unwrap_or_default()
                    .to_string()
            })
        }
    };
    let tags = move || {
        page.with(|p| p.as_ref().map(|p| indexed(&p.tech_tags)).unwrap_or_default())
    };
    let features = move || {
        page.with(|p| p.as_ref().map(|p| indexed(&p.features)).unwrap_or_default())
    };

    let github_href = move || {
        page.with(|p| p.as_ref().and_then(|p| p.github.href().map(str::to_string)))
    };
    let demo_href =
        move || page.with(|p| p.as_ref().and_then(|p| p.demo.href().map(str::to_string)));
    let display_if = |shown: bool, value: &'static str| if shown { value } else { "none" };

    view! {
      <div
        class="project-detail"
        style:display=move || display_if(visible.get(), "block")
      >
        <header class="project-detail-header">
          <a href="#" class="back-button" data-route="back">
            <i class="fas fa-arrow-left"></i>" 뒤로가기"
          </a>
          <h1 id={DetailField::Title.element_id()}>{text(DetailField::Title)}</h1>
        </header>

        <div class="project-meta">
          <span id={DetailField::Date.element_id()}>{text(DetailField::Date)}</span>
          <span id={DetailField::Role.element_id()}>{text(DetailField::Role)}</span>
          <span id={DetailField::Duration.element_id()}>{text(DetailField::Duration)}</span>
        </div>

        <section class="project-section">
          <h3>"프로젝트 개요"</h3>
          <p id={DetailField::Description.element_id()}>{text(DetailField::Description)}</p>
        </section>

        <section class="project-section">
          <h3>"기술 스택"</h3>
          <div id={DetailField::TechTags.element_id()} class="tech-tags">
            <For
              each=tags
              key=|(i, tag)| (*i, tag.clone())
              children=|(_, tag)| view! { <span class="tech-tag">{tag}</span> }
            />
          </div>
        </section>

        <section class="project-section">
          <h3>"주요 기능"</h3>
          <ul id={DetailField::FeatureList.element_id()}>
            <For
              each=features
              key=|(i, feature)| (*i, feature.clone())
              children=|(_, feature)| view! { <li>{feature}</li> }
            />
          </ul>
        </section>

        <section class="project-section">
          <h3>"도전 과제"</h3>
          <p id={DetailField::Challenges.element_id()}>{text(DetailField::Challenges)}</p>
        </section>

        <section class="project-section">
          <h3>"배운 점"</h3>
          <p id={DetailField::Lessons.element_id()}>{text(DetailField::Lessons)}</p>
        </section>

        <div class="project-links">
          <a
            id={DetailField::GithubLink.element_id()}
            class="project-link"
            target="_blank"
            rel="noopener"
            href=github_href
            style:display=move || display_if(github_href().is_some(), "inline-flex")
          >
            <i class="fab fa-github"></i>" GitHub"
          </a>
          <a
            id={DetailField::DemoLink.element_id()}
            class="project-link"
            target="_blank"
            rel="noopener"
            href=demo_href
            style:display=move || display_if(demo_href().is_some(), "inline-flex")
          >
            <i class="fas fa-external-link-alt"></i>" Live Demo"
          </a>
        </div>

        <section class="project-write-up" inner_html=move || write_up.get()></section>
      </div>
    }
}

/// Mounts the detail view, wires navigation and loads the page components.
pub fn start() {
    let Some(window) = web_sys::window() else {
        error!("no window; not running in a browser");
        return;
    };
    let Some(document) = window.document() else {
        error!("window has no document");
        return;
    };

    let config = dom::read_config(&document);
    let catalog = Catalog::builtin().unwrap_or_else(|err| {
        error!("{err}; project pages disabled");
        Catalog::default()
    });
    let Some(container) = dom::mount_point(&document, &config.detail_container_id) else {
        error!("cannot create #{}", config.detail_container_id);
        return;
    };

    mount_to(container, move || {
        let page = create_rw_signal(None::<DetailPage>);
        let detail_visible = create_rw_signal(false);
        let write_up = create_rw_signal(String::new());
        let app = Rc::new(Portfolio::new(
            window,
            document,
            config,
            catalog,
            page,
            detail_visible,
            write_up,
        ));
        app.listen();

        let boot = app.clone();
        spawn_local(async move {
            boot.dispatch(NavEvent::of(NavKind::Load));
            let statuses = boot.loader.auto_load().await;
            info!("{} page components processed", statuses.len());
        });

        view! { <DetailPanel page=page visible=detail_visible write_up=write_up /> }
    });
}
