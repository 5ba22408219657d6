use crate::catalog::Catalog;
use crate::config::{SiteConfig, TransportKind};
use crate::detail::DetailPage;
use crate::route::{Location, NavEvent, NavKind, Route, Transport};
use log::{debug, warn};

/// The two page views. At most one is visible at a time.
pub trait View {
    /// Hides the detail view without touching its fields.
    fn show_main(&mut self);
    fn show_detail(&mut self, page: &DetailPage);
    fn set_title(&mut self, title: &str);
}

pub trait AddressBar {
    fn location(&self) -> Location;
    fn push(&mut self, href: &str);
    fn replace(&mut self, href: &str);
    fn back(&mut self);
}

/// Main/Detail state machine.
///
/// Every path from "the address changed" to "a view is rendered" goes
/// through [`Router::sync`], whether the change came from the browser or from
/// an in-app link.
pub struct Router {
    transport: Box<dyn Transport>,
    catalog: Catalog,
    config: SiteConfig,
    current: Route,
}

impl Router {
    pub fn new(config: SiteConfig, catalog: Catalog) -> Self {
        Self::with_transport(config.transport.build(), config, catalog)
    }

    pub fn with_transport(
        transport: Box<dyn Transport>,
        config: SiteConfig,
        catalog: Catalog,
    ) -> Self {
        Self {
            transport,
            catalog,
            config,
            current: Route::Main,
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn transport(&self) -> TransportKind {
        self.transport.kind()
    }

    pub fn handle(
        &mut self,
        event: NavEvent,
        bar: &mut impl AddressBar,
        view: &mut impl View,
    ) -> &Route {
        debug!("navigation event {:?}", event.kind);
        match event.kind {
            NavKind::Load | NavKind::PopState | NavKind::HashChange => self.sync(bar, view),
            NavKind::LinkClick => {
                self.navigate(Route::from_project_id(event.project_id), bar, view)
            }
            NavKind::Back => self.go_back(bar, view),
        }
    }

    /// Pushes the address for `route`, then renders from the address.
    pub fn navigate(
        &mut self,
        route: Route,
        bar: &mut impl AddressBar,
        view: &mut impl View,
    ) -> &Route {
        let href = self.transport.href(&route, &bar.location());
        bar.push(&href);
        self.sync(bar, view)
    }

    pub fn go_back(&mut self, bar: &mut impl AddressBar, view: &mut impl View) -> &Route {
        match self.current {
            Route::Detail(_) => self.navigate(Route::Main, bar, view),
            Route::Main => {
                bar.back();
                &self.current
            }
        }
    }

    /// Renders whatever the address bar currently points at.
    pub fn sync(&mut self, bar: &mut impl AddressBar, view: &mut impl View) -> &Route {
        let location = bar.location();
        match self.transport.parse(&location) {
            Route::Main => self.enter_main(view),
            Route::Detail(id) => match self.catalog.get(&id) {
                Ok(record) => {
                    let page = DetailPage::from_record(record);
                    view.show_detail(&page);
                    view.set_title(&self.config.detail_title(&page.title));
                    self.current = Route::Detail(id);
                }
                Err(err) => {
                    warn!("{err}, returning to main page");
                    let href = self.transport.href(&Route::Main, &location);
                    bar.replace(&href);
                    self.enter_main(view);
                }
            },
        }
        &self.current
    }

    fn enter_main(&mut self, view: &mut impl View) {
        view.show_main();
        view.set_title(&self.config.site_title);
        self.current = Route::Main;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::Link;

    #[derive(Default)]
    struct FakeBar {
        location: Location,
        history: Vec<Location>,
        backs: usize,
    }

    impl FakeBar {
        fn at(hash: &str) -> Self {
            Self {
                location: Location::new("/", "", hash),
                ..Self::default()
            }
        }

        fn set(&mut self, href: &str) {
            let (rest, hash) = match href.split_once('#') {
                Some((rest, hash)) => (rest, format!("#{hash}")),
                None => (href, String::new()),
            };
            let (path, search) = match rest.split_once('?') {
                Some((path, query)) => (path, format!("?{query}")),
                None => (rest, String::new()),
            };
            self.location = Location::new(path, &search, &hash);
        }
    }

    impl AddressBar for FakeBar {
        fn location(&self) -> Location {
            self.location.clone()
        }

        fn push(&mut self, href: &str) {
            self.history.push(self.location.clone());
            self.set(href);
        }

        fn replace(&mut self, href: &str) {
            self.set(href);
        }

        fn back(&mut self) {
            self.backs += 1;
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct FakeView {
        main_visible: bool,
        detail: Option<DetailPage>,
        title: String,
        detail_renders: usize,
    }

    impl View for FakeView {
        fn show_main(&mut self) {
            self.main_visible = true;
        }

        fn show_detail(&mut self, page: &DetailPage) {
            self.main_visible = false;
            self.detail = Some(page.clone());
            self.detail_renders += 1;
        }

        fn set_title(&mut self, title: &str) {
            self.title = title.to_string();
        }
    }

    fn router(transport: TransportKind) -> Router {
        let config = SiteConfig {
            transport,
            ..SiteConfig::default()
        };
        Router::new(config, Catalog::builtin().expect("catalog"))
    }

    #[test]
    fn hash_route_renders_project_two() {
        let mut router = router(TransportKind::Hash);
        let mut bar = FakeBar::at("#project/project-2");
        let mut view = FakeView::default();

        let route = router.handle(NavEvent::of(NavKind::HashChange), &mut bar, &mut view);
        assert_eq!(route, &Route::Detail("project-2".into()));

        let page = view.detail.as_ref().expect("detail shown");
        assert!(!view.main_visible);
        assert_eq!(page.title, "프로젝트 관리 앱");
        assert_eq!(page.tech_tags.len(), 8);
        assert_eq!(page.tech_tags[0], "Vue.js");
        assert_eq!(view.title, "프로젝트 관리 앱 - 포트폴리오");
    }

    #[test]
    fn unknown_id_falls_back_to_main() {
        let mut router = router(TransportKind::Hash);
        let mut bar = FakeBar::at("#project/nope");
        let mut view = FakeView::default();

        router.handle(NavEvent::of(NavKind::Load), &mut bar, &mut view);

        assert_eq!(router.current(), &Route::Main);
        assert!(view.main_visible);
        assert_eq!(view.detail, None);
        assert_eq!(view.detail_renders, 0);
        assert_eq!(bar.location.hash, "");
        assert!(bar.history.is_empty());
    }

    #[test]
    fn unknown_id_after_detail_leaves_fields_alone() {
        let mut router = router(TransportKind::Hash);
        let mut bar = FakeBar::at("#project/project-1");
        let mut view = FakeView::default();
        router.handle(NavEvent::of(NavKind::Load), &mut bar, &mut view);
        let shown = view.detail.clone().expect("project-1 rendered");

        bar.location.hash = "#project/bogus".into();
        router.handle(NavEvent::of(NavKind::HashChange), &mut bar, &mut view);

        assert_eq!(router.current(), &Route::Main);
        assert!(view.main_visible);
        assert_eq!(view.title, "포트폴리오");
        assert_eq!(view.detail_renders, 1);
        assert_eq!(view.detail, Some(shown));
        assert_eq!(bar.location.hash, "");
    }

    #[test]
    fn titles_follow_configured_site_title() {
        let config = SiteConfig {
            site_title: "Folio".into(),
            ..SiteConfig::default()
        };
        let mut router = Router::new(config, Catalog::builtin().expect("catalog"));
        let mut bar = FakeBar::at("#project/project-3");
        let mut view = FakeView::default();

        router.handle(NavEvent::of(NavKind::Load), &mut bar, &mut view);
        assert_eq!(view.title, "브랜드 아이덴티티 디자인 - Folio");
        router.handle(NavEvent::of(NavKind::Back), &mut bar, &mut view);
        assert_eq!(view.title, "Folio");
    }

    #[test]
    fn detail_main_detail_renders_identically() {
        let mut router = router(TransportKind::Hash);
        let ids: Vec<String> = Catalog::builtin()
            .expect("catalog")
            .ids()
            .map(str::to_string)
            .collect();
        assert_eq!(ids.len(), 4);

        for id in ids {
            let mut bar = FakeBar::at("");
            let mut view = FakeView::default();

            router.handle(NavEvent::link(Some(id.clone())), &mut bar, &mut view);
            let first = view.detail.clone().expect("first render");
            router.handle(NavEvent::link(None), &mut bar, &mut view);
            assert!(view.main_visible);
            assert_eq!(view.title, "포트폴리오");
            router.handle(NavEvent::link(Some(id.clone())), &mut bar, &mut view);
            let second = view.detail.clone().expect("second render");

            assert_eq!(first, second, "{id}");
            assert_eq!(first.project_id, id);
            assert_eq!(bar.location.hash, format!("#project/{id}"));
        }
    }

    #[test]
    fn link_click_and_popstate_share_one_path() {
        let mut by_link = FakeView::default();
        let mut link_bar = FakeBar::at("");
        router(TransportKind::Hash).handle(
            NavEvent::link(Some("project-4".into())),
            &mut link_bar,
            &mut by_link,
        );

        let mut by_address = FakeView::default();
        let mut addr_bar = FakeBar::at("#project/project-4");
        router(TransportKind::Hash).handle(
            NavEvent::of(NavKind::PopState),
            &mut addr_bar,
            &mut by_address,
        );

        assert_eq!(by_link, by_address);
        assert_eq!(link_bar.location, addr_bar.location);
    }

    #[test]
    fn query_transport_pushes_search_param() {
        let mut router = router(TransportKind::Query);
        let mut bar = FakeBar::default();
        bar.location = Location::path("/");
        let mut view = FakeView::default();

        router.handle(NavEvent::link(Some("project-3".into())), &mut bar, &mut view);

        assert_eq!(bar.location.search, "?project=project-3");
        let page = view.detail.as_ref().expect("detail");
        assert_eq!(page.github, Link::Hidden);
        assert!(page.demo.is_shown());
    }

    #[test]
    fn back_from_detail_returns_to_main() {
        let mut router = router(TransportKind::Hash);
        let mut bar = FakeBar::at("#project/project-1");
        let mut view = FakeView::default();
        router.handle(NavEvent::of(NavKind::Load), &mut bar, &mut view);

        router.handle(NavEvent::of(NavKind::Back), &mut bar, &mut view);
        assert_eq!(router.current(), &Route::Main);
        assert!(view.main_visible);
        assert_eq!(bar.backs, 0);

        router.handle(NavEvent::of(NavKind::Back), &mut bar, &mut view);
        assert_eq!(bar.backs, 1);
    }

    #[test]
    fn re_entering_same_detail_is_stable() {
        let mut router = router(TransportKind::Hash);
        let mut bar = FakeBar::at("#project/project-2");
        let mut view = FakeView::default();

        router.handle(NavEvent::of(NavKind::HashChange), &mut bar, &mut view);
        let once = view.detail.clone();
        router.handle(NavEvent::of(NavKind::PopState), &mut bar, &mut view);

        assert_eq!(view.detail, once);
        assert_eq!(view.detail.as_ref().map(|p| p.tech_tags.len()), Some(8));
    }
}
