use crate::dom::{query_all, set_display};
use log::{debug, info, warn};
use portfolio_core::contact::{ContactForm, SENT_MESSAGE};
use portfolio_core::filter::ProjectFilter;
use portfolio_core::section::SectionInit;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

pub fn run(init: SectionInit, document: &Document) {
    match init {
        SectionInit::ProjectFilters => bind_project_filters(document),
        SectionInit::ContactForm => bind_contact_form(document),
        SectionInit::Nothing => {}
    }
}

fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        warn!("failed to bind {event}: {err:?}");
    }
    // lives as long as the element
    closure.forget();
}

pub fn bind_project_filters(document: &Document) {
    let cards = query_all(document, ".project-card");
    if cards.is_empty() {
        warn!("no project cards found");
        return;
    }
    for button in query_all(document, ".filter-btn") {
        let document = document.clone();
        let clicked = button.clone();
        listen(&button, "click", move |_| apply_filter(&document, &clicked));
    }
    info!("{} project cards ready", cards.len());
}

fn apply_filter(document: &Document, button: &Element) {
    let filter = ProjectFilter::parse(button.get_attribute("data-filter").as_deref());
    debug!("project filter {filter:?}");

    for other in query_all(document, ".filter-btn") {
        let _ = other.class_list().remove_1("active");
    }
    let _ = button.class_list().add_1("active");

    for card in query_all(document, ".project-card") {
        let shown = filter.shows_card(card.get_attribute("data-type").as_deref());
        set_display(&card, if shown { "block" } else { "none" });
    }
    for grid in query_all(document, ".projects-grid[data-category]") {
        let shown = filter.shows_grid(grid.get_attribute("data-category").as_deref());
        set_display(&grid, if shown { "grid" } else { "none" });
    }
}

pub fn bind_contact_form(document: &Document) {
    let Some(form) = document.query_selector("form").ok().flatten() else {
        warn!("no contact form found");
        return;
    };
    let document = document.clone();
    let bound = form.clone();
    listen(&form, "submit", move |ev| {
        ev.prevent_default();
        let submission = ContactForm::new(
            &field_value(&document, "name"),
            &field_value(&document, "email"),
            &field_value(&document, "message"),
        );
        match submission.validate() {
            Ok(()) => {
                alert(SENT_MESSAGE);
                if let Some(form) = bound.dyn_ref::<HtmlFormElement>() {
                    form.reset();
                }
            }
            Err(err) => alert(&err.to_string()),
        }
    });
}

fn field_value(document: &Document, id: &str) -> String {
    let Some(element) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn scroll_to(document: &Document, id: &str) {
    let Some(target) = document.get_element_by_id(id) else {
        debug!("no element #{id} to scroll to");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}
