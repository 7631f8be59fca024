//! Navigation bar: active-link marking and the `scrolled` class.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use super::page::{listen, toggle_class};
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::highlight::{Observation, SectionTracker, fragment_id, is_scrolled, root_margin, unique_links};

/// Nav links and the tracker that decides which one is active.
struct NavLinks {
    tracker: SectionTracker,
    links: Vec<(String, Element)>,
}

impl NavLinks {
    fn render(&self) -> Result<(), ViewerError> {
        for (id, link) in &self.links {
            let active = self.tracker.is_active(id);
            toggle_class(link, "active", active)?;
            if active {
                link.set_attribute("aria-current", "true")?;
            } else {
                link.remove_attribute("aria-current")?;
            }
        }
        Ok(())
    }
}

fn render_logged(links: &RefCell<NavLinks>) {
    if let Err(err) = links.borrow().render() {
        log::warn!("nav: failed to mark active link: {err}");
    }
}

pub(super) fn install(window: &Window, document: &Document, config: &ViewerConfig) -> Result<(), ViewerError> {
    let nav = document.query_selector(&config.nav_selector)?;
    match &nav {
        Some(nav) => install_scrolled(window, nav, config.scrolled_offset_px)?,
        None => log::debug!("nav: no `{}` element; skipping scrolled state", config.nav_selector),
    }

    let links = collect_links(document, &config.nav_link_selector)?;
    if links.is_empty() {
        return Err(ViewerError::MissingElement("nav links"));
    }
    let ids = links.iter().map(|(id, _)| id.clone()).collect();
    let tracker = SectionTracker::new(ids, |id| document.get_element_by_id(id).is_some());
    let state = Rc::new(RefCell::new(NavLinks { tracker, links }));

    let nav_height = nav
        .as_ref()
        .and_then(|n| n.dyn_ref::<HtmlElement>())
        .map_or(0.0, |n| f64::from(n.offset_height()));
    observe_sections(document, config, nav_height, &state)?;

    let hash_state = Rc::clone(&state);
    let hash_window = window.clone();
    listen(window, "hashchange", move |_| {
        let hash = hash_window.location().hash().unwrap_or_default();
        let changed = hash_state.borrow_mut().tracker.on_hash(&hash).is_some();
        if changed {
            render_logged(&hash_state);
        }
    })?;

    let link_elements: Vec<(String, Element)> = state.borrow().links.clone();
    for (id, link) in link_elements {
        let click_state = Rc::clone(&state);
        listen(&link, "click", move |_| {
            let changed = click_state.borrow_mut().tracker.activate(&id).is_some();
            if changed {
                render_logged(&click_state);
            }
        })?;
    }
    Ok(())
}

fn collect_links(document: &Document, selector: &str) -> Result<Vec<(String, Element)>, ViewerError> {
    let list = document.query_selector_all(selector)?;
    let mut links = Vec::new();
    for i in 0..list.length() {
        let Some(link) = list.get(i).and_then(|node| node.dyn_ref::<Element>().cloned()) else {
            continue;
        };
        let href = link.get_attribute("href").unwrap_or_default();
        if let Some(id) = fragment_id(&href) {
            links.push((id.to_owned(), link));
        }
    }
    Ok(unique_links(links))
}

fn install_scrolled(window: &Window, nav: &Element, offset_px: f64) -> Result<(), ViewerError> {
    sync_scrolled(window, nav, offset_px)?;
    for event in ["scroll", "resize"] {
        let win = window.clone();
        let nav = nav.clone();
        listen(window, event, move |_| {
            if let Err(err) = sync_scrolled(&win, &nav, offset_px) {
                log::warn!("nav: failed to update scrolled state: {err}");
            }
        })?;
    }
    Ok(())
}

fn sync_scrolled(window: &Window, nav: &Element, offset_px: f64) -> Result<(), ViewerError> {
    let scroll_y = window.scroll_y()?;
    toggle_class(nav, "scrolled", is_scrolled(scroll_y, offset_px))
}

fn observe_sections(
    document: &Document,
    config: &ViewerConfig,
    nav_height: f64,
    state: &Rc<RefCell<NavLinks>>,
) -> Result<(), ViewerError> {
    let sections: Vec<Element> = state
        .borrow()
        .tracker
        .section_ids()
        .filter_map(|id| document.get_element_by_id(id))
        .collect();
    if sections.is_empty() {
        log::debug!("nav: no linked sections in page; skipping observer");
        return Ok(());
    }

    let observer_state = Rc::clone(state);
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        let mut batch = Vec::new();
        for value in entries.iter() {
            if let Some(entry) = value.dyn_ref::<IntersectionObserverEntry>() {
                batch.push(Observation::new(
                    entry.target().id(),
                    entry.intersection_ratio(),
                    entry.is_intersecting(),
                ));
            }
        }
        let changed = observer_state.borrow_mut().tracker.observe(&batch).is_some();
        if changed {
            render_logged(&observer_state);
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let thresholds = js_sys::Array::new();
    for threshold in &config.visibility_thresholds {
        thresholds.push(&JsValue::from_f64(*threshold));
    }
    let options = IntersectionObserverInit::new();
    options.set_root_margin(&root_margin(nav_height, config.nav_margin_pad_px, config.bottom_margin_percent));
    options.set_threshold(&thresholds);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    for section in &sections {
        observer.observe(section);
    }
    Ok(())
}
