//! Shared DOM helpers, inline config loading, and the footer year.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget};

use crate::config::{CONFIG_ELEMENT_ID, ViewerConfig};
use crate::error::ViewerError;

/// Attach `handler` for the page lifetime.
pub(super) fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), ViewerError> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Create `<tag class="class">` cast to `T`.
pub(super) fn create<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T, ViewerError> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    element
        .dyn_into::<T>()
        .map_err(|_| ViewerError::Dom(format!("<{tag}> has an unexpected element type")))
}

/// Add or remove `class` on `element`.
pub(super) fn toggle_class(element: &Element, class: &str, on: bool) -> Result<(), ViewerError> {
    let list = element.class_list();
    if on {
        list.add_1(class)?;
    } else {
        list.remove_1(class)?;
    }
    Ok(())
}

/// Read overrides from the inline config element, falling back to defaults.
pub(super) fn load_config(document: &Document) -> ViewerConfig {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return ViewerConfig::default();
    };
    let text = element.text_content().unwrap_or_default();
    match ViewerConfig::from_json(&text) {
        Ok(config) => {
            log::debug!("viewer: loaded config from #{CONFIG_ELEMENT_ID}");
            config
        }
        Err(err) => {
            log::warn!("viewer: {err}; using defaults");
            ViewerConfig::default()
        }
    }
}

/// Write the current year into the footer year element.
pub(super) fn install_year(document: &Document, config: &ViewerConfig) -> Result<(), ViewerError> {
    let element = document
        .get_element_by_id(&config.year_element_id)
        .ok_or(ViewerError::MissingElement("footer year element"))?;
    let year = js_sys::Date::new_0().get_full_year();
    element.set_text_content(Some(&year.to_string()));
    Ok(())
}
