//! Lightbox overlay: builds the markup once and drives it from [`LightboxCore`].

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement, KeyboardEvent, PointerEvent, Window,
};

use super::page::{create, listen, toggle_class};
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::gesture::Sample;
use crate::lightbox::{Control, Effect, Key, LightboxCore, is_activation_key};
use crate::navigator::{Gallery, PanelView, resolve_source};
use crate::transition::TransitionToken;

/// The overlay elements the effects write to.
struct Overlay {
    root: HtmlElement,
    image: HtmlImageElement,
    counter: Element,
    close: HtmlElement,
    prev: HtmlElement,
    next: HtmlElement,
    body: HtmlElement,
}

impl Overlay {
    fn build(document: &Document, body: HtmlElement) -> Result<Self, ViewerError> {
        let root: HtmlElement = create(document, "div", "lightbox")?;
        root.set_attribute("aria-hidden", "true")?;
        root.style().set_property("display", "none")?;

        let close = button(document, "close", "Close", "\u{d7}")?;
        let prev = button(document, "prev", "Previous", "\u{2039}")?;
        let image: HtmlImageElement = create(document, "img", "lightbox-img")?;
        image.set_alt("comic page");
        image.set_draggable(false);
        image.style().set_property("touch-action", "pan-y")?;
        let next = button(document, "next", "Next", "\u{203a}")?;
        let counter: Element = create(document, "div", "counter")?;

        root.append_child(&close)?;
        root.append_child(&prev)?;
        root.append_child(&image)?;
        root.append_child(&next)?;
        root.append_child(&counter)?;
        body.append_child(&root)?;

        Ok(Self { root, image, counter, close, prev, next, body })
    }

    fn apply(&self, effect: &Effect) -> Result<(), ViewerError> {
        match effect {
            Effect::ShowOverlay => {
                self.root.style().set_property("display", "block")?;
                self.root.set_attribute("aria-hidden", "false")?;
            }
            Effect::HideOverlay => {
                self.root.style().set_property("display", "none")?;
                self.root.set_attribute("aria-hidden", "true")?;
            }
            Effect::ShowPanel(view) => self.show(view)?,
            Effect::SetScrollLock(locked) => toggle_class(&self.body, "no-scroll", *locked)?,
            Effect::SetTransition(None) => self.image.style().set_property("transition", "none")?,
            Effect::SetTransition(Some(ms)) => {
                self.image
                    .style()
                    .set_property("transition", &format!("transform {ms}ms ease-out"))?;
            }
            Effect::SetOffset(offset) => self.image.style().set_property("transform", &offset.css())?,
            Effect::CapturePointer(pointer_id) => self.image.set_pointer_capture(*pointer_id)?,
            // Timers are owned by the dispatcher.
            Effect::Schedule { .. } => {}
        }
        Ok(())
    }

    fn show(&self, view: &PanelView) -> Result<(), ViewerError> {
        self.image.set_src(&view.src);
        self.counter.set_text_content(Some(&view.counter));
        for src in &view.prefetch {
            let warm = HtmlImageElement::new()?;
            warm.set_src(src);
        }
        Ok(())
    }
}

fn button(document: &Document, class: &str, label: &str, glyph: &str) -> Result<HtmlElement, ViewerError> {
    let button: HtmlElement = create(document, "button", class)?;
    button.set_attribute("type", "button")?;
    button.set_attribute("aria-label", label)?;
    button.set_text_content(Some(glyph));
    Ok(button)
}

/// Core state, overlay, and the single outstanding timer.
struct Lightbox {
    core: RefCell<LightboxCore>,
    overlay: Overlay,
    window: Window,
    timer: RefCell<Option<Timeout>>,
}

impl Lightbox {
    fn dispatch(self: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Schedule { token, after_ms } => self.schedule(token, after_ms),
                Effect::HideOverlay => {
                    // Dropping the handle clears the browser timeout.
                    *self.timer.borrow_mut() = None;
                    self.apply_logged(&Effect::HideOverlay);
                }
                other => self.apply_logged(&other),
            }
        }
    }

    fn apply_logged(&self, effect: &Effect) {
        if let Err(err) = self.overlay.apply(effect) {
            log::warn!("lightbox: failed to apply {effect:?}: {err}");
        }
    }

    fn schedule(self: &Rc<Self>, token: TransitionToken, after_ms: u32) {
        let this = Rc::clone(self);
        let timeout = Timeout::new(after_ms, move || {
            let effects = this.core.borrow_mut().on_transition_end(token);
            this.dispatch(effects);
        });
        *self.timer.borrow_mut() = Some(timeout);
    }

    /// `innerWidth`, else the root element's `clientWidth`. Zero when neither
    /// is available, which turns off the fast-exit swipe clause.
    fn viewport_width(&self) -> f64 {
        let inner = self.window.inner_width().map_or(0.0, |w| w.as_f64().unwrap_or(0.0));
        if inner > 0.0 {
            return inner;
        }
        self.window
            .document()
            .and_then(|d| d.document_element())
            .map_or(0.0, |root| f64::from(root.client_width()))
    }
}

fn sample(event: &PointerEvent) -> Sample {
    Sample::new(
        event.pointer_id(),
        f64::from(event.client_x()),
        f64::from(event.client_y()),
        event.time_stamp(),
    )
}

pub(super) fn install(window: &Window, document: &Document, config: &ViewerConfig) -> Result<(), ViewerError> {
    let (thumbnails, sources) = collect_panels(document, &config.panel_selector)?;
    let Some(gallery) = Gallery::new(sources) else {
        return Err(ViewerError::MissingElement("gallery panels"));
    };
    let body = document.body().ok_or(ViewerError::MissingElement("document body"))?;
    let overlay = Overlay::build(document, body)?;
    log::debug!("lightbox: {} panels", gallery.len());

    let lightbox = Rc::new(Lightbox {
        core: RefCell::new(LightboxCore::new(gallery, config)),
        overlay,
        window: window.clone(),
        timer: RefCell::new(None),
    });

    wire_thumbnails(&lightbox, &thumbnails)?;
    wire_controls(&lightbox)?;
    wire_keyboard(&lightbox, document)?;
    wire_pointer(&lightbox)?;
    Ok(())
}

/// Panel elements paired with their resolved sources; panels without a
/// usable image are dropped so indices stay aligned.
fn collect_panels(document: &Document, selector: &str) -> Result<(Vec<HtmlElement>, Vec<String>), ViewerError> {
    let list = document.query_selector_all(selector)?;
    let mut panels = Vec::new();
    let mut sources = Vec::new();
    for i in 0..list.length() {
        let Some(panel) = list.get(i).and_then(|node| node.dyn_ref::<HtmlElement>().cloned()) else {
            continue;
        };
        let image = match panel.dyn_ref::<HtmlImageElement>() {
            Some(image) => Some(image.clone()),
            None => panel
                .query_selector("img")?
                .and_then(|found| found.dyn_ref::<HtmlImageElement>().cloned()),
        };
        let Some(image) = image else {
            log::debug!("lightbox: panel {i} has no image");
            continue;
        };
        let current = image.current_src();
        let src = image.src();
        if let Some(source) = resolve_source(&current, &src) {
            sources.push(source.to_owned());
            panels.push(panel);
        }
    }
    Ok((panels, sources))
}

fn open_logged(lightbox: &Rc<Lightbox>, index: usize) {
    let opened = lightbox.core.borrow_mut().open(index);
    match opened {
        Ok(effects) => lightbox.dispatch(effects),
        Err(err) => log::warn!("lightbox: {err}"),
    }
}

fn wire_thumbnails(lightbox: &Rc<Lightbox>, thumbnails: &[HtmlElement]) -> Result<(), ViewerError> {
    for (index, thumb) in thumbnails.iter().enumerate() {
        thumb.style().set_property("cursor", "zoom-in")?;
        thumb.set_attribute("tabindex", "0")?;

        let on_click = Rc::clone(lightbox);
        listen(thumb, "click", move |_| open_logged(&on_click, index))?;

        let on_key = Rc::clone(lightbox);
        listen(thumb, "keydown", move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            if is_activation_key(&key) {
                event.prevent_default();
                open_logged(&on_key, index);
            }
        })?;
    }
    Ok(())
}

fn wire_controls(lightbox: &Rc<Lightbox>) -> Result<(), ViewerError> {
    let overlay = &lightbox.overlay;
    for (element, control) in [
        (&overlay.close, Control::Close),
        (&overlay.prev, Control::Prev),
        (&overlay.next, Control::Next),
    ] {
        let this = Rc::clone(lightbox);
        listen(element, "click", move |_| {
            let effects = this.core.borrow_mut().on_control(control);
            this.dispatch(effects);
        })?;
    }

    let this = Rc::clone(lightbox);
    let backdrop: EventTarget = overlay.root.clone().into();
    listen(&overlay.root, "click", move |event: Event| {
        if event.target().as_ref() != Some(&backdrop) {
            return;
        }
        let effects = this.core.borrow_mut().on_backdrop_click();
        this.dispatch(effects);
    })
}

fn wire_keyboard(lightbox: &Rc<Lightbox>, document: &Document) -> Result<(), ViewerError> {
    let this = Rc::clone(lightbox);
    listen(document, "keydown", move |event: Event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        let effects = this.core.borrow_mut().on_key(Key::from_browser(&key));
        this.dispatch(effects);
    })
}

fn wire_pointer(lightbox: &Rc<Lightbox>) -> Result<(), ViewerError> {
    let image = &lightbox.overlay.image;

    let this = Rc::clone(lightbox);
    listen(image, "pointerdown", move |event: Event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        let effects = this.core.borrow_mut().on_pointer_down(sample(event));
        this.dispatch(effects);
    })?;

    let this = Rc::clone(lightbox);
    listen(image, "pointermove", move |event: Event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        let effects = this.core.borrow_mut().on_pointer_move(sample(event));
        this.dispatch(effects);
    })?;

    for name in ["pointerup", "pointercancel", "pointerleave"] {
        let this = Rc::clone(lightbox);
        listen(image, name, move |event: Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let width = this.viewport_width();
            let effects = this.core.borrow_mut().on_pointer_up(sample(event), width);
            this.dispatch(effects);
        })?;
    }
    Ok(())
}
