//! Browser wiring for the viewer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything in this module touches the DOM and only compiles with the
//! `hydrate` feature. It reads events, forwards them to the pure cores
//! (`lightbox`, `highlight`), and applies what they return. Each page feature
//! installs on its own: a missing element skips that feature, a failing DOM
//! call is logged, and the remaining features still install.

mod lightbox;
mod nav;
mod page;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::error::ViewerError;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("viewer: logger already installed");
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if document.ready_state() == "loading" {
        let win = window.clone();
        let doc = document.clone();
        let installed = page::listen(&document, "DOMContentLoaded", move |_| install(&win, &doc));
        if let Err(err) = installed {
            report("startup", &err);
        }
    } else {
        install(&window, &document);
    }
}

fn install(window: &Window, document: &Document) {
    let config = page::load_config(document);
    log::info!("viewer: installing page features");

    if let Err(err) = page::install_year(document, &config) {
        report("footer year", &err);
    }
    if let Err(err) = nav::install(window, document, &config) {
        report("navigation", &err);
    }
    if let Err(err) = lightbox::install(window, document, &config) {
        report("lightbox", &err);
    }
}

fn report(feature: &str, err: &ViewerError) {
    match err {
        ViewerError::MissingElement(_) => log::debug!("viewer: skipping {feature}: {err}"),
        _ => log::warn!("viewer: {feature} failed: {err}"),
    }
}
