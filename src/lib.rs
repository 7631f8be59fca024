//! Comic page viewer for a static site, compiled to WebAssembly.
//!
//! The crate enhances a plain HTML page: it marks the nav link of the section
//! in view, flags the nav bar once the page scrolls, fills in the footer year,
//! and turns the comic panel thumbnails into a lightbox with keyboard,
//! button, and swipe navigation.
//!
//! All decision logic lives in plain Rust types that compile and test on any
//! target. The `hydrate` feature adds the [`dom`] layer, which wires those
//! types to browser events through `web-sys`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`lightbox`] | Lightbox core: open/close/step, drag handling, emitted effects |
//! | [`navigator`] | Gallery and circular panel index |
//! | [`gesture`] | Drag tracking and ordered swipe classification |
//! | [`transition`] | Generation-counted deferred continuations |
//! | [`highlight`] | Active-section selection and nav bar helpers |
//! | [`config`] | Tunable parameters and inline JSON overrides |
//! | [`error`] | Error types |
//! | [`consts`] | Default numeric values |
//! | `dom` | Browser wiring (feature `hydrate`) |

pub mod config;
pub mod consts;
pub mod error;
pub mod gesture;
pub mod highlight;
pub mod lightbox;
pub mod navigator;
pub mod transition;

#[cfg(feature = "hydrate")]
pub mod dom;
