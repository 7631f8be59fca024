//! Lightbox core: navigator, gesture interpreter, and deferred transitions.
//!
//! `LightboxCore` holds no DOM handles. Every handler returns the list of
//! [`Effect`]s the host must apply to the page, which keeps the whole
//! open/drag/fling/close cycle testable without a browser. The `dom` layer
//! owns the overlay elements and timers and feeds events back in.

#[cfg(test)]
#[path = "lightbox_test.rs"]
mod lightbox_test;

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::gesture::{GestureInterpreter, Sample, SwipeThresholds};
use crate::navigator::{Gallery, Navigator, PanelView};
use crate::transition::{Continuation, TransitionToken, Transitions};

/// Horizontal image offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    /// Resting position.
    Zero,
    /// Tracking the pointer.
    Px(f64),
    /// Fully off-screen; negative step slides right, positive slides left.
    OffScreen(i64),
}

impl Offset {
    /// Inline `transform` value.
    #[must_use]
    pub fn css(self) -> String {
        match self {
            Self::Zero => String::new(),
            Self::Px(px) => format!("translateX({px}px)"),
            Self::OffScreen(step) if step > 0 => "translateX(-100vw)".to_owned(),
            Self::OffScreen(_) => "translateX(100vw)".to_owned(),
        }
    }
}

/// A page mutation requested by the core.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ShowOverlay,
    HideOverlay,
    /// Swap the image, update the counter, and prefetch neighbors.
    ShowPanel(PanelView),
    /// Toggle the `no-scroll` lock on the document body.
    SetScrollLock(bool),
    /// `None` disables the transform transition; `Some(ms)` eases out.
    SetTransition(Option<u32>),
    SetOffset(Offset),
    /// Route further events from this pointer to the image.
    CapturePointer(i32),
    /// Call [`LightboxCore::on_transition_end`] with `token` after `after_ms`.
    Schedule { token: TransitionToken, after_ms: u32 },
}

/// Keys the open lightbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_browser(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

/// Whether a key press on a focused thumbnail should open it.
#[must_use]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

/// Overlay buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Close,
    Prev,
    Next,
}

pub struct LightboxCore {
    navigator: Navigator,
    gesture: GestureInterpreter,
    transitions: Transitions,
    navigate_delay_ms: u32,
    transition_ms: u32,
}

impl LightboxCore {
    #[must_use]
    pub fn new(gallery: Gallery, config: &ViewerConfig) -> Self {
        Self {
            navigator: Navigator::new(gallery),
            gesture: GestureInterpreter::new(SwipeThresholds::from(config)),
            transitions: Transitions::new(),
            navigate_delay_ms: config.navigate_delay_ms,
            transition_ms: config.transition_ms,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.navigator.is_open()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.navigator.index()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.navigator.gallery().len()
    }

    /// Always `false`; galleries are non-empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.navigator.gallery().is_empty()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    #[must_use]
    pub fn pending(&self) -> Option<Continuation> {
        self.transitions.pending()
    }

    // --- Open / close / step ---

    /// Open at `index` (thumbnail click or activation key).
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::IndexOutOfRange`] for an index past the gallery.
    pub fn open(&mut self, index: usize) -> Result<Vec<Effect>, ViewerError> {
        let view = self.navigator.open(index)?;
        self.transitions.cancel();
        self.gesture.abort();
        Ok(vec![
            Effect::SetTransition(None),
            Effect::SetOffset(Offset::Zero),
            Effect::ShowPanel(view),
            Effect::ShowOverlay,
            Effect::SetScrollLock(true),
        ])
    }

    /// Close the overlay, dropping any drag or pending transition.
    pub fn close(&mut self) -> Vec<Effect> {
        if !self.navigator.close() {
            return Vec::new();
        }
        if self.transitions.cancel() {
            log::debug!("lightbox: dropped pending transition on close");
        }
        self.gesture.abort();
        vec![
            Effect::HideOverlay,
            Effect::SetScrollLock(false),
            Effect::SetTransition(None),
            Effect::SetOffset(Offset::Zero),
        ]
    }

    /// Move by `delta` panels. A pending fling is completed first so its
    /// step is not lost.
    pub fn step(&mut self, delta: i64) -> Vec<Effect> {
        if !self.is_open() {
            return Vec::new();
        }
        let mut effects = self.flush_pending();
        if let Some(view) = self.navigator.advance(delta) {
            effects.push(Effect::ShowPanel(view));
        }
        effects
    }

    // --- Discrete input ---

    pub fn on_key(&mut self, key: Key) -> Vec<Effect> {
        if !self.is_open() {
            return Vec::new();
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowLeft => self.step(-1),
            Key::ArrowRight => self.step(1),
            Key::Other => Vec::new(),
        }
    }

    pub fn on_control(&mut self, control: Control) -> Vec<Effect> {
        match control {
            Control::Close => self.close(),
            Control::Prev => self.step(-1),
            Control::Next => self.step(1),
        }
    }

    /// Click on the dimmed background (not on the image or a button).
    pub fn on_backdrop_click(&mut self) -> Vec<Effect> {
        self.close()
    }

    // --- Pointer input on the image ---

    pub fn on_pointer_down(&mut self, sample: Sample) -> Vec<Effect> {
        if !self.is_open() {
            return Vec::new();
        }
        if matches!(self.transitions.pending(), Some(Continuation::Navigate(_))) {
            log::debug!("lightbox: ignoring pointer {} during fling", sample.pointer_id);
            return Vec::new();
        }
        if !self.gesture.begin(sample) {
            return Vec::new();
        }
        self.transitions.cancel();
        vec![Effect::CapturePointer(sample.pointer_id), Effect::SetTransition(None)]
    }

    pub fn on_pointer_move(&mut self, sample: Sample) -> Vec<Effect> {
        self.gesture
            .update(sample)
            .map_or_else(Vec::new, |dx| vec![Effect::SetOffset(Offset::Px(dx))])
    }

    /// Pointer up, cancel, or leave.
    pub fn on_pointer_up(&mut self, sample: Sample, viewport_width: f64) -> Vec<Effect> {
        let Some(outcome) = self.gesture.release(sample, viewport_width) else {
            return Vec::new();
        };
        let mut effects = vec![Effect::SetTransition(Some(self.transition_ms))];
        if let Some(delta) = outcome.delta() {
            let token = self.transitions.schedule(Continuation::Navigate(delta));
            effects.push(Effect::SetOffset(Offset::OffScreen(delta)));
            effects.push(Effect::Schedule { token, after_ms: self.navigate_delay_ms });
        } else {
            let token = self.transitions.schedule(Continuation::Settle);
            effects.push(Effect::SetOffset(Offset::Zero));
            effects.push(Effect::Schedule { token, after_ms: self.transition_ms });
        }
        effects
    }

    // --- Timers ---

    /// A scheduled timer fired. Stale tokens and a closed overlay are no-ops.
    pub fn on_transition_end(&mut self, token: TransitionToken) -> Vec<Effect> {
        let Some(continuation) = self.transitions.take(token) else {
            return Vec::new();
        };
        if !self.is_open() {
            return Vec::new();
        }
        self.run(continuation)
    }

    fn flush_pending(&mut self) -> Vec<Effect> {
        match self.transitions.pending() {
            Some(continuation) => {
                self.transitions.cancel();
                self.run(continuation)
            }
            None => Vec::new(),
        }
    }

    fn run(&mut self, continuation: Continuation) -> Vec<Effect> {
        match continuation {
            Continuation::Navigate(delta) => {
                let mut effects = vec![Effect::SetTransition(None), Effect::SetOffset(Offset::Zero)];
                if let Some(view) = self.navigator.advance(delta) {
                    effects.push(Effect::ShowPanel(view));
                }
                effects
            }
            Continuation::Settle => vec![Effect::SetTransition(None)],
        }
    }
}
