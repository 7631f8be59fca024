//! Panel navigator: the gallery, the current index, and the open flag.
//!
//! The gallery is an immutable, non-empty list of image sources. The
//! navigator moves through it circularly and reports a [`PanelView`] after
//! every move so the host can swap the image, update the counter, and
//! prefetch the neighbors.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use crate::error::ViewerError;

/// Ordered, non-empty list of panel image sources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gallery {
    sources: Vec<String>,
}

impl Gallery {
    /// Build a gallery, or `None` when there are no sources.
    #[must_use]
    pub fn new(sources: Vec<String>) -> Option<Self> {
        if sources.is_empty() {
            None
        } else {
            Some(Self { sources })
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.sources.get(index).map(String::as_str)
    }

    /// Source at `index` shifted by `delta`, wrapping.
    fn wrapped(&self, index: usize, delta: i64) -> &str {
        &self.sources[wrap_index(index, delta, self.len())]
    }
}

/// `(index + delta) mod len`, always in `0..len`. `len` must be non-zero.
#[must_use]
pub fn wrap_index(index: usize, delta: i64, len: usize) -> usize {
    let len_i = i128::try_from(len).unwrap_or(i128::MAX);
    let index_i = i128::try_from(index).unwrap_or(0);
    let wrapped = (index_i + i128::from(delta)).rem_euclid(len_i);
    usize::try_from(wrapped).unwrap_or(0)
}

/// What the overlay should show for the current index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelView {
    pub index: usize,
    pub src: String,
    /// `"position / total"`, 1-based.
    pub counter: String,
    /// Sources at `index + 1` and `index - 1`, to warm the image cache.
    pub prefetch: [String; 2],
}

/// Current position in the gallery and whether the overlay is open.
#[derive(Clone, Debug)]
pub struct Navigator {
    gallery: Gallery,
    index: usize,
    open: bool,
}

impl Navigator {
    #[must_use]
    pub fn new(gallery: Gallery) -> Self {
        Self { gallery, index: 0, open: false }
    }

    #[must_use]
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the overlay at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::IndexOutOfRange`] when `index >= len`; the
    /// navigator is left untouched.
    pub fn open(&mut self, index: usize) -> Result<PanelView, ViewerError> {
        let len = self.gallery.len();
        if index >= len {
            return Err(ViewerError::IndexOutOfRange { index, len });
        }
        self.index = index;
        self.open = true;
        Ok(self.view())
    }

    /// Move by `delta` panels, wrapping. `None` while closed.
    pub fn advance(&mut self, delta: i64) -> Option<PanelView> {
        if !self.open {
            return None;
        }
        self.index = wrap_index(self.index, delta, self.gallery.len());
        Some(self.view())
    }

    /// Close the overlay. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// View of the current index.
    #[must_use]
    pub fn view(&self) -> PanelView {
        let index = self.index;
        PanelView {
            index,
            src: self.gallery.wrapped(index, 0).to_owned(),
            counter: format!("{} / {}", index + 1, self.gallery.len()),
            prefetch: [
                self.gallery.wrapped(index, 1).to_owned(),
                self.gallery.wrapped(index, -1).to_owned(),
            ],
        }
    }
}

/// Pick a panel's display source: the responsive `currentSrc` when the
/// browser has chosen one, else the plain `src`.
#[must_use]
pub fn resolve_source<'a>(current_src: &'a str, src: &'a str) -> Option<&'a str> {
    [current_src, src].into_iter().find(|s| !s.trim().is_empty())
}
