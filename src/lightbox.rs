//! Full-size image viewer navigation.
//!
//! A [`LightboxNavigator`] is a circular index over a fixed, non-empty image
//! list. It cannot be built over zero images, and every transition keeps the
//! index in range, so [`LightboxNavigator::current`] never fails.
//!
//! Only the visitor moves the lightbox: left/right stepping, thumbnail jumps,
//! and dismissal. There is no autoplay.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightboxError {
    #[error("lightbox needs at least one image")]
    NoImages,
    #[error("initial index {index} out of range for {len} images")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Key presses the lightbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

impl LightboxKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Escape" | "Esc" => Some(LightboxKey::Escape),
            "ArrowLeft" | "Left" => Some(LightboxKey::ArrowLeft),
            "ArrowRight" | "Right" => Some(LightboxKey::ArrowRight),
            _ => None,
        }
    }
}

/// Result of handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The index changed (or wrapped back onto itself).
    Moved,
    /// The visitor asked to close; the caller should drop the navigator.
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxNavigator<T> {
    images: Vec<T>,
    current: usize,
}

impl<T> LightboxNavigator<T> {
    /// Open on `initial_index` (the cover is index 0 when present).
    pub fn open(images: Vec<T>, initial_index: usize) -> Result<Self, LightboxError> {
        if images.is_empty() {
            return Err(LightboxError::NoImages);
        }
        if initial_index >= images.len() {
            return Err(LightboxError::IndexOutOfRange {
                index: initial_index,
                len: images.len(),
            });
        }
        Ok(Self {
            images,
            current: initial_index,
        })
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.images.len();
    }

    pub fn previous(&mut self) {
        let len = self.images.len();
        self.current = (self.current + len - 1) % len;
    }

    /// Jump straight to `index`; an index outside the list is ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn handle_key(&mut self, key: LightboxKey) -> KeyOutcome {
        match key {
            LightboxKey::Escape => KeyOutcome::Close,
            LightboxKey::ArrowLeft => {
                self.previous();
                KeyOutcome::Moved
            }
            LightboxKey::ArrowRight => {
                self.next();
                KeyOutcome::Moved
            }
        }
    }

    /// Dismiss the lightbox, handing the image list back.
    pub fn close(self) -> Vec<T> {
        self.images
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &T {
        &self.images[self.current]
    }

    pub fn images(&self) -> &[T] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Never true for an open lightbox.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Prev/next controls and the counter only make sense with more than one image.
    pub fn shows_controls(&self) -> bool {
        self.images.len() > 1
    }

    /// `2 / 5`
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.current + 1, self.images.len())
    }
}
