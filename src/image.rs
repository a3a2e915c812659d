//! Image resource tracking: decode state and stale-decode invalidation.
//!
//! The actual decode happens in the browser (`HtmlImageElement`); this module
//! only tracks which source is current and whether it finished. Each source
//! change bumps a [`Generation`], and a decode result is applied only if its
//! generation still matches, so a slow decode of an old image can never
//! replace a newer one.

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

use crate::geometry::Size;

/// Monotonic token identifying one source assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

/// Decode progress of the current image.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeState {
    Pending,
    Loaded,
    /// Decode failed; the message is whatever the runtime reported.
    Error(String),
}

/// Result delivered by the decoder for one generation.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// Decoded with the given natural size.
    Loaded(Size),
    Failed(String),
}

/// The single image the viewport displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResource {
    /// URL or data URI; also the cache key.
    pub source: String,
    pub generation: Generation,
    pub state: DecodeState,
    /// Size reported by the decoder once loaded.
    pub natural_size: Option<Size>,
}

impl ImageResource {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state == DecodeState::Loaded
    }
}

/// Holds the current image resource and hands out generations.
#[derive(Debug, Clone, Default)]
pub struct ImageSlot {
    current: Option<ImageResource>,
    last_generation: u64,
}

impl ImageSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<&ImageResource> {
        self.current.as_ref()
    }

    /// Point the slot at `source`.
    ///
    /// Returns the new generation when a decode must be started, or `None`
    /// when `source` is already current (no re-decode) or empty (slot
    /// cleared).
    pub fn replace(&mut self, source: &str) -> Option<Generation> {
        if source.is_empty() {
            self.current = None;
            return None;
        }
        if self.current.as_ref().is_some_and(|c| c.source == source) {
            return None;
        }
        self.last_generation += 1;
        let generation = Generation(self.last_generation);
        self.current = Some(ImageResource {
            source: source.to_owned(),
            generation,
            state: DecodeState::Pending,
            natural_size: None,
        });
        Some(generation)
    }

    /// Force a re-decode of the current source (e.g. after the host retries).
    pub fn reload(&mut self) -> Option<Generation> {
        let source = self.current.take()?.source;
        self.replace(&source)
    }

    /// Apply a decode result. Returns `false` if `generation` is stale.
    pub fn resolve(&mut self, generation: Generation, outcome: DecodeOutcome) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        if current.generation != generation {
            return false;
        }
        match outcome {
            DecodeOutcome::Loaded(size) => {
                current.state = DecodeState::Loaded;
                current.natural_size = Some(size);
            }
            DecodeOutcome::Failed(message) => {
                current.state = DecodeState::Error(message);
                current.natural_size = None;
            }
        }
        true
    }

    /// Whether `generation` is the one currently awaited or displayed.
    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current.as_ref().is_some_and(|c| c.generation == generation)
    }
}
