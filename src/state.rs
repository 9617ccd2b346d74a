//! Shared application state for request handlers.

use crate::plan::GenerationMode;

/// Shared application state, cloned into each handler.
///
/// Holds only the generation mode; requests share no mutable state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub mode: GenerationMode,
}

impl AppState {
    /// Creates application state around the given generation mode.
    pub fn new(mode: GenerationMode) -> Self {
        Self { mode }
    }
}
