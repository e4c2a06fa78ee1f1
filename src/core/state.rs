//! # Application State
//!
//! Core business state for Swipedeck. Domain logic only; presentation
//! state (animations, button hit boxes) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── deck: DeckController          // session + gesture state machine
//! ├── status_message: String        // status bar text
//! ├── batch_size: usize             // items per fetch
//! └── max_offset: usize             // upper bound for the random catalog offset
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::catalog::BatchRequest;
use crate::core::config::ResolvedConfig;
use crate::core::deck::DeckController;

pub struct App {
    pub deck: DeckController,
    pub status_message: String,
    pub batch_size: usize,
    pub max_offset: usize,
}

impl App {
    pub fn new(deck: DeckController, batch_size: usize, max_offset: usize) -> Self {
        Self {
            deck,
            status_message: String::from("Welcome to Swipedeck!"),
            batch_size,
            max_offset,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            DeckController::new(config.deck_settings()),
            config.batch_size,
            config.max_offset,
        )
    }

    /// A fresh request for the next batch, with a new random offset.
    pub fn batch_request(&self) -> BatchRequest {
        BatchRequest::randomized(self.batch_size, self.max_offset)
    }
}
