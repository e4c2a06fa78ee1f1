//! # TUI Components
//!
//! Everything drawn on screen, one file per component.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as struct fields and are rebuilt every frame:
//! - `TitleBar`: catalog tag, position in the stack, status message
//! - `CardStack`: the top card (posed by a `CardVisual`) and the one behind it
//! - `StatusView`: loading spinner or fetch error
//!
//! ### Stateful Components (Persistent State + Transient Wrapper)
//!
//! State lives in `TuiState`; the wrapper borrows it for one frame:
//! - `ControlBar` / `ControlBarState`: buttons and their hit boxes
//! - `Summary` / `ScrollViewState`: the liked grid and its scroll offset
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (top status bar)
//! ├── card_stack.rs   (top card + receded next card)
//! ├── controls.rs     (Nope / Restart / Like)
//! ├── summary.rs      (end-of-session grid)
//! └── status_view.rs  (loading and error states)
//! ```

pub mod card_stack;
pub mod controls;
pub mod status_view;
pub mod summary;
mod title_bar;

pub use card_stack::{CardStack, card_area};
pub use controls::{Control, ControlBar, ControlBarState};
pub use status_view::StatusView;
pub use summary::Summary;
pub use title_bar::TitleBar;
