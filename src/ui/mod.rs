//! Presentation layer.
//!
//! The UI layer turns favorite state and catalog data into display-ready values and
//! text. It holds no state of its own.
//!
//! ```text
//! EventExplorer → view models (viewmodel) → text (renderer) → stdout
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Cards, details, empty states and toggle notices
//! - [`renderer`]: Plain-text rendering with optional ANSI match highlighting

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_detail, render_list, render_notice};
pub use viewmodel::{EmptyState, EventCard, EventDetail, ListView, ToggleNotice};
