//! # Events Module
//!
//! Pane identifiers, highlighting modes and the edit events that drive the
//! transform pipeline.

pub mod edit_event;
pub mod types;

pub use edit_event::{EditEvent, EditListener};
pub use types::{EditOrigin, HighlightMode, PaneCapabilities, PaneId};
