//! # Models
//!
//! Pane state: documents, highlighting modes and the busy cue.

pub mod busy_cue;
pub mod document_pane;
pub mod pane_set;

pub use busy_cue::{BusyCue, BusyGuard};
pub use document_pane::{DocumentPane, PaneError};
pub use pane_set::PaneSet;
