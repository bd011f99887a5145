//! # Playground
//!
//! The edit-to-transform-to-render pipeline.
//!
//! ```text
//! PaneEdit ─▶ DocumentPane ─▶ EditEvent ─▶ EditDebouncer ─▶ TransformCoordinator
//!                                                              │        ▲
//!                                                              ▼        │
//!                                                       TransformClient ┘
//!                                                              │
//!                              OutputSink ◀── Output pane ◀────┘ (sniff, pretty-print)
//! ```

pub mod controllers;
pub mod coordinator;
pub mod debouncer;
pub mod events;
pub mod io;
pub mod models;
pub mod pretty;
pub mod services;
pub mod sniffer;

pub use controllers::{PlaygroundController, PlaygroundSettings};
pub use coordinator::{CompletionOutcome, TransformCompletion, TransformCoordinator};
pub use debouncer::EditDebouncer;
pub use events::{EditEvent, EditOrigin, HighlightMode, PaneId};
pub use io::{OutputSink, PaneEdit};
pub use models::{DocumentPane, PaneError, PaneSet};
pub use services::{HttpTransformClient, TransformClient, TransformError, TransformRequest, TransformResponse};
