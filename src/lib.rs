//! # xtrplay - Live Transformation Playground
//!
//! Three panes wired together: an input document, a transformation template
//! and the output document. Editing the input or the template sends both to
//! a remote transform endpoint once edits settle, and the output pane is
//! refreshed with the pretty-printed result.
//!
//! ```text
//! ┌──────────┐  ┌────────────┐        debounce        ┌──────────────┐
//! │  Input   │  │  Template  │ ─────── edits ───────▶ │ Coordinator  │
//! └──────────┘  └────────────┘                        └──────┬───────┘
//!       ▲                                                    │ POST
//!       └──── mode inferred from template ◀──────────────────┤
//!                                                            ▼
//!                            ┌──────────┐  pretty-print ┌───────────┐
//!                            │  Output  │ ◀──────────── │ Transform │
//!                            └──────────┘               └───────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod playground;

pub use playground::*;
