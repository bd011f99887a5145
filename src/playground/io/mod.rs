//! # I/O Abstractions
//!
//! The playground core never touches a terminal or the filesystem directly.
//! User edits come in as [`PaneEdit`] messages and the Output pane goes out
//! through an [`OutputSink`], so the same controller runs against files,
//! stdout or test doubles.

pub mod file_source;
pub mod mock;
pub mod sinks;

pub use file_source::{watch_files, WatchedFile};
pub use mock::RecordingSink;
pub use sinks::{FileSink, StdoutSink, TeeSink};

use crate::playground::events::EditOrigin;
use crate::playground::models::DocumentPane;
use anyhow::Result;

/// A user edit that replaced the whole document of a pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneEdit {
    pub pane: EditOrigin,
    pub text: String,
}

impl PaneEdit {
    pub fn new(pane: EditOrigin, text: impl Into<String>) -> Self {
        Self {
            pane,
            text: text.into(),
        }
    }
}

/// Destination for the rendered Output pane
pub trait OutputSink {
    /// Called each time the Output document has been replaced
    fn render(&mut self, output: &DocumentPane) -> Result<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn render(&mut self, output: &DocumentPane) -> Result<()> {
        (**self).render(output)
    }
}
