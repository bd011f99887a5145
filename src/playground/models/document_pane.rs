//! # Document Pane
//!
//! One text surface of the playground: its document, its highlighting mode
//! and the edit hook that feeds the transform pipeline.
//!
//! Two kinds of mutation exist and must not be confused:
//! - user edits ([`DocumentPane::edit`], [`DocumentPane::replace_by_user`])
//!   notify the registered listeners;
//! - programmatic replacement ([`DocumentPane::set_text`]) never does, so
//!   applying a transform result to a pane cannot re-trigger the pipeline.

use crate::playground::events::{
    EditEvent, EditListener, EditOrigin, HighlightMode, PaneCapabilities, PaneId,
};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

use super::busy_cue::BusyCue;

/// Errors from user edits
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaneError {
    #[error("the {0} pane is read-only")]
    ReadOnly(PaneId),

    #[error("edit range {start}..{end} is not valid for a document of {len} bytes")]
    InvalidRange { start: usize, end: usize, len: usize },
}

/// A single editable or read-only text surface
pub struct DocumentPane {
    id: PaneId,
    text: String,
    mode: HighlightMode,
    capabilities: PaneCapabilities,
    listeners: Vec<EditListener>,
    reconfigurations: usize,
    busy: BusyCue,
}

impl DocumentPane {
    /// Create a pane with explicit capabilities
    pub fn new(
        id: PaneId,
        text: impl Into<String>,
        mode: HighlightMode,
        capabilities: PaneCapabilities,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            mode,
            capabilities,
            listeners: Vec::new(),
            reconfigurations: 0,
            busy: BusyCue::new(),
        }
    }

    /// Create a pane the user can type into
    pub fn editable(id: PaneId, text: impl Into<String>, mode: HighlightMode) -> Self {
        Self::new(id, text, mode, PaneCapabilities::FULL_ACCESS)
    }

    /// Create a display-only pane
    pub fn read_only(id: PaneId, text: impl Into<String>, mode: HighlightMode) -> Self {
        Self::new(id, text, mode, PaneCapabilities::READ_ONLY)
    }

    pub fn id(&self) -> PaneId {
        self.id
    }

    /// Current document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole document programmatically. Listeners are not notified.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        tracing::debug!(
            "Replaced {} document ({} bytes)",
            self.id,
            self.text.len()
        );
    }

    pub fn mode(&self) -> HighlightMode {
        self.mode
    }

    /// Switch highlighting mode
    ///
    /// Returns `true` when the pane was reconfigured. Setting the current mode
    /// again is a no-op.
    pub fn set_mode(&mut self, mode: HighlightMode) -> bool {
        if self.mode == mode {
            return false;
        }

        tracing::debug!("Reconfiguring {} pane: {} -> {}", self.id, self.mode, mode);
        self.mode = mode;
        self.reconfigurations += 1;
        true
    }

    /// Number of effective mode changes since construction
    pub fn reconfigurations(&self) -> usize {
        self.reconfigurations
    }

    pub fn capabilities(&self) -> PaneCapabilities {
        self.capabilities
    }

    pub fn is_editable(&self) -> bool {
        self.capabilities.contains(PaneCapabilities::EDITABLE)
    }

    /// Register a listener for user edits
    pub fn on_edit(&mut self, listener: EditListener) {
        self.listeners.push(listener);
    }

    pub fn busy_cue(&self) -> &BusyCue {
        &self.busy
    }

    /// Splice `replacement` into the byte `range` of the document, as a user
    /// keystroke would
    pub fn edit(&mut self, range: Range<usize>, replacement: &str) -> Result<EditEvent, PaneError> {
        let origin = self.edit_origin()?;

        let len = self.text.len();
        if range.start > range.end
            || range.end > len
            || !self.text.is_char_boundary(range.start)
            || !self.text.is_char_boundary(range.end)
        {
            return Err(PaneError::InvalidRange {
                start: range.start,
                end: range.end,
                len,
            });
        }

        let changed = self.text[range.clone()] != *replacement;
        self.text.replace_range(range, replacement);

        Ok(self.notify(origin, changed))
    }

    /// Replace the whole document as a user action (e.g. reloading a file the
    /// user saved). Listeners are notified.
    pub fn replace_by_user(&mut self, text: impl Into<String>) -> Result<EditEvent, PaneError> {
        let origin = self.edit_origin()?;

        let text = text.into();
        let changed = self.text != text;
        self.text = text;

        Ok(self.notify(origin, changed))
    }

    fn edit_origin(&self) -> Result<EditOrigin, PaneError> {
        if !self.is_editable() {
            return Err(PaneError::ReadOnly(self.id));
        }

        match self.id {
            PaneId::Input => Ok(EditOrigin::Input),
            PaneId::Template => Ok(EditOrigin::Template),
            PaneId::Output => Err(PaneError::ReadOnly(self.id)),
        }
    }

    fn notify(&self, origin: EditOrigin, changed: bool) -> EditEvent {
        let event = EditEvent::new(origin, changed);
        for listener in &self.listeners {
            listener(&event);
        }
        event
    }
}

impl fmt::Debug for DocumentPane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentPane")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("capabilities", &self.capabilities)
            .field("len", &self.text.len())
            .field("listeners", &self.listeners.len())
            .field("reconfigurations", &self.reconfigurations)
            .field("busy", &self.busy.is_busy())
            .finish()
    }
}
