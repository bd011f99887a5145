//! # Core Pane Types
//!
//! Identifiers, highlighting modes and capability flags shared by the panes,
//! the debouncer and the coordinator.

use bitflags::bitflags;
use std::fmt;

/// One of the three playground panes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneId {
    Input,
    Template,
    Output,
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaneId::Input => write!(f, "input"),
            PaneId::Template => write!(f, "template"),
            PaneId::Output => write!(f, "output"),
        }
    }
}

/// A pane that can originate edits. Output is never one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOrigin {
    Input,
    Template,
}

impl From<EditOrigin> for PaneId {
    fn from(origin: EditOrigin) -> Self {
        match origin {
            EditOrigin::Input => PaneId::Input,
            EditOrigin::Template => PaneId::Template,
        }
    }
}

impl fmt::Display for EditOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&PaneId::from(*self), f)
    }
}

/// Syntax highlighting mode of a pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighlightMode {
    Xml,
    Json,
    #[default]
    PlainText,
}

impl HighlightMode {
    /// XML and JSON have a pretty-printer and a grammar; plain text has neither
    pub fn is_structured(&self) -> bool {
        !matches!(self, HighlightMode::PlainText)
    }

    pub fn name(&self) -> &'static str {
        match self {
            HighlightMode::Xml => "xml",
            HighlightMode::Json => "json",
            HighlightMode::PlainText => "plain",
        }
    }
}

impl fmt::Display for HighlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Capabilities that control what operations are allowed on a pane
    ///
    /// Fixed when the pane is constructed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use xtrplay::playground::events::PaneCapabilities;
    ///
    /// let output_caps = PaneCapabilities::READ_ONLY;
    /// assert!(!output_caps.contains(PaneCapabilities::EDITABLE));
    ///
    /// let input_caps = PaneCapabilities::FULL_ACCESS;
    /// assert!(input_caps.contains(PaneCapabilities::EDITABLE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PaneCapabilities: u32 {
        /// Can be edited by the user
        const EDITABLE    = 0b00000001;

        /// Display-only pane
        const READ_ONLY   = 0b00000000;

        /// Editable pane with every capability
        const FULL_ACCESS = Self::EDITABLE.bits();
    }
}
