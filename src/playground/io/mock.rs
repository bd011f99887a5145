//! # Mock Output Sink
//!
//! Records every rendering of the Output pane for later verification.

use super::OutputSink;
use crate::playground::events::HighlightMode;
use crate::playground::models::DocumentPane;
use anyhow::Result;
use std::sync::{Arc, Mutex};

/// Type alias for render history
type RenderHistory = Arc<Mutex<Vec<(HighlightMode, String)>>>;

/// Sink that keeps `(mode, text)` for each render
///
/// Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    history: RenderHistory,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(&self) -> Vec<(HighlightMode, String)> {
        self.history.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(HighlightMode, String)> {
        self.history.lock().unwrap().last().cloned()
    }
}

impl OutputSink for RecordingSink {
    fn render(&mut self, output: &DocumentPane) -> Result<()> {
        self.history
            .lock()
            .unwrap()
            .push((output.mode(), output.text().to_string()));
        Ok(())
    }
}
