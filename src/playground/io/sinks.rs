//! # Output Sinks
//!
//! Stdout and file renderings of the Output pane.

use super::OutputSink;
use crate::playground::models::DocumentPane;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Prints the Output document to stdout under a header naming its mode
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl OutputSink for StdoutSink {
    fn render(&mut self, output: &DocumentPane) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "──── output ({}) ────", output.mode())?;
        writeln!(stdout, "{}", output.text())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Overwrites a file with the Output document
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn render(&mut self, output: &DocumentPane) -> Result<()> {
        std::fs::write(&self.path, output.text())
            .with_context(|| format!("Failed to write output to {}", self.path.display()))?;
        tracing::debug!("Output written to {}", self.path.display());
        Ok(())
    }
}

/// Renders to several sinks in order
#[derive(Default)]
pub struct TeeSink {
    sinks: Vec<Box<dyn OutputSink + Send>>,
}

impl TeeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl OutputSink + Send + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl OutputSink for TeeSink {
    fn render(&mut self, output: &DocumentPane) -> Result<()> {
        for sink in &mut self.sinks {
            sink.render(output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playground::events::{HighlightMode, PaneId};
    use crate::playground::io::RecordingSink;

    #[test]
    fn file_sink_should_overwrite_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xml");
        std::fs::write(&path, "stale content that is longer").unwrap();

        let pane = DocumentPane::read_only(PaneId::Output, "<a/>", HighlightMode::Xml);
        FileSink::new(&path).render(&pane).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<a/>");
    }

    #[test]
    fn file_sink_should_report_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xml");

        let pane = DocumentPane::read_only(PaneId::Output, "<a/>", HighlightMode::Xml);
        let err = FileSink::new(&path).render(&pane).unwrap_err();

        assert!(err.to_string().contains("Failed to write output"));
    }

    #[test]
    fn tee_sink_should_render_to_every_sink() {
        let first = RecordingSink::new();
        let second = RecordingSink::new();
        let mut tee = TeeSink::new().with(first.clone()).with(second.clone());

        let pane = DocumentPane::read_only(PaneId::Output, "{}", HighlightMode::Json);
        tee.render(&pane).unwrap();

        assert_eq!(first.renders(), vec![(HighlightMode::Json, "{}".to_string())]);
        assert_eq!(second.renders().len(), 1);
    }
}
