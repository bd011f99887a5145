//! # File Edit Source
//!
//! Turns saves of the Input and Template files into [`PaneEdit`] messages.
//!
//! Each file's parent directory is watched rather than the file itself, so
//! editors that save by writing a temporary file and renaming it over the
//! original are still observed.

use super::PaneEdit;
use crate::playground::events::EditOrigin;
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// A file backing one of the editable panes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedFile {
    pub pane: EditOrigin,
    pub path: PathBuf,
}

impl WatchedFile {
    pub fn new(pane: EditOrigin, path: impl Into<PathBuf>) -> Self {
        Self {
            pane,
            path: path.into(),
        }
    }
}

/// Read the initial document of a pane
pub fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Start watching `files`, sending their new content to `sender` on change
///
/// The returned watcher must be kept alive for as long as edits should flow.
pub fn watch_files(files: &[WatchedFile], sender: mpsc::Sender<PaneEdit>) -> Result<RecommendedWatcher> {
    let mut targets = Vec::with_capacity(files.len());
    for file in files {
        let path = file
            .path
            .canonicalize()
            .with_context(|| format!("Cannot watch {}", file.path.display()))?;
        targets.push(WatchedFile::new(file.pane, path));
    }

    let mut dirs: Vec<PathBuf> = targets
        .iter()
        .filter_map(|file| file.path.parent().map(Path::to_path_buf))
        .collect();
    dirs.sort();
    dirs.dedup();

    let handler_targets = targets.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => forward_event(&event, &handler_targets, &sender),
        Err(e) => tracing::warn!("File watch error: {e}"),
    })
    .context("Failed to create file watcher")?;

    for dir in &dirs {
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
        tracing::debug!("Watching {}", dir.display());
    }

    for file in &targets {
        tracing::info!("Editing {} pane from {}", file.pane, file.path.display());
    }

    Ok(watcher)
}

/// Send the current content of every target touched by `event`
///
/// Runs on the watcher's own thread, outside the tokio runtime.
fn forward_event(event: &Event, targets: &[WatchedFile], sender: &mpsc::Sender<PaneEdit>) {
    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
        return;
    }

    for target in targets {
        if !event.paths.iter().any(|path| path == &target.path) {
            continue;
        }

        match std::fs::read_to_string(&target.path) {
            Ok(text) => {
                if sender.blocking_send(PaneEdit::new(target.pane, text)).is_err() {
                    tracing::debug!("Playground stopped, dropping {} edit", target.pane);
                }
            }
            Err(e) => tracing::warn!("Could not read {}: {e}", target.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, DataChange, ModifyKind};

    fn modify_event(path: &Path) -> Event {
        Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content))).add_path(path.to_path_buf())
    }

    #[test]
    fn forward_event_should_send_content_of_modified_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.xtr");
        std::fs::write(&path, "input payload application/xml").unwrap();
        let targets = vec![WatchedFile::new(EditOrigin::Template, &path)];
        let (sender, mut receiver) = mpsc::channel(4);

        forward_event(&modify_event(&path), &targets, &sender);

        assert_eq!(
            receiver.try_recv().unwrap(),
            PaneEdit::new(EditOrigin::Template, "input payload application/xml")
        );
    }

    #[test]
    fn forward_event_should_ignore_other_files_and_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        let other = dir.path().join("notes.txt");
        std::fs::write(&path, "{}").unwrap();
        let targets = vec![WatchedFile::new(EditOrigin::Input, &path)];
        let (sender, mut receiver) = mpsc::channel(4);

        forward_event(&modify_event(&other), &targets, &sender);
        forward_event(
            &Event::new(EventKind::Access(AccessKind::Any)).add_path(path.clone()),
            &targets,
            &sender,
        );

        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn forward_event_should_survive_closed_playground() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(&path, "{}").unwrap();
        let targets = vec![WatchedFile::new(EditOrigin::Input, &path)];
        let (sender, receiver) = mpsc::channel(4);
        drop(receiver);

        forward_event(&modify_event(&path), &targets, &sender);
    }

    #[test]
    fn watch_files_should_reject_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (sender, _receiver) = mpsc::channel(4);

        let result = watch_files(
            &[WatchedFile::new(EditOrigin::Input, dir.path().join("missing.json"))],
            sender,
        );

        assert!(result.unwrap_err().to_string().contains("Cannot watch"));
    }

    #[test]
    fn read_document_should_name_missing_file() {
        let err = read_document(Path::new("/definitely/not/here.json")).unwrap_err();

        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
