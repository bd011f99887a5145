//! # Playground Controller
//!
//! The single cooperative event loop of the playground. It owns the panes and
//! multiplexes three kinds of work:
//!
//! - user edits arriving on the injected [`PaneEdit`] channel,
//! - the debounce deadline,
//! - completions of transforms in flight.
//!
//! Handlers run one at a time on the loop, so pane state needs no locking.

use crate::playground::coordinator::{CompletionOutcome, TransformCoordinator};
use crate::playground::debouncer::{EditDebouncer, DEFAULT_DEBOUNCE_WINDOW};
use crate::playground::events::{EditEvent, EditOrigin};
use crate::playground::io::{OutputSink, PaneEdit};
use crate::playground::models::PaneSet;
use crate::playground::pretty::Formatters;
use crate::playground::services::TransformClient;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Tunables of the edit pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaygroundSettings {
    pub debounce_window: Duration,
    pub discard_stale: bool,
}

impl Default for PlaygroundSettings {
    fn default() -> Self {
        Self {
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            discard_stale: false,
        }
    }
}

pub struct PlaygroundController<C: TransformClient, S: OutputSink> {
    panes: PaneSet,
    debouncer: EditDebouncer,
    coordinator: TransformCoordinator<C>,
    sink: S,
    inputs: mpsc::Receiver<PaneEdit>,
    inputs_closed: bool,
    edits: mpsc::UnboundedReceiver<EditEvent>,
}

impl<C: TransformClient, S: OutputSink> PlaygroundController<C, S> {
    /// Wire panes, client and sink together
    ///
    /// Each editable pane's edit hook forwards changed edits to the debouncer.
    pub fn new(
        mut panes: PaneSet,
        client: C,
        sink: S,
        inputs: mpsc::Receiver<PaneEdit>,
        settings: PlaygroundSettings,
    ) -> Self {
        let (edit_sender, edits) = mpsc::unbounded_channel();
        for origin in [EditOrigin::Input, EditOrigin::Template] {
            let sender = edit_sender.clone();
            panes.editable_mut(origin).on_edit(Box::new(move |event| {
                if event.changed {
                    // Receiver lives as long as the controller that owns the pane.
                    let _ = sender.send(*event);
                } else {
                    tracing::debug!("Ignoring {} edit without changes", event.origin);
                }
            }));
        }

        tracing::debug!(
            "Playground configured: debounce {:?}, discard stale {}",
            settings.debounce_window,
            settings.discard_stale
        );

        Self {
            panes,
            debouncer: EditDebouncer::new(settings.debounce_window),
            coordinator: TransformCoordinator::new(client).with_discard_stale(settings.discard_stale),
            sink,
            inputs,
            inputs_closed: false,
            edits,
        }
    }

    /// Replace the pretty-printers used for transform results
    pub fn with_formatters(mut self, formatters: Formatters) -> Self {
        self.coordinator = self.coordinator.with_formatters(formatters);
        self
    }

    pub fn panes(&self) -> &PaneSet {
        &self.panes
    }

    pub fn coordinator(&self) -> &TransformCoordinator<C> {
        &self.coordinator
    }

    /// Run until the edit source closes and all pending work has drained
    ///
    /// Sink failures are logged and the loop keeps going.
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!("Playground started");

        loop {
            if self.is_drained() {
                break;
            }

            let deadline = self.debouncer.deadline();
            tokio::select! {
                input = self.inputs.recv(), if !self.inputs_closed => match input {
                    Some(edit) => self.apply_user_edit(edit),
                    None => {
                        tracing::debug!("Edit source closed");
                        self.inputs_closed = true;
                    }
                },
                _ = sleep_until(deadline), if deadline.is_some() => {
                    if let Some(event) = self.debouncer.fire(Instant::now()) {
                        self.coordinator.dispatch(event, &mut self.panes);
                    }
                },
                Some(completion) = self.coordinator.next_completion(), if self.coordinator.in_flight() > 0 => {
                    let outcome = self.coordinator.apply(completion, &mut self.panes);
                    if let Err(e) = self.render(&outcome) {
                        tracing::error!("Failed to render output: {e:#}");
                    }
                },
                else => {}
            }
        }

        tracing::info!("Playground stopped");
        Ok(())
    }

    /// Transform once, as if a debounced edit from `origin` had fired, and
    /// wait for the result
    ///
    /// Unlike [`run`](Self::run), a sink failure is returned to the caller.
    pub async fn run_once(&mut self, origin: EditOrigin) -> Result<Vec<CompletionOutcome>> {
        self.coordinator.dispatch(EditEvent::changed(origin), &mut self.panes);

        let mut outcomes = Vec::new();
        while let Some(completion) = self.coordinator.next_completion().await {
            let outcome = self.coordinator.apply(completion, &mut self.panes);
            self.render(&outcome)?;
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// No more edits can arrive, none is pending and nothing is in flight
    fn is_drained(&self) -> bool {
        self.inputs_closed && !self.debouncer.is_pending() && self.coordinator.in_flight() == 0
    }

    fn apply_user_edit(&mut self, edit: PaneEdit) {
        let PaneEdit { pane, text } = edit;
        if let Err(e) = self.panes.editable_mut(pane).replace_by_user(text) {
            tracing::warn!("Rejected {pane} edit: {e}");
            return;
        }

        let now = Instant::now();
        while let Ok(event) = self.edits.try_recv() {
            self.debouncer.push(event, now);
        }
    }

    fn render(&mut self, outcome: &CompletionOutcome) -> Result<()> {
        if matches!(outcome, CompletionOutcome::Applied { .. }) {
            self.sink.render(&self.panes.output)?;
        }
        Ok(())
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
