//! # Transform Coordinator
//!
//! Turns a debounced edit into a transform call and applies the result.
//!
//! Per invocation: `Idle → Dispatched → (Applying | Failed) → Idle`.
//!
//! Invocations are independent. A new edit does not wait for, queue behind or
//! cancel one already in flight, and by default whichever response is applied
//! last owns the Output pane, even if it was dispatched first. With
//! `discard_stale` enabled, a completion older than the newest applied one is
//! dropped instead.

use crate::playground::events::{EditEvent, EditOrigin, HighlightMode};
use crate::playground::models::{BusyGuard, PaneSet};
use crate::playground::pretty::Formatters;
use crate::playground::services::{
    TransformClient, TransformError, TransformRequest, TransformResponse,
};
use crate::playground::sniffer;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Result of a finished transform call, waiting to be applied
#[derive(Debug)]
pub struct TransformCompletion {
    pub invocation: u64,
    pub origin: EditOrigin,
    pub outcome: Result<TransformResponse, TransformError>,
    busy: BusyGuard,
}

/// What applying a completion did to the Output pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Output now shows the response, classified as `mode`
    Applied { invocation: u64, mode: HighlightMode },
    /// The call failed; Output is unchanged
    Failed { invocation: u64, message: String },
    /// A newer result was already applied; Output is unchanged
    Discarded { invocation: u64 },
}

pub struct TransformCoordinator<C: TransformClient> {
    client: Arc<C>,
    formatters: Formatters,
    discard_stale: bool,
    in_flight: JoinSet<TransformCompletion>,
    next_invocation: u64,
    newest_applied: Option<u64>,
}

impl<C: TransformClient> TransformCoordinator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
            formatters: Formatters::default(),
            discard_stale: false,
            in_flight: JoinSet::new(),
            next_invocation: 1,
            newest_applied: None,
        }
    }

    pub fn with_formatters(mut self, formatters: Formatters) -> Self {
        self.formatters = formatters;
        self
    }

    /// Drop completions that arrive after a newer one was applied
    pub fn with_discard_stale(mut self, discard_stale: bool) -> Self {
        self.discard_stale = discard_stale;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Number of transform calls that have not been collected yet
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Start a transform for a debounced edit
    ///
    /// Raises the busy cue, snapshots Template and Input, and spawns the call
    /// on the current tokio runtime without waiting for it. A Template edit
    /// also re-infers the Input mode from the template's payload declaration,
    /// whatever the call's outcome. Returns the invocation id.
    pub fn dispatch(&mut self, event: EditEvent, panes: &mut PaneSet) -> u64 {
        let invocation = self.next_invocation;
        self.next_invocation += 1;

        let busy = panes.output.busy_cue().acquire();
        let request = TransformRequest::new(panes.template.text(), panes.input.text());
        let client = Arc::clone(&self.client);
        let origin = event.origin;

        tracing::debug!("Dispatching transform #{invocation} for {origin} edit");
        self.in_flight.spawn(async move {
            let outcome = client.send(request).await;
            TransformCompletion {
                invocation,
                origin,
                outcome,
                busy,
            }
        });

        if origin == EditOrigin::Template {
            Self::infer_input_mode(panes);
        }

        invocation
    }

    /// Wait for the next finished call
    ///
    /// Returns `None` once nothing is in flight. A call whose task died is
    /// reported and skipped; its busy guard was released when it unwound.
    pub async fn next_completion(&mut self) -> Option<TransformCompletion> {
        loop {
            match self.in_flight.join_next().await? {
                Ok(completion) => return Some(completion),
                Err(e) => tracing::error!("Transform task ended abnormally: {e}"),
            }
        }
    }

    /// Apply a finished call to the Output pane and release its busy cue
    pub fn apply(&mut self, completion: TransformCompletion, panes: &mut PaneSet) -> CompletionOutcome {
        let TransformCompletion {
            invocation,
            origin,
            outcome,
            busy,
        } = completion;
        // Released on return, on every path below.
        let _busy = busy;

        if self.discard_stale && self.newest_applied.is_some_and(|newest| invocation < newest) {
            tracing::warn!("Discarding stale transform #{invocation} ({origin} edit)");
            return CompletionOutcome::Discarded { invocation };
        }

        match outcome {
            Ok(response) => {
                let mode = sniffer::classify(&response.content_type);
                let text = self.formatters.format(mode, &response.body);

                if mode.is_structured() {
                    panes.output.set_mode(mode);
                }
                panes.output.set_text(text);
                self.newest_applied = Some(self.newest_applied.map_or(invocation, |n| n.max(invocation)));

                tracing::info!(
                    "Transform #{invocation} applied: {} ({} mode)",
                    response.content_type,
                    panes.output.mode()
                );
                CompletionOutcome::Applied { invocation, mode }
            }
            Err(e) => {
                tracing::error!("Transform #{invocation} ({origin} edit) failed: {e}");
                CompletionOutcome::Failed {
                    invocation,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Collect and apply every call still in flight
    pub async fn settle(&mut self, panes: &mut PaneSet) -> Vec<CompletionOutcome> {
        let mut outcomes = Vec::new();
        while let Some(completion) = self.next_completion().await {
            outcomes.push(self.apply(completion, panes));
        }
        outcomes
    }

    fn infer_input_mode(panes: &mut PaneSet) {
        match sniffer::classify_payload_declaration(panes.template.text()) {
            Some(mode) if mode.is_structured() => {
                if panes.input.set_mode(mode) {
                    tracing::info!("Input mode switched to {mode}");
                }
            }
            Some(_) => tracing::debug!("Payload declaration names no known format"),
            None => tracing::debug!("Template has no input payload declaration"),
        }
    }
}
