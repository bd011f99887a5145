//! Shared helpers for the playground integration tests.

#![allow(dead_code)]

use std::time::Duration;
use tokio::sync::mpsc;
use xtrplay::playground::io::RecordingSink;
use xtrplay::playground::models::BusyCue;
use xtrplay::playground::services::ScriptedTransformClient;
use xtrplay::{PaneEdit, PaneSet, PlaygroundController, PlaygroundSettings};

/// Debounce window used by the tests
pub const W: Duration = Duration::from_millis(1000);

pub const TEMPLATE: &str = "input payload application/json\noutput application/xml\n{root: payload}";

pub type TestController = PlaygroundController<ScriptedTransformClient, RecordingSink>;

/// A controller wired to a scripted client and a recording sink
pub struct Harness {
    pub controller: TestController,
    pub sender: mpsc::Sender<PaneEdit>,
    pub sink: RecordingSink,
    /// Shares its flag with the Output pane's busy cue
    pub busy: BusyCue,
}

pub fn harness(client: &ScriptedTransformClient, panes: PaneSet) -> Harness {
    harness_with(client, panes, PlaygroundSettings::default())
}

pub fn harness_with(
    client: &ScriptedTransformClient,
    panes: PaneSet,
    settings: PlaygroundSettings,
) -> Harness {
    let (sender, receiver) = mpsc::channel(64);
    let sink = RecordingSink::new();
    let busy = panes.output.busy_cue().clone();
    let controller = PlaygroundController::new(panes, client.clone(), sink.clone(), receiver, settings);

    Harness {
        controller,
        sender,
        sink,
        busy,
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
