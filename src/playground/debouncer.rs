//! # Edit Debouncer
//!
//! Coalesces a burst of edit events into one downstream signal carrying the
//! most recent event. Two states:
//!
//! ```text
//!   Idle ──edit──▶ Pending(deadline = now + W, latest)
//!   Pending ──edit──▶ Pending(deadline = now + W, latest = edit)
//!   Pending ──deadline reached──▶ emit latest, Idle
//! ```
//!
//! Every edit pushes the deadline out again and there is no maximum wait, so
//! a continuous burst suppresses emission for as long as it lasts.
//!
//! The debouncer holds no timer itself; the owner sleeps until
//! [`EditDebouncer::deadline`] and then calls [`EditDebouncer::fire`].

use crate::playground::events::EditEvent;
use std::time::Duration;
use tokio::time::Instant;

/// Quiescence window used when none is configured
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Idle,
    Pending { deadline: Instant, latest: EditEvent },
}

#[derive(Debug, Clone)]
pub struct EditDebouncer {
    window: Duration,
    state: DebounceState,
}

impl EditDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: DebounceState::Idle,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record an edit at `now`, restarting the quiescence window
    pub fn push(&mut self, event: EditEvent, now: Instant) {
        let deadline = now + self.window;
        if let DebounceState::Pending { latest, .. } = self.state {
            tracing::trace!("Debounce restarted: {:?} superseded by {:?}", latest, event);
        }
        self.state = DebounceState::Pending {
            deadline,
            latest: event,
        };
    }

    /// When the pending event is due, if any
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Idle => None,
            DebounceState::Pending { deadline, .. } => Some(deadline),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// Emit the latest event if its window has elapsed at `now`
    pub fn fire(&mut self, now: Instant) -> Option<EditEvent> {
        match self.state {
            DebounceState::Pending { deadline, latest } if now >= deadline => {
                self.state = DebounceState::Idle;
                tracing::debug!("Debounce window elapsed, emitting {:?}", latest);
                Some(latest)
            }
            _ => None,
        }
    }
}

impl Default for EditDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playground::events::EditOrigin;

    const W: Duration = Duration::from_millis(1000);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn debouncer_should_start_idle() {
        let mut debouncer = EditDebouncer::new(W);

        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.fire(Instant::now()), None);
    }

    #[test]
    fn burst_should_emit_only_latest_event_once() {
        let mut debouncer = EditDebouncer::new(W);
        let t0 = Instant::now();

        debouncer.push(EditEvent::changed(EditOrigin::Input), t0);
        debouncer.push(EditEvent::changed(EditOrigin::Input), t0 + ms(400));
        debouncer.push(EditEvent::changed(EditOrigin::Template), t0 + ms(900));

        assert_eq!(debouncer.fire(t0 + ms(1000)), None);
        assert_eq!(debouncer.deadline(), Some(t0 + ms(1900)));

        assert_eq!(
            debouncer.fire(t0 + ms(1900)),
            Some(EditEvent::changed(EditOrigin::Template))
        );
        assert_eq!(debouncer.fire(t0 + ms(5000)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn spaced_events_should_each_be_emitted() {
        let mut debouncer = EditDebouncer::new(W);
        let t0 = Instant::now();
        let mut emitted = Vec::new();

        for n in 0..3u64 {
            let at = t0 + ms(n * 1500);
            debouncer.push(EditEvent::changed(EditOrigin::Input), at);
            emitted.extend(debouncer.fire(at + W));
        }

        assert_eq!(emitted.len(), 3);
    }

    #[test]
    fn continuous_burst_should_keep_suppressing() {
        let mut debouncer = EditDebouncer::new(W);
        let t0 = Instant::now();

        for n in 0..20u64 {
            let at = t0 + ms(n * 900);
            assert_eq!(debouncer.fire(at), None);
            debouncer.push(EditEvent::changed(EditOrigin::Input), at);
        }

        assert_eq!(debouncer.deadline(), Some(t0 + ms(19 * 900) + W));
    }

    #[test]
    fn default_window_should_be_one_second() {
        assert_eq!(EditDebouncer::default().window(), ms(1000));
    }
}
