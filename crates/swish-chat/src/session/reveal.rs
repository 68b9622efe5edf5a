//! Progressive reveal of a complete response string.
//!
//! The backend returns the whole response in one body; the widget emulates
//! token streaming by growing the visible content of the placeholder
//! message on a fixed cadence. No data arrives incrementally; this is
//! presentation only.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use swish_common::{EventBus, WidgetEvent};

use super::transcript::{RevealHandle, Transcript};

/// Characters revealed per step.
pub(super) const REVEAL_CHUNK_CHARS: usize = 5;
/// Wall-clock cadence between steps.
pub(super) const REVEAL_INTERVAL: Duration = Duration::from_millis(50);

/// Number of steps needed to reveal `s` completely.
fn total_steps(s: &str) -> usize {
    s.chars().count().div_ceil(REVEAL_CHUNK_CHARS)
}

/// Visible prefix after step `step` (0-indexed): the first
/// `min((step + 1) * chunk, len)` characters, sliced on char boundaries.
fn reveal_prefix(s: &str, step: usize) -> &str {
    let visible_chars = (step + 1) * REVEAL_CHUNK_CHARS;
    match s.char_indices().nth(visible_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// Run the reveal as a background task: `ceil(len / chunk)` timed steps,
/// each growing the target's visible content, then stop. The handle goes
/// stale if a newer exchange takes the slot, turning remaining steps into
/// no-ops; cancellation stops the timer between ticks.
pub(super) fn spawn_reveal(
    transcript: Arc<Mutex<Transcript>>,
    bus: EventBus,
    handle: RevealHandle,
    full: String,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let steps = total_steps(&full);
        let mut interval = tokio::time::interval(REVEAL_INTERVAL);
        // The first tick of a tokio interval completes immediately; consume
        // it so every step waits a full period.
        interval.tick().await;

        for step in 0..steps {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = interval.tick() => {}
            }

            let visible = reveal_prefix(&full, step);
            let mut transcript = transcript.lock().await;
            if transcript.apply_reveal(handle, visible) {
                bus.publish(WidgetEvent::MessageUpdated(handle.message_id()));
            }
        }

        transcript.lock().await.finish_reveal(handle);
    })
}
