// Admits one processing call per distinct video timestamp.
// The capture loop ticks once per animation frame, which is often faster than the camera.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::Timestamp;

/// Admitted / skipped counters since the last reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FrameGateStats {
    pub admitted: u64,
    pub skipped: u64,
}

/// Deduplicates repeated video timestamps before frames reach the tracker.
#[derive(Debug, Default)]
pub struct FrameGate {
    last: Option<Timestamp>,
    stats: FrameGateStats,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `video_time` differs from the last admitted timestamp.
    pub fn admit(&mut self, video_time: Timestamp) -> bool {
        if self.last == Some(video_time) {
            self.stats.skipped += 1;
            trace!(us = video_time.as_micros(), "duplicate video frame skipped");
            return false;
        }
        self.last = Some(video_time);
        self.stats.admitted += 1;
        true
    }

    /// Forget the last timestamp, e.g. after the capture stream restarts.
    pub fn reset(&mut self) {
        self.last = None;
        self.stats = FrameGateStats::default();
    }

    pub fn last_admitted(&self) -> Option<Timestamp> {
        self.last
    }

    pub fn stats(&self) -> FrameGateStats {
        self.stats
    }
}
