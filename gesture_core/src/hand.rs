// Hand geometry: landmark numbering, pinch detection, and screen projection.

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::types::{Landmark, ScreenPoint, Viewport};

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_BASE: usize = 1;
pub const THUMB_MIDDLE: usize = 2;
pub const THUMB_TOP_KNUCKLE: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_BASE: usize = 5;
pub const INDEX_MIDDLE: usize = 6;
pub const INDEX_TOP_KNUCKLE: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_BASE: usize = 9;
pub const MIDDLE_MIDDLE: usize = 10;
pub const MIDDLE_TOP_KNUCKLE: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_BASE: usize = 13;
pub const RING_MIDDLE: usize = 14;
pub const RING_TOP_KNUCKLE: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_BASE: usize = 17;
pub const PINKY_MIDDLE: usize = 18;
pub const PINKY_TOP_KNUCKLE: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Landmark that drives the on-screen pointer. The middle joint of the index
/// finger stays put while the tip moves towards the thumb to pinch.
pub const POINTER_LANDMARK: usize = INDEX_MIDDLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub fn base(&self) -> usize {
        match self {
            Finger::Thumb => THUMB_BASE,
            Finger::Index => INDEX_BASE,
            Finger::Middle => MIDDLE_BASE,
            Finger::Ring => RING_BASE,
            Finger::Pinky => PINKY_BASE,
        }
    }

    pub fn middle(&self) -> usize {
        self.base() + 1
    }

    pub fn top_knuckle(&self) -> usize {
        self.base() + 2
    }

    pub fn tip(&self) -> usize {
        self.base() + 3
    }
}

/// Per-axis distance limits between thumb tip and index tip, in normalized units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchThresholds {
    #[serde(default = "default_xy_threshold")]
    pub x: f32,
    #[serde(default = "default_xy_threshold")]
    pub y: f32,
    /// Depth estimates are noisier, so z gets more slack.
    #[serde(default = "default_z_threshold")]
    pub z: f32,
}

fn default_xy_threshold() -> f32 {
    0.08
}

fn default_z_threshold() -> f32 {
    0.11
}

impl Default for PinchThresholds {
    fn default() -> Self {
        PinchThresholds {
            x: default_xy_threshold(),
            y: default_xy_threshold(),
            z: default_z_threshold(),
        }
    }
}

impl PinchThresholds {
    pub fn validate(&self) -> Result<(), TrackerError> {
        for (axis, value) in [("x", self.x), ("y", self.y), ("z", self.z)] {
            if !(value > 0.0) {
                return Err(TrackerError::InvalidConfig(format!(
                    "pinch threshold {} must be positive, got {}",
                    axis, value
                )));
            }
        }
        Ok(())
    }
}

/// True when thumb tip and index tip are closer than the threshold on every axis.
/// A hand missing either landmark is never pinching.
pub fn is_pinching(landmarks: &[Landmark], thresholds: &PinchThresholds) -> bool {
    let (Some(index_tip), Some(thumb_tip)) = (
        landmarks.get(Finger::Index.tip()),
        landmarks.get(Finger::Thumb.tip()),
    ) else {
        return false;
    };

    (index_tip.x - thumb_tip.x).abs() < thresholds.x
        && (index_tip.y - thumb_tip.y).abs() < thresholds.y
        && (index_tip.z - thumb_tip.z).abs() < thresholds.z
}

/// Map a detector-space landmark to screen pixels. The camera preview is shown
/// mirrored, so x is flipped before scaling.
pub fn project_to_screen(landmark: &Landmark, viewport: &Viewport) -> ScreenPoint {
    ScreenPoint::new(
        (1.0 - landmark.x) * viewport.width,
        landmark.y * viewport.height,
    )
}
