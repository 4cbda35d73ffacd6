// Strong typing over strings. Newtypes for timestamps, landmarks, and screen-space units.
// Everything that crosses the JS boundary derives Serialize/Deserialize.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TrackerError;
use crate::geometry::ScreenRect;
use crate::hand::PinchThresholds;

/// Timestamp in microseconds. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_micros(us: u64) -> Self {
        Timestamp(us)
    }

    /// Video elements report `currentTime` in fractional seconds.
    /// Negative and non-finite inputs collapse to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            Timestamp((secs * 1_000_000.0).round() as u64)
        } else {
            Timestamp(0)
        }
    }

    pub fn as_micros(&self) -> u64 {
        self.0
    }

    pub fn as_secs(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

/// A single tracked hand point in detector space.
/// x/y are normalized to [0, 1]; z is depth relative to the wrist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }
}

/// Which hand the detector believes it is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

/// One detected hand: its label, the detector's confidence, and 21 landmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandDetection {
    pub handedness: Handedness,
    #[serde(default)]
    pub confidence: f32,
    pub landmarks: Vec<Landmark>,
}

impl HandDetection {
    pub fn landmark(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }
}

/// Per-frame output of the vision pipeline. May contain no hands at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DetectionFrame {
    #[serde(default)]
    pub hands: Vec<HandDetection>,
}

impl DetectionFrame {
    pub fn empty() -> Self {
        DetectionFrame { hands: Vec::new() }
    }

    pub fn single(hand: HandDetection) -> Self {
        DetectionFrame { hands: vec![hand] }
    }

    /// The detector's leading hand, if it carries the requested label.
    /// A frame led by any other hand yields nothing.
    pub fn hand(&self, handedness: Handedness) -> Option<&HandDetection> {
        self.hands.first().filter(|h| h.handedness == handedness)
    }
}

/// Screen-space point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        ScreenPoint { x, y }
    }
}

/// Accumulated translation applied to a dragged item, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DragOffset {
    pub dx: f32,
    pub dy: f32,
}

impl DragOffset {
    pub fn new(dx: f32, dy: f32) -> Self {
        DragOffset { dx, dy }
    }

    pub fn zero() -> Self {
        DragOffset { dx: 0.0, dy: 0.0 }
    }

    /// Add the movement from `from` to `to`.
    pub fn accumulate(&mut self, from: ScreenPoint, to: ScreenPoint) {
        self.dx += to.x - from.x;
        self.dy += to.y - from.y;
    }
}

/// Size of the render surface the pointer is projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Cooking state of one item slot. Owned by the game store, read here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookingStatus {
    /// Empty slot; pinching it starts cooking.
    Idle,
    Raw,
    Cooking,
    Done,
    Overcooked,
}

impl CookingStatus {
    /// Only finished items (good or burnt) can be picked up.
    pub fn is_grabbable(&self) -> bool {
        matches!(self, CookingStatus::Done | CookingStatus::Overcooked)
    }
}

/// Game phase as reported by the game store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Countdown / guide screen. Pointer moves, nothing is interactive.
    #[default]
    Ready,
    #[serde(alias = "start")]
    Active,
    #[serde(alias = "end")]
    Ended,
}

impl FromStr for GamePhase {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready" => Ok(GamePhase::Ready),
            "active" | "start" => Ok(GamePhase::Active),
            "ended" | "end" => Ok(GamePhase::Ended),
            other => Err(TrackerError::UnknownPhase(other.to_string())),
        }
    }
}

/// Live view of the game store, refreshed by the caller before each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    #[serde(default)]
    pub item_statuses: Vec<CookingStatus>,
}

impl GameSnapshot {
    pub fn new(phase: GamePhase, item_statuses: Vec<CookingStatus>) -> Self {
        GameSnapshot {
            phase,
            item_statuses,
        }
    }

    pub fn status(&self, index: usize) -> Option<CookingStatus> {
        self.item_statuses.get(index).copied()
    }
}

/// Bounding boxes from the latest layout pass.
/// `None` entries are elements that are not currently mounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LayoutSnapshot {
    #[serde(default)]
    pub pointer_rect: Option<ScreenRect>,
    #[serde(default)]
    pub item_rects: Vec<Option<ScreenRect>>,
}

impl LayoutSnapshot {
    pub fn new(pointer_rect: Option<ScreenRect>, item_rects: Vec<Option<ScreenRect>>) -> Self {
        LayoutSnapshot {
            pointer_rect,
            item_rects,
        }
    }
}

/// Everything the render layer needs to draw the cursor and a dragged item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerOutput {
    pub pointer: ScreenPoint,
    pub pinching: bool,
    pub active_drag_index: Option<usize>,
    pub drag_offset: DragOffset,
}

/// Record of a callback fired into the game store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InteractionEvent {
    /// An idle slot was pinched.
    StartCooking { index: usize },
    /// A dragged item was let go.
    ItemReleased { index: usize },
}

/// Tracker configuration passed from JS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Only hands with this label drive the pointer.
    #[serde(default)]
    pub default_hand: Handedness,
    #[serde(default)]
    pub pinch_thresholds: PinchThresholds,
    #[serde(default)]
    pub viewport: Viewport,
    /// Pointer position before the first hand is seen.
    #[serde(default = "default_initial_pointer")]
    pub initial_pointer: ScreenPoint,
    /// Side of the square hit-region centred on the pointer, used when the
    /// layout does not report the cursor element's own bounds.
    #[serde(default = "default_pointer_hit_size")]
    pub pointer_hit_size: Option<f32>,
}

fn default_initial_pointer() -> ScreenPoint {
    ScreenPoint::new(200.0, 200.0)
}

fn default_pointer_hit_size() -> Option<f32> {
    Some(64.0) // matches the rendered cursor
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            default_hand: Handedness::default(),
            pinch_thresholds: PinchThresholds::default(),
            viewport: Viewport::default(),
            initial_pointer: default_initial_pointer(),
            pointer_hit_size: default_pointer_hit_size(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), TrackerError> {
        let vp = self.viewport;
        if !(vp.width > 0.0 && vp.height > 0.0) {
            return Err(TrackerError::InvalidConfig(format!(
                "viewport must be positive, got {}x{}",
                vp.width, vp.height
            )));
        }
        self.pinch_thresholds.validate()?;
        if let Some(size) = self.pointer_hit_size {
            if !(size >= 0.0) {
                return Err(TrackerError::InvalidConfig(format!(
                    "pointer_hit_size must be non-negative, got {}",
                    size
                )));
            }
        }
        Ok(())
    }
}
