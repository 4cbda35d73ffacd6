// Gesture interaction tracker: per-frame hand landmarks in, pointer / pinch / drag state out.
// Game state is passed in as a snapshot on every call; the tracker never owns it.

use tracing::{debug, trace};

use crate::geometry::ScreenRect;
use crate::hand::{self, POINTER_LANDMARK};
use crate::types::*;

/// Receiver for the two interaction callbacks. Implemented by the game store.
pub trait InteractionSink {
    /// An idle item slot was pinched.
    fn start_cooking_item(&mut self, index: usize);

    /// The item being dragged was released.
    fn on_item_done(&mut self, index: usize);
}

/// Collects callbacks as events, for hosts that prefer polling over callbacks.
impl InteractionSink for Vec<InteractionEvent> {
    fn start_cooking_item(&mut self, index: usize) {
        self.push(InteractionEvent::StartCooking { index });
    }

    fn on_item_done(&mut self, index: usize) {
        self.push(InteractionEvent::ItemReleased { index });
    }
}

/// An item held by a continuous pinch.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    item_index: usize,
    offset: DragOffset,
    last_pointer: ScreenPoint,
}

/// Translates a stream of detection frames into a stable interaction model.
pub struct HandTracker {
    config: TrackerConfig,
    phase: GamePhase,
    pointer: ScreenPoint,
    pinching: bool,
    drag: Option<DragSession>,
}

impl HandTracker {
    pub fn new(config: TrackerConfig) -> Self {
        HandTracker {
            pointer: config.initial_pointer,
            config,
            phase: GamePhase::default(),
            pinching: false,
            drag: None,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Window resized.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.config.viewport = viewport;
    }

    pub fn pointer(&self) -> ScreenPoint {
        self.pointer
    }

    pub fn is_pinching(&self) -> bool {
        self.pinching
    }

    pub fn active_drag_index(&self) -> Option<usize> {
        self.drag.map(|d| d.item_index)
    }

    pub fn drag_offset(&self) -> DragOffset {
        self.drag.map(|d| d.offset).unwrap_or_default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn output(&self) -> TrackerOutput {
        TrackerOutput {
            pointer: self.pointer,
            pinching: self.pinching,
            active_drag_index: self.active_drag_index(),
            drag_offset: self.drag_offset(),
        }
    }

    /// Notify the tracker of a game phase change. Entering `Ended` abandons
    /// any drag in progress without reporting it as released.
    pub fn set_game_phase(&mut self, phase: GamePhase) {
        if phase == self.phase {
            return;
        }
        debug!(from = ?self.phase, to = ?phase, "game phase changed");
        self.phase = phase;

        if phase == GamePhase::Ended {
            if let Some(session) = self.drag.take() {
                debug!(index = session.item_index, "drag abandoned at game end");
            }
        }
    }

    /// Process one detection frame against the current game and layout snapshots.
    pub fn process_frame<S: InteractionSink + ?Sized>(
        &mut self,
        frame: &DetectionFrame,
        game: &GameSnapshot,
        layout: &LayoutSnapshot,
        sink: &mut S,
    ) {
        self.set_game_phase(game.phase);

        let Some(hand) = frame.hand(self.config.default_hand) else {
            trace!(hands = frame.hands.len(), "leading hand is not the default hand");
            return;
        };
        let Some(anchor) = hand.landmark(POINTER_LANDMARK) else {
            trace!(landmarks = hand.landmarks.len(), "pointer landmark missing");
            return;
        };

        let pointer = hand::project_to_screen(anchor, &self.config.viewport);
        self.pointer = pointer;

        if self.phase != GamePhase::Active {
            return;
        }

        self.pinching = hand::is_pinching(&hand.landmarks, &self.config.pinch_thresholds);

        if self.pinching {
            self.continue_pinch(pointer, game, layout, sink);
        } else {
            self.release(sink);
        }

        debug_assert!(
            self.pinching || self.drag.is_none(),
            "drag session survived a released pinch"
        );
    }

    fn continue_pinch<S: InteractionSink + ?Sized>(
        &mut self,
        pointer: ScreenPoint,
        game: &GameSnapshot,
        layout: &LayoutSnapshot,
        sink: &mut S,
    ) {
        if let Some(session) = self.drag.as_mut() {
            session.offset.accumulate(session.last_pointer, pointer);
            session.last_pointer = pointer;
            return;
        }

        let Some(hit_region) = self.hit_region(pointer, layout) else {
            trace!("no pointer hit-region available");
            return;
        };

        let Some(index) = first_overlap(&hit_region, &layout.item_rects) else {
            return;
        };

        match game.status(index) {
            Some(CookingStatus::Idle) => {
                debug!(index, "start cooking");
                sink.start_cooking_item(index);
            }
            Some(status) if status.is_grabbable() => {
                debug!(index, ?status, "drag started");
                self.drag = Some(DragSession {
                    item_index: index,
                    offset: DragOffset::zero(),
                    last_pointer: pointer,
                });
            }
            // Still cooking, or the store reports fewer statuses than slots.
            _ => {}
        }
    }

    fn release<S: InteractionSink + ?Sized>(&mut self, sink: &mut S) {
        if let Some(session) = self.drag.take() {
            debug!(
                index = session.item_index,
                dx = session.offset.dx,
                dy = session.offset.dy,
                "item released"
            );
            sink.on_item_done(session.item_index);
        }
    }

    fn hit_region(&self, pointer: ScreenPoint, layout: &LayoutSnapshot) -> Option<ScreenRect> {
        layout.pointer_rect.or_else(|| {
            self.config
                .pointer_hit_size
                .map(|size| ScreenRect::centered(pointer, size))
        })
    }
}

impl Default for HandTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

/// Lowest index whose rect overlaps `region`. Unmounted slots are skipped.
fn first_overlap(region: &ScreenRect, items: &[Option<ScreenRect>]) -> Option<usize> {
    items.iter().enumerate().find_map(|(i, rect)| match rect {
        Some(rect) if region.overlaps(rect) => Some(i),
        _ => None,
    })
}
