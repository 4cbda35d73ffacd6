// gesture_core: hand-gesture interaction tracker for the motion-controlled cooking game.
// Landmarks in, pointer / pinch / drag state and game callbacks out. JS owns capture,
// inference, layout, and game rules; this crate owns the interaction state machine.

pub mod error;
pub mod frame_gate;
pub mod geometry;
pub mod hand;
pub mod tracker;
mod types;

use js_sys::Function;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

pub use error::TrackerError;
pub use frame_gate::{FrameGate, FrameGateStats};
pub use geometry::ScreenRect;
pub use tracker::{HandTracker, InteractionSink};
pub use types::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Parse and validate tracker configuration JSON. `{}` yields the defaults.
pub fn parse_config(config_json: &str) -> Result<TrackerConfig, TrackerError> {
    let config: TrackerConfig = serde_json::from_str(config_json)
        .map_err(|e| TrackerError::InvalidConfig(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

pub fn parse_frame(frame_json: &str) -> Result<DetectionFrame, TrackerError> {
    serde_json::from_str(frame_json).map_err(|e| TrackerError::InvalidFrame(e.to_string()))
}

pub fn parse_game(game_json: &str) -> Result<GameSnapshot, TrackerError> {
    serde_json::from_str(game_json).map_err(|e| TrackerError::InvalidSnapshot(e.to_string()))
}

pub fn parse_layout(layout_json: &str) -> Result<LayoutSnapshot, TrackerError> {
    serde_json::from_str(layout_json).map_err(|e| TrackerError::InvalidSnapshot(e.to_string()))
}

/// Result of one `process_frame` call, returned to JS as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameResult {
    pub output: TrackerOutput,
    pub events: Vec<InteractionEvent>,
}

fn to_js(err: TrackerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Forwards tracker callbacks to JS functions while recording them as events.
/// The first callback that throws is kept and reported once the frame completes.
struct JsSink<'a> {
    start_cooking: Option<&'a Function>,
    item_done: Option<&'a Function>,
    events: Vec<InteractionEvent>,
    error: Option<JsValue>,
}

impl JsSink<'_> {
    fn call(&mut self, callback: Option<&Function>, index: usize) {
        let Some(callback) = callback else {
            return;
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from(index as u32)) {
            self.error.get_or_insert(err);
        }
    }
}

impl InteractionSink for JsSink<'_> {
    fn start_cooking_item(&mut self, index: usize) {
        self.events.push(InteractionEvent::StartCooking { index });
        self.call(self.start_cooking, index);
    }

    fn on_item_done(&mut self, index: usize) {
        self.events.push(InteractionEvent::ItemReleased { index });
        self.call(self.item_done, index);
    }
}

/// Tracker interface exposed to JavaScript.
/// Batch interface: one JSON crossing per frame for frame, game state, and layout.
#[wasm_bindgen]
pub struct WasmHandTracker {
    tracker: HandTracker,
    gate: FrameGate,
    start_cooking: Option<Function>,
    item_done: Option<Function>,
}

#[wasm_bindgen]
impl WasmHandTracker {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmHandTracker, JsValue> {
        let config = parse_config(config_json).map_err(to_js)?;

        Ok(WasmHandTracker {
            tracker: HandTracker::new(config),
            gate: FrameGate::new(),
            start_cooking: None,
            item_done: None,
        })
    }

    /// Register the game store's callbacks. Each receives the item index.
    pub fn set_callbacks(&mut self, start_cooking: Function, item_done: Function) {
        self.start_cooking = Some(start_cooking);
        self.item_done = Some(item_done);
    }

    /// True when `video_time_secs` (the video element's `currentTime`) is a new frame.
    pub fn should_process(&mut self, video_time_secs: f64) -> bool {
        self.gate.admit(Timestamp::from_secs_f64(video_time_secs))
    }

    /// Capture restarted: forget the last video timestamp.
    pub fn reset_frame_gate(&mut self) {
        self.gate.reset();
    }

    /// Process one detection frame. Returns JSON `{ output, events }`.
    pub fn process_frame(
        &mut self,
        frame_json: &str,
        game_json: &str,
        layout_json: &str,
    ) -> Result<String, JsValue> {
        let frame = parse_frame(frame_json).map_err(to_js)?;
        let game = parse_game(game_json).map_err(to_js)?;
        let layout = parse_layout(layout_json).map_err(to_js)?;

        let mut sink = JsSink {
            start_cooking: self.start_cooking.as_ref(),
            item_done: self.item_done.as_ref(),
            events: Vec::new(),
            error: None,
        };
        self.tracker.process_frame(&frame, &game, &layout, &mut sink);

        if let Some(err) = sink.error {
            return Err(err);
        }

        let result = FrameResult {
            output: self.tracker.output(),
            events: sink.events,
        };
        serde_json::to_string(&result)
            .map_err(|e| to_js(TrackerError::from(e)))
    }

    /// Push a game phase change without waiting for the next frame.
    pub fn set_game_phase(&mut self, phase: &str) -> Result<(), JsValue> {
        let phase: GamePhase = phase.parse().map_err(to_js)?;
        self.tracker.set_game_phase(phase);
        Ok(())
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        if !(width > 0.0 && height > 0.0) {
            return Err(to_js(TrackerError::InvalidConfig(format!(
                "viewport must be positive, got {}x{}",
                width, height
            ))));
        }
        self.tracker.set_viewport(Viewport::new(width, height));
        Ok(())
    }

    pub fn pointer_x(&self) -> f32 {
        self.tracker.pointer().x
    }

    pub fn pointer_y(&self) -> f32 {
        self.tracker.pointer().y
    }

    pub fn is_pinching(&self) -> bool {
        self.tracker.is_pinching()
    }

    pub fn active_drag_index(&self) -> Option<u32> {
        self.tracker.active_drag_index().map(|i| i as u32)
    }

    pub fn drag_offset_x(&self) -> f32 {
        self.tracker.drag_offset().dx
    }

    pub fn drag_offset_y(&self) -> f32 {
        self.tracker.drag_offset().dy
    }

    /// Current tracker state as JSON, for renderers that poll.
    pub fn output_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.tracker.output())
            .map_err(|e| to_js(TrackerError::from(e)))
    }
}
