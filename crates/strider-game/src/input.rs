//! Input system with action-based mapping
//!
//! Binding physical keys to actions is the application shell's job; the rig only
//! sees named logical actions plus the two analog vectors.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical actions the rig reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward
    Forward,
    /// Move backward
    Backward,
    /// Strafe left
    Left,
    /// Strafe right
    Right,
    /// Jump
    Jump,
    /// Sprint modifier
    Run,
    /// Crouch while held
    Duck,
    /// Toggle first/third person
    View,
}

/// Read-only view of the input for one frame
pub trait InputSource {
    /// Whether `action` is held
    fn down(&self, action: InputAction) -> bool;

    /// Whether `action` went down this frame
    fn pressed(&self, action: InputAction) -> bool;

    /// Whether `action` went up this frame
    fn released(&self, action: InputAction) -> bool;

    /// Mouse/stick look delta for this frame
    fn look_delta(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Analog move axis (x = forward, y = left)
    fn move_axis(&self) -> Vec2 {
        Vec2::ZERO
    }
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
    /// Look delta accumulated this frame
    pub look_delta: Vec2,
    /// Analog move axis
    pub move_axis: Vec2,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `action` going down. Cancels a release of the same action seen
    /// earlier this frame.
    pub fn press(&mut self, action: InputAction) {
        if self.held.insert(action) {
            self.just_released.remove(&action);
            self.just_pressed.insert(action);
        }
    }

    /// Record `action` going up
    pub fn release(&mut self, action: InputAction) {
        if self.held.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Accumulate look movement for this frame
    pub fn add_look_delta(&mut self, delta: Vec2) {
        self.look_delta += delta;
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.look_delta = Vec2::ZERO;
    }
}

impl InputSource for InputState {
    fn down(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    fn pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    fn released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    fn look_delta(&self) -> Vec2 {
        self.look_delta
    }

    fn move_axis(&self) -> Vec2 {
        self.move_axis
    }
}

/// Input as seen by the fixed-rate tick.
///
/// Visual frames and fixed ticks run at different rates, so a frame may run no
/// tick at all. Edges are collected here from every frame and held until a tick
/// consumes them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    held: HashSet<InputAction>,
    pressed: HashSet<InputAction>,
    released: HashSet<InputAction>,
    move_axis: Vec2,
}

impl TickInput {
    /// Create an empty latch
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one visual frame of input (call once per frame, before ticking)
    pub fn collect(&mut self, frame: &InputState) {
        self.held.clone_from(&frame.held);
        self.move_axis = frame.move_axis;

        for action in &frame.just_pressed {
            self.released.remove(action);
            self.pressed.insert(*action);
        }
        // A release in the same frame as a press came after it
        self.released.extend(frame.just_released.iter().copied());
    }

    /// Drop the edges a tick has used
    pub fn consume(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }
}

impl InputSource for TickInput {
    fn down(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    fn pressed(&self, action: InputAction) -> bool {
        self.pressed.contains(&action)
    }

    fn released(&self, action: InputAction) -> bool {
        self.released.contains(&action)
    }

    fn move_axis(&self) -> Vec2 {
        self.move_axis
    }
}
