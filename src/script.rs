//! Scripted input timeline for headless runs

use glam::Vec2;
use strider_game::{InputAction, InputState};

/// One input change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    Press(InputAction),
    Release(InputAction),
    /// Look delta applied on a single frame
    Look(Vec2),
}

/// A cue at a point in the timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptEvent {
    /// Seconds from the start of the run
    pub at: f32,
    pub cue: Cue,
    /// Milestone name logged when the cue fires
    pub label: &'static str,
}

impl ScriptEvent {
    pub fn new(at: f32, cue: Cue, label: &'static str) -> Self {
        Self { at, cue, label }
    }
}

/// Time-ordered input script
#[derive(Debug, Clone)]
pub struct InputScript {
    events: Vec<ScriptEvent>,
    cursor: usize,
}

impl InputScript {
    pub fn new(mut events: Vec<ScriptEvent>) -> Self {
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { events, cursor: 0 }
    }

    /// Walk, run, crouch, jump, then turn around and back the camera into a wall
    pub fn demo() -> Self {
        use Cue::*;
        use InputAction::*;

        Self::new(vec![
            ScriptEvent::new(0.0, Press(Forward), "walk"),
            ScriptEvent::new(1.0, Press(Run), "run"),
            ScriptEvent::new(2.0, Release(Run), "stop running"),
            ScriptEvent::new(2.0, Press(Duck), "crouch"),
            ScriptEvent::new(3.0, Release(Duck), "stand"),
            ScriptEvent::new(3.5, Press(Jump), "jump"),
            ScriptEvent::new(3.6, Release(Jump), "jump released"),
            ScriptEvent::new(4.5, Release(Forward), "stop"),
            ScriptEvent::new(5.0, Look(Vec2::new(-1800.0, 0.0)), "turn around"),
            ScriptEvent::new(5.5, Press(View), "third person"),
            ScriptEvent::new(5.6, Release(View), "view released"),
            ScriptEvent::new(6.0, Look(Vec2::new(0.0, -200.0)), "look up"),
        ])
    }

    /// Time of the last cue
    pub fn duration(&self) -> f32 {
        self.events.last().map_or(0.0, |event| event.at)
    }

    /// Check if every cue has fired
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }

    /// Fire every cue due by `now` into `input`, returning what fired
    pub fn advance(&mut self, now: f32, input: &mut InputState) -> Vec<ScriptEvent> {
        let mut fired = Vec::new();
        while let Some(event) = self.events.get(self.cursor) {
            if event.at > now {
                break;
            }
            match event.cue {
                Cue::Press(action) => input.press(action),
                Cue::Release(action) => input.release(action),
                Cue::Look(delta) => input.add_look_delta(delta),
            }
            fired.push(*event);
            self.cursor += 1;
        }
        fired
    }
}
