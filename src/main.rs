//! Strider - First/third-person character locomotion and camera rig
//!
//! Headless demo: builds a small rapier world, plays a scripted input timeline
//! through the rig and prints the final animation parameters as JSON.

mod script;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::Vec3;
use tracing::{info, trace};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use strider_core::{GameTime, LookAngles};
use strider_game::{
    AnimationParameters, AnimationSink, CameraRig, InputState, LocomotionController, TickInput,
    VisualBody,
};
use strider_physics::{CharacterController, PhysicsWorld};

use script::InputScript;
use settings::Settings;

/// Seconds the demo keeps running after the last cue
const SETTLE_TIME: f32 = 1.0;

/// Animation sink that only logs
#[derive(Debug, Default)]
struct LoggingAnimation {
    frames: u64,
}

impl AnimationSink for LoggingAnimation {
    fn apply(&mut self, params: &AnimationParameters) {
        self.frames += 1;
        trace!(frame = self.frames, duck = params.duck_level, "animation parameters");
    }

    fn trigger_jump(&mut self) {
        info!(frame = self.frames, "Jump animation triggered");
    }
}

/// Static scene: ground, a wall behind where the run ends, and a trigger
/// volume in front of the wall that the camera must see through
fn build_world(physics: &mut PhysicsWorld) {
    physics.create_ground(0.0);
    physics.create_static_box(Vec3::new(4.0, 200.0, 100.0), Vec3::new(900.0, 0.0, 100.0));
    physics.create_trigger_box(Vec3::new(10.0, 50.0, 100.0), Vec3::new(870.0, 0.0, 100.0));
    physics.refresh_queries();
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--save-settings") {
        let path = Settings::default().save().context("Failed to save settings")?;
        println!("{}", path.display());
        return Ok(());
    }

    info!("Starting Strider rig demo...");
    let settings = Settings::load(arg.map(PathBuf::from).as_deref());

    let mut game_time = GameTime::new(settings.time.clone()).context("Invalid time settings")?;
    let mut physics = PhysicsWorld::with_config(settings.physics.clone());
    build_world(&mut physics);

    let mut character = CharacterController::with_config(settings.character.clone());
    let collider = character.spawn(&mut physics, Vec3::new(0.0, 0.0, 1.0));

    let mut player = LocomotionController::builder(settings.movement.clone())
        .gravity(settings.physics.gravity)
        .body(VisualBody::default())
        .animation(LoggingAnimation::default())
        .build()
        .context("Invalid movement tuning")?;

    let mut camera =
        CameraRig::with_config(settings.camera.clone()).context("Invalid camera settings")?;
    camera.track_collider(Some(collider));

    let mut look = LookAngles::ZERO;
    let mut input = InputState::new();
    let mut tick_input = TickInput::new();
    let mut script = InputScript::demo();
    let end_time = script.duration() + SETTLE_TIME;

    // Visual frames run faster than the fixed tick; edges reach the tick via the latch
    let frame_dt = 1.0 / 144.0;
    let mut elapsed = 0.0;
    let mut last_params = None;

    while elapsed < end_time {
        for event in script.advance(elapsed, &mut input) {
            info!(
                at = event.at,
                position = ?character.position,
                velocity = ?player.state().velocity,
                grounded = player.state().grounded,
                "{}",
                event.label
            );
        }

        tick_input.collect(&input);
        game_time.update(frame_dt);
        for _ in 0..game_time.fixed_steps() {
            let mut body = character.bind(&mut physics);
            player.fixed_update(Some(&mut body), &tick_input, &look, game_time.fixed_delta());
            tick_input.consume();
            physics.step();
        }

        let head = camera.head_anchor(character.position);
        let crouching = player.is_crouching();
        camera.update(
            &input,
            &mut look,
            head,
            crouching,
            Some(&physics),
            player.body_mut(),
            frame_dt,
        );

        let body = character.bind(&mut physics);
        last_params = Some(player.update_animation(Some(&body), &look));

        input.clear_frame();
        elapsed += frame_dt;
    }

    info!(
        frames = game_time.frame_count,
        position = ?character.position,
        camera = ?camera.position(),
        camera_distance = camera.resolved_distance(),
        mode = ?camera.mode(),
        "Run complete"
    );

    if let Some(params) = last_params {
        println!("{}", serde_json::to_string_pretty(&params)?);
    }

    Ok(())
}
