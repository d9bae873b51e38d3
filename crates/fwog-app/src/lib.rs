//! FwogSurvivors application.
//!
//! Wires the simulation into the frame loop against the platform and
//! renderer traits. The shipped binary runs headless.

pub mod config;
pub mod error;
pub mod game_loop;
pub mod platform;
pub mod renderer;

pub use fwog_core as core;

use glam::UVec2;

use fwog_sim::GameWorld;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::game_loop::{FrameLoop, LoopStats};
use crate::platform::{HeadlessPlatform, ManualClock};
use crate::renderer::LogRenderer;

/// Build the world, run the headless frame loop to completion, tear down.
pub fn run_headless(config: &AppConfig) -> Result<LoopStats, AppError> {
    let mut world = GameWorld::new(config.sim.clone());
    world.initialize();

    let window = config.window_size(UVec2::new(config.width, config.height));
    let clock = ManualClock::new();
    let mut platform = HeadlessPlatform::new(
        clock.clone(),
        config.headless_frames,
        config.headless_frame_time,
        config.framebuffer_size(window),
    );
    let mut renderer = LogRenderer::new();

    let result = FrameLoop::new(config).run(&mut world, &mut platform, &mut renderer, &clock);
    world.shutdown();
    Ok(result?)
}
