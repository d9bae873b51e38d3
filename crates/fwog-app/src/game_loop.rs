//! Frame loop: banks wall-clock time, drains it in fixed physics steps, and
//! renders once per iteration no matter how many steps ran.
//!
//! Iteration order: resize, measure frame time, apply input once, step while
//! a whole step is banked, tally collisions, upload and render, present, poll
//! events, idle if unfocused. Time spent idling is picked up by the next
//! measurement, so an unfocused window catches up in a burst on refocus
//! unless `max_frame_time` is set.

use std::time::Duration;

use serde::Serialize;

use fwog_core::events::CollisionTally;
use fwog_sim::clock::FixedTimestep;
use fwog_sim::{GameWorld, SimError};

use crate::config::AppConfig;
use crate::platform::{Platform, TimeSource};
use crate::renderer::Renderer;

/// Totals reported when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LoopStats {
    pub frames: u64,
    pub steps: u64,
    /// Banked time left unsimulated at exit, in seconds.
    pub accumulator: f32,
    pub idle_frames: u64,
    pub collisions: CollisionTally,
}

pub struct FrameLoop {
    timestep: FixedTimestep,
    unfocused_idle: Duration,
    stats: LoopStats,
}

impl FrameLoop {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            timestep: FixedTimestep::default().with_max_frame_time(config.max_frame_time),
            unfocused_idle: Duration::from_millis(config.unfocused_idle_ms),
            stats: LoopStats::default(),
        }
    }

    /// Run until the platform asks to close.
    pub fn run(
        &mut self,
        world: &mut GameWorld,
        platform: &mut dyn Platform,
        renderer: &mut dyn Renderer,
        clock: &dyn TimeSource,
    ) -> Result<LoopStats, SimError> {
        let mut current_time = clock.now();
        while !platform.should_close() {
            let new_time = clock.now();
            let frame_time = (new_time - current_time) as f32;
            current_time = new_time;
            self.frame(world, platform, renderer, frame_time)?;
        }

        self.stats.accumulator = self.timestep.accumulator();
        log::info!(
            "loop finished: {} frames, {} steps, {:.4}s banked",
            self.stats.frames,
            self.stats.steps,
            self.stats.accumulator
        );
        Ok(self.stats)
    }

    fn frame(
        &mut self,
        world: &mut GameWorld,
        platform: &mut dyn Platform,
        renderer: &mut dyn Renderer,
        frame_time: f32,
    ) -> Result<(), SimError> {
        if let Some(size) = platform.take_resize() {
            renderer.resize(size);
        }

        self.timestep.accumulate(frame_time);
        world.apply_input(platform.directional_keys())?;

        let mut steps = 0u32;
        while self.timestep.consume_step() {
            world.step(self.timestep.step())?;
            steps += 1;
        }
        self.stats.steps += u64::from(steps);

        let mut tally = CollisionTally::default();
        for event in world.drain_collision_events() {
            tally.record(event.phase);
        }
        self.stats.collisions.begin += tally.begin;
        self.stats.collisions.end += tally.end;

        renderer.upload(&world.snapshot());
        renderer.render(platform.framebuffer_size());
        platform.present();
        platform.poll_events();
        self.stats.frames += 1;

        log::debug!(
            "frame {}: {frame_time:.4}s, {steps} steps, {} contacts begun, {} ended",
            self.stats.frames,
            tally.begin,
            tally.end
        );

        if !platform.is_focused() {
            self.stats.idle_frames += 1;
            platform.idle(self.unfocused_idle);
        }
        Ok(())
    }
}
