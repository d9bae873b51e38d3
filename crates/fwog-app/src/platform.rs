//! Window/input layer seen by the frame loop, plus the clocks it reads.
//!
//! A real window backend implements [`Platform`]; [`HeadlessPlatform`] stands
//! in for it with scripted input, focus, and resize events, and advances a
//! [`ManualClock`] instead of letting wall time pass.

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use glam::UVec2;

use fwog_core::input::DirectionalKeys;

pub trait Platform {
    /// Polled once per loop iteration; `true` ends the loop.
    fn should_close(&self) -> bool;
    fn is_focused(&self) -> bool;
    /// Pending framebuffer resize, cleared by the call.
    fn take_resize(&mut self) -> Option<UVec2>;
    fn framebuffer_size(&self) -> UVec2;
    fn directional_keys(&self) -> DirectionalKeys;
    /// Swap buffers.
    fn present(&mut self);
    fn poll_events(&mut self);

    /// Block while the window has nothing to do.
    fn idle(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Monotonic time in seconds.
pub trait TimeSource {
    fn now(&self) -> f64;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs.max(0.0));
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Scripted stand-in for a window.
///
/// Runs for a fixed number of frames. Each `poll_events` advances the clock by
/// that frame's scripted duration; `idle` advances it without sleeping.
#[derive(Debug)]
pub struct HeadlessPlatform {
    clock: ManualClock,
    frames: u64,
    frame: u64,
    frame_time: f64,
    frame_times: Vec<f64>,
    keys: Vec<DirectionalKeys>,
    unfocused: Vec<bool>,
    resizes: Vec<(u64, UVec2)>,
    pending_resize: Option<UVec2>,
    framebuffer: UVec2,
    presented: u64,
    idle_calls: u64,
}

impl HeadlessPlatform {
    pub fn new(clock: ManualClock, frames: u64, frame_time: f64, framebuffer: UVec2) -> Self {
        Self {
            clock,
            frames,
            frame: 0,
            frame_time,
            frame_times: Vec::new(),
            keys: Vec::new(),
            unfocused: Vec::new(),
            resizes: Vec::new(),
            pending_resize: None,
            framebuffer,
            presented: 0,
            idle_calls: 0,
        }
    }

    /// Per-frame durations; frames past the end use the constant frame time.
    pub fn with_frame_times(mut self, frame_times: Vec<f64>) -> Self {
        self.frame_times = frame_times;
        self
    }

    /// Per-frame held keys; frames past the end hold nothing.
    pub fn with_keys(mut self, keys: Vec<DirectionalKeys>) -> Self {
        self.keys = keys;
        self
    }

    /// Per-frame focus loss; frames past the end are focused.
    pub fn with_unfocused(mut self, unfocused: Vec<bool>) -> Self {
        self.unfocused = unfocused;
        self
    }

    /// Deliver a resize to `size` while polling events on `frame`.
    pub fn with_resize_at(mut self, frame: u64, size: UVec2) -> Self {
        self.resizes.push((frame, size));
        self
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn idle_calls(&self) -> u64 {
        self.idle_calls
    }

    fn current_frame_time(&self) -> f64 {
        self.frame_times
            .get(self.frame as usize)
            .copied()
            .unwrap_or(self.frame_time)
    }
}

impl Platform for HeadlessPlatform {
    fn should_close(&self) -> bool {
        self.frame >= self.frames
    }

    fn is_focused(&self) -> bool {
        // Read after poll_events, so look at the frame that just finished.
        let index = self.frame.saturating_sub(1) as usize;
        !self.unfocused.get(index).copied().unwrap_or(false)
    }

    fn take_resize(&mut self) -> Option<UVec2> {
        self.pending_resize.take()
    }

    fn framebuffer_size(&self) -> UVec2 {
        self.framebuffer
    }

    fn directional_keys(&self) -> DirectionalKeys {
        self.keys
            .get(self.frame as usize)
            .copied()
            .unwrap_or(DirectionalKeys::NONE)
    }

    fn present(&mut self) {
        self.presented += 1;
    }

    fn poll_events(&mut self) {
        self.clock.advance(self.current_frame_time());
        if let Some(&(_, size)) = self.resizes.iter().find(|(at, _)| *at == self.frame) {
            self.framebuffer = size;
            self.pending_resize = Some(size);
        }
        self.frame += 1;
    }

    fn idle(&mut self, duration: Duration) {
        self.idle_calls += 1;
        self.clock.advance(duration.as_secs_f64());
    }
}
