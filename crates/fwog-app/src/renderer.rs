//! Renderer seen by the frame loop.

use glam::UVec2;

use fwog_core::state::RenderSnapshot;

pub trait Renderer {
    /// Upload this frame's sprite instances.
    fn upload(&mut self, snapshot: &RenderSnapshot);
    /// Draw the last upload into a target of `framebuffer_size` pixels.
    fn render(&mut self, framebuffer_size: UVec2);
    /// Framebuffer was resized.
    fn resize(&mut self, _size: UVec2) {}
}

/// Headless renderer that records what it was asked to draw.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
    sprites: usize,
    last_tick: u64,
    framebuffer: UVec2,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Sprite count of the last upload.
    pub fn sprites(&self) -> usize {
        self.sprites
    }

    pub fn last_tick(&self) -> u64 {
        self.last_tick
    }

    pub fn framebuffer(&self) -> UVec2 {
        self.framebuffer
    }
}

impl Renderer for LogRenderer {
    fn upload(&mut self, snapshot: &RenderSnapshot) {
        self.sprites = snapshot.sprites.len();
        self.last_tick = snapshot.time.tick;
    }

    fn render(&mut self, framebuffer_size: UVec2) {
        self.frames += 1;
        self.framebuffer = framebuffer_size;
        log::trace!(
            "frame {}: {} sprites at tick {} into {}x{}",
            self.frames,
            self.sprites,
            self.last_tick,
            framebuffer_size.x,
            framebuffer_size.y
        );
    }

    fn resize(&mut self, size: UVec2) {
        log::debug!("renderer resized to {}x{}", size.x, size.y);
    }
}
