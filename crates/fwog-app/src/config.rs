//! Application configuration: window settings, loop policy, and the
//! simulation config, loadable from a TOML file.

use std::fs;
use std::path::Path;

use glam::UVec2;
use serde::{Deserialize, Serialize};

use fwog_sim::SimConfig;

use crate::error::ConfigError;

pub const GAME_TITLE: &str = "FwogSurvivors";

/// How the window occupies the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStyle {
    /// Decorated, resizable, centered on the primary monitor.
    #[default]
    Windowed,
    /// Borderless window covering the primary monitor.
    Fullscreen,
    /// Exclusive fullscreen on the primary monitor.
    FullscreenExclusive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resolution_scale: f32,
    pub window_style: WindowStyle,
    /// Request a debug graphics context.
    pub debug: bool,
    pub vsync: bool,
    /// Clamp on one frame's contribution to the accumulator, in seconds.
    /// `None` keeps the unbounded catch-up burst after a stall.
    pub max_frame_time: Option<f32>,
    /// Sleep per iteration while the window is unfocused.
    pub unfocused_idle_ms: u64,
    /// Frames the headless platform runs before reporting close.
    pub headless_frames: u64,
    /// Wall time the headless clock advances per frame, in seconds.
    pub headless_frame_time: f64,
    pub sim: SimConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: GAME_TITLE.to_string(),
            width: 1920,
            height: 1080,
            resolution_scale: 1.0,
            window_style: WindowStyle::default(),
            debug: true,
            vsync: true,
            max_frame_time: None,
            unfocused_idle_ms: 1000,
            headless_frames: 600,
            headless_frame_time: 1.0 / 60.0,
            sim: SimConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from a TOML file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Window size for a monitor of `screen` pixels. Only windowed mode uses
    /// the configured width and height.
    pub fn window_size(&self, screen: UVec2) -> UVec2 {
        match self.window_style {
            WindowStyle::Windowed => UVec2::new(self.width, self.height),
            WindowStyle::Fullscreen | WindowStyle::FullscreenExclusive => screen,
        }
    }

    /// Render target size for a window of `window` pixels.
    pub fn framebuffer_size(&self, window: UVec2) -> UVec2 {
        let scale = self.resolution_scale.max(0.0);
        let scaled = (window.as_vec2() * scale).round().as_uvec2();
        scaled.max(UVec2::ONE)
    }
}
