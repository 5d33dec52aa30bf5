//! Game settings
//!
//! Read from a JSON file by the native runner; the browser build uses defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Which collision resolver decides EAT/DEAD each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionStrategy {
    /// Circle distance test against every enemy
    #[default]
    Geometric,
    /// Sample the rendered frame for sentinel colors
    PixelProbe,
}

impl CollisionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionStrategy::Geometric => "geometric",
            CollisionStrategy::PixelProbe => "pixel_probe",
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: u32,
    pub window_height: u32,
    /// Target frames per second
    pub framerate: u32,

    // === Rules ===
    pub collision: CollisionStrategy,
    /// Perpendicular jitter for spawn directions (0 = axis-aligned)
    pub angle_variance: f32,
    /// Eating an enemy also takes its side count and spin
    pub inherit_shape: bool,
    /// RNG seed; derived from the clock when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH as u32,
            window_height: WINDOW_HEIGHT as u32,
            framerate: FRAMERATE,

            collision: CollisionStrategy::Geometric,
            angle_variance: ANGLE_VARIANCE,
            inherit_shape: true,
            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(Error::InvalidSettings(format!(
                "window must be non-empty, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.framerate == 0 {
            return Err(Error::InvalidSettings("framerate must be positive".into()));
        }
        if !(self.angle_variance >= 0.0 && self.angle_variance.is_finite()) {
            return Err(Error::InvalidSettings(format!(
                "angle_variance must be a non-negative number, got {}",
                self.angle_variance
            )));
        }
        Ok(())
    }

    /// Window size as floats for the simulation
    pub fn arena(&self) -> glam::Vec2 {
        glam::Vec2::new(self.window_width as f32, self.window_height as f32)
    }

    /// Seconds per frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.framerate as f32
    }

    /// Effective sound effect volume
    pub fn effective_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }
}
