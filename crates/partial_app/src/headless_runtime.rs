//! Deterministic frame loop for headless sheet runs.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessRunConfig {
    /// Container height the sheet is laid out in.
    pub height: f32,
    /// Frame budget for a `settle` step.
    pub max_frames: u32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            height: 800.0,
            max_frames: 600,
            tick_ms: 16,
        }
    }
}

impl HeadlessRunConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.height.is_finite() || self.height <= 0.0 {
            bail!("headless height must be positive, got {}", self.height);
        }
        if self.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        if self.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }
        Ok(())
    }

    /// Frame interval in seconds
    pub fn frame_dt(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }
}

/// Frame context passed to frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    /// Logical time since the loop started, including this frame
    pub elapsed_ms: u64,
}

/// Whether the frame loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFlow {
    Continue,
    Stop,
}

/// Deterministic headless frame loop.
pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run up to `cfg.max_frames` frames. Returns how many frames ran.
    pub fn run<F>(cfg: HeadlessRunConfig, mut on_frame: F) -> Result<u32>
    where
        F: FnMut(&HeadlessContext) -> Result<FrameFlow>,
    {
        cfg.validate()?;

        for frame in 0..cfg.max_frames {
            let elapsed_ms = cfg.tick_ms.saturating_mul(frame as u64 + 1);
            let flow = on_frame(&HeadlessContext {
                frame_index: frame,
                elapsed_ms,
            })?;
            if flow == FrameFlow::Stop {
                return Ok(frame + 1);
            }
        }

        Ok(cfg.max_frames)
    }
}
