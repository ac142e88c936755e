use std::path::PathBuf;

use crate::encode::png::write_png;
use crate::foundation::error::{HydroError, HydroResult};
use crate::render::frame::Frame;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

/// Sink contract for consuming rendered frames in sequence order.
///
/// Ordering contract: `push_frame` is called in strictly increasing step order within
/// one sequence.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> HydroResult<()>;
    /// Push one frame in strictly increasing step order.
    fn push_frame(&mut self, step: usize, frame: &Frame) -> HydroResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> HydroResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(usize, Frame)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(usize, Frame)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> HydroResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, step: usize, frame: &Frame) -> HydroResult<()> {
        self.frames.push((step, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> HydroResult<()> {
        Ok(())
    }
}

/// Sink that writes each frame as `<prefix>_<step>.png` into a directory.
#[derive(Debug)]
pub struct PngDirSink {
    dir: PathBuf,
    prefix: String,
}

impl PngDirSink {
    /// Create a sink writing into `dir` with the given filename prefix.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, _cfg: SinkConfig) -> HydroResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            HydroError::encode(format!("create dir '{}': {e}", self.dir.display()))
        })
    }

    fn push_frame(&mut self, step: usize, frame: &Frame) -> HydroResult<()> {
        let path = self.dir.join(format!("{}_{step:03}.png", self.prefix));
        write_png(&frame.raster, path)
    }

    fn end(&mut self) -> HydroResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
