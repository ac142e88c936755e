//! Raster encoding and frame sinks.
//!
//! Sinks consume rendered frames in step order and are used to stream animation
//! sequences out of the pipeline.

/// PNG encoding.
pub mod png;
/// Frame sink trait and built-in sinks.
pub mod sink;
