//! Colorization, legend rendering, boundary masking and the two-phase batch pipeline.

/// Experimental animation sequences.
pub mod animation;
/// Colormap lookup tables and field colorization.
pub mod colormap;
/// Rendered frame types.
pub mod frame;
/// Vertical color-scale legends.
pub mod legend;
/// Boundary clipping of colorized rasters.
pub mod mask;
/// The two-phase field/frame pipeline.
pub mod pipeline;
