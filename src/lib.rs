//! Hydrofield is a spatial-temporal interpolation and heatmap rendering engine.
//!
//! It converts sparse, georeferenced, timestamped scalar measurements into continuous
//! raster fields, color-maps them with a single globally consistent legend, clips them
//! to a study-area boundary, and (experimentally) synthesizes intermediate time-steps
//! for animation. The public API is session-oriented:
//!
//! - Load samples into a [`RenderSession`] (or a bare [`SampleStore`])
//! - Phase 1: [`RenderSession::compute_fields`] interpolates every timestamp and fixes
//!   the [`GlobalRange`]
//! - Phase 2: [`RenderSession::render_frames`] colorizes and masks against that range
//! - Optionally request an [`AnimationSequence`] between two measured timestamps
//!
//! Ingestion-format parsing, HTTP plumbing and browser rendering live in external
//! collaborators; this crate only consumes parsed samples and boundary geometry and
//! produces rendered rasters.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Raster encoding and frame sinks.
pub mod encode;
/// Scalar-field computation.
pub mod field;
/// Boundary predicates and the raster grid.
pub mod geometry;
/// Colorization, masking and the batch pipeline.
pub mod render;
/// Sample model and store.
pub mod sample;
/// Session-oriented API.
pub mod session;

pub use crate::foundation::core::{GeoBounds, GridSize, Point, Rgba8};
pub use crate::foundation::error::{HydroError, HydroResult};

pub use crate::encode::png::{encode_png, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngDirSink, SinkConfig};
pub use crate::field::idw::IdwParams;
pub use crate::field::normalize::GlobalRange;
pub use crate::field::{ScalarField, StationValue};
pub use crate::geometry::boundary::{BoundaryPolygon, RectExtent, Region, StudyRegion};
pub use crate::geometry::grid::{GridSpec, RasterGrid};
pub use crate::render::animation::{AnimationConfig, AnimationSequence};
pub use crate::render::colormap::{Colormap, ColormapKind};
pub use crate::render::frame::{Frame, FrameRgba, Provenance};
pub use crate::render::legend::{Legend, LegendSpec, LegendTick};
pub use crate::render::pipeline::{
    BatchResult, FieldBatch, PipelineOpts, RenderConfig, TimestampIssue, render_batch,
};
pub use crate::sample::model::{SampleKey, StationSample};
pub use crate::sample::store::{IngestReport, SampleStore};
pub use crate::session::render_session::{RenderSession, SessionState};
