use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::field::idw::{self, IdwParams};
use crate::field::normalize::GlobalRange;
use crate::field::smooth::gaussian_smooth;
use crate::field::{ScalarField, StationValue};
use crate::foundation::error::{HydroError, HydroResult};
use crate::geometry::boundary::Region;
use crate::geometry::grid::{GridSpec, RasterGrid};
use crate::render::colormap::{Colormap, ColormapKind, colorize};
use crate::render::frame::{Frame, FrameRgba, Provenance};
use crate::render::legend::{Legend, LegendSpec, render_legend};
use crate::render::mask::CellMask;

/// Per-batch rendering configuration.
///
/// The numeric core is stateless per call: everything a batch needs arrives through
/// this struct plus the sample slice and the region, and results come back as
/// immutable values.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    /// Gaussian smoothing sigma in grid-cell units; `<= 0` disables smoothing.
    pub bandwidth: f64,
    /// Uniform raster opacity in `[0, 1]`; applied to alpha only.
    pub opacity: f64,
    /// IDW parameters.
    pub idw: IdwParams,
    /// Grid resolution and margin.
    pub grid: GridSpec,
    /// Colormap selection.
    pub colormap: ColormapKind,
    /// Legend layout.
    pub legend: LegendSpec,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bandwidth: 4.5,
            opacity: 1.0,
            idw: IdwParams::default(),
            grid: GridSpec::default(),
            colormap: ColormapKind::default(),
            legend: LegendSpec::default(),
        }
    }
}

impl RenderConfig {
    /// Validate every tunable.
    pub fn validate(&self) -> HydroResult<()> {
        if !self.bandwidth.is_finite() {
            return Err(HydroError::validation("bandwidth must be finite"));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(HydroError::validation("opacity must be in [0, 1]"));
        }
        self.idw.validate()?;
        self.grid.validate()?;
        Ok(())
    }
}

/// Threading controls for per-timestamp field computation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineOpts {
    /// Compute timestamp fields on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// A per-timestamp failure, reported alongside the batch's successful results.
#[derive(Clone, Debug, serde::Serialize)]
pub struct TimestampIssue {
    /// The affected timestamp label.
    pub timestamp: String,
    /// Human-readable failure description.
    pub message: String,
}

/// Phase-1 output: every real field of a generation batch plus the global range.
///
/// The two-phase protocol is enforced by construction. Colorized frames are only
/// reachable through [`FieldBatch::render`], so the global range is always fully
/// computed across all real timestamps before the first colormapper call. That is a
/// hard barrier, not a convention.
#[derive(Clone, Debug)]
pub struct FieldBatch {
    parameter: String,
    config: RenderConfig,
    grid: RasterGrid,
    fields: BTreeMap<String, ScalarField>,
    range: GlobalRange,
    degenerate: bool,
    issues: Vec<TimestampIssue>,
}

impl FieldBatch {
    /// Compute fields for every timestamp of `parameter` in the store.
    pub fn compute(
        store: &crate::sample::store::SampleStore,
        parameter: &str,
        region: &dyn Region,
        config: &RenderConfig,
        opts: &PipelineOpts,
    ) -> HydroResult<Self> {
        let timestamps = store.timestamps(parameter);
        let slices: Vec<(String, Vec<StationValue>)> = timestamps
            .into_iter()
            .map(|ts| {
                let stations = store.stations(parameter, &ts);
                (ts, stations)
            })
            .collect();
        Self::compute_slices(parameter, slices, region, config, opts)
    }

    /// Compute fields for explicit per-timestamp station slices.
    ///
    /// Per-timestamp failures are isolated: the batch continues for the other
    /// timestamps and reports the failures as [`TimestampIssue`]s. Only a batch with no
    /// renderable field at all is fatal.
    #[tracing::instrument(skip_all, fields(parameter = parameter, timestamps = slices.len()))]
    pub fn compute_slices(
        parameter: &str,
        slices: Vec<(String, Vec<StationValue>)>,
        region: &dyn Region,
        config: &RenderConfig,
        opts: &PipelineOpts,
    ) -> HydroResult<Self> {
        config.validate()?;
        if slices.is_empty() {
            return Err(HydroError::InsufficientStations);
        }
        let grid = RasterGrid::from_region(region, &config.grid)?;

        let compute_one = |(ts, stations): &(String, Vec<StationValue>)| {
            let field = compute_field(&grid, stations, &config.idw, config.bandwidth);
            (ts.clone(), field)
        };

        let computed: Vec<(String, HydroResult<ScalarField>)> = if opts.parallel {
            let pool = build_thread_pool(opts.threads)?;
            pool.install(|| slices.par_iter().map(compute_one).collect())
        } else {
            slices.iter().map(compute_one).collect()
        };

        let mut fields = BTreeMap::new();
        let mut issues = Vec::new();
        for (ts, outcome) in computed {
            match outcome {
                Ok(field) => {
                    fields.insert(ts, field);
                }
                Err(error) => {
                    tracing::debug!(timestamp = %ts, %error, "timestamp field failed");
                    issues.push(TimestampIssue {
                        timestamp: ts,
                        message: error.to_string(),
                    });
                }
            }
        }

        if fields.is_empty() {
            return Err(HydroError::InsufficientStations);
        }

        let range = GlobalRange::from_fields(fields.values())?;
        let degenerate = range.is_degenerate();
        if degenerate {
            tracing::warn!(
                parameter,
                value = range.min,
                "degenerate global range; frames will render mid-scale"
            );
        }

        Ok(Self {
            parameter: parameter.to_string(),
            config: config.clone(),
            grid,
            fields,
            range,
            degenerate,
            issues,
        })
    }

    /// Parameter this batch belongs to.
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// Configuration the fields were computed with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The shared raster grid.
    pub fn grid(&self) -> &RasterGrid {
        &self.grid
    }

    /// The global range across all real fields of the batch.
    pub fn range(&self) -> &GlobalRange {
        &self.range
    }

    /// Return `true` when the global range collapsed to a single value.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Field for one timestamp, if it computed successfully.
    pub fn field(&self, timestamp: &str) -> Option<&ScalarField> {
        self.fields.get(timestamp)
    }

    /// Successfully computed timestamps in label order.
    pub fn timestamps(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Per-timestamp failures collected during phase 1.
    pub fn issues(&self) -> &[TimestampIssue] {
        &self.issues
    }

    /// Phase 2: colorize and mask every field using the batch's fixed global range.
    #[tracing::instrument(skip_all, fields(parameter = %self.parameter, frames = self.fields.len()))]
    pub fn render(&self, region: &dyn Region) -> HydroResult<BatchResult> {
        let mask = CellMask::build(&self.grid, region)?;
        let cmap = self.config.colormap.colormap();
        let legend = render_legend(cmap, &self.range, &self.config.legend)?;

        let mut frames = BTreeMap::new();
        for (ts, field) in &self.fields {
            let frame = render_field(
                ts,
                field,
                &self.range,
                cmap,
                self.config.opacity,
                &mask,
                &legend,
                Provenance::Measured,
            )?;
            frames.insert(ts.clone(), frame);
        }

        Ok(BatchResult {
            parameter: self.parameter.clone(),
            range: self.range,
            degenerate: self.degenerate,
            frames,
            issues: self.issues.clone(),
        })
    }
}

/// Phase-2 output: one rendered frame per successful timestamp, all sharing one range.
#[derive(Clone, Debug)]
pub struct BatchResult {
    /// Parameter the batch rendered.
    pub parameter: String,
    /// Range shared by every frame (`global_min`, `global_max`).
    pub range: GlobalRange,
    /// Whether the range was degenerate and frames rendered mid-scale.
    pub degenerate: bool,
    /// Rendered frames keyed by timestamp label.
    pub frames: BTreeMap<String, Frame>,
    /// Per-timestamp failures, reported alongside the successes.
    pub issues: Vec<TimestampIssue>,
}

/// Compute fields and render frames in one call.
///
/// Convenience wrapper over the two-phase protocol; the phases still run in order.
pub fn render_batch(
    store: &crate::sample::store::SampleStore,
    parameter: &str,
    region: &dyn Region,
    config: &RenderConfig,
    opts: &PipelineOpts,
) -> HydroResult<BatchResult> {
    FieldBatch::compute(store, parameter, region, config, opts)?.render(region)
}

/// Interpolate and optionally smooth one timestamp's stations.
pub(crate) fn compute_field(
    grid: &RasterGrid,
    stations: &[StationValue],
    idw_params: &IdwParams,
    bandwidth: f64,
) -> HydroResult<ScalarField> {
    let raw = idw::interpolate(grid, stations, idw_params)?;
    gaussian_smooth(&raw, bandwidth)
}

/// Colorize one field and clip it to the study area.
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_field(
    timestamp: &str,
    field: &ScalarField,
    range: &GlobalRange,
    cmap: &dyn Colormap,
    opacity: f64,
    mask: &CellMask,
    legend: &Legend,
    provenance: Provenance,
) -> HydroResult<Frame> {
    let mut raster: FrameRgba = colorize(field, range, cmap, opacity)?;
    mask.apply(&mut raster)?;
    Ok(Frame {
        timestamp: timestamp.to_string(),
        raster,
        legend: legend.clone(),
        range: *range,
        provenance,
    })
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> HydroResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(HydroError::validation("threads must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| HydroError::validation(format!("failed to build rayon thread pool: {e}")))
}
