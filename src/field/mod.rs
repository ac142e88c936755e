//! Scalar-field computation: IDW interpolation, Gaussian smoothing, global
//! normalization and temporal synthesis.

/// Inverse-distance-weighted interpolation.
pub mod idw;
/// The shared min/max range and clamped normalization.
pub mod normalize;
/// Gaussian smoothing of scalar fields.
pub mod smooth;
/// Per-station temporal interpolation between measured timestamps.
pub mod temporal;

use crate::foundation::core::{GridSize, Point};
use crate::foundation::error::{HydroError, HydroResult};

/// A station position paired with its measured (or synthesized) value.
///
/// Positions use longitude on the x axis and latitude on the y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StationValue {
    /// Station position in degrees.
    pub position: Point,
    /// Scalar value at the station.
    pub value: f64,
}

impl StationValue {
    /// Convenience constructor from raw coordinates.
    pub fn new(lon: f64, lat: f64, value: f64) -> Self {
        Self {
            position: Point::new(lon, lat),
            value,
        }
    }
}

/// A grid-shaped array of scalar values, row-major with row 0 at the northern edge.
///
/// Fields are transient pipeline products; they are recomputed whenever the sample set
/// changes and are never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    size: GridSize,
    values: Vec<f64>,
}

impl ScalarField {
    /// Wrap a value buffer, checking that its length matches the grid.
    pub fn new(size: GridSize, values: Vec<f64>) -> HydroResult<Self> {
        if values.len() != size.len() {
            return Err(HydroError::validation(
                "ScalarField buffer length must equal rows * cols",
            ));
        }
        Ok(Self { size, values })
    }

    /// A field holding the same value in every cell.
    pub fn constant(size: GridSize, value: f64) -> Self {
        Self {
            size,
            values: vec![value; size.len()],
        }
    }

    /// Grid dimensions of the field.
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Cell count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; the grid size guarantees at least four cells.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Value at (row, col).
    pub fn get(&self, row: u32, col: u32) -> f64 {
        self.values[row as usize * self.size.cols as usize + col as usize]
    }

    /// Borrow the raw row-major values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Minimum and maximum over all finite values, if any exist.
    pub fn finite_min_max(&self) -> Option<(f64, f64)> {
        let mut out: Option<(f64, f64)> = None;
        for &v in &self.values {
            if !v.is_finite() {
                continue;
            }
            out = Some(match out {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
        out
    }
}
