use crate::field::{ScalarField, StationValue};
use crate::foundation::error::{HydroError, HydroResult};
use crate::geometry::grid::RasterGrid;

/// Distance below which a grid cell is considered coincident with a station, in degrees.
///
/// Coincident cells take the station value exactly, which both avoids the singular
/// weight and makes the interpolation exact at sample points.
pub const COINCIDENT_EPS_DEG: f64 = 1e-9;

/// Inverse-distance-weighting parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IdwParams {
    /// Distance exponent. Larger values localize each station's influence.
    pub power: f64,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self { power: 2.0 }
    }
}

impl IdwParams {
    /// Validate the exponent.
    pub fn validate(&self) -> HydroResult<()> {
        if !self.power.is_finite() || self.power <= 0.0 {
            return Err(HydroError::validation("IDW power must be finite and > 0"));
        }
        Ok(())
    }
}

/// Interpolate station samples onto every cell of `grid`.
///
/// Each cell value is `Σ wᵢ·vᵢ / Σ wᵢ` with `wᵢ = 1 / dist(cell, stationᵢ)^power`.
/// A cell within [`COINCIDENT_EPS_DEG`] of a station takes that station's value exactly.
/// A single station yields a constant field; zero stations is
/// [`HydroError::InsufficientStations`].
///
/// Runs in O(cells × stations); the data sizes this crate targets do not warrant a
/// spatial index.
#[tracing::instrument(skip(grid, stations), fields(cells = grid.len(), station_count = stations.len()))]
pub fn interpolate(
    grid: &RasterGrid,
    stations: &[StationValue],
    params: &IdwParams,
) -> HydroResult<ScalarField> {
    params.validate()?;
    if stations.is_empty() {
        return Err(HydroError::InsufficientStations);
    }
    if let [only] = stations {
        return Ok(ScalarField::constant(grid.size(), only.value));
    }

    let size = grid.size();
    let mut values = Vec::with_capacity(size.len());
    for row in 0..size.rows {
        for col in 0..size.cols {
            let cell = grid.cell_center(row, col);
            values.push(cell_value(cell, stations, params.power));
        }
    }
    ScalarField::new(size, values)
}

fn cell_value(cell: crate::foundation::core::Point, stations: &[StationValue], power: f64) -> f64 {
    let mut num = 0.0;
    let mut den = 0.0;
    for s in stations {
        let dist = cell.distance(s.position);
        if dist < COINCIDENT_EPS_DEG {
            return s.value;
        }
        let w = dist.powf(-power);
        num += w * s.value;
        den += w;
    }
    num / den
}

#[cfg(test)]
#[path = "../../tests/unit/field/idw.rs"]
mod tests;
