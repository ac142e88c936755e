use crate::foundation::core::{GeoBounds, GridSize, Point};
use crate::foundation::error::{HydroError, HydroResult};
use crate::geometry::boundary::Region;

/// Grid construction parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridSpec {
    /// Raster resolution.
    pub size: GridSize,
    /// Fraction of the region extent added on every side so edge stations are not
    /// clipped.
    pub margin: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            size: GridSize {
                rows: 400,
                cols: 400,
            },
            margin: 0.02,
        }
    }
}

impl GridSpec {
    /// Validate resolution and margin.
    pub fn validate(&self) -> HydroResult<()> {
        GridSize::new(self.size.rows, self.size.cols)?;
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(HydroError::validation("grid margin must be finite and >= 0"));
        }
        Ok(())
    }
}

/// Fixed-resolution set of evenly spaced cell centers over a geographic extent.
///
/// Row 0 is the northernmost row, so a field computed over this grid maps directly to
/// image memory order. Resolution is chosen once per session and reused across every
/// timestamp, keeping fields directly comparable. Construction is deterministic: the
/// same region and spec always yield the same grid.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterGrid {
    bounds: GeoBounds,
    size: GridSize,
    lon_step: f64,
    lat_step: f64,
}

impl RasterGrid {
    /// Build a grid covering the margin-inflated bounding box of a region.
    pub fn from_region(region: &dyn Region, spec: &GridSpec) -> HydroResult<Self> {
        Self::from_bounds(region.bounds(), spec)
    }

    /// Build a grid over explicit bounds.
    pub fn from_bounds(bounds: GeoBounds, spec: &GridSpec) -> HydroResult<Self> {
        spec.validate()?;
        let bounds = bounds.inflate(spec.margin);
        let size = spec.size;
        let lon_step = bounds.width() / f64::from(size.cols - 1);
        let lat_step = bounds.height() / f64::from(size.rows - 1);
        Ok(Self {
            bounds,
            size,
            lon_step,
            lat_step,
        })
    }

    /// Grid dimensions.
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Cell count.
    pub fn len(&self) -> usize {
        self.size.len()
    }

    /// Always `false`; grid sizes are validated to at least 2×2.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The inflated extent the grid covers.
    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    /// Center of cell (row, col); row 0 is the northern edge.
    pub fn cell_center(&self, row: u32, col: u32) -> Point {
        Point::new(
            self.bounds.min_lon + f64::from(col) * self.lon_step,
            self.bounds.max_lat - f64::from(row) * self.lat_step,
        )
    }

    /// Iterate cell centers in row-major order.
    pub fn centers(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.size.rows)
            .flat_map(move |row| (0..self.size.cols).map(move |col| self.cell_center(row, col)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/grid.rs"]
mod tests;
