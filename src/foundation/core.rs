use crate::foundation::error::{HydroError, HydroResult};

pub use kurbo::{BezPath, Point, Rect};

/// Raster dimensions as a row/column count.
///
/// Both axes need at least two cells so that cell spacing is well defined.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GridSize {
    /// Number of rows (latitude axis).
    pub rows: u32,
    /// Number of columns (longitude axis).
    pub cols: u32,
}

impl GridSize {
    /// Create a validated grid size with `rows >= 2` and `cols >= 2`.
    pub fn new(rows: u32, cols: u32) -> HydroResult<Self> {
        if rows < 2 || cols < 2 {
            return Err(HydroError::validation("GridSize axes must be >= 2"));
        }
        Ok(Self { rows, cols })
    }

    /// Total cell count.
    pub fn len(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Always `false`; a validated grid has at least four cells.
    pub fn is_empty(self) -> bool {
        false
    }
}

/// Geographic bounding box in degrees, longitude on the x axis, latitude on the y axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoBounds {
    /// Western edge.
    pub min_lon: f64,
    /// Southern edge.
    pub min_lat: f64,
    /// Eastern edge.
    pub max_lon: f64,
    /// Northern edge.
    pub max_lat: f64,
}

impl GeoBounds {
    /// Create a validated, non-degenerate bounding box.
    ///
    /// A box that collapses to a point or a line cannot host a raster grid and is
    /// rejected as [`HydroError::InvalidBoundary`].
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> HydroResult<Self> {
        for v in [min_lon, min_lat, max_lon, max_lat] {
            if !v.is_finite() {
                return Err(HydroError::invalid_boundary("non-finite bounds coordinate"));
            }
        }
        if max_lon <= min_lon || max_lat <= min_lat {
            return Err(HydroError::invalid_boundary(
                "bounds degenerate to a point or line",
            ));
        }
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// Smallest box enclosing all points.
    pub fn from_points<I>(points: I) -> HydroResult<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut min_lon = f64::INFINITY;
        let mut min_lat = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        for p in points {
            min_lon = min_lon.min(p.x);
            min_lat = min_lat.min(p.y);
            max_lon = max_lon.max(p.x);
            max_lat = max_lat.max(p.y);
        }
        Self::new(min_lon, min_lat, max_lon, max_lat)
    }

    /// Width in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Grow the box by `frac` of its own extent on every side.
    pub fn inflate(&self, frac: f64) -> Self {
        let dx = self.width() * frac;
        let dy = self.height() * frac;
        Self {
            min_lon: self.min_lon - dx,
            min_lat: self.min_lat - dy,
            max_lon: self.max_lon + dx,
            max_lat: self.max_lat + dy,
        }
    }

    /// Return `true` when the point lies inside or on the edge of the box.
    pub fn contains(&self, p: Point) -> bool {
        self.min_lon <= p.x && p.x <= self.max_lon && self.min_lat <= p.y && p.y <= self.max_lat
    }

    /// View as a [`kurbo::Rect`].
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }
}

/// Straight-alpha RGBA8.
///
/// Opacity is carried in the alpha channel only; the RGB bytes always hold the colormap
/// output unmodified so masking and opacity changes never alter color values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight, not premultiplied).
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Build from an opaque RGB triple and an explicit alpha.
    pub fn from_rgb(rgb: [u8; 3], a: u8) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
