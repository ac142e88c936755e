use kurbo::Shape as _;

use crate::foundation::core::{BezPath, GeoBounds, Point};
use crate::foundation::error::{HydroError, HydroResult};

/// Tolerance for treating a ring's first and last vertex as coincident.
const RING_CLOSE_EPS: f64 = 1e-9;

/// Minimum enclosed area (in square degrees) below which a ring is degenerate.
const MIN_RING_AREA: f64 = 1e-12;

/// Pure geometric predicate for the study area.
///
/// Rectangle fallback and arbitrary multi-ring polygons are interchangeable behind
/// this trait; the rendering pipeline only ever sees the capability set.
pub trait Region {
    /// Return `true` when the point lies inside the study area.
    fn contains(&self, p: Point) -> bool;

    /// Bounding box of the study area, which also defines the raster extent.
    fn bounds(&self) -> GeoBounds;
}

/// Study-area polygon: one or more closed rings of (longitude, latitude) vertices.
///
/// Containment is even-odd across rings, so interior rings cut holes regardless of
/// their winding direction. The polygon is immutable for the lifetime of a rendering
/// session.
#[derive(Clone, Debug)]
pub struct BoundaryPolygon {
    rings: Vec<BezPath>,
    bounds: GeoBounds,
}

impl BoundaryPolygon {
    /// Validate rings and build the polygon.
    ///
    /// Every ring must be explicitly closed (first vertex equals last within
    /// tolerance), have at least three distinct vertices, and enclose non-zero area.
    pub fn new(rings: Vec<Vec<Point>>) -> HydroResult<Self> {
        if rings.is_empty() {
            return Err(HydroError::invalid_boundary("no rings"));
        }

        let mut paths = Vec::with_capacity(rings.len());
        let mut all_points = Vec::new();
        for (i, ring) in rings.iter().enumerate() {
            if ring.len() < 4 {
                return Err(HydroError::invalid_boundary(format!(
                    "ring {i} has fewer than 4 vertices"
                )));
            }
            for p in ring {
                if !p.x.is_finite() || !p.y.is_finite() {
                    return Err(HydroError::invalid_boundary(format!(
                        "ring {i} contains a non-finite vertex"
                    )));
                }
            }
            let first = ring[0];
            let last = ring[ring.len() - 1];
            if first.distance(last) > RING_CLOSE_EPS {
                return Err(HydroError::invalid_boundary(format!("ring {i} is not closed")));
            }

            let mut path = BezPath::new();
            path.move_to(first);
            for &p in &ring[1..ring.len() - 1] {
                path.line_to(p);
            }
            path.close_path();

            if path.area().abs() < MIN_RING_AREA {
                return Err(HydroError::invalid_boundary(format!(
                    "ring {i} encloses zero area"
                )));
            }

            all_points.extend_from_slice(ring);
            paths.push(path);
        }

        let bounds = GeoBounds::from_points(all_points)?;
        Ok(Self {
            rings: paths,
            bounds,
        })
    }

    /// Parse from a GeoJSON string: a `Polygon` or `MultiPolygon` geometry, a
    /// `Feature`, or a `FeatureCollection` (first feature wins).
    pub fn from_geojson_str(json: &str) -> HydroResult<Self> {
        let geo: GeoJson = serde_json::from_str(json)
            .map_err(|e| HydroError::invalid_boundary(format!("parse GeoJSON: {e}")))?;
        Self::new(geo.into_rings()?)
    }

    /// Parse from an already-deserialized GeoJSON value.
    pub fn from_geojson_value(value: &serde_json::Value) -> HydroResult<Self> {
        let geo: GeoJson = serde_json::from_value(value.clone())
            .map_err(|e| HydroError::invalid_boundary(format!("parse GeoJSON: {e}")))?;
        Self::new(geo.into_rings()?)
    }

    /// Number of rings.
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }
}

impl Region for BoundaryPolygon {
    fn contains(&self, p: Point) -> bool {
        // Even-odd rule: inside an odd number of rings means inside the study area.
        self.rings.iter().filter(|r| r.contains(p)).count() % 2 == 1
    }

    fn bounds(&self) -> GeoBounds {
        self.bounds
    }
}

/// Axis-aligned rectangular study area, used when no boundary polygon is supplied.
#[derive(Clone, Copy, Debug)]
pub struct RectExtent {
    bounds: GeoBounds,
}

impl RectExtent {
    /// Wrap validated bounds.
    pub fn new(bounds: GeoBounds) -> Self {
        Self { bounds }
    }

    /// Rectangle enclosing all points.
    pub fn from_points<I>(points: I) -> HydroResult<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        Ok(Self {
            bounds: GeoBounds::from_points(points)?,
        })
    }
}

impl Region for RectExtent {
    fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    fn bounds(&self) -> GeoBounds {
        self.bounds
    }
}

/// Concrete study region held by a session: a validated polygon or the rectangular
/// fallback.
#[derive(Clone, Debug)]
pub enum StudyRegion {
    /// Clipping polygon.
    Polygon(BoundaryPolygon),
    /// Rectangular extent.
    Rect(RectExtent),
}

impl Region for StudyRegion {
    fn contains(&self, p: Point) -> bool {
        match self {
            Self::Polygon(poly) => poly.contains(p),
            Self::Rect(rect) => rect.contains(p),
        }
    }

    fn bounds(&self) -> GeoBounds {
        match self {
            Self::Polygon(poly) => poly.bounds(),
            Self::Rect(rect) => rect.bounds(),
        }
    }
}

/// Build a study region from raw rings, falling back to the rectangular extent of the
/// coordinates when polygon validation fails.
///
/// Returns the region plus the validation error that triggered the fallback, if any,
/// so callers can surface a warning. Fails hard only when not even a rectangle can be
/// derived from the coordinates.
pub fn region_or_fallback(
    rings: Vec<Vec<Point>>,
) -> HydroResult<(StudyRegion, Option<HydroError>)> {
    match BoundaryPolygon::new(rings.clone()) {
        Ok(poly) => Ok((StudyRegion::Polygon(poly), None)),
        Err(err) => {
            tracing::warn!(%err, "invalid boundary polygon, falling back to rectangular extent");
            let rect = RectExtent::from_points(rings.into_iter().flatten())?;
            Ok((StudyRegion::Rect(rect), Some(err)))
        }
    }
}

/// GeoJSON subset accepted for boundaries.
#[derive(serde::Deserialize)]
#[serde(tag = "type")]
enum GeoJson {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    Feature {
        geometry: Box<GeoJson>,
    },
    FeatureCollection {
        features: Vec<GeoJson>,
    },
}

impl GeoJson {
    fn into_rings(self) -> HydroResult<Vec<Vec<Point>>> {
        match self {
            Self::Polygon { coordinates } => coordinates.into_iter().map(ring_points).collect(),
            Self::MultiPolygon { coordinates } => coordinates
                .into_iter()
                .flatten()
                .map(ring_points)
                .collect(),
            Self::Feature { geometry } => geometry.into_rings(),
            Self::FeatureCollection { features } => features
                .into_iter()
                .next()
                .ok_or_else(|| HydroError::invalid_boundary("empty FeatureCollection"))?
                .into_rings(),
        }
    }
}

fn ring_points(ring: Vec<Vec<f64>>) -> HydroResult<Vec<Point>> {
    ring.into_iter()
        .map(|pos| {
            if pos.len() < 2 {
                return Err(HydroError::invalid_boundary(
                    "GeoJSON position needs at least [lon, lat]",
                ));
            }
            Ok(Point::new(pos[0], pos[1]))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/boundary.rs"]
mod tests;
