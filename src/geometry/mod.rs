//! Study-area geometry: boundary predicates and the raster sample grid.

/// Boundary polygons, the rectangular fallback and the `Region` predicate.
pub mod boundary;
/// The fixed-resolution raster grid.
pub mod grid;
