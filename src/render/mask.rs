use crate::foundation::core::GridSize;
use crate::foundation::error::{HydroError, HydroResult};
use crate::geometry::boundary::Region;
use crate::geometry::grid::RasterGrid;
use crate::render::frame::FrameRgba;

/// Per-cell inclusion mask for one (grid, region) pair.
///
/// Built once and reused across every frame of a batch, since neither the grid nor the
/// boundary changes within a session. Masking runs strictly after colorization, so the
/// clip never affects the numeric range used for color computation.
#[derive(Clone, Debug)]
pub struct CellMask {
    size: GridSize,
    inside: Vec<bool>,
    inside_count: usize,
}

impl CellMask {
    /// Test every cell center against the region predicate.
    ///
    /// Fails with [`HydroError::OutOfBoundsGrid`] when not a single cell falls inside
    /// the boundary, because nothing would be renderable.
    #[tracing::instrument(skip(grid, region), fields(cells = grid.len()))]
    pub fn build(grid: &RasterGrid, region: &dyn Region) -> HydroResult<Self> {
        let inside: Vec<bool> = grid.centers().map(|p| region.contains(p)).collect();
        let inside_count = inside.iter().filter(|&&b| b).count();
        if inside_count == 0 {
            return Err(HydroError::OutOfBoundsGrid);
        }
        Ok(Self {
            size: grid.size(),
            inside,
            inside_count,
        })
    }

    /// Number of cells inside the boundary.
    pub fn inside_count(&self) -> usize {
        self.inside_count
    }

    /// Return `true` when cell (row, col) is inside the boundary.
    pub fn is_inside(&self, row: u32, col: u32) -> bool {
        self.inside[row as usize * self.size.cols as usize + col as usize]
    }

    /// Zero the alpha of every pixel outside the boundary.
    ///
    /// Inside pixels keep the colormapper's alpha untouched; RGB bytes are never
    /// modified either way.
    pub fn apply(&self, frame: &mut FrameRgba) -> HydroResult<()> {
        if frame.width != self.size.cols || frame.height != self.size.rows {
            return Err(HydroError::validation(
                "mask dimensions do not match the frame",
            ));
        }
        for (i, &inside) in self.inside.iter().enumerate() {
            if !inside {
                frame.data[i * 4 + 3] = 0;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
