use crate::field::normalize::GlobalRange;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{HydroError, HydroResult};
use crate::render::colormap::Colormap;
use crate::render::frame::FrameRgba;

/// Legend layout parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LegendSpec {
    /// Bar width in pixels.
    pub width: u32,
    /// Bar height in pixels.
    pub height: u32,
    /// Number of evenly spaced ticks, endpoints included.
    pub ticks: u32,
}

impl Default for LegendSpec {
    fn default() -> Self {
        Self {
            width: 24,
            height: 256,
            ticks: 7,
        }
    }
}

/// One legend tick: its pixel row in the bar plus the value and its formatted label.
///
/// Labels are returned as data rather than drawn glyphs; UI collaborators overlay the
/// text next to the bar.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LegendTick {
    /// Row in the legend image, 0 at the top.
    pub offset_y: u32,
    /// Tick value in data units.
    pub value: f64,
    /// Value formatted with two decimals.
    pub label: String,
}

/// Vertical color-scale legend: the gradient bar image and its tick metadata.
#[derive(Clone, Debug)]
pub struct Legend {
    /// Gradient bar, maximum value at the top, with tick rows marked.
    pub image: FrameRgba,
    /// Tick positions and labels, top to bottom.
    pub ticks: Vec<LegendTick>,
}

const TICK_COLOR: Rgba8 = Rgba8 {
    r: 34,
    g: 34,
    b: 34,
    a: 255,
};

/// Render a vertical legend spanning the same lookup table as the raster frames.
///
/// The bar samples the colormap top-down from `range.max` to `range.min`. Ticks sit at
/// evenly spaced values across the range; a degenerate range yields the single shared
/// value as its only tick.
pub fn render_legend(
    cmap: &dyn Colormap,
    range: &GlobalRange,
    spec: &LegendSpec,
) -> HydroResult<Legend> {
    if spec.width == 0 || spec.height < 2 {
        return Err(HydroError::validation(
            "legend needs width >= 1 and height >= 2",
        ));
    }
    if spec.ticks < 2 {
        return Err(HydroError::validation("legend needs at least 2 ticks"));
    }

    let mut image = FrameRgba::transparent(spec.width, spec.height);
    for y in 0..spec.height {
        let t = 1.0 - f64::from(y) / f64::from(spec.height - 1);
        let px = Rgba8::from_rgb(cmap.sample(t), 255);
        for x in 0..spec.width {
            image.put_pixel(x, y, px);
        }
    }

    let ticks = tick_values(range, spec.ticks);
    let mut out = Vec::with_capacity(ticks.len());
    for value in ticks {
        let offset_y = ((1.0 - range.normalize(value)) * f64::from(spec.height - 1)).round() as u32;
        // Notch on the right third of the bar marks the tick row.
        for x in (spec.width * 2 / 3)..spec.width {
            image.put_pixel(x, offset_y, TICK_COLOR);
        }
        out.push(LegendTick {
            offset_y,
            value,
            label: format!("{value:.2}"),
        });
    }

    Ok(Legend { image, ticks: out })
}

fn tick_values(range: &GlobalRange, ticks: u32) -> Vec<f64> {
    if range.is_degenerate() {
        return vec![range.min];
    }
    let step = range.span() / f64::from(ticks - 1);
    (0..ticks).map(|i| range.min + f64::from(i) * step).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/legend.rs"]
mod tests;
