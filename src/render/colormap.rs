use std::sync::OnceLock;

use crate::field::ScalarField;
use crate::field::normalize::GlobalRange;
use crate::foundation::error::{HydroError, HydroResult};
use crate::render::frame::FrameRgba;

/// Number of entries in each colormap lookup table.
pub const LUT_LEN: usize = 256;

/// Deterministic, order-preserving map from a normalized scalar to RGB.
///
/// Sampling goes through a fixed lookup table: values `a < b` always map to entries
/// in table order, and equal values always map to identical colors, which is what
/// makes repeated renders byte-identical.
pub trait Colormap: Send + Sync {
    /// Colormap name as accepted by [`by_name`].
    fn name(&self) -> &'static str;

    /// Borrow the 256-entry RGB table, low end first.
    fn table(&self) -> &'static [[u8; 3]; LUT_LEN];

    /// Sample the table at normalized position `t`, clamped into `[0, 1]`.
    fn sample(&self, t: f64) -> [u8; 3] {
        self.table()[lut_index(t)]
    }
}

/// Table index for a normalized value.
pub fn lut_index(t: f64) -> usize {
    (t.clamp(0.0, 1.0) * (LUT_LEN - 1) as f64).round() as usize
}

/// Built-in colormap selection, serializable for render configs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColormapKind {
    /// Google's Turbo rainbow map.
    #[default]
    Turbo,
    /// Matplotlib's Viridis.
    Viridis,
}

impl ColormapKind {
    /// The colormap implementation for this kind.
    pub fn colormap(self) -> &'static dyn Colormap {
        match self {
            Self::Turbo => &Turbo,
            Self::Viridis => &Viridis,
        }
    }
}

/// Look a colormap up by its lowercase name.
pub fn by_name(name: &str) -> HydroResult<ColormapKind> {
    match name.to_ascii_lowercase().as_str() {
        "turbo" => Ok(ColormapKind::Turbo),
        "viridis" => Ok(ColormapKind::Viridis),
        other => Err(HydroError::validation(format!("unknown colormap '{other}'"))),
    }
}

/// Colorize a scalar field against a fixed global range.
///
/// `opacity` in `[0, 1]` is applied as a uniform alpha multiplier; it never alters the
/// RGB bytes, only the alpha channel. Masking happens separately and afterwards.
pub fn colorize(
    field: &ScalarField,
    range: &GlobalRange,
    cmap: &dyn Colormap,
    opacity: f64,
) -> HydroResult<FrameRgba> {
    if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
        return Err(HydroError::validation("opacity must be in [0, 1]"));
    }
    let alpha = (opacity * 255.0).round() as u8;
    let size = field.size();
    let mut data = Vec::with_capacity(field.len() * 4);
    for &v in field.values() {
        let [r, g, b] = cmap.sample(range.normalize(v));
        data.extend_from_slice(&[r, g, b, alpha]);
    }
    FrameRgba::new(size.cols, size.rows, data)
}

/// Turbo, a rainbow map evaluated from its published polynomial approximation.
#[derive(Clone, Copy, Debug)]
pub struct Turbo;

impl Colormap for Turbo {
    fn name(&self) -> &'static str {
        "turbo"
    }

    fn table(&self) -> &'static [[u8; 3]; LUT_LEN] {
        static TABLE: OnceLock<[[u8; 3]; LUT_LEN]> = OnceLock::new();
        TABLE.get_or_init(|| build_table(turbo_rgb))
    }
}

/// Viridis, perceptually uniform from dark purple to yellow.
#[derive(Clone, Copy, Debug)]
pub struct Viridis;

impl Colormap for Viridis {
    fn name(&self) -> &'static str {
        "viridis"
    }

    fn table(&self) -> &'static [[u8; 3]; LUT_LEN] {
        static TABLE: OnceLock<[[u8; 3]; LUT_LEN]> = OnceLock::new();
        TABLE.get_or_init(|| build_table(viridis_rgb))
    }
}

fn build_table(f: fn(f64) -> [u8; 3]) -> [[u8; 3]; LUT_LEN] {
    let mut table = [[0u8; 3]; LUT_LEN];
    for (i, entry) in table.iter_mut().enumerate() {
        *entry = f(i as f64 / (LUT_LEN - 1) as f64);
    }
    table
}

/// Polynomial approximation of the Turbo colormap (Mikhailov, 2019).
fn turbo_rgb(t: f64) -> [u8; 3] {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let r = 0.13572138 + 4.61539260 * t - 42.66032258 * t2 + 132.13108234 * t3
        - 152.94239396 * t4
        + 59.28637943 * t5;
    let g = 0.09140261 + 2.19418839 * t + 4.84296658 * t2 - 14.18503333 * t3
        + 4.27729857 * t4
        + 2.82956604 * t5;
    let b = 0.10667330 + 12.64194608 * t - 60.58204836 * t2 + 110.36276771 * t3
        - 89.90310912 * t4
        + 27.34824973 * t5;

    [to_u8(r), to_u8(g), to_u8(b)]
}

/// Viridis via piecewise-linear interpolation over evenly spaced anchor colors.
fn viridis_rgb(t: f64) -> [u8; 3] {
    const ANCHORS: [[u8; 3]; 10] = [
        [68, 1, 84],
        [72, 40, 120],
        [62, 74, 137],
        [49, 104, 142],
        [38, 130, 142],
        [31, 158, 137],
        [53, 183, 121],
        [109, 205, 89],
        [180, 222, 44],
        [253, 231, 37],
    ];

    let scaled = t.clamp(0.0, 1.0) * (ANCHORS.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(ANCHORS.len() - 1);
    let frac = scaled - lo as f64;

    let mut out = [0u8; 3];
    for (c, o) in out.iter_mut().enumerate() {
        let a = f64::from(ANCHORS[lo][c]);
        let b = f64::from(ANCHORS[hi][c]);
        *o = (a + (b - a) * frac).round() as u8;
    }
    out
}

fn to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/colormap.rs"]
mod tests;
