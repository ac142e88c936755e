use crate::field::ScalarField;
use crate::foundation::error::{HydroError, HydroResult};

/// Smooth a scalar field with a separable 2D Gaussian.
///
/// `sigma` is the kernel standard deviation in grid-cell units. Values outside the grid
/// are taken from the nearest edge cell (replication, not wraparound), so the field is
/// not biased near borders. `sigma <= 0` disables smoothing and returns the field
/// unchanged.
///
/// Smoothing applies strictly to raw scalar values. Blurring an already colorized
/// raster would decouple pixel colors from the legend mapping.
pub fn gaussian_smooth(field: &ScalarField, sigma: f64) -> HydroResult<ScalarField> {
    if !sigma.is_finite() {
        return Err(HydroError::validation("smoothing sigma must be finite"));
    }
    if sigma <= 0.0 {
        return Ok(field.clone());
    }

    let kernel = gaussian_kernel(sigma);
    let size = field.size();
    let (rows, cols) = (size.rows as i64, size.cols as i64);

    let mut tmp = vec![0.0f64; field.len()];
    horizontal_pass(field.values(), &mut tmp, rows, cols, &kernel);
    let mut out = vec![0.0f64; field.len()];
    vertical_pass(&tmp, &mut out, rows, cols, &kernel);

    ScalarField::new(size, out)
}

/// Normalized 1D Gaussian weights with radius `ceil(3 * sigma)`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (3.0 * sigma).ceil().max(1.0) as i64;
    let denom = 2.0 * sigma * sigma;
    let mut weights = Vec::with_capacity((2 * radius + 1) as usize);
    let mut sum = 0.0;
    for i in -radius..=radius {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights.push(w);
        sum += w;
    }
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

fn horizontal_pass(src: &[f64], dst: &mut [f64], rows: i64, cols: i64, kernel: &[f64]) {
    let radius = (kernel.len() / 2) as i64;
    for row in 0..rows {
        let base = (row * cols) as usize;
        for col in 0..cols {
            let mut acc = 0.0;
            for (ki, &w) in kernel.iter().enumerate() {
                let sc = (col + ki as i64 - radius).clamp(0, cols - 1);
                acc += w * src[base + sc as usize];
            }
            dst[base + col as usize] = acc;
        }
    }
}

fn vertical_pass(src: &[f64], dst: &mut [f64], rows: i64, cols: i64, kernel: &[f64]) {
    let radius = (kernel.len() / 2) as i64;
    for row in 0..rows {
        for col in 0..cols {
            let mut acc = 0.0;
            for (ki, &w) in kernel.iter().enumerate() {
                let sr = (row + ki as i64 - radius).clamp(0, rows - 1);
                acc += w * src[(sr * cols + col) as usize];
            }
            dst[(row * cols + col) as usize] = acc;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/smooth.rs"]
mod tests;
