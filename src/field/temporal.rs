//! Synthetic per-station value interpolation between two measured timestamps.
//!
//! This is the experimental animation path. Values are interpolated linearly per
//! station with no validation against physical plausibility; the output is synthesis,
//! not measurement, and is labeled as such at the API boundary.

use std::collections::HashMap;

use crate::field::StationValue;
use crate::foundation::error::{HydroError, HydroResult};

/// One synthetic sample set between two measured endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntheticStep {
    /// Position of this step in the final sequence (1-based; 0 and k+1 are measured).
    pub step: usize,
    /// Fractional time between the endpoints, in `(0, 1)`.
    pub fraction: f64,
    /// Per-station interpolated values.
    pub stations: Vec<StationValue>,
}

/// Fractional positions for `intermediate` steps: `i / (intermediate + 1)`.
pub fn step_fractions(intermediate: u32) -> Vec<f64> {
    let denom = f64::from(intermediate) + 1.0;
    (1..=intermediate).map(|i| f64::from(i) / denom).collect()
}

/// Interpolate station values between two endpoint sample sets.
///
/// Stations are matched across the endpoints by exact coordinate identity. A station
/// missing from either endpoint is excluded from every synthetic step it cannot cover;
/// partial coverage is preferred over failing the whole animation. A step whose station
/// set drops to zero yields [`HydroError::MissingStations`] for that step only, and the
/// remaining steps still synthesize.
pub fn synthesize_steps(
    start: &[StationValue],
    end: &[StationValue],
    intermediate: u32,
) -> Vec<HydroResult<SyntheticStep>> {
    let end_by_pos: HashMap<(u64, u64), f64> = end
        .iter()
        .map(|s| (position_key(s), s.value))
        .collect();

    // Stations present at both endpoints, in start order for determinism.
    let shared: Vec<(StationValue, f64)> = start
        .iter()
        .filter_map(|s| end_by_pos.get(&position_key(s)).map(|&v1| (*s, v1)))
        .collect();

    step_fractions(intermediate)
        .into_iter()
        .enumerate()
        .map(|(i, fraction)| {
            let step = i + 1;
            if shared.is_empty() {
                return Err(HydroError::MissingStations { step });
            }
            let stations = shared
                .iter()
                .map(|&(s0, v1)| StationValue {
                    position: s0.position,
                    value: lerp(s0.value, v1, fraction),
                })
                .collect();
            Ok(SyntheticStep {
                step,
                fraction,
                stations,
            })
        })
        .collect()
}

fn position_key(s: &StationValue) -> (u64, u64) {
    (s.position.x.to_bits(), s.position.y.to_bits())
}

fn lerp(v0: f64, v1: f64, f: f64) -> f64 {
    v0 + f * (v1 - v0)
}

#[cfg(test)]
#[path = "../../tests/unit/field/temporal.rs"]
mod tests;
