use crate::field::ScalarField;
use crate::foundation::error::{HydroError, HydroResult};

/// One shared min/max range for every frame of a generation batch.
///
/// The range is computed once from the complete set of *measured* fields and then reused
/// verbatim by every colormapping call in the batch, including synthetic animation
/// frames. Renormalizing per frame would destroy cross-time comparability, which is the
/// entire point of a globally consistent legend.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlobalRange {
    /// Smallest value across all measured fields.
    pub min: f64,
    /// Largest value across all measured fields.
    pub max: f64,
}

impl GlobalRange {
    /// Create a validated range with `min <= max`.
    pub fn new(min: f64, max: f64) -> HydroResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(HydroError::validation("range bounds must be finite"));
        }
        if min > max {
            return Err(HydroError::validation("range min must be <= max"));
        }
        Ok(Self { min, max })
    }

    /// Compute the range across every finite value of every field.
    pub fn from_fields<'a, I>(fields: I) -> HydroResult<Self>
    where
        I: IntoIterator<Item = &'a ScalarField>,
    {
        let mut acc: Option<(f64, f64)> = None;
        for field in fields {
            if let Some((lo, hi)) = field.finite_min_max() {
                acc = Some(match acc {
                    None => (lo, hi),
                    Some((alo, ahi)) => (alo.min(lo), ahi.max(hi)),
                });
            }
        }
        match acc {
            Some((min, max)) => Self::new(min, max),
            None => Err(HydroError::validation(
                "no finite field values to compute a range from",
            )),
        }
    }

    /// Return `true` when the range collapses to a single value.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// The [`HydroError::DegenerateRange`] describing this range, for batch flagging.
    pub fn degenerate_error(&self) -> HydroError {
        HydroError::DegenerateRange { value: self.min }
    }

    /// Map `value` into `[0, 1]` against this range, clamped.
    ///
    /// A degenerate range maps every value to the mid-scale constant 0.5 instead of
    /// dividing by zero; callers detect that case via [`GlobalRange::is_degenerate`]
    /// and surface a warning rather than aborting the render.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.5;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Width of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/normalize.rs"]
mod tests;
