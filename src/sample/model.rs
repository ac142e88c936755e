use crate::foundation::core::Point;
use crate::foundation::error::{HydroError, HydroResult};

/// One georeferenced, timestamped scalar measurement.
///
/// The timestamp is an opaque label. It does not have to be chronological, but labels
/// must be totally orderable so animation endpoints can be declared against them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StationSample {
    /// Latitude in degrees, in `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in degrees, in `[-180, 180]`.
    pub longitude: f64,
    /// Measured parameter name, e.g. `"pH"`.
    pub parameter: String,
    /// Timestamp label, e.g. `"Jan-24"`.
    pub timestamp: String,
    /// Measured scalar value.
    pub value: f64,
}

impl StationSample {
    /// Build a validated sample.
    pub fn new(
        latitude: f64,
        longitude: f64,
        parameter: impl Into<String>,
        timestamp: impl Into<String>,
        value: f64,
    ) -> HydroResult<Self> {
        let sample = Self {
            latitude,
            longitude,
            parameter: parameter.into(),
            timestamp: timestamp.into(),
            value,
        };
        sample.validate()?;
        Ok(sample)
    }

    /// Check coordinates, value and labels.
    ///
    /// Rejections are [`HydroError::MalformedSample`]; batch ingestion skips the
    /// offending row and continues with the rest.
    pub fn validate(&self) -> HydroResult<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(HydroError::malformed_sample(format!(
                "latitude {} out of range",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(HydroError::malformed_sample(format!(
                "longitude {} out of range",
                self.longitude
            )));
        }
        if !self.value.is_finite() {
            return Err(HydroError::malformed_sample("non-finite value"));
        }
        if self.parameter.trim().is_empty() {
            return Err(HydroError::malformed_sample("empty parameter name"));
        }
        if self.timestamp.trim().is_empty() {
            return Err(HydroError::malformed_sample("empty timestamp label"));
        }
        Ok(())
    }

    /// Identity of this sample within a store.
    pub fn key(&self) -> SampleKey {
        SampleKey::new(
            self.latitude,
            self.longitude,
            self.parameter.clone(),
            self.timestamp.clone(),
        )
    }

    /// Position with longitude on the x axis and latitude on the y axis.
    pub fn position(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// Unique identity of a sample: exact coordinate bit patterns plus parameter and
/// timestamp. Inserting a second sample with the same key overwrites the first.
///
/// Field order matters: the derived ordering groups a store by parameter, then
/// timestamp, which the per-timestamp slicing relies on.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleKey {
    /// Parameter name.
    pub parameter: String,
    /// Timestamp label.
    pub timestamp: String,
    lat_bits: u64,
    lon_bits: u64,
}

impl SampleKey {
    /// Build a key from raw coordinates and labels.
    pub fn new(
        latitude: f64,
        longitude: f64,
        parameter: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            timestamp: timestamp.into(),
            lat_bits: latitude.to_bits(),
            lon_bits: longitude.to_bits(),
        }
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        f64::from_bits(self.lat_bits)
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        f64::from_bits(self.lon_bits)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sample/model.rs"]
mod tests;
