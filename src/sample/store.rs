use std::collections::BTreeMap;

use crate::field::StationValue;
use crate::foundation::error::HydroError;
use crate::sample::model::{SampleKey, StationSample};

/// Owning collection of station samples, keyed by [`SampleKey`].
///
/// Duplicate keys overwrite, never accumulate. Iteration order is deterministic:
/// parameter, then timestamp, then coordinate bits.
#[derive(Clone, Debug, Default)]
pub struct SampleStore {
    samples: BTreeMap<SampleKey, StationSample>,
}

/// Outcome of a batch ingest: accepted rows plus the rows that were skipped, with the
/// reason each one was rejected.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Rows inserted as new samples.
    pub accepted: usize,
    /// Rows that overwrote an existing sample with the same key.
    pub replaced: usize,
    /// Malformed rows, skipped without aborting the batch.
    pub skipped: Vec<SkippedSample>,
}

/// A rejected ingest row.
#[derive(Debug)]
pub struct SkippedSample {
    /// Index of the row in the ingested batch.
    pub index: usize,
    /// Why the row was rejected.
    pub error: HydroError,
}

impl SampleStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Return `true` when the store holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Insert or overwrite one validated sample, returning the replaced sample if any.
    pub fn upsert(&mut self, sample: StationSample) -> Result<Option<StationSample>, HydroError> {
        sample.validate()?;
        Ok(self.samples.insert(sample.key(), sample))
    }

    /// Ingest a batch, skipping malformed rows.
    #[tracing::instrument(skip_all)]
    pub fn ingest<I>(&mut self, batch: I) -> IngestReport
    where
        I: IntoIterator<Item = StationSample>,
    {
        let mut report = IngestReport::default();
        for (index, sample) in batch.into_iter().enumerate() {
            match self.upsert(sample) {
                Ok(Some(_)) => report.replaced += 1,
                Ok(None) => report.accepted += 1,
                Err(error) => {
                    tracing::debug!(index, %error, "skipping malformed sample");
                    report.skipped.push(SkippedSample { index, error });
                }
            }
        }
        report
    }

    /// Remove exactly one sample by key, returning it if present.
    pub fn remove(&mut self, key: &SampleKey) -> Option<StationSample> {
        self.samples.remove(key)
    }

    /// Distinct parameter names in order.
    pub fn parameters(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for key in self.samples.keys() {
            if out.last().map(String::as_str) != Some(key.parameter.as_str()) {
                out.push(key.parameter.clone());
            }
        }
        out
    }

    /// Distinct timestamp labels for one parameter, in label order.
    pub fn timestamps(&self, parameter: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for key in self.samples.keys() {
            if key.parameter == parameter
                && out.last().map(String::as_str) != Some(key.timestamp.as_str())
            {
                out.push(key.timestamp.clone());
            }
        }
        out
    }

    /// Station values for one (parameter, timestamp) slice, in key order.
    pub fn stations(&self, parameter: &str, timestamp: &str) -> Vec<StationValue> {
        self.samples
            .values()
            .filter(|s| s.parameter == parameter && s.timestamp == timestamp)
            .map(|s| StationValue {
                position: s.position(),
                value: s.value,
            })
            .collect()
    }

    /// Positions of every sample, across all parameters and timestamps.
    ///
    /// Used to derive the fallback rectangular extent when no boundary is supplied.
    pub fn positions(&self) -> impl Iterator<Item = crate::foundation::core::Point> + '_ {
        self.samples.values().map(StationSample::position)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sample/store.rs"]
mod tests;
