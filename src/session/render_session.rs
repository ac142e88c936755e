use std::collections::BTreeMap;

use crate::foundation::error::{HydroError, HydroResult};
use crate::geometry::boundary::{BoundaryPolygon, RectExtent, StudyRegion};
use crate::render::animation::{AnimationConfig, AnimationSequence, render_animation};
use crate::render::pipeline::{BatchResult, FieldBatch, PipelineOpts, RenderConfig};
use crate::sample::model::{SampleKey, StationSample};
use crate::sample::store::{IngestReport, SampleStore};
use crate::session::job::{AnimationJob, JobPoll};

/// Lifecycle of a rendering session.
///
/// Any sample mutation resets the session to `SamplesLoaded` (or `Empty`), invalidating
/// every cached field, frame and animation downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No samples loaded yet.
    Empty,
    /// Samples present, nothing computed.
    SamplesLoaded,
    /// At least one field batch computed.
    FieldsComputed,
    /// At least one batch rendered to frames.
    FramesRendered,
    /// An animation job is in flight.
    AnimationRequested,
    /// An animation sequence is available.
    AnimationReady,
}

/// One rendering session: owns the samples, the optional boundary, and all caches.
///
/// The numeric pipeline itself stays stateless; the session only sequences the
/// two-phase protocol, scopes caches per parameter, and manages the animation worker.
/// Caches are never shared across sessions, so color scales from independent datasets
/// cannot mix.
#[derive(Default)]
pub struct RenderSession {
    store: SampleStore,
    boundary: Option<BoundaryPolygon>,
    state: Option<SessionState>,
    epoch: u64,
    batches: BTreeMap<String, FieldBatch>,
    results: BTreeMap<String, BatchResult>,
    animation: Option<AnimationSequence>,
    job: Option<AnimationJob>,
}

impl RenderSession {
    /// Fresh, empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        if self.job.is_some() {
            return SessionState::AnimationRequested;
        }
        self.state.unwrap_or(SessionState::Empty)
    }

    /// Borrow the sample store.
    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    /// Install the study-area boundary.
    ///
    /// The boundary is immutable for the lifetime of the session; installing a second
    /// one is a validation error.
    pub fn set_boundary(&mut self, boundary: BoundaryPolygon) -> HydroResult<()> {
        if self.boundary.is_some() {
            return Err(HydroError::validation(
                "boundary is immutable for the session lifetime",
            ));
        }
        self.boundary = Some(boundary);
        Ok(())
    }

    /// Parse and install a GeoJSON boundary.
    pub fn set_boundary_geojson(&mut self, json: &str) -> HydroResult<()> {
        self.set_boundary(BoundaryPolygon::from_geojson_str(json)?)
    }

    /// Ingest a batch of samples, skipping malformed rows.
    ///
    /// Cancels any in-flight animation job and invalidates all cached results.
    pub fn load_samples(&mut self, batch: Vec<StationSample>) -> IngestReport {
        self.invalidate();
        let report = self.store.ingest(batch);
        self.state = Some(if self.store.is_empty() {
            SessionState::Empty
        } else {
            SessionState::SamplesLoaded
        });
        report
    }

    /// Remove exactly one sample by key, if present.
    ///
    /// A successful removal cancels any in-flight animation job and invalidates all
    /// cached results, so the next regeneration recomputes the global range without
    /// the deleted value.
    pub fn delete_sample(&mut self, key: &SampleKey) -> Option<StationSample> {
        let removed = self.store.remove(key)?;
        self.invalidate();
        self.state = Some(if self.store.is_empty() {
            SessionState::Empty
        } else {
            SessionState::SamplesLoaded
        });
        Some(removed)
    }

    /// Phase 1: compute the field batch for one parameter and cache it.
    pub fn compute_fields(
        &mut self,
        parameter: &str,
        config: &RenderConfig,
        opts: &PipelineOpts,
    ) -> HydroResult<&FieldBatch> {
        if self.store.timestamps(parameter).is_empty() {
            return Err(HydroError::InsufficientStations);
        }
        let region = self.region()?;
        let batch = FieldBatch::compute(&self.store, parameter, &region, config, opts)?;
        self.batches.insert(parameter.to_string(), batch);
        self.state = Some(SessionState::FieldsComputed);
        Ok(self
            .batches
            .get(parameter)
            .expect("batch present immediately after insert"))
    }

    /// Phase 2: render frames from the cached field batch for one parameter.
    ///
    /// The sequencing contract is enforced here: calling this before
    /// [`RenderSession::compute_fields`] is an error, so no frame can ever render
    /// against a range that was not computed across all real timestamps first.
    pub fn render_frames(&mut self, parameter: &str) -> HydroResult<&BatchResult> {
        let batch = self.batches.get(parameter).ok_or_else(|| {
            HydroError::validation("compute_fields must complete before render_frames")
        })?;
        let region = self.region()?;
        let result = batch.render(&region)?;
        self.results.insert(parameter.to_string(), result);
        self.state = Some(SessionState::FramesRendered);
        Ok(self
            .results
            .get(parameter)
            .expect("result present immediately after insert"))
    }

    /// Rendered batch result for one parameter, if phase 2 has run.
    pub fn frames(&self, parameter: &str) -> Option<&BatchResult> {
        self.results.get(parameter)
    }

    /// Render an animation synchronously on the calling thread.
    pub fn render_animation_blocking(
        &mut self,
        parameter: &str,
        config: &AnimationConfig,
    ) -> HydroResult<&AnimationSequence> {
        let batch = self.batches.get(parameter).ok_or_else(|| {
            HydroError::validation("compute_fields must complete before animation")
        })?;
        let region = self.region()?;
        let sequence = render_animation(&self.store, &region, batch, config)?;
        self.animation = Some(sequence);
        self.state = Some(SessionState::AnimationReady);
        Ok(self
            .animation
            .as_ref()
            .expect("animation present immediately after insert"))
    }

    /// Offload an animation to a worker thread.
    ///
    /// Any previous in-flight job is cancelled first; the request-accepting path never
    /// blocks on the numeric pipeline. Callers retrieve the sequence through
    /// [`RenderSession::poll_animation`] or [`RenderSession::await_animation`].
    pub fn request_animation(
        &mut self,
        parameter: &str,
        config: &AnimationConfig,
    ) -> HydroResult<()> {
        config.validate()?;
        let batch = self
            .batches
            .get(parameter)
            .cloned()
            .ok_or_else(|| {
                HydroError::validation("compute_fields must complete before animation")
            })?;
        if let Some(job) = self.job.take() {
            job.cancel();
        }
        self.animation = None;
        let region = self.region()?;
        self.job = Some(AnimationJob::spawn(
            self.store.clone(),
            region,
            batch,
            config.clone(),
            self.epoch,
        ));
        self.state = Some(SessionState::AnimationRequested);
        Ok(())
    }

    /// Non-blocking check for a finished animation.
    ///
    /// Returns `Ok(None)` while the job is still running or after it was cancelled.
    /// Results computed against a stale epoch (the sample set changed since the job
    /// started) are dropped, never returned.
    pub fn poll_animation(&mut self) -> HydroResult<Option<&AnimationSequence>> {
        if let Some(job) = self.job.take() {
            match job.poll() {
                JobPoll::Running => {
                    self.job = Some(job);
                    return Ok(None);
                }
                JobPoll::Dead => return Ok(None),
                JobPoll::Done(done) => {
                    if done.epoch != self.epoch {
                        tracing::debug!("dropping stale animation result");
                        return Ok(None);
                    }
                    let sequence = done.result?;
                    self.animation = Some(sequence);
                    self.state = Some(SessionState::AnimationReady);
                }
            }
        }
        Ok(self.animation.as_ref())
    }

    /// Block until the in-flight animation finishes and return it.
    pub fn await_animation(&mut self) -> HydroResult<&AnimationSequence> {
        if let Some(job) = self.job.take() {
            match job.wait() {
                None => return Err(HydroError::Cancelled),
                Some(done) => {
                    if done.epoch != self.epoch {
                        return Err(HydroError::Cancelled);
                    }
                    self.animation = Some(done.result?);
                    self.state = Some(SessionState::AnimationReady);
                }
            }
        }
        self.animation
            .as_ref()
            .ok_or_else(|| HydroError::validation("no animation was requested"))
    }

    /// Resolve the study region: the installed boundary, or the rectangular extent of
    /// all station positions when none was supplied.
    fn region(&self) -> HydroResult<StudyRegion> {
        match &self.boundary {
            Some(poly) => Ok(StudyRegion::Polygon(poly.clone())),
            None => {
                tracing::debug!("no boundary installed, using station extent fallback");
                Ok(StudyRegion::Rect(RectExtent::from_points(
                    self.store.positions(),
                )?))
            }
        }
    }

    /// Cancel the in-flight job and drop every cached downstream product.
    fn invalidate(&mut self) {
        self.epoch += 1;
        if let Some(job) = self.job.take() {
            job.cancel();
        }
        self.batches.clear();
        self.results.clear();
        self.animation = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
