//! Session-oriented API: sample lifecycle, cached batches and worker-offloaded
//! animation jobs.

pub(crate) mod job;
/// The rendering session and its state machine.
pub mod render_session;
