use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use crate::foundation::error::HydroResult;
use crate::geometry::boundary::StudyRegion;
use crate::render::animation::{AnimationConfig, AnimationSequence, render_animation_with_cancel};
use crate::render::pipeline::FieldBatch;
use crate::sample::store::SampleStore;

/// Completed worker output, stamped with the session epoch it was computed against.
pub(crate) struct JobResult {
    pub(crate) epoch: u64,
    pub(crate) result: HydroResult<AnimationSequence>,
}

/// Poll outcome for an animation job.
pub(crate) enum JobPoll {
    /// Still computing.
    Running,
    /// Finished with a result.
    Done(JobResult),
    /// Worker exited without sending a result (cancelled or panicked).
    Dead,
}

/// A worker-thread animation job with cooperative cancellation.
///
/// Cancellation sets the shared flag; the worker observes it between synthetic steps
/// and exits without sending, so a cancelled job can never surface a result.
pub(crate) struct AnimationJob {
    cancel: Arc<AtomicBool>,
    rx: mpsc::Receiver<JobResult>,
    handle: Option<thread::JoinHandle<()>>,
}

impl AnimationJob {
    pub(crate) fn spawn(
        store: SampleStore,
        region: StudyRegion,
        batch: FieldBatch,
        config: AnimationConfig,
        epoch: u64,
    ) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            let result = render_animation_with_cancel(&store, &region, &batch, &config, &flag);
            if !flag.load(Ordering::Relaxed) {
                let _ = tx.send(JobResult { epoch, result });
            }
        });
        Self {
            cancel,
            rx,
            handle: Some(handle),
        }
    }

    /// Request cancellation; the worker drops its result on the way out.
    pub(crate) fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Non-blocking poll.
    pub(crate) fn poll(&self) -> JobPoll {
        match self.rx.try_recv() {
            Ok(result) => JobPoll::Done(result),
            Err(mpsc::TryRecvError::Empty) => JobPoll::Running,
            Err(mpsc::TryRecvError::Disconnected) => JobPoll::Dead,
        }
    }

    /// Block until the worker finishes; `None` when it exited without a result.
    pub(crate) fn wait(mut self) -> Option<JobResult> {
        let result = self.rx.recv().ok();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        result
    }
}

impl Drop for AnimationJob {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}
