//! Off-thread execution of codec steps.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{unbounded, Receiver, Sender};
use log::{debug, warn};

/// A unit of work. It reports its own completion (the engine's jobs send
/// the finished step back over a channel).
pub type Job = Box<dyn FnOnce() + Send + 'static>;

pub trait Executor: Send + Sync {
    fn submit(&self, job: Job);
}

/// Runs each job immediately on the submitting thread. Completions are
/// still only observed when the engine polls, so ordering is unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn submit(&self, job: Job) {
        job();
    }
}

/// Fixed set of threads pulling jobs from a shared channel.
pub struct WorkerPool {
    tx: Option<Sender<Job>>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let (tx, rx) = unbounded::<Job>();

        let handles = (0..worker_count)
            .map(|i| {
                let rx = rx.clone();
                thread::spawn(move || run_worker(i, rx))
            })
            .collect();

        Self { tx: Some(tx), handles }
    }

    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }
}

impl Executor for WorkerPool {
    fn submit(&self, job: Job) {
        let Some(tx) = self.tx.as_ref() else {
            warn!("[WORKER] submit after shutdown, job dropped");
            return;
        };
        // A dropped job drops its completion sender; the engine sees that.
        if tx.send(job).is_err() {
            warn!("[WORKER] all workers gone, job dropped");
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        drop(self.tx.take()); // close the job channel so workers exit
        for handle in self.handles.drain(..) {
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
    }
}

fn run_worker(index: usize, rx: Receiver<Job>) {
    debug!("[WORKER-{index}] starting");
    while let Ok(job) = rx.recv() {
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            warn!("[WORKER-{index}] job panicked");
        }
    }
    debug!("[WORKER-{index}] finished");
}

/// Leave one core free for the controlling thread.
pub fn default_worker_count() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

/// Process-wide pool backing `Engine::new`, created on first use.
pub fn default_pool() -> Arc<WorkerPool> {
    static POOL: OnceLock<Arc<WorkerPool>> = OnceLock::new();
    POOL.get_or_init(|| Arc::new(WorkerPool::new(default_worker_count())))
        .clone()
}
