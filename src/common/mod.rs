use crossbeam_channel::{Receiver, Sender};
use std::thread;
use std::thread::JoinHandle;

pub mod peer_notifier;

#[derive(Debug)]
pub struct Worker {
    pub join_handle: JoinHandle<()>,
    pub terminate_worker_tx: Sender<()>,
}

impl Worker {
    /// Signals the worker to stop and waits for its thread.
    pub fn terminate(self) {
        if self.terminate_worker_tx.send(()).is_err() {
            error!("Cannot send termination signal")
        }
        if self.join_handle.join().is_err() {
            error!("Worker returned an error")
        }
    }
}

pub fn run_worker<T: Send + 'static, F: Fn(T, Receiver<()>) + Send + 'static>(
    worker: F,
    params: T,
) -> Worker {
    let (terminate_worker_tx, terminate_worker_rx): (Sender<()>, Receiver<()>) =
        crossbeam_channel::unbounded();

    let join_handle = thread::spawn(move || worker(params, terminate_worker_rx));

    Worker {
        join_handle,
        terminate_worker_tx,
    }
}
