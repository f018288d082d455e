//! Serialized persistence queue.
//!
//! # Responsibility
//! - Own the storage backend on a dedicated worker thread and run every
//!   read/write through it in order.
//! - Coalesce queued writes to the same key down to the newest blob.
//!
//! # Invariants
//! - At most one backend write is in flight at any time.
//! - A read observes every write enqueued before it.
//! - `flush` returns only after everything enqueued before it was attempted.
//! - Write failures are logged and counted, never raised to mutation callers
//!   and never allowed to touch in-memory state.

use crate::storage::{StorageBackend, StorageError, StorageResult};
use log::{debug, error};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

enum Job {
    Write {
        key: String,
        value: String,
    },
    Read {
        key: String,
        reply: Sender<StorageResult<Option<String>>>,
    },
    Flush {
        reply: Sender<()>,
    },
    Shutdown,
}

/// Cloneable front end the stores enqueue through.
#[derive(Clone)]
pub struct PersistHandle {
    tx: Sender<Job>,
    failures: Arc<AtomicU64>,
}

impl PersistHandle {
    /// Enqueues a fire-and-forget write of `value` under `key`.
    ///
    /// Failure to enqueue (worker already shut down) is counted as a write
    /// failure; the caller's in-memory state stays authoritative either way.
    pub fn write(&self, key: &str, value: String) {
        let job = Job::Write {
            key: key.to_string(),
            value,
        };
        if self.tx.send(job).is_err() {
            self.failures.fetch_add(1, Ordering::Relaxed);
            error!("event=persist_write module=store status=error key={key} error=queue_closed");
        }
    }

    /// Reads the blob under `key`, serialized behind all earlier writes.
    pub fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let (reply_tx, reply_rx) = mpsc::channel();
        let job = Job::Read {
            key: key.to_string(),
            reply: reply_tx,
        };
        self.tx.send(job).map_err(|_| StorageError::Disconnected)?;
        reply_rx.recv().map_err(|_| StorageError::Disconnected)?
    }

    /// Number of writes that failed (or could not be enqueued) so far.
    /// Each one is a window where persisted state lags in-memory state.
    pub fn write_failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

/// Owner of the worker thread. Dropping it flushes what is already queued
/// and joins the worker.
pub struct PersistQueue {
    handle: PersistHandle,
    worker: Option<JoinHandle<()>>,
}

impl PersistQueue {
    /// Moves `backend` onto a new worker thread and starts serving jobs.
    pub fn spawn(backend: impl StorageBackend + 'static) -> StorageResult<Self> {
        let (tx, rx) = mpsc::channel();
        let failures = Arc::new(AtomicU64::new(0));
        let worker_failures = Arc::clone(&failures);
        let worker = thread::Builder::new()
            .name("yunote-persist".to_string())
            .spawn(move || run_worker(backend, rx, worker_failures))
            .map_err(|err| {
                StorageError::Backend(format!("failed to spawn persistence worker: {err}"))
            })?;

        Ok(Self {
            handle: PersistHandle { tx, failures },
            worker: Some(worker),
        })
    }

    /// Returns a cloneable handle for stores to enqueue through.
    pub fn handle(&self) -> PersistHandle {
        self.handle.clone()
    }

    /// Blocks until every job enqueued before this call has been attempted.
    pub fn flush(&self) -> StorageResult<()> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.handle
            .tx
            .send(Job::Flush { reply: reply_tx })
            .map_err(|_| StorageError::Disconnected)?;
        reply_rx.recv().map_err(|_| StorageError::Disconnected)
    }

    /// See [`PersistHandle::write_failures`].
    pub fn write_failures(&self) -> u64 {
        self.handle.write_failures()
    }
}

impl Drop for PersistQueue {
    fn drop(&mut self) {
        let _ = self.handle.tx.send(Job::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker(
    backend: impl StorageBackend,
    rx: Receiver<Job>,
    failures: Arc<AtomicU64>,
) {
    let mut next = None;
    loop {
        let job = match next.take() {
            Some(job) => job,
            None => match rx.recv() {
                Ok(job) => job,
                // All handles dropped without an explicit shutdown.
                Err(_) => return,
            },
        };

        match job {
            Job::Write { key, value } => {
                let mut pending = vec![(key, value)];
                // Coalesce everything already queued: only the newest blob
                // per key is worth writing. Stop at the first non-write so
                // reads and flushes keep their ordering guarantees.
                loop {
                    match rx.try_recv() {
                        Ok(Job::Write { key, value }) => upsert(&mut pending, key, value),
                        Ok(other) => {
                            next = Some(other);
                            break;
                        }
                        Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                    }
                }
                for (key, value) in pending {
                    match backend.set(&key, &value) {
                        Ok(()) => {
                            debug!("event=persist_write module=store status=ok key={key}");
                        }
                        Err(err) => {
                            failures.fetch_add(1, Ordering::Relaxed);
                            error!(
                                "event=persist_write module=store status=error key={key} error={err}"
                            );
                        }
                    }
                }
            }
            Job::Read { key, reply } => {
                let _ = reply.send(backend.get(&key));
            }
            Job::Flush { reply } => {
                let _ = reply.send(());
            }
            Job::Shutdown => return,
        }
    }
}

fn upsert(pending: &mut Vec<(String, String)>, key: String, value: String) {
    match pending.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => pending.push((key, value)),
    }
}
