use crate::dispatcher::Dispatcher;
use helpline_core::{Command, EventPayload, InboundEvent};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Dispatches every `SWEEP_EVERY` events, the pool drops senders whose
/// worker has exited so the map does not grow with every user ever seen.
const SWEEP_EVERY: u64 = 256;

/// Per-sender worker pool.
///
/// Each distinct sender gets one worker task fed over an unbounded channel,
/// so a user's events are handled strictly in arrival order while different
/// users proceed concurrently. Workers exit after `idle_timeout` without
/// events and are respawned transparently on the sender's next event.
///
/// `/cancel` gets a fast path: before the event is queued behind whatever
/// the worker is currently doing, the target session's generation is bumped
/// so replies already being translated for the previous interaction are
/// discarded, not delivered.
pub struct WorkerPool {
    dispatcher: Arc<Dispatcher>,
    workers: HashMap<String, mpsc::UnboundedSender<InboundEvent>>,
    idle_timeout: Duration,
    dispatched: u64,
}

impl WorkerPool {
    /// Creates an empty pool.
    pub fn new(dispatcher: Arc<Dispatcher>, idle_timeout: Duration) -> Self {
        Self {
            dispatcher,
            workers: HashMap::new(),
            idle_timeout,
            dispatched: 0,
        }
    }

    /// Routes one event to its sender's worker, spawning one if needed.
    pub fn dispatch(&mut self, event: InboundEvent) {
        if matches!(&event.payload, EventPayload::Command(Command::Cancel)) {
            // Invalidate in-flight replies immediately, before the cancel
            // itself waits its turn in the worker queue. Non-creating
            // lookup: a cancel from an unknown user must not mint a session.
            if let Some(entry) = self.dispatcher.store.get(&event.sender_id) {
                entry.bump_generation();
                debug!(user_id = %event.sender_id, "cancel fast path bumped generation");
            }
        }

        self.dispatched += 1;
        if self.dispatched % SWEEP_EVERY == 0 {
            self.reap();
        }

        let mut event = event;
        loop {
            let worker = self
                .workers
                .entry(event.sender_id.clone())
                .or_insert_with(|| spawn_worker(Arc::clone(&self.dispatcher), self.idle_timeout));
            match worker.send(event) {
                Ok(()) => return,
                // Worker hit its idle timeout between our lookup and the
                // send; drop the dead sender and spawn a fresh one.
                Err(mpsc::error::SendError(returned)) => {
                    self.workers.remove(&returned.sender_id);
                    event = returned;
                }
            }
        }
    }

    /// Drops senders whose worker has exited. Returns how many were removed.
    pub fn reap(&mut self) -> usize {
        let before = self.workers.len();
        self.workers.retain(|_, tx| !tx.is_closed());
        before - self.workers.len()
    }

    /// Number of live worker entries.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

fn spawn_worker(
    dispatcher: Arc<Dispatcher>,
    idle_timeout: Duration,
) -> mpsc::UnboundedSender<InboundEvent> {
    let (tx, mut rx) = mpsc::unbounded_channel::<InboundEvent>();
    tokio::spawn(async move {
        loop {
            match tokio::time::timeout(idle_timeout, rx.recv()).await {
                Ok(Some(event)) => dispatcher.handle_event(event).await,
                Ok(None) => return,
                Err(_) => {
                    // Close first so a concurrent send fails and the pool
                    // respawns, then drain what was already queued.
                    rx.close();
                    while let Some(event) = rx.recv().await {
                        dispatcher.handle_event(event).await;
                    }
                    return;
                }
            }
        }
    });
    tx
}
