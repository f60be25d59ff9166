//! Background requests that report back to the UI loop.
//!
//! Each request runs as its own tokio task. Its result is queued on an unbounded channel that
//! the owner drains from the UI loop, so state is only ever mutated from one place. Requests
//! are never aborted. Once the owner is dropped its liveness token is cancelled, and results
//! that arrive afterwards are discarded. A request that panics reports the value built by its
//! `on_panic` closure instead, so every spawned request yields exactly one result.

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub struct TaskChannel<M> {
    name: &'static str,
    sender: mpsc::UnboundedSender<M>,
    receiver: mpsc::UnboundedReceiver<M>,
    /// Spawned requests whose result has not been received yet.
    in_flight: Arc<AtomicUsize>,
    liveness: CancellationToken,
}

impl<M: Send + 'static> TaskChannel<M> {
    pub fn new(name: &'static str) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            name,
            sender,
            receiver,
            in_flight: Arc::new(AtomicUsize::new(0)),
            liveness: CancellationToken::new(),
        }
    }

    /// Runs `request` in the background. Must be called from within a tokio runtime.
    pub fn spawn<F, P>(&self, request: F, on_panic: P)
    where
        F: Future<Output = M> + Send + 'static,
        P: FnOnce() -> M + Send + 'static,
    {
        let sender = self.sender.clone();
        let liveness = self.liveness.clone();
        let in_flight = self.in_flight.clone();
        let name = self.name;
        in_flight.fetch_add(1, Ordering::SeqCst);

        tokio::spawn(async move {
            let message = match AssertUnwindSafe(request).catch_unwind().await {
                Ok(message) => message,
                Err(_) => {
                    log::error!("{}: request panicked", name);
                    on_panic()
                }
            };
            if liveness.is_cancelled() {
                log::debug!("{}: discarding a result that arrived after close", name);
                in_flight.fetch_sub(1, Ordering::SeqCst);
                return;
            }
            if sender.send(message).is_err() {
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }
        });
    }

    /// A finished result, if one is waiting.
    pub fn try_next(&mut self) -> Option<M> {
        let message = self.receiver.try_recv().ok()?;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Some(message)
    }

    /// Waits for the next result. `None` once nothing is in flight.
    pub async fn next(&mut self) -> Option<M> {
        if self.in_flight() == 0 {
            return None;
        }
        let message = self.receiver.recv().await?;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Some(message)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Cancelled when this channel is dropped.
    pub fn liveness(&self) -> CancellationToken {
        self.liveness.clone()
    }
}

impl<M> Drop for TaskChannel<M> {
    fn drop(&mut self) {
        self.liveness.cancel();
    }
}
