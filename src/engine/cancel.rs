//! Cooperative cancellation: one token is created by the Quiz
//! Manager when a game starts and threaded down through the Scheduler,
//! Question Runner, and every interruptible sleep. Built on
//! `tokio::sync::watch` rather than a dedicated cancellation crate -
//! one more primitive to reach for plain tokio instead of pulling in
//! an extra dependency.

use std::time::Duration;
use tokio::sync::watch;

#[derive(Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

pub fn pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the token is cancelled; pair with `tokio::select!`
    /// at every suspension point the runner/scheduler blocks on.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Sleeps for `duration` unless cancelled first. Returns `true` if
    /// the sleep ran to completion, `false` if cancellation interrupted it.
    pub async fn sleep(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.cancelled() => false,
        }
    }
}
