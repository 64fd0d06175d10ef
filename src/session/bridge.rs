//! Non-blocking execution bridge.
//!
//! Runs store operations off the interactive thread and delivers their
//! outcomes back through a single ordered channel the interactive loop
//! drains between frames. Outcomes arrive in completion order, not
//! submission order; the session compares request ids to decide which
//! outcome is authoritative, so no ordering guarantee is needed here.
//!
//! Cancellation is logical only: a superseded operation is allowed to finish
//! and its outcome is discarded on arrival. Nothing aborts in-flight I/O.

use std::future::Future;

use tokio::sync::mpsc;

use crate::error::Result;

/// Unique identifier for a submitted request.
///
/// Ids are allocated by the session, strictly increasing, and only ever
/// touched on the interactive thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(u64);

impl RequestId {
    /// Returns the next id in the sequence.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The success-or-failure result of an executed operation, tagged with the
/// request that produced it.
#[derive(Debug)]
pub struct Outcome<T> {
    /// The request this outcome belongs to.
    pub request_id: RequestId,
    /// What the operation produced.
    pub result: Result<T>,
}

/// Schedules operations onto the worker context and funnels their outcomes
/// into one channel.
pub struct ExecutionBridge<T> {
    tx: mpsc::UnboundedSender<Outcome<T>>,
}

impl<T: Send + 'static> ExecutionBridge<T> {
    /// Creates a bridge and the receiving end of its outcome channel.
    ///
    /// The receiver belongs on the interactive thread; it is the only state
    /// shared between the two execution contexts besides the session itself.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Outcome<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Schedules `operation` to run without blocking the caller.
    ///
    /// On completion its outcome is enqueued with the given id. The send can
    /// only fail when the receiver is gone, i.e. during shutdown, where
    /// dropping the outcome is exactly right.
    pub fn submit<F>(&self, request_id: RequestId, operation: F)
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = operation.await;
            let _ = tx.send(Outcome { request_id, result });
        });
    }
}
