//! Session Tick Source
//!
//! A periodic timer bound to a session's lifetime. The timer task is
//! aborted when the source is stopped or dropped, so no tick can reach a
//! session after it is torn down.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// Owns the interval task for one session.
#[derive(Debug)]
pub struct TickSource {
    task: Option<JoinHandle<()>>,
}

impl TickSource {
    /// Start sending `make_tick()` into `sink` every `period`.
    ///
    /// The first tick fires one full period after start. The task ends on
    /// its own if the receiving side goes away.
    pub fn start<M, F>(period: Duration, sink: mpsc::Sender<M>, make_tick: F) -> Self
    where
        M: Send + 'static,
        F: Fn() -> M + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if sink.send(make_tick()).await.is_err() {
                    debug!("Tick sink closed, stopping clock");
                    break;
                }
            }
        });

        Self { task: Some(task) }
    }

    /// Whether the timer task is still alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the timer and wait for the task to wind down.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
    }
}

impl Drop for TickSource {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
