//! Background status polling.
//!
//! A [`StatusPoller`] owns one tokio task that fetches station status,
//! publishes it on a [`StatusBoard`], and sleeps for a period recomputed from
//! every response: fast while a timed program runs, slow otherwise. Fetches
//! run one after the other, so a slow response can never be overtaken by a
//! newer one.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::routes::StatusEntry;
use crate::services::status::{PollCadence, StatusBoard};

/// Where station status comes from (the controller's `/status.json`).
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> anyhow::Result<Vec<StatusEntry>>;
}

/// Handle to a running poll loop.
pub struct StatusPoller {
    board: StatusBoard,
    cancel: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl StatusPoller {
    /// Start polling `source`. Must be called inside a tokio runtime.
    pub fn spawn(source: Arc<dyn StatusSource>, cadence: PollCadence) -> Self {
        let board = StatusBoard::new();
        let (cancel, cancelled) = watch::channel(false);
        let handle = tokio::spawn(poll_loop(source, cadence, board.clone(), cancelled));
        log::info!(
            "Status poller started (fast {:?}, slow {:?})",
            cadence.fast,
            cadence.slow
        );
        Self {
            board,
            cancel,
            handle: Some(handle),
        }
    }

    pub fn board(&self) -> &StatusBoard {
        &self.board
    }

    /// Stop polling and wait for the loop to exit.
    pub async fn cancel(mut self) {
        let _ = self.cancel.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        log::info!("Status poller stopped");
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Sleep for `period` unless cancelled first. Returns false when cancelled.
async fn wait(period: Duration, cancelled: &mut watch::Receiver<bool>) -> bool {
    if *cancelled.borrow() {
        return false;
    }
    tokio::select! {
        _ = tokio::time::sleep(period) => true,
        changed = cancelled.changed() => match changed {
            Ok(()) => !*cancelled.borrow(),
            // Sender gone: nobody can observe the board any more.
            Err(_) => false,
        },
    }
}

async fn poll_loop(
    source: Arc<dyn StatusSource>,
    cadence: PollCadence,
    board: StatusBoard,
    mut cancelled: watch::Receiver<bool>,
) {
    let mut period = cadence.initial_delay;
    while wait(period, &mut cancelled).await {
        period = match source.fetch_status().await {
            Ok(entries) => {
                let next = cadence.next_period(&entries);
                log::debug!("Fetched status for {} stations, next poll in {:?}", entries.len(), next);
                board.publish(entries);
                next
            }
            Err(e) => {
                log::warn!("Status fetch failed, keeping previous snapshot: {:#}", e);
                cadence.slow
            }
        };
    }
}
