//! Cancellable fixed-interval polling.

extern crate tokio;

use crate::config::poll::CHECK_DELAY;
use log::debug;
use std::{future::Future, time::Duration};
use tokio::{
    sync::watch,
    time::{sleep_until, Instant},
};

/// Evaluates `check` every [`CHECK_DELAY`] until it yields a value.
/// Returns `Ok(None)` once `stop` becomes `true`.
pub async fn poll<F, Fut, T, E>(stop: watch::Receiver<bool>, check: F) -> Result<Option<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    poll_every(CHECK_DELAY, stop, check).await
}

pub async fn poll_every<F, Fut, T, E>(
    interval: Duration,
    mut stop: watch::Receiver<bool>,
    mut check: F,
) -> Result<Option<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let mut next = Instant::now();
    loop {
        if *stop.borrow() {
            debug!("Polling stopped");
            return Ok(None);
        }
        if let Some(v) = check().await? {
            return Ok(Some(v));
        }
        next += interval;
        tokio::select! {
            _ = sleep_until(next) => (),
            changed = stop.changed() => {
                // sender gone: nobody can stop us any more, keep the pace
                if changed.is_err() {
                    sleep_until(next).await;
                }
            }
        }
    }
}
