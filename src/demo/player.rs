//! Timer-driven demo playback.
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::DemoError;
use super::scenes::{DemoScript, SceneCycle, SceneSnapshot};

/// Advances a [`SceneCycle`] every `period` on a background task.
///
/// Dropping the player cancels the task.
pub struct DemoPlayer {
    cancel: CancellationToken,
    snapshots: watch::Receiver<SceneSnapshot>,
    handle: Option<JoinHandle<()>>,
}

impl DemoPlayer {
    /// Start playing `script`. Must be called inside a tokio runtime.
    pub fn spawn(script: DemoScript, period: Duration) -> Result<Self, DemoError> {
        if period.is_zero() {
            return Err(DemoError::InvalidPeriod(period));
        }
        let mut cycle = SceneCycle::new(script)?;
        let (tx, rx) = watch::channel(cycle.snapshot());
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let scene = cycle.advance();
                        debug!(demo = script.name, scene, "demo advanced");
                        if tx.send(cycle.snapshot()).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!(demo = script.name, "demo stopped");
        });

        info!(demo = script.name, period_ms = period_millis(period), "Demo started");
        Ok(Self {
            cancel,
            snapshots: rx,
            handle: Some(handle),
        })
    }

    /// A receiver that observes every scene change.
    pub fn subscribe(&self) -> watch::Receiver<SceneSnapshot> {
        self.snapshots.clone()
    }

    pub fn current(&self) -> SceneSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Cancel the timer and wait for the task to finish.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn period_millis(period: Duration) -> u64 {
    u64::try_from(period.as_millis()).unwrap_or(u64::MAX)
}

impl Drop for DemoPlayer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::scenes::{CODING, SCHEDULING};

    #[tokio::test(start_paused = true)]
    async fn test_advances_once_per_period() {
        let player = DemoPlayer::spawn(SCHEDULING, Duration::from_millis(2500)).unwrap();
        let mut rx = player.subscribe();
        assert_eq!(player.current().scene, "incoming-call");

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().scene, "request");

        rx.changed().await.unwrap();
        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.scene, "confirmation");
        assert!(snapshot.flags["appointment_booked"]);

        player.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_changes_before_first_period() {
        let player = DemoPlayer::spawn(CODING, Duration::from_secs(1)).unwrap();
        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(player.current().index, 0);
        player.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_timer() {
        let player = DemoPlayer::spawn(CODING, Duration::from_millis(100)).unwrap();
        let mut rx = player.subscribe();
        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().index;

        player.stop().await;
        tokio::time::sleep(Duration::from_secs(5)).await;
        // Sender dropped with the task: no further updates
        assert!(rx.changed().await.is_err());
        assert_eq!(rx.borrow().index, seen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let player = DemoPlayer::spawn(SCHEDULING, Duration::from_millis(100)).unwrap();
        let mut rx = player.subscribe();
        drop(player);
        assert!(rx.changed().await.is_err());
    }

    #[test]
    fn test_period_millis_saturates() {
        assert_eq!(period_millis(Duration::from_millis(2500)), 2500);
        assert_eq!(period_millis(Duration::MAX), u64::MAX);
    }

    #[tokio::test]
    async fn test_zero_period_is_rejected() {
        let err = DemoPlayer::spawn(SCHEDULING, Duration::ZERO).err();
        assert_eq!(err, Some(DemoError::InvalidPeriod(Duration::ZERO)));
    }
}
