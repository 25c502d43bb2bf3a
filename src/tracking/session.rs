//! Tracking session: permission, initial fix, then the live subscription
//!
//! The session runs as a task on a single-threaded executor and reports
//! [`TrackerEvent`]s through a channel. Stopping the session cancels the task
//! at whatever await point it is parked on, so a fix that resolves after
//! teardown is never delivered.

use smol::channel::Sender;
use smol::{LocalExecutor, Task};
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::provider::{LocationProvider, WatchOptions};
use crate::tracking::{TrackerEvent, TrackingError};

/// Handle on a running tracking task
pub struct TrackingSession {
    task: Option<Task<()>>,
}

impl TrackingSession {
    /// Spawn the tracking task on `executor`
    pub fn start<'a, P>(
        executor: &LocalExecutor<'a>,
        provider: Rc<P>,
        options: WatchOptions,
        events: Sender<TrackerEvent>,
    ) -> Self
    where
        P: LocationProvider + 'a,
    {
        let task = executor.spawn(track(provider, options, events));
        Self { task: Some(task) }
    }

    /// Cancel the tracking task and release its subscription.
    ///
    /// Safe to call repeatedly, and before a subscription was ever opened.
    /// Returns whether a task was still running.
    pub fn stop(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                let was_running = !task.is_finished();
                // Dropping the handle cancels the task; its future is never polled again
                drop(task);
                info!(was_running, "tracking stopped");
                was_running
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().map_or(false, |task| !task.is_finished())
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn track<P: LocationProvider>(
    provider: Rc<P>,
    options: WatchOptions,
    events: Sender<TrackerEvent>,
) {
    let status = provider.request_foreground_permission().await;
    info!(?status, "foreground location permission resolved");
    if !status.is_granted() {
        let _ = events
            .send(TrackerEvent::Failed(TrackingError::PermissionDenied))
            .await;
        return;
    }

    let origin = match provider.current_fix().await {
        Ok(position) => position,
        Err(error) => {
            warn!(%error, "initial fix failed");
            let _ = events
                .send(TrackerEvent::Failed(TrackingError::fix_unavailable(&error)))
                .await;
            return;
        }
    };
    info!(
        latitude = origin.latitude,
        longitude = origin.longitude,
        "initial fix acquired"
    );
    if events.send(TrackerEvent::InitialFix(origin)).await.is_err() {
        return;
    }

    let mut subscription = match provider.watch_position(&options).await {
        Ok(subscription) => subscription,
        Err(error) => {
            warn!(%error, "could not open position subscription");
            let _ = events
                .send(TrackerEvent::Failed(TrackingError::subscription_failed(&error)))
                .await;
            return;
        }
    };
    info!(
        accuracy = ?options.accuracy,
        min_interval_ms = options.min_interval_ms,
        min_distance_m = options.min_distance_m,
        "position subscription opened"
    );

    while let Some(position) = subscription.next().await {
        debug!(
            latitude = position.latitude,
            longitude = position.longitude,
            "fix received"
        );
        if events.send(TrackerEvent::Fix(position)).await.is_err() {
            break;
        }
    }

    subscription.release();
    info!("position subscription ended");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;
    use crate::provider::{MockLocationProvider, ProviderError};
    use smol::channel::{self, Receiver};

    fn drain(executor: &LocalExecutor<'_>) {
        while executor.try_tick() {}
    }

    fn received(events: &Receiver<TrackerEvent>) -> Vec<TrackerEvent> {
        std::iter::from_fn(|| events.try_recv().ok()).collect()
    }

    #[test]
    fn test_session_reports_initial_fix_then_updates() {
        let executor = LocalExecutor::new();
        let origin = Position::new(12.9716, 77.5946);
        let provider = Rc::new(MockLocationProvider::granted(origin));
        let (sender, events) = channel::unbounded();

        let session =
            TrackingSession::start(&executor, Rc::clone(&provider), WatchOptions::default(), sender);
        drain(&executor);

        assert_eq!(received(&events), vec![TrackerEvent::InitialFix(origin)]);
        assert!(session.is_active());
        assert!(provider.has_live_subscription());
        assert_eq!(provider.last_watch_options(), Some(WatchOptions::default()));

        let next = Position::new(12.9717, 77.5947);
        assert!(provider.push_fix(next));
        drain(&executor);

        assert_eq!(received(&events), vec![TrackerEvent::Fix(next)]);
    }

    #[test]
    fn test_denied_permission_requests_nothing_else() {
        let executor = LocalExecutor::new();
        let provider = Rc::new(MockLocationProvider::denied());
        let (sender, events) = channel::unbounded();

        let session =
            TrackingSession::start(&executor, Rc::clone(&provider), WatchOptions::default(), sender);
        drain(&executor);

        assert_eq!(
            received(&events),
            vec![TrackerEvent::Failed(TrackingError::PermissionDenied)]
        );
        assert_eq!(provider.fix_requests(), 0);
        assert_eq!(provider.watch_requests(), 0);
        assert!(!session.is_active());
    }

    #[test]
    fn test_fix_failure_is_reported() {
        let executor = LocalExecutor::new();
        let provider = Rc::new(MockLocationProvider::failing_fix(ProviderError::Timeout {
            timeout_ms: 10_000,
        }));
        let (sender, events) = channel::unbounded();

        let _session =
            TrackingSession::start(&executor, Rc::clone(&provider), WatchOptions::default(), sender);
        drain(&executor);

        let events = received(&events);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            TrackerEvent::Failed(TrackingError::FixUnavailable { .. })
        ));
        assert_eq!(provider.watch_requests(), 0);
    }

    #[test]
    fn test_subscription_failure_is_reported_after_initial_fix() {
        let executor = LocalExecutor::new();
        let origin = Position::new(1.0, 2.0);
        let provider = Rc::new(MockLocationProvider::granted(origin));
        provider.fail_watch(ProviderError::ServicesDisabled);
        let (sender, events) = channel::unbounded();

        let _session =
            TrackingSession::start(&executor, Rc::clone(&provider), WatchOptions::default(), sender);
        drain(&executor);

        let events = received(&events);
        assert_eq!(events[0], TrackerEvent::InitialFix(origin));
        assert!(matches!(
            &events[1],
            TrackerEvent::Failed(TrackingError::SubscriptionFailed { .. })
        ));
    }

    #[test]
    fn test_stop_before_initial_fix_drops_late_fix() {
        let executor = LocalExecutor::new();
        let (provider, gate) = MockLocationProvider::pending_fix();
        let provider = Rc::new(provider);
        let (sender, events) = channel::unbounded();

        let mut session =
            TrackingSession::start(&executor, Rc::clone(&provider), WatchOptions::default(), sender);
        drain(&executor);
        assert_eq!(provider.fix_requests(), 1);

        assert!(session.stop());
        gate.resolve(Position::new(9.0, 9.0));
        drain(&executor);

        assert!(received(&events).is_empty());
        assert_eq!(provider.watch_requests(), 0);
        assert!(!provider.has_live_subscription());
        assert!(!session.stop());
    }

    #[test]
    fn test_pending_fix_that_fails_stops_tracking() {
        let executor = LocalExecutor::new();
        let (provider, gate) = MockLocationProvider::pending_fix();
        let provider = Rc::new(provider);
        let (sender, events) = channel::unbounded();

        let session =
            TrackingSession::start(&executor, Rc::clone(&provider), WatchOptions::default(), sender);
        drain(&executor);
        assert!(received(&events).is_empty());
        assert!(session.is_active());

        assert!(gate.fail(ProviderError::Timeout { timeout_ms: 15_000 }));
        drain(&executor);

        assert_eq!(
            received(&events),
            vec![TrackerEvent::Failed(TrackingError::fix_unavailable(
                &ProviderError::Timeout { timeout_ms: 15_000 }
            ))]
        );
        assert_eq!(provider.watch_requests(), 0);
        assert!(!session.is_active());
    }

    #[test]
    fn test_stop_releases_subscription() {
        let executor = LocalExecutor::new();
        let provider = Rc::new(MockLocationProvider::granted(Position::new(0.0, 0.0)));
        let (sender, _events) = channel::unbounded();

        let mut session =
            TrackingSession::start(&executor, Rc::clone(&provider), WatchOptions::default(), sender);
        drain(&executor);
        assert!(provider.has_live_subscription());

        session.stop();
        drain(&executor);
        assert!(!provider.has_live_subscription());
        assert!(!provider.push_fix(Position::new(1.0, 1.0)));
    }

    #[test]
    fn test_session_ends_when_provider_stops_updates() {
        let executor = LocalExecutor::new();
        let provider = Rc::new(MockLocationProvider::granted(Position::new(0.0, 0.0)));
        let (sender, _events) = channel::unbounded();

        let session =
            TrackingSession::start(&executor, Rc::clone(&provider), WatchOptions::default(), sender);
        drain(&executor);

        provider.end_subscription();
        drain(&executor);
        assert!(!session.is_active());
    }
}
