//! Location provider trait, subscription handle and watch options

use serde::{Deserialize, Serialize};
use smol::channel::{self, Receiver, Sender};

use crate::core::{Position, WATCH_MIN_DISTANCE_M, WATCH_MIN_INTERVAL_MS};
use crate::provider::ProviderResult;

/// Platform abstraction for permission and position services.
///
/// All operations are single-shot suspensions except `watch_position`, which
/// hands back a [`Subscription`] delivering fixes until it is released.
/// Implementations run on a single-threaded executor, so the futures are not
/// required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait LocationProvider {
    /// Ask the user for foreground location access
    async fn request_foreground_permission(&self) -> PermissionStatus;

    /// Acquire one current fix; may wait on the hardware
    async fn current_fix(&self) -> ProviderResult<Position>;

    /// Open a continuous stream of fixes
    async fn watch_position(&self, options: &WatchOptions) -> ProviderResult<Subscription>;
}

/// Answer to a foreground permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user dismissed the prompt without answering
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Requested fix accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    Lowest,
    Low,
    Balanced,
    High,
    Highest,
    BestForNavigation,
}

/// Subscription configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchOptions {
    pub accuracy: Accuracy,
    /// Minimum time between updates (milliseconds)
    pub min_interval_ms: u64,
    /// Minimum movement between updates (meters)
    pub min_distance_m: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::High,
            min_interval_ms: WATCH_MIN_INTERVAL_MS,
            min_distance_m: WATCH_MIN_DISTANCE_M,
        }
    }
}

/// Handle on a live position stream.
///
/// Fixes arrive in chronological order. Releasing or dropping the handle
/// closes the stream so the provider can stop its listener.
#[derive(Debug)]
pub struct Subscription {
    fixes: Receiver<Position>,
}

impl Subscription {
    /// Create a subscription together with the sender a provider feeds it from
    pub fn channel() -> (Sender<Position>, Subscription) {
        let (sender, fixes) = channel::unbounded();
        (sender, Subscription { fixes })
    }

    /// Wait for the next fix; `None` once the provider side is gone
    pub async fn next(&mut self) -> Option<Position> {
        self.fixes.recv().await.ok()
    }

    pub fn release(self) {
        self.fixes.close();
    }
}
