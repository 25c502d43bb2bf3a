//! Scriptable location provider for testing and the demo binary

use serde::{Deserialize, Serialize};
use smol::channel::{self, Receiver, Sender};
use std::cell::RefCell;

use crate::core::Position;
use crate::provider::{
    LocationProvider, PermissionStatus, ProviderError, ProviderResult, Subscription, WatchOptions,
};

/// How the mock answers `current_fix`
#[derive(Debug)]
enum InitialFix {
    Ready(Position),
    Failing(ProviderError),
    /// Waits until the paired [`FixGate`] resolves it
    Pending(Receiver<ProviderResult<Position>>),
}

/// Resolves a pending initial fix from outside the provider
#[derive(Debug, Clone)]
pub struct FixGate {
    sender: Sender<ProviderResult<Position>>,
}

impl FixGate {
    pub fn resolve(&self, position: Position) -> bool {
        self.sender.try_send(Ok(position)).is_ok()
    }

    pub fn fail(&self, error: ProviderError) -> bool {
        self.sender.try_send(Err(error)).is_ok()
    }
}

/// Track description loaded from JSON by the demo binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockScript {
    pub permission: PermissionStatus,
    /// Missing means the initial fix request fails
    #[serde(default)]
    pub initial_fix: Option<Position>,
    /// Fixes delivered through the subscription, in order
    #[serde(default)]
    pub fixes: Vec<Position>,
}

#[derive(Debug)]
struct MockState {
    permission: PermissionStatus,
    initial_fix: InitialFix,
    watch_error: Option<ProviderError>,
    subscriber: Option<Sender<Position>>,
    last_watch_options: Option<WatchOptions>,
    permission_requests: u32,
    fix_requests: u32,
    watch_requests: u32,
}

/// Mock provider for tests and development
#[derive(Debug)]
pub struct MockLocationProvider {
    state: RefCell<MockState>,
}

impl MockLocationProvider {
    fn with_state(permission: PermissionStatus, initial_fix: InitialFix) -> Self {
        Self {
            state: RefCell::new(MockState {
                permission,
                initial_fix,
                watch_error: None,
                subscriber: None,
                last_watch_options: None,
                permission_requests: 0,
                fix_requests: 0,
                watch_requests: 0,
            }),
        }
    }

    /// Permission granted, initial fix available immediately
    pub fn granted(initial_fix: Position) -> Self {
        Self::with_state(PermissionStatus::Granted, InitialFix::Ready(initial_fix))
    }

    /// Permission denied by the user
    pub fn denied() -> Self {
        Self::with_state(
            PermissionStatus::Denied,
            InitialFix::Failing(ProviderError::FixUnavailable {
                details: "permission denied".to_string(),
            }),
        )
    }

    /// Permission granted but the hardware cannot produce a fix
    pub fn failing_fix(error: ProviderError) -> Self {
        Self::with_state(PermissionStatus::Granted, InitialFix::Failing(error))
    }

    /// Permission granted; the initial fix waits on the returned gate
    pub fn pending_fix() -> (Self, FixGate) {
        let (sender, receiver) = channel::bounded(1);
        (
            Self::with_state(PermissionStatus::Granted, InitialFix::Pending(receiver)),
            FixGate { sender },
        )
    }

    pub fn from_script(script: &MockScript) -> Self {
        let initial_fix = match script.initial_fix {
            Some(position) => InitialFix::Ready(position),
            None => InitialFix::Failing(ProviderError::FixUnavailable {
                details: "no initial fix in script".to_string(),
            }),
        };
        Self::with_state(script.permission, initial_fix)
    }

    /// Make the next `watch_position` call fail
    pub fn fail_watch(&self, error: ProviderError) {
        self.state.borrow_mut().watch_error = Some(error);
    }

    /// Deliver a fix through the live subscription.
    ///
    /// Returns false when no subscription is open.
    pub fn push_fix(&self, position: Position) -> bool {
        let state = self.state.borrow();
        match &state.subscriber {
            Some(sender) => sender.try_send(position).is_ok(),
            None => false,
        }
    }

    /// Stop delivering updates, as if the platform dropped the listener
    pub fn end_subscription(&self) {
        self.state.borrow_mut().subscriber = None;
    }

    pub fn has_live_subscription(&self) -> bool {
        self.state
            .borrow()
            .subscriber
            .as_ref()
            .map_or(false, |sender| !sender.is_closed())
    }

    pub fn permission_requests(&self) -> u32 {
        self.state.borrow().permission_requests
    }

    pub fn fix_requests(&self) -> u32 {
        self.state.borrow().fix_requests
    }

    pub fn watch_requests(&self) -> u32 {
        self.state.borrow().watch_requests
    }

    pub fn last_watch_options(&self) -> Option<WatchOptions> {
        self.state.borrow().last_watch_options.clone()
    }
}

impl LocationProvider for MockLocationProvider {
    async fn request_foreground_permission(&self) -> PermissionStatus {
        let mut state = self.state.borrow_mut();
        state.permission_requests += 1;
        state.permission
    }

    async fn current_fix(&self) -> ProviderResult<Position> {
        // The borrow must end before awaiting the gate
        let pending = {
            let mut state = self.state.borrow_mut();
            state.fix_requests += 1;
            match &state.initial_fix {
                InitialFix::Ready(position) => return Ok(*position),
                InitialFix::Failing(error) => return Err(error.clone()),
                InitialFix::Pending(receiver) => receiver.clone(),
            }
        };

        pending.recv().await.unwrap_or_else(|_| {
            Err(ProviderError::FixUnavailable {
                details: "fix request abandoned".to_string(),
            })
        })
    }

    async fn watch_position(&self, options: &WatchOptions) -> ProviderResult<Subscription> {
        let mut state = self.state.borrow_mut();
        state.watch_requests += 1;
        state.last_watch_options = Some(options.clone());

        if let Some(error) = state.watch_error.take() {
            return Err(error);
        }

        let (sender, subscription) = Subscription::channel();
        state.subscriber = Some(sender);
        Ok(subscription)
    }
}
