//! GuideDog Navigate
//!
//! Headless core of a demo navigation screen: live GPS tracking with a
//! traveled path, plus a typed-in destination drawn as a straight guide line.
//! The platform location service and the map widget are reached through the
//! [`LocationProvider`] and [`MapDisplay`] traits.

pub mod core;
pub mod provider;
pub mod tracking;
pub mod destination;
pub mod display;
pub mod screen;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{Path, Position, Region, RegionDelta};
pub use provider::{
    Accuracy, LocationProvider, MockLocationProvider, PermissionStatus, ProviderError,
    Subscription, WatchOptions,
};
pub use tracking::{TrackerEvent, TrackingError, TrackingPhase, TrackingSession, TrackingState};
pub use destination::{DestinationError, DestinationResolver, PendingFit};
pub use display::{EdgePadding, FitOptions, FitRequest, Frame, HeadlessMap, MapDisplay, MapFrame};
pub use screen::{NavigationModel, NavigationScreen};
pub use utils::{ConfigError, ConfigurationManager, ScreenConfig};
