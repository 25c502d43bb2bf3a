//! Platform abstraction for location permission and position services
//!
//! The tracker only talks to the platform through [`LocationProvider`].
//! A scriptable mock is provided for tests and the demo binary.

pub mod location;
pub mod mock;
pub mod error;

pub use location::{Accuracy, LocationProvider, PermissionStatus, Subscription, WatchOptions};
pub use mock::{FixGate, MockLocationProvider, MockScript};
pub use error::{ProviderError, ProviderResult};
