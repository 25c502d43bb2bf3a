//! Live location tracking
//!
//! [`TrackingSession`] talks to the platform and emits events;
//! [`TrackingState`] turns those events into the region and traveled path.

pub mod session;
pub mod state;
pub mod error;

pub use session::TrackingSession;
pub use state::{TrackerEvent, TrackingPhase, TrackingState};
pub use error::TrackingError;
