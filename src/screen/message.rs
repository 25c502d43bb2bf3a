//! Inputs to and effects of the navigation model

use crate::destination::PendingFit;
use crate::display::FitRequest;
use crate::tracking::TrackerEvent;

/// Everything that can change the model
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Output of the tracking session
    Tracker(TrackerEvent),
    /// The destination text field was edited
    InputChanged(String),
    /// The submit button was pressed
    Submit,
    /// A scheduled fit delay expired
    FitDue(PendingFit),
}

/// Side effects requested by the model, carried out by the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a timer that delivers `Message::FitDue` after the delay
    ScheduleFit(PendingFit),
    /// Ask the display to fit its camera
    Fit(FitRequest),
}

/// Result of one model update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    /// The frame must be rendered again
    pub changed: bool,
    pub command: Option<Command>,
}

impl Update {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn redraw_if(changed: bool) -> Self {
        Self {
            changed,
            command: None,
        }
    }

    pub fn with_command(changed: bool, command: Command) -> Self {
        Self {
            changed,
            command: Some(command),
        }
    }
}
