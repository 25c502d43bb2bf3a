//! Navigation screen model: state, update rules and the view

use crate::core::geodesy;
use crate::core::{Path, Position, Region};
use crate::destination::DestinationResolver;
use crate::display::frame::LOADING_MESSAGE;
use crate::display::{Frame, GuideLine, InputRow, MapFrame, Marker, Polyline};
use crate::screen::{Command, Message, Update};
use crate::tracking::{TrackingPhase, TrackingState};
use crate::utils::config::ScreenConfig;

/// All state shown by the navigation screen.
///
/// Only [`NavigationModel::update`] mutates it; [`NavigationModel::view`]
/// derives the frame from it.
#[derive(Debug, Clone)]
pub struct NavigationModel {
    title: String,
    tracking: TrackingState,
    resolver: DestinationResolver,
    input: String,
}

impl NavigationModel {
    pub fn new(config: &ScreenConfig) -> Self {
        Self {
            title: config.title.clone(),
            tracking: TrackingState::new(config.region_delta),
            resolver: DestinationResolver::new(config.destination.clone(), config.fit.clone()),
            input: String::new(),
        }
    }

    pub fn update(&mut self, message: Message) -> Update {
        match message {
            Message::Tracker(event) => Update::redraw_if(self.tracking.apply(event)),
            Message::InputChanged(text) => {
                if !self.accepts_input() || text == self.input {
                    return Update::none();
                }
                self.input = text;
                Update::redraw_if(true)
            }
            Message::Submit => {
                if !self.accepts_input() {
                    return Update::none();
                }
                match self.resolver.submit(&self.input) {
                    Some(pending) => Update::with_command(true, Command::ScheduleFit(pending)),
                    None => Update::none(),
                }
            }
            Message::FitDue(pending) => {
                // The map is only on screen while tracking
                let region = if self.accepts_input() {
                    self.tracking.region()
                } else {
                    None
                };
                match self.resolver.resolve_fit(&pending, region) {
                    Some(request) => Update::with_command(false, Command::Fit(request)),
                    None => Update::none(),
                }
            }
        }
    }

    /// The destination row is part of the map frame only
    pub fn accepts_input(&self) -> bool {
        self.tracking.phase() == TrackingPhase::Tracking
    }

    pub fn view(&self) -> Frame {
        if let Some(error) = self.tracking.error() {
            return Frame::Error {
                message: error.to_string(),
            };
        }

        let Some(region) = self.tracking.region() else {
            return Frame::Loading {
                message: LOADING_MESSAGE.to_string(),
            };
        };

        let current = region.position();
        let path = self.tracking.path();
        let destination = self.resolver.destination();

        Frame::Map(MapFrame {
            title: self.title.clone(),
            camera: *region,
            shows_user_location: true,
            follows_user_location: true,
            traveled_path: (path.len() > 1).then(|| Polyline::traveled(path.points())),
            guide_line: destination.map(|target| GuideLine {
                polyline: Polyline::guide(current, target),
                distance_m: geodesy::distance_m(current, target),
                bearing_deg: geodesy::initial_bearing_deg(current, target),
            }),
            destination_marker: destination.map(Marker::destination),
            input: InputRow::new(&self.input),
        })
    }

    pub fn phase(&self) -> TrackingPhase {
        self.tracking.phase()
    }

    pub fn region(&self) -> Option<&Region> {
        self.tracking.region()
    }

    pub fn path(&self) -> &Path {
        self.tracking.path()
    }

    pub fn destination(&self) -> Option<Position> {
        self.resolver.destination()
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}
