//! Map display without a widget: keeps the last frame and a simulated camera

use serde::Serialize;
use tracing::debug;

use crate::core::{Position, Region};
use crate::display::camera::{fit_region, Viewport};
use crate::display::{FitOptions, Frame, MapDisplay};

/// A fit request as received by the display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedFit {
    pub coordinates: Vec<Position>,
    pub options: FitOptions,
}

/// Headless map used by the demo binary and tests.
///
/// The camera starts at the region of the first map frame, follows the user
/// while the frame asks for it, and jumps to the fitted region on each fit.
#[derive(Debug, Clone, Default)]
pub struct HeadlessMap {
    viewport: Viewport,
    camera: Option<Region>,
    last_frame: Option<Frame>,
    frames_rendered: usize,
    fits: Vec<RecordedFit>,
}

impl HeadlessMap {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn camera(&self) -> Option<&Region> {
        self.camera.as_ref()
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    pub fn fits(&self) -> &[RecordedFit] {
        &self.fits
    }
}

impl MapDisplay for HeadlessMap {
    fn render(&mut self, frame: &Frame) {
        if let Frame::Map(map) = frame {
            match self.camera.as_mut() {
                None => self.camera = Some(map.camera),
                Some(camera) if map.follows_user_location => camera.recenter(map.camera.position()),
                Some(_) => {}
            }
        }
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
    }

    fn fit_to_coordinates(&mut self, coordinates: &[Position], options: &FitOptions) {
        if let Some(region) = fit_region(coordinates, &options.edge_padding, &self.viewport) {
            debug!(
                latitude = region.latitude,
                longitude = region.longitude,
                latitude_delta = region.latitude_delta,
                longitude_delta = region.longitude_delta,
                animated = options.animated,
                "camera fitted"
            );
            self.camera = Some(region);
        }
        self.fits.push(RecordedFit {
            coordinates: coordinates.to_vec(),
            options: *options,
        });
    }
}
