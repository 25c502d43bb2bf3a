//! Map display collaborator interface

use serde::{Deserialize, Serialize};

use crate::core::Position;
use crate::display::Frame;

/// A map widget able to draw frames and move its camera
pub trait MapDisplay {
    /// Draw the current frame
    fn render(&mut self, frame: &Frame);

    /// Move the camera so every coordinate is visible inside the padding
    fn fit_to_coordinates(&mut self, coordinates: &[Position], options: &FitOptions);
}

/// Screen-space margins kept free around fitted coordinates (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgePadding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for EdgePadding {
    fn default() -> Self {
        Self {
            top: 80,
            right: 50,
            bottom: 80,
            left: 50,
        }
    }
}

impl EdgePadding {
    /// Left plus right padding; `u64` so any pair of `u32` values fits
    pub fn horizontal(&self) -> u64 {
        u64::from(self.left) + u64::from(self.right)
    }

    pub fn vertical(&self) -> u64 {
        u64::from(self.top) + u64::from(self.bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitOptions {
    pub edge_padding: EdgePadding,
    pub animated: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            edge_padding: EdgePadding::default(),
            animated: true,
        }
    }
}

/// A camera fit ready to hand to the display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitRequest {
    /// Current position first, destination second
    pub coordinates: [Position; 2],
    pub options: FitOptions,
}
