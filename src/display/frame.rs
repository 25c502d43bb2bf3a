//! Render model handed to the map display

use serde::Serialize;

use crate::core::{Position, Region};

pub const LOADING_MESSAGE: &str = "Tracking your location…";
pub const INPUT_PLACEHOLDER: &str = "Destination lat,lng";
pub const SUBMIT_LABEL: &str = "Go";

pub const PATH_STROKE_COLOR: &str = "#1e90ff";
pub const PATH_STROKE_WIDTH: f32 = 5.0;
pub const GUIDE_STROKE_COLOR: &str = "green";
pub const GUIDE_STROKE_WIDTH: f32 = 3.0;
pub const GUIDE_DASH_PATTERN: [u32; 2] = [10, 5];
pub const MARKER_PIN_COLOR: &str = "red";

/// Everything the screen shows at one point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Frame {
    /// Terminal error; nothing else is shown
    Error { message: String },
    /// Waiting for permission or the first fix
    Loading { message: String },
    Map(MapFrame),
}

impl Frame {
    pub fn as_map(&self) -> Option<&MapFrame> {
        match self {
            Frame::Map(map) => Some(map),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFrame {
    pub title: String,
    pub camera: Region,
    pub shows_user_location: bool,
    pub follows_user_location: bool,
    /// Present once the path has more than one point
    pub traveled_path: Option<Polyline>,
    pub guide_line: Option<GuideLine>,
    pub destination_marker: Option<Marker>,
    pub input: InputRow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub coordinates: Vec<Position>,
    pub stroke_color: &'static str,
    pub stroke_width: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_pattern: Option<[u32; 2]>,
}

impl Polyline {
    pub fn traveled(points: &[Position]) -> Self {
        Self {
            coordinates: points.to_vec(),
            stroke_color: PATH_STROKE_COLOR,
            stroke_width: PATH_STROKE_WIDTH,
            dash_pattern: None,
        }
    }

    pub fn guide(from: Position, to: Position) -> Self {
        Self {
            coordinates: vec![from, to],
            stroke_color: GUIDE_STROKE_COLOR,
            stroke_width: GUIDE_STROKE_WIDTH,
            dash_pattern: Some(GUIDE_DASH_PATTERN),
        }
    }
}

/// Straight dashed line from the current position to the destination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideLine {
    pub polyline: Polyline,
    /// Great-circle distance (meters)
    pub distance_m: f64,
    /// Initial bearing (degrees from north)
    pub bearing_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub coordinate: Position,
    pub pin_color: &'static str,
}

impl Marker {
    pub fn destination(coordinate: Position) -> Self {
        Self {
            coordinate,
            pin_color: MARKER_PIN_COLOR,
        }
    }
}

/// Destination text field with its submit button
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputRow {
    pub text: String,
    pub placeholder: &'static str,
    pub button_label: &'static str,
}

impl InputRow {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            placeholder: INPUT_PLACEHOLDER,
            button_label: SUBMIT_LABEL,
        }
    }
}
