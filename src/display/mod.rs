//! Map display interface, render model and a headless implementation

pub mod map;
pub mod frame;
pub mod camera;
pub mod headless;

pub use map::{EdgePadding, FitOptions, FitRequest, MapDisplay};
pub use frame::{Frame, GuideLine, InputRow, MapFrame, Marker, Polyline};
pub use camera::{fit_region, Bounds, Viewport};
pub use headless::{HeadlessMap, RecordedFit};
