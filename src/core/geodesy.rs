//! Great-circle helpers for the destination guide line

use nalgebra::Vector3;

use crate::core::{Position, EARTH_RADIUS_M};

/// Unit vector of a position on the sphere (Earth-centered frame)
pub fn to_unit_vector(position: Position) -> Vector3<f64> {
    let lat = position.latitude.to_radians();
    let lon = position.longitude.to_radians();
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Great-circle distance in meters.
///
/// Uses the atan2 form of the central angle, which stays accurate both for
/// nearly coincident and nearly antipodal points.
pub fn distance_m(from: Position, to: Position) -> f64 {
    let a = to_unit_vector(from);
    let b = to_unit_vector(to);
    let central_angle = a.cross(&b).norm().atan2(a.dot(&b));
    EARTH_RADIUS_M * central_angle
}

/// Initial bearing from `from` towards `to`, degrees clockwise from north in [0, 360)
pub fn initial_bearing_deg(from: Position, to: Position) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}
