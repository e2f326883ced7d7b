//! Portable great-circle distance between two locations.

use crate::location::Location;

/// Mean Earth radius in kilometers, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Computes the haversine distance between two locations in kilometers.
///
/// The intermediate `h` term is clamped to [0, 1] before the square
/// roots. Floating-point rounding can push it slightly outside that
/// range for identical or near-antipodal points, and an unguarded
/// `sqrt` would then produce NaN.
///
/// Out-of-range coordinates are accepted as-is; validating them is the
/// caller's concern.
///
/// # Arguments
/// * `from` - One end of the arc.
/// * `to` - The other end of the arc.
///
/// # Returns
/// The great-circle distance in kilometers.
pub fn distance(from: &Location, to: &Location) -> f64 {
    let from_lat = from.latitude.into_inner().to_radians();
    let to_lat = to.latitude.into_inner().to_radians();
    let delta_lat = to_lat - from_lat;
    let delta_lon =
        (to.longitude.into_inner() - from.longitude.into_inner()).to_radians();

    let h = ((delta_lat / 2.0).sin().powi(2)
        + from_lat.cos() * to_lat.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
