//! Struct definitions and implementations for [`Location`].

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A [`Location`] is an interface type that represents the geographic
/// position of an object. Typically, this type is used in tandem with
/// the [`Facility`](`super::facility::Facility`) type.
///
/// Latitude is expected in the [-90, 90] range and longitude in the
/// [-180, 180] range. Neither is checked here; callers that accept
/// untrusted coordinates validate them at their own boundary (see
/// [`LocationQuery`](`crate::service::LocationQuery`)).
///
/// Double-precision floats keep the distance math well below a meter of
/// rounding error at city scale.
#[derive(Debug, PartialEq, Hash, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct Location {
    /// The latitude of the location.
    pub latitude: OrderedFloat<f64>,

    /// The longitude of the location.
    pub longitude: OrderedFloat<f64>,
}

impl Location {
    /// Creates a location from plain degree values.
    pub fn new(latitude: f64, longitude: f64) -> Location {
        Location {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        }
    }
}
