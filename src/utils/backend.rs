//! Distance backend selection.
//!
//! The resolver computes every distance through a [`ComputeBackend`].
//! Two implementations exist: the portable haversine formula and an
//! accelerated vector formulation. Which one is active is decided once
//! at startup by [`select`]; a failed self-check degrades to the
//! portable backend instead of failing the process.

use log::{info, warn};
use serde::Serialize;
use vecmath::{vec3_cross, vec3_dot, vec3_len, Vector3};

use crate::haversine;
use crate::location::Location;

/// Strategy interface for the distance computation.
///
/// Implementations must agree with [`haversine::distance`] to within
/// 1e-6 km for every valid coordinate pair, so the resolver's results
/// do not depend on which backend was selected.
pub trait ComputeBackend: Sync {
    /// Computes the great-circle distance between two locations in
    /// kilometers.
    fn compute(&self, from: &Location, to: &Location) -> f64;
}

/// Identifies the active backend for the capability probe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum BackendKind {
    /// The vector formulation passed its self-check and is active.
    Accelerated,
    /// The plain haversine formula is active.
    Portable,
}

/// Backend that evaluates the haversine formula directly.
#[derive(Debug)]
pub struct PortableBackend;

impl ComputeBackend for PortableBackend {
    fn compute(&self, from: &Location, to: &Location) -> f64 {
        haversine::distance(from, to)
    }
}

/// Backend that measures the central angle between the two position
/// vectors with `atan2(|a x b|, a . b)`.
///
/// The formulation needs no clamping guard and keeps full precision for
/// nearly identical and nearly antipodal points, at the cost of two
/// trigonometric conversions per coordinate.
#[derive(Debug)]
pub struct AcceleratedBackend;

static PORTABLE: PortableBackend = PortableBackend;
static ACCELERATED: AcceleratedBackend = AcceleratedBackend;

/// Reference pair for the startup self-check: New York and Los Angeles.
const CHECK_FROM: Location = Location {
    latitude: ordered_float::OrderedFloat(40.7128),
    longitude: ordered_float::OrderedFloat(-74.0060),
};
const CHECK_TO: Location = Location {
    latitude: ordered_float::OrderedFloat(34.0522),
    longitude: ordered_float::OrderedFloat(-118.2437),
};

/// Maximum allowed disagreement between backends, in kilometers.
pub const EQUIVALENCE_TOLERANCE_KM: f64 = 1e-6;

impl AcceleratedBackend {
    /// Verifies the accelerated formulation against the portable one on
    /// a reference pair and hands out the backend if they agree.
    ///
    /// # Returns
    /// [`None`] if the self-check fails, in which case callers are
    /// expected to fall back to [`PortableBackend`].
    pub fn init() -> Option<&'static AcceleratedBackend> {
        let reference = haversine::distance(&CHECK_FROM, &CHECK_TO);
        let computed = ACCELERATED.compute(&CHECK_FROM, &CHECK_TO);

        if computed.is_finite() && (computed - reference).abs() < EQUIVALENCE_TOLERANCE_KM {
            Some(&ACCELERATED)
        } else {
            None
        }
    }

    fn unit_vector(location: &Location) -> Vector3<f64> {
        let lat = location.latitude.into_inner().to_radians();
        let lon = location.longitude.into_inner().to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }
}

impl ComputeBackend for AcceleratedBackend {
    fn compute(&self, from: &Location, to: &Location) -> f64 {
        let a = AcceleratedBackend::unit_vector(from);
        let b = AcceleratedBackend::unit_vector(to);

        let angle = vec3_len(vec3_cross(a, b)).atan2(vec3_dot(a, b));
        haversine::EARTH_RADIUS_KM * angle
    }
}

/// Selects the distance backend at startup.
///
/// Prefers the accelerated backend; degrades to the portable one when
/// the self-check fails. The outcome is reported through the returned
/// [`BackendKind`] and the service status probe, never as an error.
pub fn select() -> (&'static dyn ComputeBackend, BackendKind) {
    match AcceleratedBackend::init() {
        Some(backend) => {
            info!("Accelerated distance backend active");
            (backend, BackendKind::Accelerated)
        }
        None => {
            warn!("Accelerated distance backend failed its self-check, using portable fallback");
            (&PORTABLE, BackendKind::Portable)
        }
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod backend_tests {
    use super::*;

    /// Coordinate sample covering hemispheres, the equator, the poles
    /// and a near-antipodal pair.
    const SAMPLE: [(f64, f64); 8] = [
        (0.0, 0.0),
        (0.0, 1.0),
        (40.7128, -74.0060),
        (34.0522, -118.2437),
        (-33.8688, 151.2093),
        (90.0, 0.0),
        (-90.0, 0.0),
        (0.1, 179.9),
    ];

    /// Both backends must agree on every pair of sample coordinates.
    #[test]
    fn test_backend_equivalence() {
        for &(lat_a, lon_a) in SAMPLE.iter() {
            for &(lat_b, lon_b) in SAMPLE.iter() {
                let from = Location::new(lat_a, lon_a);
                let to = Location::new(lat_b, lon_b);

                let portable = PORTABLE.compute(&from, &to);
                let accelerated = ACCELERATED.compute(&from, &to);
                assert!(
                    (portable - accelerated).abs() < EQUIVALENCE_TOLERANCE_KM,
                    "backends disagree for ({}, {}) -> ({}, {}): {} vs {}",
                    lat_a,
                    lon_a,
                    lat_b,
                    lon_b,
                    portable,
                    accelerated
                );
            }
        }
    }

    #[test]
    fn test_accelerated_identity() {
        let sydney = Location::new(-33.8688, 151.2093);
        assert_eq!(ACCELERATED.compute(&sydney, &sydney), 0.0);
    }

    /// The vector formulation passes its own self-check, so selection
    /// reports the accelerated backend.
    #[test]
    fn test_select_prefers_accelerated() {
        let (backend, kind) = select();
        assert_eq!(kind, BackendKind::Accelerated);

        let km = backend.compute(&CHECK_FROM, &CHECK_TO);
        assert!((km - 3940.0).abs() < 10.0, "got {} km", km);
    }
}
