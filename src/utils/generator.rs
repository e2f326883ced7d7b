//! Random facility generation for tests and demos.

use rand::Rng;
use uuid::Uuid;

use crate::facility::Facility;
use crate::haversine;
use crate::location::Location;

/// Categories mirror the resource types an emergency directory carries.
const CATEGORIES: [&str; 5] = [
    "hospital",
    "fire_station",
    "police",
    "shelter",
    "pharmacy",
];

/// Generates `capacity` facilities at random positions within
/// `radius_km` of `location`.
///
/// Positions are drawn from a random bearing and distance, converted to
/// degree offsets with the equirectangular approximation. Good enough
/// for fixture data at city scale; not a uniform spatial distribution.
///
/// # Arguments
/// * `location` - Center to scatter facilities around.
/// * `radius_km` - Maximum distance from the center.
/// * `capacity` - Number of facilities to generate.
///
/// # Returns
/// A vector of `capacity` facilities with unique synthetic uids.
pub fn generate_facilities_near(
    location: &Location,
    radius_km: f64,
    capacity: i32,
) -> Vec<Facility> {
    let mut rng = rand::thread_rng();
    let km_per_degree = haversine::EARTH_RADIUS_KM.to_radians();

    (0..capacity)
        .map(|index| {
            let bearing: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
            let distance: f64 = rng.gen_range(0.0..radius_km);

            let latitude =
                location.latitude.into_inner() + distance * bearing.cos() / km_per_degree;
            let longitude = location.longitude.into_inner()
                + distance * bearing.sin()
                    / (km_per_degree * location.latitude.into_inner().to_radians().cos());

            let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
            Facility {
                uid: Uuid::new_v4().to_string(),
                name: format!("{} {}", category, index),
                category: category.to_string(),
                address: format!("{} Market St", rng.gen_range(1..2000)),
                phone: format!("555-{:04}", rng.gen_range(0..10000)),
                location: Location::new(latitude, longitude),
            }
        })
        .collect()
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
