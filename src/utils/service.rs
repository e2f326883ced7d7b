//! Collaborator-facing entry points for the locator.
//!
//! Wires a facility store, requester validation, and the resolver
//! engine into the operations a request handler calls: find the
//! nearest facilities for a requester and report service status. The
//! service is constructed once at startup and owns the backend
//! selected at that point; request handling itself stays stateless.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::facility::Facility;
use crate::location::Location;
use crate::ranking::RankedFacility;
use crate::resolver::engine::{Resolver, DEFAULT_LIMIT};
use crate::utils::backend::{self, BackendKind};

/// Supplies the candidate facilities to rank.
///
/// Backed by whatever storage the embedding application uses; the
/// locator only needs the full candidate list per request.
pub trait FacilityStore {
    /// Fetches every facility known to the store.
    fn fetch_all(&self) -> Result<Vec<Facility>, String>;
}

/// In-memory facility store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    facilities: Vec<Facility>,
}

impl MemoryStore {
    /// Creates a store over the given facilities.
    pub fn new(facilities: Vec<Facility>) -> MemoryStore {
        MemoryStore { facilities }
    }
}

impl FacilityStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<Facility>, String> {
        Ok(self.facilities.clone())
    }
}

/// Requester coordinates as they arrive on the wire, before
/// validation. Both fields are required; optionality only exists to
/// detect their absence.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct LocationQuery {
    /// Requester latitude in degrees.
    pub latitude: Option<f64>,
    /// Requester longitude in degrees.
    pub longitude: Option<f64>,
}

impl LocationQuery {
    /// Validates presence and range of the requester coordinates.
    ///
    /// The engine itself accepts any coordinate pair, so this boundary
    /// is the only place malformed requester input is rejected.
    pub fn validate(&self) -> Result<Location, String> {
        let latitude = self
            .latitude
            .ok_or_else(|| "Requester latitude must be set".to_string())?;
        let longitude = self
            .longitude
            .ok_or_else(|| "Requester longitude must be set".to_string())?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("Latitude {} is outside [-90, 90]", latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("Longitude {} is outside [-180, 180]", longitude));
        }

        Ok(Location::new(latitude, longitude))
    }
}

/// One entry of the response payload: the facility fields echoed back
/// with the computed distance.
#[derive(Debug, Clone, Serialize)]
pub struct NearestFacility {
    pub uid: String,
    pub name: String,
    pub category: String,
    pub address: String,
    pub phone: String,
    pub location: Location,
    /// Great-circle distance from the requester, in kilometers.
    pub distance_km: f64,
}

impl From<&RankedFacility<'_>> for NearestFacility {
    fn from(ranked: &RankedFacility) -> NearestFacility {
        NearestFacility {
            uid: ranked.facility.uid.clone(),
            name: ranked.facility.name.clone(),
            category: ranked.facility.category.clone(),
            address: ranked.facility.address.clone(),
            phone: ranked.facility.phone.clone(),
            location: ranked.facility.location,
            distance_km: ranked.distance_km.into_inner(),
        }
    }
}

/// Response payload for a nearest-facilities request.
#[derive(Debug, Clone, Serialize)]
pub struct NearestFacilities {
    /// The validated requester location, echoed back.
    pub requester: Location,
    /// The closest facilities, ascending by distance.
    pub facilities: Vec<NearestFacility>,
}

/// Reported by the liveness probe.
#[derive(Debug, Copy, Clone, Serialize)]
pub struct ServiceStatus {
    pub healthy: bool,
    /// Which distance backend selection settled on at startup.
    pub backend: BackendKind,
}

/// Locator service: owns the facility store, the backend selected at
/// startup, and the configured result limit.
pub struct LocatorService<S: FacilityStore> {
    store: S,
    resolver: Resolver<'static>,
    backend: BackendKind,
    limit: usize,
}

impl<S: FacilityStore> LocatorService<S> {
    /// Initializes the service: selects the distance backend and hands
    /// it to the resolver. Call once at process startup.
    pub fn init(store: S) -> LocatorService<S> {
        info!("Initializing locator service");
        let (active, kind) = backend::select();
        LocatorService {
            store,
            resolver: Resolver::new(active),
            backend: kind,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Overrides the number of facilities returned per request.
    pub fn with_limit(mut self, limit: usize) -> LocatorService<S> {
        self.limit = limit;
        self
    }

    /// Finds the facilities nearest to the requester.
    ///
    /// # Arguments
    /// * `query` - The raw requester coordinates.
    ///
    /// # Returns
    /// The requester location echoed back with the closest facilities,
    /// ascending by distance. Invalid requester input and store
    /// failures are returned as errors for the caller to map onto its
    /// own status signals; an empty store is not an error.
    pub fn nearest(&self, query: &LocationQuery) -> Result<NearestFacilities, String> {
        info!("[1/3]: Validating requester location");
        let requester = query.validate()?;
        debug!("requester: {:?}", requester);

        info!("[2/3]: Fetching candidate facilities");
        let candidates = self.store.fetch_all()?;
        debug!("candidate count: {}", candidates.len());

        info!("[3/3]: Ranking candidates by distance");
        let ranked = self.resolver.rank(&requester, &candidates, self.limit);
        let facilities = ranked.iter().map(NearestFacility::from).collect();

        info!("Finished ranking nearest facilities");
        Ok(NearestFacilities {
            requester,
            facilities,
        })
    }

    /// Liveness and capability probe.
    ///
    /// Reports whether the accelerated backend is active; a portable
    /// fallback is a degraded-but-healthy condition, never an error.
    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            healthy: true,
            backend: self.backend,
        }
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod service_tests {
    use super::*;
    use crate::generator::generate_facilities_near;

    const SAN_FRANCISCO: Location = Location {
        latitude: ordered_float::OrderedFloat(37.7749),
        longitude: ordered_float::OrderedFloat(-122.4194),
    };

    struct FailingStore;

    impl FacilityStore for FailingStore {
        fn fetch_all(&self) -> Result<Vec<Facility>, String> {
            Err("Storage offline".to_string())
        }
    }

    fn facility(uid: &str, latitude: f64, longitude: f64) -> Facility {
        Facility {
            uid: uid.to_string(),
            name: format!("Facility {}", uid),
            category: "hospital".to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
            location: Location::new(latitude, longitude),
        }
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let query = LocationQuery {
            latitude: None,
            longitude: Some(-122.4194),
        };
        assert!(query.validate().is_err());

        let query = LocationQuery {
            latitude: Some(37.7749),
            longitude: None,
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let query = LocationQuery {
            latitude: Some(91.0),
            longitude: Some(0.0),
        };
        assert!(query.validate().is_err());

        let query = LocationQuery {
            latitude: Some(0.0),
            longitude: Some(-180.5),
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_in_range() {
        let query = LocationQuery {
            latitude: Some(37.7749),
            longitude: Some(-122.4194),
        };
        assert_eq!(query.validate(), Ok(SAN_FRANCISCO));
    }

    #[test]
    fn test_nearest_orders_and_echoes_requester() {
        let store = MemoryStore::new(vec![
            facility("daly_city", 37.6879, -122.4702),
            facility("mission", 37.7599, -122.4148),
            facility("oakland", 37.8044, -122.2712),
        ]);
        let service = LocatorService::init(store);

        let query = LocationQuery {
            latitude: Some(37.7749),
            longitude: Some(-122.4194),
        };
        let response = service.nearest(&query).unwrap();

        assert_eq!(response.requester, SAN_FRANCISCO);
        assert_eq!(response.facilities.len(), 3);
        assert_eq!(response.facilities[0].uid, "mission");
        assert!(response.facilities[0].distance_km <= response.facilities[1].distance_km);
        assert!(response.facilities[1].distance_km <= response.facilities[2].distance_km);
    }

    /// The default limit caps a larger candidate set at ten results.
    #[test]
    fn test_nearest_applies_default_limit() {
        let store = MemoryStore::new(generate_facilities_near(&SAN_FRANCISCO, 25.0, 40));
        let service = LocatorService::init(store);

        let query = LocationQuery {
            latitude: Some(37.7749),
            longitude: Some(-122.4194),
        };
        let response = service.nearest(&query).unwrap();
        assert_eq!(response.facilities.len(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_nearest_respects_configured_limit() {
        let store = MemoryStore::new(generate_facilities_near(&SAN_FRANCISCO, 25.0, 40));
        let service = LocatorService::init(store).with_limit(3);

        let query = LocationQuery {
            latitude: Some(37.7749),
            longitude: Some(-122.4194),
        };
        let response = service.nearest(&query).unwrap();
        assert_eq!(response.facilities.len(), 3);
    }

    #[test]
    fn test_nearest_with_empty_store_is_not_an_error() {
        let service = LocatorService::init(MemoryStore::default());

        let query = LocationQuery {
            latitude: Some(37.7749),
            longitude: Some(-122.4194),
        };
        let response = service.nearest(&query).unwrap();
        assert!(response.facilities.is_empty());
    }

    #[test]
    fn test_nearest_rejects_invalid_query() {
        let service = LocatorService::init(MemoryStore::default());

        let query = LocationQuery {
            latitude: None,
            longitude: None,
        };
        assert!(service.nearest(&query).is_err());
    }

    #[test]
    fn test_store_failure_propagates() {
        let service = LocatorService::init(FailingStore);

        let query = LocationQuery {
            latitude: Some(37.7749),
            longitude: Some(-122.4194),
        };
        assert_eq!(service.nearest(&query).unwrap_err(), "Storage offline");
    }

    #[test]
    fn test_status_reports_active_backend() {
        let service = LocatorService::init(MemoryStore::default());

        let status = service.status();
        assert!(status.healthy);
        assert_eq!(status.backend, BackendKind::Accelerated);
    }
}
