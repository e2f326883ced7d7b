//! The core of the locator library.
//!
//! The engine module ranks a set of candidate facilities by
//! great-circle distance from a requester location. Distance
//! computation is delegated to whichever backend was selected at
//! startup.

/// The resolver engine module.
pub mod engine {
    use ordered_float::OrderedFloat;

    use crate::facility::AsFacility;
    use crate::location::Location;
    use crate::ranking::RankedFacility;
    use crate::utils::backend::ComputeBackend;

    /// Number of results returned when the collaborator does not
    /// configure its own limit.
    pub const DEFAULT_LIMIT: usize = 10;

    /// A Resolver ranks candidate facilities for a requester. It holds
    /// a reference to the distance backend chosen at startup and no
    /// other state, so a single instance may serve any number of
    /// threads without coordination.
    pub struct Resolver<'a> {
        backend: &'a dyn ComputeBackend,
    }

    impl<'a> Resolver<'a> {
        /// Creates a new resolver around the given distance backend.
        pub fn new(backend: &'a dyn ComputeBackend) -> Resolver<'a> {
            Resolver { backend }
        }

        /// Ranks `candidates` by distance from `origin`, closest first.
        ///
        /// Every candidate is measured, then the list is sorted with a
        /// stable sort and cut down to `limit` entries. Candidates at
        /// equal distance keep their input order.
        ///
        /// # Arguments
        /// * `origin` - The requester's location.
        /// * `candidates` - Facility-like records to rank. Only
        ///   borrowed; the input is never mutated.
        /// * `limit` - Maximum number of entries to return. A limit of
        ///   zero yields an empty result; a limit at or above the
        ///   candidate count returns every candidate.
        ///
        /// # Returns
        /// Ranked facilities in non-decreasing distance order. Empty if
        /// `candidates` is empty.
        pub fn rank<'c>(
            &self,
            origin: &Location,
            candidates: &'c [impl AsFacility],
            limit: usize,
        ) -> Vec<RankedFacility<'c>> {
            let mut ranked: Vec<RankedFacility<'c>> = candidates
                .iter()
                .map(|candidate| RankedFacility {
                    facility: candidate.as_facility(),
                    distance_km: OrderedFloat(
                        self.backend
                            .compute(origin, &candidate.as_facility().location),
                    ),
                })
                .collect();

            ranked.sort_by_key(|entry| entry.distance_km);
            ranked.truncate(limit);
            ranked
        }
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
