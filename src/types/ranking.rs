//! Definition of the `RankedFacility` type.
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::facility::Facility;

/// A ranked facility pairs a candidate with its computed distance from
/// the requester. Instances only live for the duration of one ranking
/// call and are discarded once the response is produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFacility<'a> {
    /// The candidate this entry ranks.
    pub facility: &'a Facility,

    /// Great-circle distance from the requester, in kilometers.
    pub distance_km: OrderedFloat<f64>,
}
