//! Struct definitions and implementations for objects that represent
//! candidate facilities.
//!
//! The most generic form of a candidate is [`Facility`]. In the real
//! world, a candidate could be a [`Shelter`], which adds occupancy
//! bookkeeping on top of the base record. Other possibilities such as a
//! hospital, a fire station, or a pharmacy can also represent and
//! extend `Facility`.
//!
//! Since Rust doesn't have a built-in way to represent an interface
//! type, we use an [`AsFacility`] trait to achieve the similar effect.
//! So, a function may take an [`AsFacility`] parameter and call its
//! [`as_facility`](`AsFacility::as_facility`) method to get a
//! [`Facility`] reference.
//!
//! This pattern allows functions to be agnostic of the type of
//! `Facility` to accept as argument.

use serde::{Deserialize, Serialize};

use super::location::Location;

/// Since Rust doesn't allow for inheritance, we need to use `trait` as
/// a hack to allow passing "Facility-like" objects to functions.
pub trait AsFacility {
    /// Returns the generic `Facility` struct that an object "extends".
    fn as_facility(&self) -> &Facility;
    fn get_uid(&self) -> String;
}

//------------------------------------------------------------------
// Structs and Implementations
//------------------------------------------------------------------

/// A candidate record supplied by the facility store.
///
/// The resolver never owns facilities; it borrows them for the duration
/// of a single ranking call and hands back references alongside the
/// computed distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Typed as a [`String`] to allow for synthetic ids. One purpose of
    /// using a synthetic id is to allow for partitioned indexing on the
    /// database layer to efficiently filter data.
    ///
    /// For example, an uid could be `usa:ny:12345`. This format can be
    /// helpful when a client try to get all facilities in New York from
    /// a database.
    pub uid: String,

    /// Human-readable facility name.
    pub name: String,

    /// Free-form category label, e.g. `hospital` or `shelter`.
    pub category: String,

    /// Street address for display purposes.
    pub address: String,

    /// Contact phone number for display purposes.
    pub phone: String,

    /// Denotes the geographical position of the facility.
    ///
    /// See also [`Location`].
    pub location: Location,
}

impl AsFacility for Facility {
    fn as_facility(&self) -> &Facility {
        self
    }

    fn get_uid(&self) -> String {
        self.uid.clone()
    }
}

/// A shelter tracks how many people it can still take in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelter {
    pub facility: Facility,

    /// Number of beds still available.
    pub free_capacity: u32,
}

impl Shelter {
    /// Updates the free_capacity field of a shelter.
    ///
    /// CAUTION: Testing purposes only. Updates should not be done from
    /// the locator lib.
    #[allow(dead_code)]
    fn update_free_capacity(&mut self, new_capacity: u32) {
        self.free_capacity = new_capacity;
    }
}

impl AsFacility for Shelter {
    fn as_facility(&self) -> &Facility {
        &self.facility
    }

    fn get_uid(&self) -> String {
        self.as_facility().uid.clone()
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
