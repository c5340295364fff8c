//! Vector and angle primitives for spherical geometry.

pub mod lonlat;
pub mod unit_vector;
pub mod vector;

pub use lonlat::{degs_to_rads, rads_to_degs, LonLat};
pub use unit_vector::{orientation, UnitVector3d};
pub use vector::Vector3d;
