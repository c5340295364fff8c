#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Often a matter of taste
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)] // Can be common in math-heavy code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

//! `skygeom` indexes and reasons about regions on the unit sphere.
//!
//! The crate has two tightly related halves. The region half provides
//! convex spherical polygons bounded by great-circle edges and spherical
//! caps, all implementing a common [`Region`] contract: point containment,
//! relationship predicates (contains / within / intersects / disjoint),
//! bounding shapes, and a stable tagged binary encoding. The indexing half
//! provides [`HtmPixelization`], the Hierarchical Triangular Mesh: a fixed
//! recursive tiling of the sphere into 8 root triangles subdivided 4-way
//! per level, mapping points to trixel ids and regions to compact
//! [`RangeSet`]s of ids.

pub mod circle;
pub mod constants;
pub mod convex_polygon;
pub mod error;
pub mod htm;
pub mod math;
pub mod range_set;
pub mod region;
pub mod types;

pub use circle::Circle;
pub use constants::MAX_LEVEL;
pub use convex_polygon::ConvexPolygon;
pub use error::{Error, Result};
pub use htm::{
  ids::{as_string, children, level_of, parent},
  triangle, HtmPixelization,
};
pub use math::{degs_to_rads, orientation, rads_to_degs, LonLat, UnitVector3d, Vector3d};
pub use range_set::RangeSet;
pub use region::{decode, Region};
pub use types::{BBox, Relationship, TrixelId, INVALID_TRIXEL};
