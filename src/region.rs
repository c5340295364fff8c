//! The polymorphic contract shared by every spherical region type.

use crate::circle::Circle;
use crate::convex_polygon::ConvexPolygon;
use crate::error::{Error, Result};
use crate::math::UnitVector3d;
use crate::types::{BBox, Relationship};

/// A region on the unit sphere.
///
/// Implementations are immutable after construction, so any number of
/// threads may query a shared region concurrently without synchronization.
///
/// Relationship computation is double dispatch over the core shapes: each
/// region answers `relate_circle` and `relate_polygon` directly, and
/// `relate` against an arbitrary region is implemented by asking the other
/// region to relate itself to this one and swapping the roles in the
/// answer. An external shape joins the contract by implementing the two
/// visitor methods (and may be conservative: a relationship it cannot
/// establish exactly degrades to plain [`Relationship::INTERSECTS`],
/// never to a false `DISJOINT`, `CONTAINS` or `WITHIN`).
pub trait Region {
  /// True if the region contains the direction `v`. Points on the
  /// boundary count as contained, to within
  /// [`crate::constants::CONTAINS_EPSILON`].
  fn contains(&self, v: &UnitVector3d) -> bool;

  /// A longitude/latitude box containing the region. The box is a bound,
  /// not necessarily a tight fit.
  fn bounding_box(&self) -> BBox;

  /// A spherical cap containing the region.
  fn bounding_circle(&self) -> Circle;

  /// Relationship of this region to a spherical cap.
  fn relate_circle(&self, other: &Circle) -> Relationship;

  /// Relationship of this region to a convex polygon.
  fn relate_polygon(&self, other: &ConvexPolygon) -> Relationship;

  /// Relationship of this region to any other region.
  fn relate(&self, other: &dyn Region) -> Relationship;

  /// The tag byte identifying this region type in its binary encoding.
  fn type_code(&self) -> u8;

  /// Serializes the region to its stable binary form.
  fn encode(&self) -> Vec<u8>;

  /// True if this region contains `other` entirely.
  fn contains_region(&self, other: &dyn Region) -> bool {
    self.relate(other).contains()
  }

  /// True if this region is contained in `other` entirely.
  fn is_within(&self, other: &dyn Region) -> bool {
    self.relate(other).is_within()
  }

  /// True if this region shares at least one point with `other`.
  fn intersects(&self, other: &dyn Region) -> bool {
    self.relate(other).intersects()
  }

  /// True if this region shares no point with `other`.
  fn is_disjoint_from(&self, other: &dyn Region) -> bool {
    self.relate(other).is_disjoint()
  }
}

/// Decodes a region of any known type from its binary form, dispatching
/// on the leading type tag.
///
/// # Errors
/// Returns [`Error::Decode`] for an empty buffer, an unknown tag, or a
/// payload the tagged type rejects.
pub fn decode(buffer: &[u8]) -> Result<Box<dyn Region>> {
  match buffer.first() {
    Some(&ConvexPolygon::TYPE_CODE) => Ok(Box::new(ConvexPolygon::decode(buffer)?)),
    Some(&Circle::TYPE_CODE) => Ok(Box::new(Circle::decode(buffer)?)),
    Some(_) => Err(Error::Decode("unknown region type tag")),
    None => Err(Error::Decode("empty buffer")),
  }
}
