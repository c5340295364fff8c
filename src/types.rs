//! Core data types shared across the crate.

use std::ops::{BitOr, BitOrAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of one trixel of the Hierarchical Triangular Mesh.
///
/// The value encodes both the subdivision level and the root-to-leaf path:
/// a sentinel bit, then the root triangle number (0-7), then 2 bits per
/// level selecting one of the 4 children. A level-0 root id is `8 + root`;
/// descending one level appends 2 child bits, so ids at level `L` occupy
/// `[8 * 4^L, 16 * 4^L)` and ids from different levels never collide.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrixelId(pub u64);

/// Invalid trixel id (no sentinel bit).
pub const INVALID_TRIXEL: TrixelId = TrixelId(0);

/// Spatial relationship between two regions, as computed by
/// [`crate::Region::relate`].
///
/// A 3-bit set: `DISJOINT`, `CONTAINS` (the first region contains the
/// second) and `WITHIN` (the first region is contained in the second). The
/// empty set means the regions intersect without either containing the
/// other. Two coincident regions report `CONTAINS | WITHIN`. Containment
/// in either direction implies intersection, so `DISJOINT` never combines
/// with the other two bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Relationship(u8);

impl Relationship {
  /// The regions intersect, and neither containment bit is known to hold.
  pub const INTERSECTS: Self = Self(0);
  /// The regions have no point in common.
  pub const DISJOINT: Self = Self(0b001);
  /// The first region contains the second.
  pub const CONTAINS: Self = Self(0b010);
  /// The first region is contained in the second.
  pub const WITHIN: Self = Self(0b100);

  /// True if the disjoint bit is set.
  #[inline]
  #[must_use]
  pub const fn is_disjoint(self) -> bool {
    self.0 & 0b001 != 0
  }

  /// True if the first region contains the second.
  #[inline]
  #[must_use]
  pub const fn contains(self) -> bool {
    self.0 & 0b010 != 0
  }

  /// True if the first region is contained in the second.
  #[inline]
  #[must_use]
  pub const fn is_within(self) -> bool {
    self.0 & 0b100 != 0
  }

  /// True if the regions share at least one point.
  #[inline]
  #[must_use]
  pub const fn intersects(self) -> bool {
    !self.is_disjoint()
  }

  /// The same relationship with the roles of the two regions swapped:
  /// `CONTAINS` and `WITHIN` trade places, `DISJOINT` is symmetric.
  #[inline]
  #[must_use]
  pub const fn invert(self) -> Self {
    Self((self.0 & 0b001) | ((self.0 & 0b010) << 1) | ((self.0 & 0b100) >> 1))
  }
}

impl BitOr for Relationship {
  type Output = Self;

  #[inline]
  fn bitor(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }
}

impl BitOrAssign for Relationship {
  #[inline]
  fn bitor_assign(&mut self, other: Self) {
    self.0 |= other.0;
  }
}

/// Geographic bounding box with coordinates in radians.
///
/// Latitudes are in `[-pi/2, pi/2]`; longitudes in `(-pi, pi]` except for
/// boxes spanning all longitudes, which use `west = -pi, east = pi`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BBox {
  /// North latitude in radians.
  pub north: f64,
  /// South latitude in radians.
  pub south: f64,
  /// East longitude in radians.
  pub east: f64,
  /// West longitude in radians.
  pub west: f64,
}
