//! The Hierarchical Triangular Mesh pixelization.
//!
//! The sphere is tiled by 8 fixed root triangles (4 per hemisphere), and
//! each triangle splits into 4 children by connecting the normalized
//! midpoints of its edges: three corner children that keep one parent
//! vertex each, then the center triangle. Repeating the split `level`
//! times yields `8 * 4^level` leaf trixels forming a complete,
//! non-overlapping partition of the sphere.

pub mod ids;

pub use ids::{as_string, children, is_valid, level_of, parent};

use crate::constants::{HTM_ROOT_VERTICES, MAX_LEVEL};
use crate::convex_polygon::ConvexPolygon;
use crate::error::{Error, Result};
use crate::math::UnitVector3d;
use crate::range_set::RangeSet;
use crate::region::Region;
use crate::types::TrixelId;

/// Reconstructs the triangle of the trixel with the given id by walking
/// its root-to-leaf path from the fixed root geometry.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] for a malformed id.
pub fn triangle(id: TrixelId) -> Result<ConvexPolygon> {
  let level = level_of(id)?;
  let root = ((id.0 >> (2 * level)) & 7) as usize;
  let [mut v0, mut v1, mut v2] = HTM_ROOT_VERTICES[root];
  for k in (0..level).rev() {
    let (m01, m12, m20) = midpoints(&v0, &v1, &v2);
    match (id.0 >> (2 * k)) & 3 {
      0 => {
        v1 = m01;
        v2 = m20;
      }
      1 => {
        v0 = v1;
        v1 = m12;
        v2 = m01;
      }
      2 => {
        v0 = v2;
        v1 = m20;
        v2 = m12;
      }
      _ => {
        v0 = m12;
        v1 = m20;
        v2 = m01;
      }
    }
  }
  Ok(ConvexPolygon::triangle_unchecked(v0, v1, v2))
}

/// A pixelization of the unit sphere into HTM trixels at a fixed
/// subdivision level.
///
/// The only state is the level, so instances are trivially copyable and
/// safe to share across threads; every query allocates its own working
/// storage. Two pixelizations are equal iff their levels are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmPixelization {
  level: u32,
}

impl HtmPixelization {
  /// Creates a pixelization at the given subdivision level.
  ///
  /// # Errors
  /// Returns [`Error::InvalidArgument`] if `level` exceeds [`MAX_LEVEL`].
  pub fn new(level: u32) -> Result<Self> {
    if level > MAX_LEVEL {
      return Err(Error::InvalidArgument("pixelization level out of range"));
    }
    Ok(Self { level })
  }

  /// The configured subdivision level.
  #[inline]
  #[must_use]
  pub const fn level(&self) -> u32 {
    self.level
  }

  /// Number of trixels in the pixelization: `8 * 4^level`.
  #[must_use]
  pub const fn num_trixels(&self) -> u64 {
    8 << (2 * self.level)
  }

  /// The full id range of the pixelization as a single interval.
  #[must_use]
  pub fn universe(&self) -> RangeSet {
    let mut set = RangeSet::new();
    set.insert(8 << (2 * self.level), 16 << (2 * self.level));
    set
  }

  /// The id of the leaf trixel containing the direction `v`.
  ///
  /// The root triangle follows from the octant signs of `v`; each further
  /// level tests `v` against the three midpoint great circles separating
  /// the 4 children, taking the first of the corner children whose wedge
  /// contains it and falling through to the center child. Directions on a
  /// shared boundary resolve to the lowest-numbered candidate, so every
  /// direction maps to exactly one leaf.
  #[must_use]
  pub fn index(&self, v: &UnitVector3d) -> TrixelId {
    let root = if v.z() < 0.0 {
      if v.y() >= 0.0 {
        usize::from(v.x() < 0.0) // 0: x+, y+ / 1: x-, y+
      } else if v.x() < 0.0 {
        2
      } else {
        3
      }
    } else if v.y() < 0.0 {
      if v.x() >= 0.0 {
        4
      } else {
        5
      }
    } else if v.x() < 0.0 {
      6
    } else {
      7
    };
    let mut id = 8 | root as u64;
    let [mut v0, mut v1, mut v2] = HTM_ROOT_VERTICES[root];
    for _ in 0..self.level {
      let (m01, m12, m20) = midpoints(&v0, &v1, &v2);
      let side = |a: &UnitVector3d, b: &UnitVector3d| a.cross(b).dot(&v.as_vector());
      let child = if side(&m01, &m20) >= 0.0 {
        v1 = m01;
        v2 = m20;
        0
      } else if side(&m12, &m01) >= 0.0 {
        v0 = v1;
        v1 = m12;
        v2 = m01;
        1
      } else if side(&m20, &m12) >= 0.0 {
        v0 = v2;
        v1 = m20;
        v2 = m12;
        2
      } else {
        v0 = m12;
        v1 = m20;
        v2 = m01;
        3
      };
      id = (id << 2) | child;
    }
    TrixelId(id)
  }

  /// The set of leaf-trixel ids overlapping `region`.
  ///
  /// The returned set covers the region: every leaf sharing at least one
  /// point with the region is present, as the unique minimal sequence of
  /// maximal id ranges in increasing order. Output size scales with the
  /// complexity of the region's boundary, not with the number of leaves
  /// it covers.
  #[must_use]
  pub fn envelope(&self, region: &dyn Region) -> RangeSet {
    self.cover(region, false)
  }

  /// The set of leaf-trixel ids entirely inside `region`.
  #[must_use]
  pub fn interior(&self, region: &dyn Region) -> RangeSet {
    self.cover(region, true)
  }

  /// Top-down traversal from the 8 roots with an explicit work stack, so
  /// the worst-case storage is bounded by the level rather than by call
  /// depth. Subtrees disjoint from the region are pruned; subtrees the
  /// region fully covers contribute their whole id range in one step;
  /// only boundary trixels are split further.
  fn cover(&self, region: &dyn Region, interior_only: bool) -> RangeSet {
    struct Frame {
      v0: UnitVector3d,
      v1: UnitVector3d,
      v2: UnitVector3d,
      id: u64,
      level: u32,
    }

    let mut set = RangeSet::new();
    let mut stack: Vec<Frame> = Vec::with_capacity(8 + 3 * self.level as usize);
    for root in (0..8usize).rev() {
      let [v0, v1, v2] = HTM_ROOT_VERTICES[root];
      stack.push(Frame {
        v0,
        v1,
        v2,
        id: 8 | root as u64,
        level: 0,
      });
    }
    while let Some(f) = stack.pop() {
      let trixel = ConvexPolygon::triangle_unchecked(f.v0, f.v1, f.v2);
      let rel = region.relate_polygon(&trixel);
      if rel.is_disjoint() {
        continue;
      }
      if rel.contains() {
        // The region covers the whole subtree.
        let shift = 2 * (self.level - f.level);
        set.insert(f.id << shift, (f.id + 1) << shift);
        continue;
      }
      if f.level == self.level {
        if !interior_only {
          set.insert(f.id, f.id + 1);
        }
        continue;
      }
      let (m01, m12, m20) = midpoints(&f.v0, &f.v1, &f.v2);
      let id = f.id << 2;
      let level = f.level + 1;
      // Children pushed in reverse pop in ascending id order, keeping the
      // output appends sorted.
      stack.push(Frame { v0: m12, v1: m20, v2: m01, id: id | 3, level });
      stack.push(Frame { v0: f.v2, v1: m20, v2: m12, id: id | 2, level });
      stack.push(Frame { v0: f.v1, v1: m12, v2: m01, id: id | 1, level });
      stack.push(Frame { v0: f.v0, v1: m01, v2: m20, id, level });
    }
    set
  }
}

fn midpoints(
  v0: &UnitVector3d,
  v1: &UnitVector3d,
  v2: &UnitVector3d,
) -> (UnitVector3d, UnitVector3d, UnitVector3d) {
  (
    UnitVector3d::midpoint(v0, v1),
    UnitVector3d::midpoint(v1, v2),
    UnitVector3d::midpoint(v2, v0),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::circle::Circle;

  #[test]
  fn test_new_validates_level() {
    assert!(HtmPixelization::new(0).is_ok());
    assert!(HtmPixelization::new(MAX_LEVEL).is_ok());
    assert!(HtmPixelization::new(MAX_LEVEL + 1).is_err());
  }

  #[test]
  fn test_equality_is_by_level() {
    assert_eq!(HtmPixelization::new(7).unwrap(), HtmPixelization::new(7).unwrap());
    assert_ne!(HtmPixelization::new(7).unwrap(), HtmPixelization::new(8).unwrap());
  }

  #[test]
  fn test_index_at_level_zero_hits_the_octant_roots() {
    let pix = HtmPixelization::new(0).unwrap();
    // One direction strictly inside each octant.
    let cases = [
      (1.0, 1.0, -1.0, 8u64),
      (-1.0, 1.0, -1.0, 9),
      (-1.0, -1.0, -1.0, 10),
      (1.0, -1.0, -1.0, 11),
      (1.0, -1.0, 1.0, 12),
      (-1.0, -1.0, 1.0, 13),
      (-1.0, 1.0, 1.0, 14),
      (1.0, 1.0, 1.0, 15),
    ];
    for (x, y, z, id) in cases {
      let v = UnitVector3d::new(x, y, z).unwrap();
      assert_eq!(pix.index(&v), TrixelId(id));
    }
  }

  #[test]
  fn test_index_level_matches_configuration() {
    let v = UnitVector3d::new(0.3, -0.5, 0.8).unwrap();
    for level in [0u32, 1, 2, 5, 10, MAX_LEVEL] {
      let pix = HtmPixelization::new(level).unwrap();
      let id = pix.index(&v);
      assert_eq!(level_of(id), Ok(level));
      // The leaf trixel contains the direction it was derived from.
      assert!(triangle(id).unwrap().contains(&v));
    }
  }

  #[test]
  fn test_index_agrees_with_triangle_walk() {
    let pix = HtmPixelization::new(8).unwrap();
    let v = UnitVector3d::new(-0.2, 0.9, 0.4).unwrap();
    let id = pix.index(&v);
    let tri = triangle(id).unwrap();
    assert_eq!(pix.index(&tri.centroid()), id);
  }

  #[test]
  fn test_roots_contain_their_centroids() {
    let pix = HtmPixelization::new(0).unwrap();
    for root in 0..8u64 {
      let id = TrixelId(8 | root);
      let tri = triangle(id).unwrap();
      let c = tri.centroid();
      assert!(tri.contains(&c));
      assert_eq!(pix.index(&c), id);
    }
  }

  #[test]
  fn test_triangle_rejects_malformed_ids() {
    assert!(triangle(TrixelId(0)).is_err());
    assert!(triangle(TrixelId(16)).is_err());
  }

  #[test]
  fn test_universe_and_full_sphere_envelope() {
    for level in [0u32, 1, 3] {
      let pix = HtmPixelization::new(level).unwrap();
      let expected_count = 8u64 * 4u64.pow(level);
      assert_eq!(pix.num_trixels(), expected_count);

      let universe = pix.universe();
      assert_eq!(universe.cardinality(), expected_count);

      // The full-sphere cap covers every trixel, and the 8 root ranges
      // coalesce into the single full id range.
      let covering = pix.envelope(&Circle::full());
      assert_eq!(covering, universe);
      assert_eq!(covering.num_ranges(), 1);
      assert_eq!(covering.ranges()[0], (8 << (2 * level), 16 << (2 * level)));
      assert_eq!(pix.interior(&Circle::full()), universe);
    }
  }

  #[test]
  fn test_envelope_of_small_cap_is_small_and_sound() {
    let pix = HtmPixelization::new(6).unwrap();
    let center = UnitVector3d::new(0.5, 0.5, 0.7).unwrap();
    let cap = Circle::new(center, 0.02).unwrap();
    let covering = pix.envelope(&cap);
    assert!(!covering.is_empty());
    assert!(covering.cardinality() < pix.num_trixels() / 64);
    // The leaf containing the cap's center must be covered.
    assert!(covering.contains(pix.index(&center).0));
    // The interior at this level is a subset of the covering.
    let inner = pix.interior(&cap);
    for range in inner.iter() {
      for id in range {
        assert!(covering.contains(id));
      }
    }
  }
}
