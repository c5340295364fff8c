//! Spherical caps.

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{CONTAINS_EPSILON, M_2PI, M_PI, M_PI_2};
use crate::convex_polygon::ConvexPolygon;
use crate::error::{Error, Result};
use crate::math::{LonLat, UnitVector3d};
use crate::region::Region;
use crate::types::{BBox, Relationship};

/// A spherical cap: all directions within `half_angle` radians of a
/// center direction.
///
/// A half angle of 0 contains just the center; a half angle of pi covers
/// the whole sphere. Circles double as the bounding-cap type every region
/// must be able to produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
  center: UnitVector3d,
  half_angle: f64,
}

impl Circle {
  /// Tag byte identifying circles in the binary region encoding.
  pub const TYPE_CODE: u8 = b'c';

  /// Encoded size in bytes: tag, center, half angle.
  pub const ENCODED_SIZE: usize = 1 + 3 * 8 + 8;

  /// Creates a cap from its center and opening half angle in radians.
  ///
  /// # Errors
  /// Returns [`Error::InvalidArgument`] unless `half_angle` is finite and
  /// in `[0, pi]`.
  pub fn new(center: UnitVector3d, half_angle: f64) -> Result<Self> {
    if !half_angle.is_finite() || !(0.0..=M_PI).contains(&half_angle) {
      return Err(Error::InvalidArgument("circle half angle must be in [0, pi]"));
    }
    Ok(Self { center, half_angle })
  }

  /// The cap covering the entire sphere.
  #[must_use]
  pub fn full() -> Self {
    Self {
      center: UnitVector3d::Z,
      half_angle: M_PI,
    }
  }

  #[inline]
  pub(crate) const fn new_unchecked(center: UnitVector3d, half_angle: f64) -> Self {
    Self { center, half_angle }
  }

  /// The cap's center direction.
  #[inline]
  #[must_use]
  pub const fn center(&self) -> &UnitVector3d {
    &self.center
  }

  /// The cap's opening half angle in radians.
  #[inline]
  #[must_use]
  pub const fn half_angle(&self) -> f64 {
    self.half_angle
  }

  /// True if the cap covers the entire sphere.
  #[inline]
  #[must_use]
  pub fn is_full(&self) -> bool {
    self.half_angle >= M_PI
  }

  fn relate_circle_impl(&self, other: &Circle) -> Relationship {
    let d = self.center.angle_to(&other.center);
    if d > self.half_angle + other.half_angle + CONTAINS_EPSILON {
      return Relationship::DISJOINT;
    }
    let mut rel = Relationship::INTERSECTS;
    if self.is_full() || self.half_angle + CONTAINS_EPSILON >= d + other.half_angle {
      rel |= Relationship::CONTAINS;
    }
    if other.is_full() || other.half_angle + CONTAINS_EPSILON >= d + self.half_angle {
      rel |= Relationship::WITHIN;
    }
    rel
  }

  /// Deserializes a circle from its binary form.
  ///
  /// # Errors
  /// Returns [`Error::Decode`] on a tag mismatch, a buffer whose length is
  /// not exactly [`Self::ENCODED_SIZE`], or payload values that do not
  /// describe a valid cap.
  pub fn decode(buffer: &[u8]) -> Result<Self> {
    if buffer.len() != Self::ENCODED_SIZE {
      return Err(Error::Decode("circle buffer has wrong length"));
    }
    if buffer[0] != Self::TYPE_CODE {
      return Err(Error::Decode("type tag mismatch"));
    }
    let x = LittleEndian::read_f64(&buffer[1..9]);
    let y = LittleEndian::read_f64(&buffer[9..17]);
    let z = LittleEndian::read_f64(&buffer[17..25]);
    let half_angle = LittleEndian::read_f64(&buffer[25..33]);
    let v = crate::math::Vector3d::new(x, y, z);
    if !x.is_finite() || !y.is_finite() || !z.is_finite() || (v.squared_norm() - 1.0).abs() > 1.0e-9 {
      return Err(Error::Decode("circle center is not a unit vector"));
    }
    if !half_angle.is_finite() || !(0.0..=M_PI).contains(&half_angle) {
      return Err(Error::Decode("circle half angle out of range"));
    }
    // The stored center is kept bit for bit; re-normalizing could perturb
    // it and break round trips.
    Ok(Self {
      center: UnitVector3d::from_normalized(v),
      half_angle,
    })
  }
}

impl Region for Circle {
  fn contains(&self, v: &UnitVector3d) -> bool {
    self.center.angle_to(v) <= self.half_angle + CONTAINS_EPSILON
  }

  fn bounding_box(&self) -> BBox {
    let ll = LonLat::from_unit_vector(&self.center);
    let north = ll.lat + self.half_angle;
    let south = ll.lat - self.half_angle;
    if north >= M_PI_2 || south <= -M_PI_2 {
      return BBox {
        north: north.min(M_PI_2),
        south: south.max(-M_PI_2),
        east: M_PI,
        west: -M_PI,
      };
    }
    // Widest longitude span occurs at the latitude extreme nearer a pole.
    let span = self.half_angle / north.abs().max(south.abs()).cos();
    if span >= M_PI {
      return BBox {
        north,
        south,
        east: M_PI,
        west: -M_PI,
      };
    }
    BBox {
      north,
      south,
      east: wrap_lon(ll.lon + span),
      west: wrap_lon(ll.lon - span),
    }
  }

  fn bounding_circle(&self) -> Circle {
    *self
  }

  fn relate_circle(&self, other: &Circle) -> Relationship {
    self.relate_circle_impl(other)
  }

  fn relate_polygon(&self, other: &ConvexPolygon) -> Relationship {
    other.relate_circle(self).invert()
  }

  fn relate(&self, other: &dyn Region) -> Relationship {
    other.relate_circle(self).invert()
  }

  fn type_code(&self) -> u8 {
    Self::TYPE_CODE
  }

  fn encode(&self) -> Vec<u8> {
    let mut buffer = vec![0u8; Self::ENCODED_SIZE];
    buffer[0] = Self::TYPE_CODE;
    LittleEndian::write_f64(&mut buffer[1..9], self.center.x());
    LittleEndian::write_f64(&mut buffer[9..17], self.center.y());
    LittleEndian::write_f64(&mut buffer[17..25], self.center.z());
    LittleEndian::write_f64(&mut buffer[25..33], self.half_angle);
    buffer
  }
}

fn wrap_lon(lon: f64) -> f64 {
  if lon > M_PI {
    lon - M_2PI
  } else if lon <= -M_PI {
    lon + M_2PI
  } else {
    lon
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::math::degs_to_rads;

  #[test]
  fn test_new_validates_half_angle() {
    assert!(Circle::new(UnitVector3d::X, -0.1).is_err());
    assert!(Circle::new(UnitVector3d::X, M_PI + 0.1).is_err());
    assert!(Circle::new(UnitVector3d::X, f64::NAN).is_err());
    assert!(Circle::new(UnitVector3d::X, 0.0).is_ok());
    assert!(Circle::new(UnitVector3d::X, M_PI).is_ok());
  }

  #[test]
  fn test_contains_point() {
    let c = Circle::new(UnitVector3d::Z, degs_to_rads(10.0)).unwrap();
    assert!(c.contains(&UnitVector3d::Z));
    let near = LonLat::from_degrees(45.0, 81.0).to_unit_vector();
    assert!(c.contains(&near));
    let far = LonLat::from_degrees(45.0, 79.0).to_unit_vector();
    assert!(!c.contains(&far));
    // Boundary points count as contained.
    let boundary = LonLat::from_degrees(0.0, 80.0).to_unit_vector();
    assert!(c.contains(&boundary));
  }

  #[test]
  fn test_full_contains_everything() {
    let full = Circle::full();
    assert!(full.is_full());
    assert!(full.contains(&UnitVector3d::Z));
    assert!(full.contains(&UnitVector3d::NEG_Z));
  }

  #[test]
  fn test_circle_circle_relations() {
    let a = Circle::new(UnitVector3d::Z, degs_to_rads(30.0)).unwrap();
    let b = Circle::new(UnitVector3d::Z, degs_to_rads(10.0)).unwrap();
    let far = Circle::new(UnitVector3d::NEG_Z, degs_to_rads(10.0)).unwrap();
    let side = Circle::new(LonLat::from_degrees(0.0, 65.0).to_unit_vector(), degs_to_rads(20.0)).unwrap();

    let rel = a.relate(&b);
    assert!(rel.contains() && !rel.is_within() && rel.intersects());
    let rel = b.relate(&a);
    assert!(rel.is_within() && !rel.contains());

    assert!(a.is_disjoint_from(&far));
    assert!(!a.intersects(&far));

    // Overlap without containment either way.
    let rel = a.relate(&side);
    assert!(rel.intersects() && !rel.contains() && !rel.is_within() && !rel.is_disjoint());

    // A region coincides with itself.
    let rel = a.relate(&a);
    assert!(rel.contains() && rel.is_within());
  }

  #[test]
  fn test_full_circle_relations() {
    let full = Circle::full();
    let small = Circle::new(UnitVector3d::NEG_Z, 0.25).unwrap();
    let rel = full.relate(&small);
    assert!(rel.contains() && !rel.is_within());
    assert!(small.is_within(&full));
  }

  #[test]
  fn test_bounding_box_spans_all_longitudes_near_pole() {
    let c = Circle::new(UnitVector3d::Z, degs_to_rads(5.0)).unwrap();
    let bbox = c.bounding_box();
    assert_eq!(bbox.east, M_PI);
    assert_eq!(bbox.west, -M_PI);
    assert_eq!(bbox.north, M_PI_2);
  }

  #[test]
  fn test_encode_decode_round_trip() {
    let c = Circle::new(UnitVector3d::new(0.3, -0.4, 0.87).unwrap(), 0.75).unwrap();
    let bytes = c.encode();
    assert_eq!(bytes.len(), Circle::ENCODED_SIZE);
    assert_eq!(bytes[0], Circle::TYPE_CODE);
    let back = Circle::decode(&bytes).unwrap();
    assert_eq!(back, c);
    assert_eq!(back.encode(), bytes);
  }

  #[test]
  fn test_decode_rejects_corrupt_buffers() {
    let c = Circle::new(UnitVector3d::X, 1.0).unwrap();
    let mut bytes = c.encode();
    bytes[0] = b'p';
    assert!(matches!(Circle::decode(&bytes), Err(Error::Decode(_))));
    let bytes = c.encode();
    assert!(matches!(Circle::decode(&bytes[..32]), Err(Error::Decode(_))));
    let mut bytes = c.encode();
    LittleEndian::write_f64(&mut bytes[25..33], 7.0);
    assert!(matches!(Circle::decode(&bytes), Err(Error::Decode(_))));
  }
}
