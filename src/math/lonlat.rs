// src/math/lonlat.rs

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{M_PI_180, M_180_PI};
use crate::math::unit_vector::UnitVector3d;

/// Converts degrees to radians.
#[inline]
#[must_use]
pub fn degs_to_rads(degrees: f64) -> f64 {
  degrees * M_PI_180
}

/// Converts radians to degrees.
#[inline]
#[must_use]
pub fn rads_to_degs(radians: f64) -> f64 {
  radians * M_180_PI
}

/// Longitude/latitude coordinates in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LonLat {
  /// Longitude in radians.
  pub lon: f64,
  /// Latitude in radians.
  pub lat: f64,
}

impl LonLat {
  /// Creates a coordinate pair from radians.
  #[inline]
  #[must_use]
  pub const fn new(lon: f64, lat: f64) -> Self {
    Self { lon, lat }
  }

  /// Creates a coordinate pair from degrees.
  #[inline]
  #[must_use]
  pub fn from_degrees(lon: f64, lat: f64) -> Self {
    Self::new(degs_to_rads(lon), degs_to_rads(lat))
  }

  /// The unit direction for this coordinate pair.
  #[must_use]
  pub fn to_unit_vector(&self) -> UnitVector3d {
    let r = self.lat.cos();
    // cos^2 + sin^2 = 1, so the triple already has unit norm.
    UnitVector3d::from_normalized(crate::math::vector::Vector3d::new(
      self.lon.cos() * r,
      self.lon.sin() * r,
      self.lat.sin(),
    ))
  }

  /// The coordinate pair for a unit direction, with longitude in
  /// `(-pi, pi]`.
  #[must_use]
  pub fn from_unit_vector(v: &UnitVector3d) -> Self {
    let lon = if v.x() == 0.0 && v.y() == 0.0 {
      0.0
    } else {
      v.y().atan2(v.x())
    };
    Self::new(lon, v.z().clamp(-1.0, 1.0).asin())
  }
}
