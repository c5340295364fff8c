// src/math/unit_vector.rs

use crate::constants::ORIENTATION_EPSILON;
use crate::error::Result;
use crate::math::vector::Vector3d;

/// A direction on the unit sphere: a 3-vector with norm 1.
///
/// The unit-norm invariant is enforced at construction; a `UnitVector3d`
/// can only be obtained from [`Vector3d::normalize`], from the axis
/// constants, or from [`crate::math::LonLat`] conversion. Values are
/// immutable and compared component-wise.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct UnitVector3d(Vector3d);

impl UnitVector3d {
  /// The +x axis direction.
  pub const X: Self = Self(Vector3d::new(1.0, 0.0, 0.0));
  /// The +y axis direction.
  pub const Y: Self = Self(Vector3d::new(0.0, 1.0, 0.0));
  /// The +z axis direction.
  pub const Z: Self = Self(Vector3d::new(0.0, 0.0, 1.0));
  /// The -x axis direction.
  pub const NEG_X: Self = Self(Vector3d::new(-1.0, 0.0, 0.0));
  /// The -y axis direction.
  pub const NEG_Y: Self = Self(Vector3d::new(0.0, -1.0, 0.0));
  /// The -z axis direction.
  pub const NEG_Z: Self = Self(Vector3d::new(0.0, 0.0, -1.0));

  /// Normalizes `(x, y, z)` to a unit direction.
  ///
  /// # Errors
  /// Returns [`crate::Error::InvalidArgument`] for a zero or non-finite
  /// input.
  pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
    Vector3d::new(x, y, z).normalize()
  }

  /// Wraps a vector that is already known to have unit norm.
  ///
  /// Callers are responsible for the norm invariant; this is used where
  /// re-normalizing would perturb bytes that must round-trip exactly.
  #[inline]
  pub(crate) const fn from_normalized(v: Vector3d) -> Self {
    Self(v)
  }

  /// X component.
  #[inline]
  #[must_use]
  pub const fn x(&self) -> f64 {
    self.0.x
  }

  /// Y component.
  #[inline]
  #[must_use]
  pub const fn y(&self) -> f64 {
    self.0.y
  }

  /// Z component.
  #[inline]
  #[must_use]
  pub const fn z(&self) -> f64 {
    self.0.z
  }

  /// The underlying vector.
  #[inline]
  #[must_use]
  pub const fn as_vector(&self) -> Vector3d {
    self.0
  }

  /// Dot product.
  #[inline]
  #[must_use]
  pub fn dot(&self, other: &Self) -> f64 {
    self.0.dot(&other.0)
  }

  /// Cross product. The result is not unit length.
  #[inline]
  #[must_use]
  pub fn cross(&self, other: &Self) -> Vector3d {
    self.0.cross(&other.0)
  }

  /// Computes `(other + self) x (other - self)`, which equals twice the
  /// cross product but loses far less precision when the two directions
  /// are nearly identical or nearly antipodal.
  #[must_use]
  pub fn robust_cross(&self, other: &Self) -> Vector3d {
    (other.0 + self.0).cross(&(other.0 - self.0))
  }

  /// The direction diametrically opposite this one.
  #[inline]
  #[must_use]
  pub fn antipode(&self) -> Self {
    Self(-self.0)
  }

  /// Angle to another direction, in radians, in `[0, pi]`.
  ///
  /// Computed as `atan2(|a x b|, a . b)`, which stays accurate for
  /// nearly identical and nearly antipodal directions where `acos` of the
  /// dot product does not.
  #[must_use]
  pub fn angle_to(&self, other: &Self) -> f64 {
    self.cross(other).norm().atan2(self.dot(other))
  }

  /// Unit direction halfway along the minor arc between `a` and `b`.
  ///
  /// Callers guarantee that `a` and `b` are not antipodal.
  #[inline]
  pub(crate) fn midpoint(a: &Self, b: &Self) -> Self {
    let s = a.0 + b.0;
    let n = s.norm();
    debug_assert!(n > 0.0, "midpoint of antipodal directions");
    Self(s * (1.0 / n))
  }
}

/// Sign of the triple product `(a x b) . c`: +1 if `c` is to the left of
/// the great circle from `a` to `b` (seen from outside the sphere), -1 if
/// to the right, 0 if the three directions are coplanar to within
/// [`ORIENTATION_EPSILON`].
#[must_use]
pub fn orientation(a: &UnitVector3d, b: &UnitVector3d, c: &UnitVector3d) -> i32 {
  let t = a.cross(b).dot(&c.as_vector());
  if t > ORIENTATION_EPSILON {
    1
  } else if t < -ORIENTATION_EPSILON {
    -1
  } else {
    0
  }
}
