//! Convex polygons on the unit sphere.

use byteorder::{ByteOrder, LittleEndian};

use crate::circle::Circle;
use crate::constants::{COINCIDENT_EPSILON, CONTAINS_EPSILON, M_PI, ORIENTATION_EPSILON};
use crate::error::{Error, Result};
use crate::math::{orientation, UnitVector3d, Vector3d};
use crate::region::Region;
use crate::types::{BBox, Relationship};

/// A convex region on the sphere bounded by great-circle edges.
///
/// Vertices are stored in counter-clockwise order as seen from outside
/// the sphere, together with one derived plane per edge: the unit normal
/// of the great circle through two consecutive vertices, oriented so the
/// interior lies on its positive side. A polygon is immutable once built,
/// and always spans less than a hemisphere; constructions that cannot
/// satisfy that fail rather than producing a wrapped or degenerate shape.
///
/// Two polygons are equal iff their vertex sequences are identical, in
/// the same starting order and winding.
#[derive(Debug, Clone)]
pub struct ConvexPolygon {
  vertices: Vec<UnitVector3d>,
  edge_planes: Vec<Vector3d>,
}

impl PartialEq for ConvexPolygon {
  fn eq(&self, other: &Self) -> bool {
    self.vertices == other.vertices
  }
}

impl ConvexPolygon {
  /// Tag byte identifying convex polygons in the binary region encoding.
  pub const TYPE_CODE: u8 = b'p';

  /// Creates a polygon from vertices in counter-clockwise order.
  ///
  /// # Errors
  /// Returns [`Error::InvalidArgument`] if fewer than 3 vertices are
  /// given, any two vertices are coincident or antipodal, or the sequence
  /// is not strictly convex counter-clockwise.
  pub fn new(vertices: Vec<UnitVector3d>) -> Result<Self> {
    if vertices.len() < 3 {
      return Err(Error::InvalidArgument("a convex polygon requires at least 3 vertices"));
    }
    for i in 0..vertices.len() {
      for j in (i + 1)..vertices.len() {
        let d = vertices[i].dot(&vertices[j]);
        if d > 1.0 - COINCIDENT_EPSILON {
          return Err(Error::InvalidArgument("polygon vertices are coincident"));
        }
        if d < -(1.0 - COINCIDENT_EPSILON) {
          return Err(Error::InvalidArgument("polygon vertices are antipodal"));
        }
      }
    }
    let edge_planes = edge_planes_of(&vertices)?;
    // Every vertex must lie strictly inside every half-space it is not an
    // endpoint of.
    let n = vertices.len();
    for (i, plane) in edge_planes.iter().enumerate() {
      for (k, v) in vertices.iter().enumerate() {
        if k == i || k == (i + 1) % n {
          continue;
        }
        if plane.dot(&v.as_vector()) <= ORIENTATION_EPSILON {
          return Err(Error::InvalidArgument(
            "polygon vertices are not in convex counter-clockwise order",
          ));
        }
      }
    }
    Ok(Self { vertices, edge_planes })
  }

  /// Builds a trixel triangle without convexity validation. Callers
  /// guarantee counter-clockwise winding and non-degenerate edges.
  pub(crate) fn triangle_unchecked(v0: UnitVector3d, v1: UnitVector3d, v2: UnitVector3d) -> Self {
    let vertices = vec![v0, v1, v2];
    let edge_planes = vertices
      .iter()
      .zip(vertices.iter().cycle().skip(1))
      .map(|(a, b)| {
        let n = a.robust_cross(b);
        let m = n.norm();
        debug_assert!(m > 0.0);
        n * (1.0 / m)
      })
      .collect();
    Self { vertices, edge_planes }
  }

  /// Computes the convex hull of a set of directions.
  ///
  /// The hull is built with a Graham scan around an extreme input point:
  /// the remaining points are ordered by angle in the tangent plane at
  /// that pivot, the ordering is rotated to start just past the widest
  /// angular gap (the pivot is a hull vertex, so the points span at most
  /// a half turn from there), and a sweep drops every right or straight
  /// turn. Points interior to the hull and nearer duplicates of a
  /// boundary direction are discarded.
  ///
  /// # Errors
  /// Returns [`Error::InvalidArgument`] if fewer than 3 distinct
  /// directions remain, the input contains an antipodal pair, or the
  /// surviving directions are all collinear on one great circle.
  pub fn convex_hull(points: &[UnitVector3d]) -> Result<Self> {
    let mut pts: Vec<UnitVector3d> = Vec::with_capacity(points.len());
    for p in points {
      if !pts.iter().any(|q| q.dot(p) > 1.0 - COINCIDENT_EPSILON) {
        pts.push(*p);
      }
    }
    if pts.len() < 3 {
      return Err(Error::InvalidArgument("convex hull requires at least 3 distinct directions"));
    }
    for i in 0..pts.len() {
      for j in (i + 1)..pts.len() {
        if pts[i].dot(&pts[j]) < -(1.0 - COINCIDENT_EPSILON) {
          return Err(Error::InvalidArgument("convex hull input contains antipodal directions"));
        }
      }
    }

    // Extreme point: lexicographically smallest by (z, y, x).
    let mut pivot_idx = 0;
    for i in 1..pts.len() {
      let p = &pts[i];
      let q = &pts[pivot_idx];
      if (p.z(), p.y(), p.x()) < (q.z(), q.y(), q.x()) {
        pivot_idx = i;
      }
    }
    let pivot = pts.swap_remove(pivot_idx);

    // Tangent frame at the pivot; (tx, ty, pivot) is right-handed, so
    // increasing angle is counter-clockwise seen from outside.
    let up = if pivot.y().abs() < 0.9 {
      Vector3d::new(0.0, 1.0, 0.0)
    } else {
      Vector3d::new(1.0, 0.0, 0.0)
    };
    let txr = pivot.as_vector().cross(&up);
    let tx = txr * (1.0 / txr.norm());
    let ty = pivot.as_vector().cross(&tx);

    let mut around: Vec<(f64, f64, UnitVector3d)> = pts
      .iter()
      .map(|p| {
        let t = p.as_vector() - pivot.as_vector() * pivot.dot(p);
        (t.dot(&ty).atan2(t.dot(&tx)), pivot.angle_to(p), *p)
      })
      .collect();
    around.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    // Rotate the ordering so the sweep starts just past the widest
    // angular gap.
    let last = around.len() - 1;
    let mut widest = around[0].0 + 2.0 * M_PI - around[last].0;
    let mut start = 0;
    for i in 1..around.len() {
      let gap = around[i].0 - around[i - 1].0;
      if gap > widest {
        widest = gap;
        start = i;
      }
    }
    around.rotate_left(start);

    let mut hull: Vec<UnitVector3d> = Vec::with_capacity(around.len() + 1);
    hull.push(pivot);
    for &(_, _, p) in &around {
      while hull.len() >= 2 && orientation(&hull[hull.len() - 2], &hull[hull.len() - 1], &p) <= 0 {
        hull.pop();
      }
      hull.push(p);
    }
    // The closing edge back to the pivot must turn left as well.
    while hull.len() > 3 && orientation(&hull[hull.len() - 2], &hull[hull.len() - 1], &hull[0]) <= 0 {
      hull.pop();
    }
    if hull.len() < 3 {
      return Err(Error::InvalidArgument("convex hull is degenerate"));
    }
    Self::new(hull)
  }

  /// The polygon's vertices, counter-clockwise.
  #[must_use]
  pub fn vertices(&self) -> &[UnitVector3d] {
    &self.vertices
  }

  /// True if the polygon contains the direction `v`. Boundary points
  /// count as contained, to within [`CONTAINS_EPSILON`].
  #[must_use]
  pub fn contains(&self, v: &UnitVector3d) -> bool {
    self
      .edge_planes
      .iter()
      .all(|plane| plane.dot(&v.as_vector()) >= -CONTAINS_EPSILON)
  }

  /// The spherical centroid: the center-of-mass direction of the enclosed
  /// surface, computed from the edge-angle-weighted sum of the unit edge
  /// normals. This is not the naive vertex average.
  #[must_use]
  pub fn centroid(&self) -> UnitVector3d {
    let n = self.vertices.len();
    let mut cm = Vector3d::default();
    for i in 0..n {
      let a = &self.vertices[i];
      let b = &self.vertices[(i + 1) % n];
      cm = cm + self.edge_planes[i] * a.angle_to(b);
    }
    let m = cm.norm();
    debug_assert!(m > 0.0);
    UnitVector3d::from_normalized(cm * (1.0 / m))
  }

  /// The smallest cap this implementation can cheaply derive around the
  /// centroid; a bound, not the minimal enclosing cap.
  #[must_use]
  pub fn bounding_circle(&self) -> Circle {
    let c = self.centroid();
    let n = self.vertices.len();
    let mut r: f64 = 0.0;
    for i in 0..n {
      let a = &self.vertices[i];
      let b = &self.vertices[(i + 1) % n];
      r = r.max(arc_max_distance(&c, a, b, &self.edge_planes[i]));
    }
    Circle::new_unchecked(c, (r + CONTAINS_EPSILON).min(M_PI))
  }

  pub(crate) fn relate_circle_impl(&self, other: &Circle) -> Relationship {
    let c = other.center();
    let r = other.half_angle();
    let inside = self.contains(c);
    let n = self.vertices.len();
    let mut min_bd = f64::INFINITY;
    let mut max_bd: f64 = 0.0;
    for i in 0..n {
      let a = &self.vertices[i];
      let b = &self.vertices[(i + 1) % n];
      let plane = &self.edge_planes[i];
      min_bd = min_bd.min(arc_distance(c, a, b, plane));
      max_bd = max_bd.max(arc_max_distance(c, a, b, plane));
    }
    if !inside && min_bd > r + CONTAINS_EPSILON {
      return Relationship::DISJOINT;
    }
    let mut rel = Relationship::INTERSECTS;
    if inside && min_bd + CONTAINS_EPSILON >= r {
      rel |= Relationship::CONTAINS;
    }
    // The polygon lies within the cap iff its whole boundary does and the
    // cap's antipode is outside.
    if other.is_full() || (max_bd <= r + CONTAINS_EPSILON && !self.contains(&c.antipode())) {
      rel |= Relationship::WITHIN;
    }
    rel
  }

  pub(crate) fn relate_polygon_impl(&self, other: &ConvexPolygon) -> Relationship {
    if self
      .bounding_circle()
      .relate_circle(&other.bounding_circle())
      .is_disjoint()
    {
      return Relationship::DISJOINT;
    }
    let n = self.vertices.len();
    let m = other.vertices.len();
    let theirs_in_self = other.vertices.iter().filter(|v| self.contains(v)).count();
    let ours_in_other = self.vertices.iter().filter(|v| other.contains(v)).count();
    // A proper edge crossing rules out containment in either direction.
    for i in 0..n {
      let (a, b) = (&self.vertices[i], &self.vertices[(i + 1) % n]);
      for j in 0..m {
        let (c, d) = (&other.vertices[j], &other.vertices[(j + 1) % m]);
        if edges_cross(a, b, c, d) {
          return Relationship::INTERSECTS;
        }
      }
    }
    let mut rel = Relationship::INTERSECTS;
    if theirs_in_self == m {
      rel |= Relationship::CONTAINS;
    }
    if ours_in_other == n {
      rel |= Relationship::WITHIN;
    }
    if rel == Relationship::INTERSECTS && theirs_in_self == 0 && ours_in_other == 0 {
      return Relationship::DISJOINT;
    }
    rel
  }

  /// Deserializes a polygon from its binary form without re-running any
  /// hull computation; the stored vertices are trusted to be convex and
  /// counter-clockwise.
  ///
  /// # Errors
  /// Returns [`Error::Decode`] on a tag mismatch, a length that is not
  /// exactly `9 + 24 * count` bytes, a count below 3, or vertex payloads
  /// that are not unit directions.
  pub fn decode(buffer: &[u8]) -> Result<Self> {
    if buffer.len() < 9 {
      return Err(Error::Decode("polygon buffer is truncated"));
    }
    if buffer[0] != Self::TYPE_CODE {
      return Err(Error::Decode("type tag mismatch"));
    }
    let count = LittleEndian::read_u64(&buffer[1..9]);
    if count < 3 {
      return Err(Error::Decode("polygon vertex count below 3"));
    }
    let expected = count.checked_mul(24).and_then(|b| b.checked_add(9));
    if expected != Some(buffer.len() as u64) {
      return Err(Error::Decode("polygon buffer length does not match vertex count"));
    }
    let mut vertices = Vec::with_capacity(count as usize);
    let mut offset = 9;
    for _ in 0..count {
      let x = LittleEndian::read_f64(&buffer[offset..offset + 8]);
      let y = LittleEndian::read_f64(&buffer[offset + 8..offset + 16]);
      let z = LittleEndian::read_f64(&buffer[offset + 16..offset + 24]);
      let v = Vector3d::new(x, y, z);
      if !x.is_finite() || !y.is_finite() || !z.is_finite() || (v.squared_norm() - 1.0).abs() > 1.0e-9 {
        return Err(Error::Decode("polygon vertex is not a unit direction"));
      }
      // Stored bit for bit; re-normalizing would break round trips.
      vertices.push(UnitVector3d::from_normalized(v));
      offset += 24;
    }
    let edge_planes =
      edge_planes_of(&vertices).map_err(|_| Error::Decode("polygon vertices are degenerate"))?;
    Ok(Self { vertices, edge_planes })
  }
}

impl Region for ConvexPolygon {
  fn contains(&self, v: &UnitVector3d) -> bool {
    ConvexPolygon::contains(self, v)
  }

  fn bounding_box(&self) -> BBox {
    self.bounding_circle().bounding_box()
  }

  fn bounding_circle(&self) -> Circle {
    ConvexPolygon::bounding_circle(self)
  }

  fn relate_circle(&self, other: &Circle) -> Relationship {
    self.relate_circle_impl(other)
  }

  fn relate_polygon(&self, other: &ConvexPolygon) -> Relationship {
    self.relate_polygon_impl(other)
  }

  fn relate(&self, other: &dyn Region) -> Relationship {
    other.relate_polygon(self).invert()
  }

  fn type_code(&self) -> u8 {
    Self::TYPE_CODE
  }

  fn encode(&self) -> Vec<u8> {
    let mut buffer = vec![0u8; 9 + 24 * self.vertices.len()];
    buffer[0] = Self::TYPE_CODE;
    LittleEndian::write_u64(&mut buffer[1..9], self.vertices.len() as u64);
    let mut offset = 9;
    for v in &self.vertices {
      LittleEndian::write_f64(&mut buffer[offset..offset + 8], v.x());
      LittleEndian::write_f64(&mut buffer[offset + 8..offset + 16], v.y());
      LittleEndian::write_f64(&mut buffer[offset + 16..offset + 24], v.z());
      offset += 24;
    }
    buffer
  }
}

/// One unit plane normal per consecutive vertex pair, interior on the
/// positive side.
fn edge_planes_of(vertices: &[UnitVector3d]) -> Result<Vec<Vector3d>> {
  let n = vertices.len();
  let mut planes = Vec::with_capacity(n);
  for i in 0..n {
    let a = &vertices[i];
    let b = &vertices[(i + 1) % n];
    let normal = a.robust_cross(b);
    let m = normal.norm();
    if m < COINCIDENT_EPSILON {
      return Err(if a.dot(b) > 0.0 {
        Error::InvalidArgument("polygon vertices are coincident")
      } else {
        Error::InvalidArgument("polygon vertices are antipodal")
      });
    }
    planes.push(normal * (1.0 / m));
  }
  Ok(planes)
}

/// Angular distance from `p` to the minor arc from `a` to `b`, whose
/// great circle has unit normal `n`.
fn arc_distance(p: &UnitVector3d, a: &UnitVector3d, b: &UnitVector3d, n: &Vector3d) -> f64 {
  let pv = p.as_vector();
  if n.cross(&a.as_vector()).dot(&pv) >= 0.0 && n.cross(&b.as_vector()).dot(&pv) <= 0.0 {
    // The perpendicular foot lands on the arc.
    n.dot(&pv).clamp(-1.0, 1.0).abs().asin()
  } else {
    p.angle_to(a).min(p.angle_to(b))
  }
}

/// Angular distance from `p` to the farthest point of the arc.
fn arc_max_distance(p: &UnitVector3d, a: &UnitVector3d, b: &UnitVector3d, n: &Vector3d) -> f64 {
  let qv = -p.as_vector();
  if n.cross(&a.as_vector()).dot(&qv) >= 0.0 && n.cross(&b.as_vector()).dot(&qv) <= 0.0 {
    M_PI - n.dot(&qv).clamp(-1.0, 1.0).abs().asin()
  } else {
    p.angle_to(a).max(p.angle_to(b))
  }
}

/// True if the minor arcs `a`-`b` and `c`-`d` cross at a point interior
/// to both. Endpoint contacts and arcs on the same great circle never
/// count; those cases surface through the boundary-inclusive vertex
/// containment tests instead.
fn edges_cross(a: &UnitVector3d, b: &UnitVector3d, c: &UnitVector3d, d: &UnitVector3d) -> bool {
  let n1r = a.robust_cross(b);
  let n2r = c.robust_cross(d);
  let m1 = n1r.norm();
  let m2 = n2r.norm();
  if m1 == 0.0 || m2 == 0.0 {
    return false;
  }
  let n1 = n1r * (1.0 / m1);
  let n2 = n2r * (1.0 / m2);
  let x = n1.cross(&n2);
  let mx = x.norm();
  if mx < 1.0e-12 {
    return false;
  }
  let p = x * (1.0 / mx);
  (strictly_on_arc(&p, a, b, &n1) && strictly_on_arc(&p, c, d, &n2))
    || (strictly_on_arc(&(-p), a, b, &n1) && strictly_on_arc(&(-p), c, d, &n2))
}

/// True if `p`, assumed on the arc's great circle, lies strictly between
/// `a` and `b` along it.
fn strictly_on_arc(p: &Vector3d, a: &UnitVector3d, b: &UnitVector3d, n: &Vector3d) -> bool {
  n.cross(&a.as_vector()).dot(p) > ORIENTATION_EPSILON && n.cross(&b.as_vector()).dot(p) < -ORIENTATION_EPSILON
}
