// tests/polygon_tests.rs

use rand::{Rng, SeedableRng};
use skygeom::*;

/// A random direction within `radius` radians of `center`.
fn random_point_in_cap<R: Rng>(rng: &mut R, center: &UnitVector3d, radius: f64) -> UnitVector3d {
  let up = if center.y().abs() < 0.9 {
    Vector3d::new(0.0, 1.0, 0.0)
  } else {
    Vector3d::new(1.0, 0.0, 0.0)
  };
  let txr = center.as_vector().cross(&up);
  let tx = txr * (1.0 / txr.norm());
  let ty = center.as_vector().cross(&tx);
  let phi = rng.gen_range(0.0..std::f64::consts::TAU);
  let d = radius * rng.gen_range(0.0f64..1.0).sqrt();
  let v = center.as_vector() * d.cos() + (tx * phi.cos() + ty * phi.sin()) * d.sin();
  v.normalize().unwrap()
}

#[test]
fn test_hull_contains_every_input_point() {
  let mut rng = rand::rngs::StdRng::seed_from_u64(2026);
  for round in 0..20 {
    let center = random_point_in_cap(&mut rng, &UnitVector3d::Z, 1.2);
    let count = 3 + (round % 13);
    let points: Vec<UnitVector3d> = (0..count)
      .map(|_| random_point_in_cap(&mut rng, &center, 0.5))
      .collect();
    match ConvexPolygon::convex_hull(&points) {
      Ok(hull) => {
        for p in &points {
          assert!(hull.contains(p), "hull lost an input point");
        }
        // Every hull vertex is one of the inputs.
        for v in hull.vertices() {
          assert!(points.iter().any(|p| p.dot(v) > 1.0 - 1.0e-12));
        }
        // And the hull is no larger than the input set.
        assert!(hull.vertices().len() <= points.len());
      }
      // Nearly collinear draws may be legitimately degenerate.
      Err(Error::InvalidArgument(_)) => {}
      Err(e) => panic!("unexpected hull failure: {e}"),
    }
  }
}

#[test]
fn test_hull_centroid_lies_inside() {
  let mut rng = rand::rngs::StdRng::seed_from_u64(17);
  for _ in 0..10 {
    let center = random_point_in_cap(&mut rng, &UnitVector3d::X, 1.0);
    let points: Vec<UnitVector3d> = (0..12)
      .map(|_| random_point_in_cap(&mut rng, &center, 0.4))
      .collect();
    if let Ok(hull) = ConvexPolygon::convex_hull(&points) {
      assert!(hull.contains(&hull.centroid()));
      let cap = hull.bounding_circle();
      for p in &points {
        assert!(cap.contains(p));
      }
    }
  }
}

#[test]
fn test_hull_round_trips_through_binary_form() {
  let mut rng = rand::rngs::StdRng::seed_from_u64(5150);
  let points: Vec<UnitVector3d> = (0..24)
    .map(|_| random_point_in_cap(&mut rng, &UnitVector3d::Z, 0.7))
    .collect();
  let hull = ConvexPolygon::convex_hull(&points).unwrap();
  let bytes = hull.encode();
  let back = ConvexPolygon::decode(&bytes).unwrap();
  assert_eq!(back, hull);
  assert_eq!(back.encode(), bytes);

  // The generic decoder resolves the same bytes by tag.
  let region = decode(&bytes).unwrap();
  assert_eq!(region.type_code(), ConvexPolygon::TYPE_CODE);
  for p in &points {
    assert!(region.contains(p));
  }
}

#[test]
fn test_equator_square_byte_level_round_trip() {
  let square = ConvexPolygon::new(vec![
    LonLat::from_degrees(-10.0, -10.0).to_unit_vector(),
    LonLat::from_degrees(10.0, -10.0).to_unit_vector(),
    LonLat::from_degrees(10.0, 10.0).to_unit_vector(),
    LonLat::from_degrees(-10.0, 10.0).to_unit_vector(),
  ])
  .unwrap();
  let bytes = square.encode();
  // Tag, 8-byte count, then 4 vertices of 3 little-endian doubles.
  assert_eq!(bytes.len(), 1 + 8 + 4 * 24);
  assert_eq!(bytes[0], b'p');
  assert_eq!(u64::from(bytes[1]), 4);

  let back = ConvexPolygon::decode(&bytes).unwrap();
  assert_eq!(back.vertices(), square.vertices());
  assert_eq!(back.encode(), bytes);
}

#[test]
fn test_vertex_perturbation_does_not_change_containment() {
  // Rebuilding the same square from a rotated vertex cycle keeps every
  // containment verdict, including points on the boundary.
  let verts = [
    LonLat::from_degrees(-6.0, -6.0).to_unit_vector(),
    LonLat::from_degrees(6.0, -6.0).to_unit_vector(),
    LonLat::from_degrees(6.0, 6.0).to_unit_vector(),
    LonLat::from_degrees(-6.0, 6.0).to_unit_vector(),
  ];
  let p1 = ConvexPolygon::new(verts.to_vec()).unwrap();
  let p2 = ConvexPolygon::new(vec![verts[2], verts[3], verts[0], verts[1]]).unwrap();
  let p3 = ConvexPolygon::convex_hull(&verts).unwrap();

  let mut rng = rand::rngs::StdRng::seed_from_u64(3);
  for _ in 0..200 {
    let v = random_point_in_cap(&mut rng, &UnitVector3d::X, 0.3);
    assert_eq!(p1.contains(&v), p2.contains(&v));
    assert_eq!(p1.contains(&v), p3.contains(&v));
  }
  for v in &verts {
    assert!(p1.contains(v) && p2.contains(v) && p3.contains(v));
  }
}
