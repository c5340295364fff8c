// demos/polygon_cover.rs

use skygeom::{ConvexPolygon, Error, HtmPixelization, LonLat, Region, UnitVector3d};

fn main() -> Result<(), Error> {
  println!("--- Polygon Cover ---");

  // A survey field outline, in degrees, with one pointing well inside it.
  let outline = [
    (210.5, -2.2),
    (213.8, -2.4),
    (214.2, 1.1),
    (212.0, 2.3),
    (210.1, 1.5),
  ];
  let points: Vec<UnitVector3d> = outline
    .iter()
    .map(|&(lon, lat)| LonLat::from_degrees(lon, lat).to_unit_vector())
    .chain(std::iter::once(LonLat::from_degrees(212.0, 0.0).to_unit_vector()))
    .collect();

  let field = ConvexPolygon::convex_hull(&points)?;
  println!("hull keeps {} of {} input directions", field.vertices().len(), points.len());

  let centroid = LonLat::from_unit_vector(&field.centroid());
  println!(
    "field centroid: lon {:.3} deg, lat {:.3} deg",
    skygeom::rads_to_degs(centroid.lon),
    skygeom::rads_to_degs(centroid.lat)
  );

  for level in [6u32, 8, 10] {
    let pix = HtmPixelization::new(level)?;
    let covering = pix.envelope(&field);
    let inner = pix.interior(&field);
    println!(
      "level {level:2}: {:>8} trixels in {:>4} ranges cover the field ({} fully inside)",
      covering.cardinality(),
      covering.num_ranges(),
      inner.cardinality()
    );
  }

  // Round-trip the field through its binary form, as a catalog would
  // store it.
  let bytes = field.encode();
  let restored = ConvexPolygon::decode(&bytes)?;
  assert_eq!(restored, field);
  println!("binary form: {} bytes, round-trips exactly", bytes.len());

  Ok(())
}
