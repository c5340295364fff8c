// demos/point_lookup.rs

use skygeom::{as_string, degs_to_rads, rads_to_degs, Error, HtmPixelization, LonLat, triangle};

fn main() -> Result<(), Error> {
  println!("--- Point Lookup ---");

  // A few well-known directions, in degrees.
  let targets = [
    ("Sirius", 101.287, -16.716),
    ("Vega", 279.235, 38.784),
    ("Polaris", 37.955, 89.264),
    ("LMC", 80.894, -69.756),
  ];

  for level in [0u32, 4, 8, 12] {
    let pix = HtmPixelization::new(level)?;
    println!("\nlevel {level} ({} trixels):", pix.num_trixels());
    for (name, lon_deg, lat_deg) in targets {
      let v = LonLat::from_degrees(lon_deg, lat_deg).to_unit_vector();
      let id = pix.index(&v);
      println!("  {name:8} -> id {:>10}  path {}", id.0, as_string(id)?);
    }
  }

  // Reconstruct the geometry of one leaf and report its size.
  let pix = HtmPixelization::new(8)?;
  let v = LonLat::from_degrees(101.287, -16.716).to_unit_vector();
  let id = pix.index(&v);
  let tri = triangle(id)?;
  let verts = tri.vertices();
  let edge = rads_to_degs(verts[0].angle_to(&verts[1]));
  println!("\nleaf {} has edges of roughly {edge:.4} degrees", as_string(id)?);
  println!(
    "its centroid sits {:.4} degrees from the query direction",
    rads_to_degs(tri.centroid().angle_to(&v))
  );
  assert!(degs_to_rads(edge) > 0.0);

  Ok(())
}
