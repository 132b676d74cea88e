use super::Vec3;

/// Mean Earth radius used by the great-circle model (kilometres).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinates in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoCoord {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoCoord {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}

/// Great-circle distance between two coordinates (haversine, kilometres).
pub fn haversine_km(a: GeoCoord, b: GeoCoord) -> f64 {
    let d_lat = (b.lat_deg - a.lat_deg).to_radians();
    let d_lon = (b.lon_deg - a.lon_deg).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat_deg.to_radians().cos() * b.lat_deg.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `h` a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Places a coordinate on the surface of a sphere of `radius`.
///
/// Latitude is measured from the +Y pole and longitude is offset by 180° so that
/// an equirectangular texture's left edge lines up with the antimeridian.
pub fn project_to_sphere(coord: GeoCoord, radius: f64) -> Vec3 {
    let phi = (90.0 - coord.lat_deg).to_radians();
    let theta = (coord.lon_deg + 180.0).to_radians();

    let x = -(radius * phi.sin() * theta.cos());
    let y = radius * phi.cos();
    let z = radius * phi.sin() * theta.sin();

    Vec3::new(x, y, z)
}
