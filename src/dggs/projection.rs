//! Ellipsoidal rHEALPix projection.
//!
//! Longitude/latitude are mapped to authalic latitude on the ellipsoid, then
//! projected with HEALPix onto a sphere of the authalic radius, then the polar
//! triangles are folded into the north and south squares.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Reference ellipsoid; `lon_0` is the central meridian in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub a: f64,
    pub f: f64,
    pub lon_0: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6_378_137.0,
        f: 1.0 / 298.257_223_563,
        lon_0: 0.0,
    };

    fn eccentricity(&self) -> f64 {
        (self.f * (2.0 - self.f)).sqrt()
    }

    /// q(phi) from Snyder's authalic latitude formulas
    fn q(&self, phi: f64) -> f64 {
        let e = self.eccentricity();
        let s = phi.sin();
        if e == 0.0 {
            return 2.0 * s;
        }
        let e2 = e * e;
        (1.0 - e2)
            * (s / (1.0 - e2 * s * s) - (1.0 / (2.0 * e)) * ((1.0 - e * s) / (1.0 + e * s)).ln())
    }

    /// Authalic latitude in radians for a geodetic latitude in radians
    pub fn authalic_latitude(&self, phi: f64) -> f64 {
        let ratio = self.q(phi) / self.q(FRAC_PI_2);
        ratio.clamp(-1.0, 1.0).asin()
    }

    /// Radius of the sphere with the same surface area
    pub fn authalic_radius(&self) -> f64 {
        self.a * (self.q(FRAC_PI_2) / 2.0).sqrt()
    }
}

/// HEALPix projection of the unit sphere
pub(crate) fn healpix_sphere(lam: f64, phi: f64) -> (f64, f64) {
    let phi_0 = (2.0_f64 / 3.0).asin();
    if phi.abs() <= phi_0 {
        return (lam, 3.0 * PI / 8.0 * phi.sin());
    }
    let sigma = (3.0 * (1.0 - phi.sin().abs())).sqrt();
    let cap = (2.0 * lam / PI + 2.0).floor().clamp(0.0, 3.0);
    let lam_c = -3.0 * PI / 4.0 + FRAC_PI_2 * cap;
    let x = lam_c + (lam - lam_c) * sigma;
    let y = phi.signum() * FRAC_PI_4 * (2.0 - sigma);
    (x, y)
}

/// Rotate by a number of counter-clockwise quarter turns
fn quarter_turns(dx: f64, dy: f64, turns: i32) -> (f64, f64) {
    match turns.rem_euclid(4) {
        0 => (dx, dy),
        1 => (-dy, dx),
        2 => (-dx, -dy),
        _ => (dy, -dx),
    }
}

/// Move each polar triangle into the polar square above/below the
/// equatorial square `north_square`/`south_square` (0..=3).
pub(crate) fn combine_triangles(x: f64, y: f64, north_square: u8, south_square: u8) -> (f64, f64) {
    if y.abs() <= FRAC_PI_4 {
        return (x, y);
    }
    let triangle = ((x + PI) / FRAC_PI_2).floor().clamp(0.0, 3.0) as i32;
    let apex_x = -3.0 * PI / 4.0 + FRAC_PI_2 * triangle as f64;
    if y > 0.0 {
        let square = north_square as i32;
        let centre_x = -3.0 * PI / 4.0 + FRAC_PI_2 * square as f64;
        let (dx, dy) = quarter_turns(x - apex_x, y - FRAC_PI_2, triangle - square);
        (centre_x + dx, FRAC_PI_2 + dy)
    } else {
        let square = south_square as i32;
        let centre_x = -3.0 * PI / 4.0 + FRAC_PI_2 * square as f64;
        let (dx, dy) = quarter_turns(x - apex_x, y + FRAC_PI_2, square - triangle);
        (centre_x + dx, -FRAC_PI_2 + dy)
    }
}

/// Project degrees onto the rHEALPix plane, in metres
pub(crate) fn rhealpix(
    ellipsoid: &Ellipsoid,
    north_square: u8,
    south_square: u8,
    lon: f64,
    lat: f64,
) -> (f64, f64) {
    let lam = ((lon - ellipsoid.lon_0).to_radians() + PI).rem_euclid(2.0 * PI) - PI;
    let beta = ellipsoid.authalic_latitude(lat.to_radians());
    let (x, y) = healpix_sphere(lam, beta);
    let (x, y) = combine_triangles(x, y, north_square, south_square);
    let r = ellipsoid.authalic_radius();
    (r * x, r * y)
}
