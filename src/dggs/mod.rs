//! rHEALPix discrete global grid (the grid behind AusPIX).
//!
//! Cells are addressed by a resolution-0 region letter (`N`, `O`, `P`, `Q`,
//! `R`, `S`) followed by one digit per resolution, each digit numbering the
//! 3x3 children row by row from the upper-left corner.

mod projection;

pub use projection::Ellipsoid;

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// AusPIX dataset base for cell URIs
pub const AUSPIX_CELL_BASE: &str =
    "http://ec2-52-63-73-113.ap-southeast-2.compute.amazonaws.com/AusPIX-DGGS-dataset/ausPIX/";

const N_SIDE: u8 = 3;

const REGIONS: [char; 6] = ['N', 'O', 'P', 'Q', 'R', 'S'];

/// A grid cell at some resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    region: char,
    digits: Vec<u8>,
}

impl Cell {
    pub fn region(&self) -> char {
        self.region
    }

    pub fn resolution(&self) -> usize {
        self.digits.len()
    }

    /// AusPIX URI for the cell
    pub fn uri(&self) -> String {
        format!("{}{}", AUSPIX_CELL_BASE, self)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.region)?;
        for d in &self.digits {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// rHEALPix grid on an ellipsoid with 3x3 subdivision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RHealpixDggs {
    ellipsoid: Ellipsoid,
    north_square: u8,
    south_square: u8,
}

impl Default for RHealpixDggs {
    fn default() -> Self {
        Self::new(Ellipsoid::WGS84, 0, 0)
    }
}

impl RHealpixDggs {
    /// `north_square`/`south_square` pick the equatorial square (0..=3)
    /// the polar squares are attached to.
    pub fn new(ellipsoid: Ellipsoid, north_square: u8, south_square: u8) -> Self {
        Self {
            ellipsoid,
            north_square: north_square.min(3),
            south_square: south_square.min(3),
        }
    }

    /// Cell containing a longitude/latitude (degrees) on the ellipsoid.
    ///
    /// Returns `None` for non-finite or out of range coordinates.
    pub fn cell_from_point(&self, resolution: usize, lon: f64, lat: f64) -> Option<Cell> {
        if !lon.is_finite() || !lat.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
            return None;
        }
        let (x, y) = projection::rhealpix(
            &self.ellipsoid,
            self.north_square,
            self.south_square,
            lon,
            lat,
        );
        self.cell_from_plane(resolution, x, y)
    }

    /// Cell containing a point of the projected plane, in metres
    fn cell_from_plane(&self, resolution: usize, x: f64, y: f64) -> Option<Cell> {
        let r = self.ellipsoid.authalic_radius();
        let side = r * FRAC_PI_2;

        let (region, ul_x, ul_y) = if y > r * FRAC_PI_4 {
            let ul_x = -PI + FRAC_PI_2 * self.north_square as f64;
            (0, r * ul_x, r * 3.0 * FRAC_PI_4)
        } else if y < -r * FRAC_PI_4 {
            let ul_x = -PI + FRAC_PI_2 * self.south_square as f64;
            (5, r * ul_x, -r * FRAC_PI_4)
        } else {
            let column = ((x + r * PI) / side).floor().clamp(0.0, 3.0);
            (1 + column as usize, r * (-PI + FRAC_PI_2 * column), r * FRAC_PI_4)
        };

        let mut u = (x - ul_x) / side;
        let mut v = (ul_y - y) / side;
        if !(-1e-9..=1.0 + 1e-9).contains(&u) || !(-1e-9..=1.0 + 1e-9).contains(&v) {
            return None;
        }

        let n = N_SIDE as f64;
        let mut digits = Vec::with_capacity(resolution);
        for _ in 0..resolution {
            let col = (u * n).floor().clamp(0.0, n - 1.0);
            let row = (v * n).floor().clamp(0.0, n - 1.0);
            digits.push(row as u8 * N_SIDE + col as u8);
            u = u * n - col;
            v = v * n - row;
        }

        Some(Cell {
            region: REGIONS[region],
            digits,
        })
    }
}
