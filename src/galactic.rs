//! Cartesian star positions for the 3D galactic cube, and recentering of
//! the whole catalog on a chosen star.
//!
//! Two conversions are provided. [`celestial_to_galactic_cartesian`] rotates
//! into the galactic frame (x toward the galactic center, z toward the North
//! Galactic Pole) and is what the cube view uses. [`celestial_to_cartesian`]
//! keeps the equatorial axes and is only a plain starfield fallback.
//!
//! All distances are in light-years.

use nalgebra::Vector3;
use tracing::debug;

use crate::coords::hours_to_rad;
use crate::StarCatalog;

/// Right ascension of the North Galactic Pole (J2000), degrees.
pub const NGP_RA_DEG: f64 = 192.859_48;
/// Declination of the North Galactic Pole (J2000), degrees.
pub const NGP_DEC_DEG: f64 = 27.128_25;
/// Galactic longitude of the North Celestial Pole, degrees.
pub const NCP_GALACTIC_LON_DEG: f64 = 122.931_92;

/// Spherical to Cartesian in the equatorial frame (x toward RA 0h).
pub fn celestial_to_cartesian(ra_hours: f64, dec_deg: f64, dist_ly: f64) -> Vector3<f64> {
    let (sin_ra, cos_ra) = hours_to_rad(ra_hours).sin_cos();
    let (sin_dec, cos_dec) = dec_deg.to_radians().sin_cos();
    Vector3::new(
        dist_ly * cos_dec * cos_ra,
        dist_ly * cos_dec * sin_ra,
        dist_ly * sin_dec,
    )
}

/// Spherical equatorial to Cartesian in the galactic frame.
///
/// Galactic latitude `b` and longitude `l` are derived from the NGP
/// constants, then `(d cos b cos l, d cos b sin l, d sin b)`; the galactic
/// plane is `z = 0`.
pub fn celestial_to_galactic_cartesian(ra_hours: f64, dec_deg: f64, dist_ly: f64) -> Vector3<f64> {
    let (b, l) = galactic_lat_lon(ra_hours, dec_deg);
    let (sin_b, cos_b) = b.sin_cos();
    let (sin_l, cos_l) = l.sin_cos();
    Vector3::new(dist_ly * cos_b * cos_l, dist_ly * cos_b * sin_l, dist_ly * sin_b)
}

/// Galactic latitude and longitude in radians.
fn galactic_lat_lon(ra_hours: f64, dec_deg: f64) -> (f64, f64) {
    let ra = hours_to_rad(ra_hours);
    let (sin_dec, cos_dec) = dec_deg.to_radians().sin_cos();
    let (sin_ngp, cos_ngp) = NGP_DEC_DEG.to_radians().sin_cos();
    let (sin_dra, cos_dra) = (ra - NGP_RA_DEG.to_radians()).sin_cos();

    let sin_b = (sin_ngp * sin_dec + cos_ngp * cos_dec * cos_dra).clamp(-1.0, 1.0);
    let y = cos_dec * sin_dra;
    let x = cos_ngp * sin_dec - sin_ngp * cos_dec * cos_dra;
    let l = NCP_GALACTIC_LON_DEG.to_radians() - y.atan2(x);
    (sin_b.asin(), l)
}

/// Catalog positions relative to a chosen center.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedUniverse {
    /// One entry per catalog star, index-aligned with
    /// [`StarCatalog::stars`]. `None` where the distance is unknown.
    pub positions: Vec<Option<Vector3<f64>>>,
    /// Absolute position of the chosen center (origin for the Sun).
    pub center: Vector3<f64>,
    /// Position of the Sun relative to the center, i.e. `-center`.
    pub sun: Vector3<f64>,
    /// Catalog index of the focus star, when it resolved.
    pub focus: Option<usize>,
}

impl TranslatedUniverse {
    /// Iterate `(catalog index, position)` over stars with a known distance.
    pub fn known(&self) -> impl Iterator<Item = (usize, &Vector3<f64>)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(idx, p)| p.as_ref().map(|p| (idx, p)))
    }
}

/// Recenter the catalog on `focus` (a star id or name).
///
/// With no focus, an unresolved focus, or a focus whose distance is unknown
/// the center stays at the Sun.
pub fn translate_universe(catalog: &StarCatalog, focus: Option<&str>) -> TranslatedUniverse {
    let absolute: Vec<Option<Vector3<f64>>> = catalog
        .stars()
        .iter()
        .map(|s| {
            s.distance_ly
                .map(|d| celestial_to_galactic_cartesian(s.ra_hours, s.dec_deg, d))
        })
        .collect();

    let focus_idx = focus.and_then(|ident| catalog.resolve(ident));
    let center = match focus_idx.and_then(|idx| absolute[idx]) {
        Some(c) => c,
        None => {
            if let Some(ident) = focus {
                debug!("Focus '{}' has no 3D position; centering on the Sun", ident);
            }
            Vector3::zeros()
        }
    };

    let positions = absolute
        .into_iter()
        .map(|p| p.map(|p| p - center))
        .collect();

    TranslatedUniverse {
        positions,
        center,
        sun: -center,
        focus: focus_idx,
    }
}
