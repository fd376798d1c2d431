use crate::catalogs::hyg::HygStar;

/// Light-years per parsec.
pub const LY_PER_PARSEC: f64 = 3.26156;

/// HYG encodes "no usable parallax" as a distance of 100 000 pc.
const HYG_UNKNOWN_DISTANCE_PC: f64 = 100_000.0;

/// A catalog star as used by the sky-chart pipeline.
///
/// Stars are loaded once per session and never mutated; every derived
/// quantity (altitude, projection, color, size) is produced into separate
/// per-frame values.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Catalog-wide unique identifier (the HYG id).
    pub id: u64,
    /// Hipparcos number, used by constellation figures and exoplanet hosts.
    pub hip: Option<u32>,
    /// Proper (common) name, e.g. "Sirius".
    pub proper: Option<String>,
    /// Label for display: the proper name, else a catalog designation.
    pub name: String,
    /// Right ascension in hours, `[0, 24)`.
    pub ra_hours: f64,
    /// Declination in degrees, `[-90, 90]`.
    pub dec_deg: f64,
    /// Apparent visual magnitude (lower is brighter).
    pub mag: f64,
    /// B-V color index.
    pub color_index: Option<f64>,
    /// Spectral classification string, e.g. "A1V".
    pub spectral: Option<String>,
    /// Distance from the Sun in light-years. `None` when unknown.
    pub distance_ly: Option<f64>,
    /// IAU constellation abbreviation, e.g. "CMa".
    pub constellation: Option<String>,
    /// Brightness rank within the catalog (1 = brightest). Stars with equal
    /// magnitude share the lowest rank of their group. Assigned by
    /// [`StarCatalog`](crate::StarCatalog).
    pub rank: u32,
}

/// Convert a raw HYG row to a `Star`.
///
/// Returns `None` for the Sun (HYG id 0) and for rows without a magnitude
/// or position. Distances are converted from parsecs to light-years; the
/// HYG placeholder distance and non-positive values become `None` so that
/// such stars are never placed at the origin of the 3D view.
pub fn star_from_hyg(row: &HygStar) -> Option<Star> {
    if row.id == 0 {
        return None;
    }
    let mag = row.mag?;
    if !row.ra_hours.is_finite() || !row.dec_deg.is_finite() {
        return None;
    }

    let distance_ly = row
        .dist_pc
        .filter(|&d| d.is_finite() && d > 0.0 && d < HYG_UNKNOWN_DISTANCE_PC)
        .map(|d| d * LY_PER_PARSEC);

    let proper = non_empty(row.proper.as_deref());
    let name = match (&proper, row.hip) {
        (Some(p), _) => p.clone(),
        (None, Some(hip)) => format!("HIP {hip}"),
        (None, None) => format!("HYG {}", row.id),
    };

    Some(Star {
        id: row.id,
        hip: row.hip,
        proper,
        name,
        ra_hours: row.ra_hours,
        dec_deg: row.dec_deg,
        mag,
        color_index: row.color_index,
        spectral: non_empty(row.spect.as_deref()),
        distance_ly,
        constellation: non_empty(row.con.as_deref()),
        rank: 0,
    })
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> HygStar {
        HygStar {
            id: 32263,
            hip: Some(32349),
            proper: Some("Sirius".to_string()),
            ra_hours: 6.752481,
            dec_deg: -16.716116,
            mag: Some(-1.44),
            color_index: Some(0.009),
            con: Some("CMa".to_string()),
            dist_pc: Some(2.6371),
            spect: Some("A0m...".to_string()),
        }
    }

    #[test]
    fn converts_distance_to_light_years() {
        let star = star_from_hyg(&row()).unwrap();
        assert_eq!(star.name, "Sirius");
        let d = star.distance_ly.unwrap();
        assert!((d - 8.601).abs() < 0.01, "distance {d}");
    }

    #[test]
    fn skips_sun_and_missing_magnitude() {
        let mut sun = row();
        sun.id = 0;
        assert!(star_from_hyg(&sun).is_none());

        let mut dim = row();
        dim.mag = None;
        assert!(star_from_hyg(&dim).is_none());
    }

    #[test]
    fn unknown_distance_is_none_not_zero() {
        for dist in [None, Some(100_000.0), Some(0.0), Some(-1.0)] {
            let mut r = row();
            r.dist_pc = dist;
            assert_eq!(star_from_hyg(&r).unwrap().distance_ly, None);
        }
    }

    #[test]
    fn display_name_falls_back_to_designation() {
        let mut r = row();
        r.proper = Some("  ".to_string());
        assert_eq!(star_from_hyg(&r).unwrap().name, "HIP 32349");
        r.hip = None;
        assert_eq!(star_from_hyg(&r).unwrap().name, "HYG 32263");
    }
}
