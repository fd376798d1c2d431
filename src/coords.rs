//! Equatorial (RA/Dec) to local horizontal (altitude/azimuth) conversion.
//!
//! The sidereal-time model is the linear GMST approximation in days since
//! J2000.0; refraction, nutation and precession are ignored.
//!
//! Evaluating a whole catalog is the dominant workload, so the conversion is
//! split in two: [`HorizontalFrame`] hoists everything that depends only on the
//! observer and instant, and the per-entity step works on precomputed
//! [`EquatorialColumns`] (RA in radians, sin/cos of declination) in a single
//! allocation-free loop.
//!
//! # Conventions
//!
//! - Altitude in degrees, `[-90, 90]`.
//! - Azimuth in degrees, `[0, 360)`, measured clockwise from North.

use std::f64::consts::TAU;

use crate::observer::Observer;

/// Guards the azimuth division when the object (or observer) sits at a pole.
const AZIMUTH_EPSILON: f64 = 1e-9;

/// Local horizontal coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizontal {
    pub alt_deg: f64,
    pub az_deg: f64,
}

/// Convert a single RA/Dec position to altitude/azimuth for an observer.
///
/// `ra_hours` in `[0, 24)`, `dec_deg` in `[-90, 90]`. For many positions at
/// the same instant, build a [`HorizontalFrame`] once instead.
pub fn equatorial_to_horizontal(ra_hours: f64, dec_deg: f64, observer: &Observer) -> Horizontal {
    HorizontalFrame::new(observer).to_horizontal(ra_hours, dec_deg)
}

/// Observer/instant dependent terms of the horizontal transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalFrame {
    sin_lat: f64,
    cos_lat: f64,
    lst_rad: f64,
}

impl HorizontalFrame {
    pub fn new(observer: &Observer) -> Self {
        let (sin_lat, cos_lat) = observer.lat_deg().to_radians().sin_cos();
        Self {
            sin_lat,
            cos_lat,
            lst_rad: observer.lst_deg().to_radians(),
        }
    }

    /// Local sidereal time in radians (not wrapped).
    pub fn lst_rad(&self) -> f64 {
        self.lst_rad
    }

    pub fn to_horizontal(&self, ra_hours: f64, dec_deg: f64) -> Horizontal {
        let (sin_dec, cos_dec) = dec_deg.to_radians().sin_cos();
        self.to_horizontal_rad(hours_to_rad(ra_hours), sin_dec, cos_dec)
    }

    /// Core transform on precomputed equatorial terms.
    #[inline]
    pub fn to_horizontal_rad(&self, ra_rad: f64, sin_dec: f64, cos_dec: f64) -> Horizontal {
        let (sin_ha, cos_ha) = (self.lst_rad - ra_rad).sin_cos();

        let sin_alt = (sin_dec * self.sin_lat + cos_dec * self.cos_lat * cos_ha).clamp(-1.0, 1.0);
        let alt = sin_alt.asin();

        let cos_az = ((sin_dec - sin_alt * self.sin_lat)
            / (alt.cos() * self.cos_lat + AZIMUTH_EPSILON))
            .clamp(-1.0, 1.0);
        let mut az = cos_az.acos();
        // arccos only covers [0, π]; a positive hour angle means the object
        // is west of the meridian
        if sin_ha > 0.0 {
            az = TAU - az;
        }

        Horizontal {
            alt_deg: alt.to_degrees().clamp(-90.0, 90.0),
            az_deg: wrap_degrees(az.to_degrees()),
        }
    }

    /// Convert a full set of columns at once.
    ///
    /// The output columns are index-aligned with the input.
    pub fn to_horizontal_batch(&self, columns: &EquatorialColumns) -> HorizontalBatch {
        let n = columns.len();
        let mut alt_deg = Vec::with_capacity(n);
        let mut az_deg = Vec::with_capacity(n);
        for ((&ra, &sin_dec), &cos_dec) in columns
            .ra_rad
            .iter()
            .zip(&columns.sin_dec)
            .zip(&columns.cos_dec)
        {
            let h = self.to_horizontal_rad(ra, sin_dec, cos_dec);
            alt_deg.push(h.alt_deg);
            az_deg.push(h.az_deg);
        }
        HorizontalBatch { alt_deg, az_deg }
    }
}

/// Precomputed equatorial terms for a set of fixed positions.
///
/// Built once per catalog load; the per-frame transform only needs the hour
/// angle trigonometry on top of these.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquatorialColumns {
    pub ra_rad: Vec<f64>,
    pub sin_dec: Vec<f64>,
    pub cos_dec: Vec<f64>,
}

impl EquatorialColumns {
    /// Build columns from `(ra_hours, dec_deg)` pairs.
    pub fn from_hours_degrees<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let iter = positions.into_iter();
        let (lower, _) = iter.size_hint();
        let mut cols = Self {
            ra_rad: Vec::with_capacity(lower),
            sin_dec: Vec::with_capacity(lower),
            cos_dec: Vec::with_capacity(lower),
        };
        for (ra_hours, dec_deg) in iter {
            let (s, c) = dec_deg.to_radians().sin_cos();
            cols.ra_rad.push(hours_to_rad(ra_hours));
            cols.sin_dec.push(s);
            cols.cos_dec.push(c);
        }
        cols
    }

    pub fn len(&self) -> usize {
        self.ra_rad.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ra_rad.is_empty()
    }
}

/// Column-oriented horizontal coordinates, index-aligned with the
/// [`EquatorialColumns`] they were computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HorizontalBatch {
    pub alt_deg: Vec<f64>,
    pub az_deg: Vec<f64>,
}

impl HorizontalBatch {
    pub fn len(&self) -> usize {
        self.alt_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alt_deg.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<Horizontal> {
        Some(Horizontal {
            alt_deg: *self.alt_deg.get(idx)?,
            az_deg: *self.az_deg.get(idx)?,
        })
    }
}

/// Right ascension in hours to radians (15°/h).
#[inline]
pub fn hours_to_rad(ra_hours: f64) -> f64 {
    (ra_hours * 15.0).to_radians()
}

/// Wrap an angle in degrees into `[0, 360)`.
///
/// `rem_euclid` can round up to exactly 360 for tiny negative inputs, which
/// is folded back to 0.
#[inline]
pub fn wrap_degrees(deg: f64) -> f64 {
    let w = deg.rem_euclid(360.0);
    if w >= 360.0 {
        0.0
    } else {
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn observer(lat: f64, lon: f64) -> Observer {
        Observer::new(lat, lon, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn sirius_from_la_plata() {
        // Reference values from an independent double-precision evaluation
        // of the same sidereal-time model
        let h = equatorial_to_horizontal(6.75, -16.7, &observer(-34.9214, -57.9546));
        assert!((h.alt_deg - 34.6371).abs() < 0.01, "alt {}", h.alt_deg);
        assert!((h.az_deg - 86.7702).abs() < 0.01, "az {}", h.az_deg);
    }

    #[test]
    fn celestial_pole_altitude_equals_latitude() {
        for lat in [-60.0, -10.0, 25.0, 51.5, 80.0] {
            let obs = observer(lat, 12.0);
            let pole_dec = if lat >= 0.0 { 90.0 } else { -90.0 };
            let h = equatorial_to_horizontal(3.0, pole_dec, &obs);
            assert!(
                (h.alt_deg - lat.abs()).abs() < 1e-6,
                "lat {lat}: pole alt {}",
                h.alt_deg
            );
        }
    }

    #[test]
    fn meridian_transit_is_due_south_or_north() {
        let obs = observer(40.0, 0.0);
        // RA equal to the LST puts the object on the meridian
        let lst_hours = obs.lst_deg().rem_euclid(360.0) / 15.0;
        let south = equatorial_to_horizontal(lst_hours, 10.0, &obs);
        assert!((south.alt_deg - 60.0).abs() < 1e-6);
        // The azimuth epsilon costs a few thousandths of a degree at transit
        assert!((south.az_deg - 180.0).abs() < 0.01);

        let north = equatorial_to_horizontal(lst_hours, 70.0, &obs);
        assert!((north.alt_deg - 60.0).abs() < 1e-6);
        assert!(north.az_deg < 0.01 || north.az_deg > 360.0 - 0.01);
    }

    #[test]
    fn object_east_of_meridian_has_eastern_azimuth() {
        let obs = observer(0.0, 0.0);
        let lst_hours = obs.lst_deg().rem_euclid(360.0) / 15.0;
        // Rising object: RA ahead of LST by 3 hours
        let h = equatorial_to_horizontal((lst_hours + 3.0).rem_euclid(24.0), 0.0, &obs);
        assert!(h.az_deg > 0.0 && h.az_deg < 180.0, "az {}", h.az_deg);
        // Setting object: RA behind LST by 3 hours
        let h = equatorial_to_horizontal((lst_hours - 3.0).rem_euclid(24.0), 0.0, &obs);
        assert!(h.az_deg > 180.0 && h.az_deg < 360.0, "az {}", h.az_deg);
    }

    #[test]
    fn poles_do_not_produce_nan() {
        for lat in [-90.0, 90.0] {
            let obs = observer(lat, 0.0);
            for dec in [-90.0, -45.0, 0.0, 45.0, 90.0] {
                let h = equatorial_to_horizontal(7.0, dec, &obs);
                assert!(h.alt_deg.is_finite() && h.az_deg.is_finite());
                assert!((0.0..360.0).contains(&h.az_deg));
            }
        }
    }

    #[test]
    fn batch_matches_scalar() {
        let obs = observer(-34.9214, -57.9546);
        let positions = [(6.75, -16.7), (0.0, 0.0), (12.5, 45.0), (23.99, -89.0)];
        let cols = EquatorialColumns::from_hours_degrees(positions.iter().copied());
        let frame = HorizontalFrame::new(&obs);
        let batch = frame.to_horizontal_batch(&cols);
        assert_eq!(batch.len(), positions.len());
        for (i, &(ra, dec)) in positions.iter().enumerate() {
            let scalar = equatorial_to_horizontal(ra, dec, &obs);
            assert_eq!(batch.get(i), Some(scalar));
        }
        assert_eq!(batch.get(positions.len()), None);
    }

    #[test]
    fn wrap_degrees_stays_half_open() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-1e-20), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(725.0), 5.0);
    }
}
