//! Observer location and instant.
//!
//! An `Observer` is immutable and rebuilt whenever the user changes location
//! or time. Construction validates the geographic coordinates so that the
//! coordinate math never silently produces nonsense.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{SkyError, SkyResult};

/// Unix timestamp of the J2000.0 epoch, 2000-01-01T12:00:00 UTC.
pub const J2000_UNIX_SECONDS: i64 = 946_728_000;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    lat_deg: f64,
    lon_deg: f64,
    instant: DateTime<Utc>,
}

impl Observer {
    /// Create an observer, rejecting out-of-range or non-finite coordinates.
    ///
    /// Latitude must lie in `[-90, 90]` and longitude in `[-180, 180]` degrees
    /// (east positive).
    pub fn new(lat_deg: f64, lon_deg: f64, instant: DateTime<Utc>) -> SkyResult<Self> {
        validate_location(lat_deg, lon_deg)?;
        Ok(Self {
            lat_deg,
            lon_deg,
            instant,
        })
    }

    /// Create an observer from a wall-clock time in the given time zone.
    ///
    /// Returns `Ok(None)` when the local time does not exist (a DST gap).
    /// Ambiguous local times resolve to the earliest matching instant.
    pub fn from_local<Tz: TimeZone>(
        lat_deg: f64,
        lon_deg: f64,
        local: NaiveDateTime,
        tz: &Tz,
    ) -> SkyResult<Option<Self>> {
        validate_location(lat_deg, lon_deg)?;
        Ok(tz.from_local_datetime(&local).earliest().map(|dt| Self {
            lat_deg,
            lon_deg,
            instant: dt.with_timezone(&Utc),
        }))
    }

    /// Same location, different instant.
    pub fn at(&self, instant: DateTime<Utc>) -> Self {
        Self { instant, ..*self }
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat_deg
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon_deg
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The calendar date of this observer's instant in the given time zone.
    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.instant.with_timezone(tz).date_naive()
    }

    /// Fractional days elapsed since J2000.0.
    pub fn days_since_j2000(&self) -> f64 {
        let secs = (self.instant.timestamp() - J2000_UNIX_SECONDS) as f64;
        let frac = self.instant.timestamp_subsec_nanos() as f64 * 1e-9;
        (secs + frac) / SECONDS_PER_DAY
    }

    /// Greenwich mean sidereal time in degrees, `[0, 360)`.
    ///
    /// Linear approximation in days since J2000.0; no nutation, no
    /// UT1 correction.
    pub fn gmst_deg(&self) -> f64 {
        (280.460_618_37 + 360.985_647_366_29 * self.days_since_j2000()).rem_euclid(360.0)
    }

    /// Local sidereal time in degrees, `gmst + longitude` (not wrapped).
    pub fn lst_deg(&self) -> f64 {
        self.gmst_deg() + self.lon_deg
    }
}

fn validate_location(lat_deg: f64, lon_deg: f64) -> SkyResult<()> {
    if !lat_deg.is_finite() || !(-90.0..=90.0).contains(&lat_deg) {
        return Err(SkyError::invalid_observer(format!(
            "latitude {lat_deg} outside [-90, 90]"
        )));
    }
    if !lon_deg.is_finite() || !(-180.0..=180.0).contains(&lon_deg) {
        return Err(SkyError::invalid_observer(format!(
            "longitude {lon_deg} outside [-180, 180]"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let t = utc(2024, 1, 1, 0, 0);
        assert!(Observer::new(90.0, 180.0, t).is_ok());
        assert!(Observer::new(-90.0, -180.0, t).is_ok());
        assert!(matches!(
            Observer::new(90.5, 0.0, t),
            Err(SkyError::InvalidObserver { .. })
        ));
        assert!(matches!(
            Observer::new(0.0, -181.0, t),
            Err(SkyError::InvalidObserver { .. })
        ));
        assert!(Observer::new(f64::NAN, 0.0, t).is_err());
        assert!(Observer::new(0.0, f64::INFINITY, t).is_err());
    }

    #[test]
    fn days_since_j2000_at_epoch_is_zero() {
        let obs = Observer::new(0.0, 0.0, utc(2000, 1, 1, 12, 0)).unwrap();
        assert_eq!(obs.days_since_j2000(), 0.0);
        assert!((obs.gmst_deg() - 280.460_618_37).abs() < 1e-9);

        let obs = obs.at(utc(2024, 1, 1, 0, 0));
        assert!((obs.days_since_j2000() - 8765.5).abs() < 1e-9);
    }

    #[test]
    fn lst_adds_longitude() {
        let t = utc(2024, 3, 20, 3, 0);
        let greenwich = Observer::new(0.0, 0.0, t).unwrap();
        let west = Observer::new(0.0, -57.9546, t).unwrap();
        assert!((west.lst_deg() - (greenwich.gmst_deg() - 57.9546)).abs() < 1e-9);
    }

    #[test]
    fn from_local_converts_to_utc() {
        // Buenos Aires, UTC-3, no DST
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();
        let local = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(21, 0, 0)
            .unwrap();
        let obs = Observer::from_local(-34.9214, -57.9546, local, &tz)
            .unwrap()
            .unwrap();
        assert_eq!(obs.instant(), utc(2024, 1, 1, 0, 0));
        assert_eq!(
            obs.local_date(&tz),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
    }

    #[test]
    fn from_local_still_validates() {
        let local = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(Observer::from_local(123.0, 0.0, local, &Utc).is_err());
    }
}
