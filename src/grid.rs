//! Reference great circles drawn over the 2D chart.

use crate::config::ViewConfig;
use crate::coords::HorizontalFrame;
use crate::projection::project;
use crate::trajectory::{SeamAwarePath, TrajectoryPoint};
use crate::Observer;

/// Mean obliquity of the ecliptic, degrees.
pub const OBLIQUITY_DEG: f64 = 23.44;

const SAMPLES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceLineKind {
    /// Approximated as `dec = 23.44 sin(ra)`.
    Ecliptic,
    CelestialEquator,
}

impl ReferenceLineKind {
    fn declination(&self, ra_hours: f64) -> f64 {
        match self {
            ReferenceLineKind::Ecliptic => OBLIQUITY_DEG * (ra_hours * 15.0).to_radians().sin(),
            ReferenceLineKind::CelestialEquator => 0.0,
        }
    }
}

/// Polyline of a reference line in view space.
///
/// RA is sampled evenly over `[0, 24]` hours; samples below the reference
/// line horizon are dropped and the line is split at the panoramic seam.
/// Empty in galactic-cube mode.
pub fn reference_line(
    kind: ReferenceLineKind,
    observer: &Observer,
    config: &ViewConfig,
) -> Vec<TrajectoryPoint> {
    let frame = HorizontalFrame::new(observer);
    let mut path = SeamAwarePath::new(config);
    for i in 0..SAMPLES {
        let ra_hours = 24.0 * i as f64 / (SAMPLES - 1) as f64;
        let h = frame.to_horizontal(ra_hours, kind.declination(ra_hours));
        if h.alt_deg <= config.horizon.reference_lines {
            continue;
        }
        if let Some(p) = project(h.az_deg, h.alt_deg, config) {
            path.push(p);
        }
    }
    path.into_points()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViewMode;
    use chrono::{TimeZone, Utc};

    fn observer(lat: f64) -> Observer {
        Observer::new(lat, 0.0, Utc.with_ymd_and_hms(2024, 6, 1, 22, 0, 0).unwrap()).unwrap()
    }

    fn vertices(points: &[TrajectoryPoint]) -> usize {
        points
            .iter()
            .filter(|p| matches!(p, TrajectoryPoint::At(_)))
            .count()
    }

    #[test]
    fn equator_from_the_pole_hugs_the_horizon() {
        let config = ViewConfig {
            mode: ViewMode::Zenithal,
            ..Default::default()
        };
        let points = reference_line(ReferenceLineKind::CelestialEquator, &observer(90.0), &config);
        assert_eq!(vertices(&points), SAMPLES);
        for p in points {
            if let TrajectoryPoint::At(v) = p {
                let r = (v.x * v.x + v.y * v.y).sqrt();
                assert!((r - 90.0).abs() < 1e-6, "r {r}");
            }
        }
    }

    #[test]
    fn about_half_the_equator_is_up() {
        let points = reference_line(
            ReferenceLineKind::CelestialEquator,
            &observer(-34.9),
            &ViewConfig::default(),
        );
        let n = vertices(&points);
        assert!(n > 40 && n < 65, "{n} samples above -5 deg");
    }

    #[test]
    fn ecliptic_declination_stays_within_obliquity() {
        for i in 0..=48 {
            let ra = i as f64 * 0.5;
            assert!(ReferenceLineKind::Ecliptic.declination(ra).abs() <= OBLIQUITY_DEG);
        }
        assert!((ReferenceLineKind::Ecliptic.declination(6.0) - OBLIQUITY_DEG).abs() < 1e-9);
    }

    #[test]
    fn cube_mode_has_no_lines() {
        let config = ViewConfig {
            mode: ViewMode::GalacticCube,
            ..Default::default()
        };
        assert!(reference_line(ReferenceLineKind::Ecliptic, &observer(10.0), &config).is_empty());
    }
}
