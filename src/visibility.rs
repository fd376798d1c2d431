//! Visibility filtering and per-point styling.
//!
//! A star is drawn when it is above its horizon threshold and no fainter
//! than the magnitude limit. Marker size grows linearly with the headroom
//! below the limit.

use crate::config::ViewConfig;
use crate::coords::HorizontalBatch;
use crate::ephemeris::BodyPosition;
use crate::projection::{project, ViewPoint};
use crate::spectral::{spectral_color_or_white, Rgb};
use crate::tooltip::Tooltip;
use crate::StarCatalog;

/// A star that passed the visibility filter.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleStar {
    /// Index into [`StarCatalog::stars`].
    pub index: usize,
    pub alt_deg: f64,
    pub az_deg: f64,
    /// View position; `None` only in galactic-cube mode.
    pub point: Option<ViewPoint>,
    pub color: Rgb,
    pub size: f64,
}

/// Marker size for a star of magnitude `mag`.
#[inline]
pub fn star_size(mag: f64, config: &ViewConfig) -> f64 {
    (config.magnitude_limit - mag) * config.size_coefficient + config.point_scale
}

/// Visibility predicate shared by stars and bodies.
#[inline]
pub fn is_visible(alt_deg: f64, mag: f64, threshold_deg: f64, magnitude_limit: f64) -> bool {
    alt_deg > threshold_deg && mag <= magnitude_limit
}

/// Filter a catalog evaluated at one instant.
///
/// `horizontal` must be index-aligned with the catalog (as returned by
/// [`StarCatalog::horizontal`]). If it is shorter, stars past its end are
/// not considered. The result is ordered brightest first.
pub fn filter_visible_stars(
    catalog: &StarCatalog,
    horizontal: &HorizontalBatch,
    config: &ViewConfig,
) -> Vec<VisibleStar> {
    debug_assert_eq!(horizontal.len(), catalog.len());
    let threshold = config.horizon.stars;
    let limit = config.magnitude_limit;

    let mut visible = Vec::new();
    for (index, star) in catalog.stars().iter().enumerate() {
        let Some(h) = horizontal.get(index) else {
            break;
        };
        if !is_visible(h.alt_deg, star.mag, threshold, limit) {
            continue;
        }
        visible.push(VisibleStar {
            index,
            alt_deg: h.alt_deg,
            az_deg: h.az_deg,
            point: project(h.az_deg, h.alt_deg, config),
            color: spectral_color_or_white(star.spectral.as_deref()),
            size: star_size(star.mag, config),
        });
    }

    let stars = catalog.stars();
    visible.sort_by(|a, b| stars[a.index].mag.total_cmp(&stars[b.index].mag));
    visible
}

/// A solar-system body that passed the visibility filter, with its style.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleBody {
    pub position: BodyPosition,
    pub point: Option<ViewPoint>,
    pub color: &'static str,
    pub size: f64,
    pub tooltip: Tooltip,
}

/// Filter body positions and attach color, size and tooltip from the
/// style table. Input order is kept.
pub fn filter_visible_bodies(positions: &[BodyPosition], config: &ViewConfig) -> Vec<VisibleBody> {
    positions
        .iter()
        .filter(|p| {
            is_visible(
                p.alt_deg,
                p.magnitude,
                config.horizon.bodies,
                config.magnitude_limit,
            )
        })
        .map(|p| {
            let style = p.body.style();
            VisibleBody {
                position: p.clone(),
                point: project(p.az_deg, p.alt_deg, config),
                color: style.color,
                size: style.size,
                tooltip: Tooltip::for_body(p),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Body, Star};

    fn star(id: u64, mag: f64, spect: Option<&str>) -> Star {
        Star {
            id,
            hip: None,
            proper: None,
            name: format!("HYG {id}"),
            ra_hours: 0.0,
            dec_deg: 0.0,
            mag,
            color_index: None,
            spectral: spect.map(str::to_string),
            distance_ly: None,
            constellation: None,
            rank: 0,
        }
    }

    fn fixture() -> (StarCatalog, HorizontalBatch) {
        let catalog = StarCatalog::new(vec![
            star(1, 2.0, Some("G2V")),
            star(2, -1.0, None),
            star(3, 4.0, Some("M0")),
            star(4, 1.0, Some("B5")),
            star(5, 0.5, Some("K0")),
        ]);
        let horizontal = HorizontalBatch {
            alt_deg: vec![10.0, 45.0, 30.0, -0.5, -1.0],
            az_deg: vec![0.0, 90.0, 180.0, 270.0, 10.0],
        };
        (catalog, horizontal)
    }

    #[test]
    fn applies_altitude_and_magnitude_cuts() {
        let (catalog, horizontal) = fixture();
        let config = ViewConfig {
            magnitude_limit: 3.2,
            ..Default::default()
        };
        let visible = filter_visible_stars(&catalog, &horizontal, &config);
        let ids: Vec<u64> = visible.iter().map(|v| catalog.stars()[v.index].id).collect();
        // Brightest first; star 3 too faint, star 5 exactly at -1 is excluded
        assert_eq!(ids, vec![2, 4, 1]);
        assert_eq!(visible[0].color, Rgb::WHITE);
    }

    #[test]
    fn raising_the_limit_never_removes_stars() {
        let (catalog, horizontal) = fixture();
        let mut previous = 0;
        for limit in [-2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 6.0] {
            let config = ViewConfig {
                magnitude_limit: limit,
                ..Default::default()
            };
            let n = filter_visible_stars(&catalog, &horizontal, &config).len();
            assert!(n >= previous, "limit {limit}: {n} < {previous}");
            previous = n;
        }
        assert_eq!(previous, 4);
    }

    #[test]
    fn brighter_stars_are_larger() {
        let (catalog, horizontal) = fixture();
        let config = ViewConfig::default();
        let visible = filter_visible_stars(&catalog, &horizontal, &config);
        for pair in visible.windows(2) {
            assert!(pair[0].size >= pair[1].size);
        }
        // (3.2 - (-1.0)) * 0.3 + 1.0
        assert!((visible[0].size - 2.26).abs() < 1e-12);
    }

    #[test]
    fn points_follow_view_mode() {
        let (catalog, horizontal) = fixture();
        let cube = ViewConfig {
            mode: crate::ViewMode::GalacticCube,
            ..Default::default()
        };
        let visible = filter_visible_stars(&catalog, &horizontal, &cube);
        assert!(visible.iter().all(|v| v.point.is_none()));

        let visible = filter_visible_stars(&catalog, &horizontal, &ViewConfig::default());
        let p = visible[0].point.unwrap();
        assert_eq!((p.x, p.y), (90.0, 45.0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn misaligned_batch_is_rejected() {
        let (catalog, mut horizontal) = fixture();
        horizontal.alt_deg.pop();
        horizontal.az_deg.pop();
        filter_visible_stars(&catalog, &horizontal, &ViewConfig::default());
    }

    #[test]
    fn bodies_use_their_own_threshold_and_style() {
        let pos = |body, alt_deg, magnitude| BodyPosition {
            body,
            alt_deg,
            az_deg: 100.0,
            magnitude,
            phase_percent: None,
            constellation: None,
        };
        let positions = vec![
            pos(Body::Sun, -4.0, -26.7),
            pos(Body::Moon, -6.0, -12.0),
            pos(Body::Uranus, 30.0, 5.7),
            pos(Body::Venus, 20.0, -4.2),
        ];
        let visible = filter_visible_bodies(&positions, &ViewConfig::default());
        let bodies: Vec<Body> = visible.iter().map(|v| v.position.body).collect();
        assert_eq!(bodies, vec![Body::Sun, Body::Venus]);
        assert_eq!(visible[0].color, "#FFCC33");
        assert_eq!(visible[1].size, 18.0);
        assert_eq!(visible[1].tooltip.get("Mag"), Some("-4.2"));
    }
}
