//! Assembly of everything the caller draws for one configuration.
//!
//! [`render_frame`] runs the pipeline once: horizontal coordinates for the
//! whole catalog, projection, visibility, overlays. The result is a fresh
//! value holding plain point collections; nothing is cached between frames.

use chrono::TimeZone;
use nalgebra::Vector3;
use tracing::debug;

use crate::catalogs::deep_sky::{DEEP_SKY_IMAGES, MESSIER_OBJECTS};
use crate::catalogs::CatalogStore;
use crate::config::{ViewConfig, ViewMode};
use crate::coords::{HorizontalBatch, HorizontalFrame};
use crate::ephemeris::{Body, Ephemeris};
use crate::error::SkyResult;
use crate::galactic::translate_universe;
use crate::grid::{reference_line, ReferenceLineKind};
use crate::projection::{
    panoramic_ticks, project, view_window, AxisRange, AxisTick, ViewPoint, ViewWindow,
};
use crate::spectral::spectral_color_or_white;
use crate::tooltip::Tooltip;
use crate::trajectory::{sample_trajectory_for, Trajectory, TrajectoryPoint};
use crate::visibility::{filter_visible_bodies, filter_visible_stars, VisibleStar};
use crate::Observer;

/// Constellation segments wider than this in panoramic x wrap around the
/// seam and are not drawn.
const CONSTELLATION_MAX_SPAN: f64 = 120.0;
/// Minimum mean y of a constellation's drawn endpoints for its label.
const PANORAMIC_LABEL_MIN_Y: f64 = 5.0;
const ZENITHAL_LABEL_MIN_Y: f64 = -85.0;

const MESSIER_COLOR: &str = "#00ffff";
const MESSIER_SIZE: f64 = 10.0;
const EXOPLANET_COLOR: &str = "#00ff00";
/// Exoplanet rings are drawn this much larger than the host marker.
const EXOPLANET_RING_EXTRA: f64 = 10.0;
/// Star markers in the cube relative to the point scale.
const CUBE_STAR_SCALE: f64 = 1.5;
const SUN_MARKER_COLOR: &str = "#ffff00";
const SUN_MARKER_SIZE: f64 = 8.0;

/// A styled marker in 2D view space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderPoint {
    pub x: f64,
    pub y: f64,
    /// `#rrggbb`
    pub color: String,
    pub size: f64,
    pub tooltip: Tooltip,
    /// Selection identifier: star id, body name or deep-sky code.
    pub id: String,
}

/// Text placed in view space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    pub point: ViewPoint,
    pub text: String,
}

/// A photograph centered on a deep-sky object.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImagePlacement {
    pub code: String,
    pub url: String,
    pub center: ViewPoint,
    /// Width and height in view units (degrees).
    pub size_deg: f64,
}

/// Panoramic or zenithal chart.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkyFrame {
    pub window: Option<ViewWindow>,
    pub ticks: Vec<AxisTick>,
    /// Brightest first.
    pub stars: Vec<RenderPoint>,
    pub bodies: Vec<RenderPoint>,
    pub constellation_segments: Vec<[ViewPoint; 2]>,
    pub constellation_labels: Vec<Label>,
    pub messier: Vec<RenderPoint>,
    pub images: Vec<ImagePlacement>,
    pub exoplanets: Vec<RenderPoint>,
    pub ecliptic: Vec<TrajectoryPoint>,
    pub celestial_equator: Vec<TrajectoryPoint>,
    pub trajectory: Option<Trajectory>,
}

/// A styled marker in the 3D cube, light-years.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubePoint {
    pub position: Vector3<f64>,
    pub color: String,
    pub size: f64,
    pub tooltip: Tooltip,
    pub id: String,
}

/// Galaxy-aligned 3D scene around the selected star.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubeFrame {
    /// Name of the star at the origin, `None` when centered on the Sun.
    pub center: Option<String>,
    /// Brightest first.
    pub stars: Vec<CubePoint>,
    pub constellation_segments: Vec<[Vector3<f64>; 2]>,
    pub exoplanets: Vec<CubePoint>,
    /// The Sun, when inside the cube.
    pub sun: Option<CubePoint>,
    /// Range shared by all three axes.
    pub axis_range: AxisRange,
    pub show_grid: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frame {
    Sky(SkyFrame),
    Cube(CubeFrame),
}

impl Frame {
    pub fn as_sky(&self) -> Option<&SkyFrame> {
        match self {
            Frame::Sky(f) => Some(f),
            Frame::Cube(_) => None,
        }
    }

    pub fn as_cube(&self) -> Option<&CubeFrame> {
        match self {
            Frame::Cube(f) => Some(f),
            Frame::Sky(_) => None,
        }
    }
}

/// Compute one frame for an observer and configuration.
///
/// `tz` is the observer's time zone; it fixes the calendar day swept by the
/// trajectory. The ephemeris is only queried when bodies are shown or a body
/// is selected, and its failures are returned as errors.
pub fn render_frame<E, Tz>(
    store: &CatalogStore,
    observer: &Observer,
    tz: &Tz,
    config: &ViewConfig,
    ephemeris: &E,
) -> SkyResult<Frame>
where
    E: Ephemeris + ?Sized,
    Tz: TimeZone,
{
    config.validate()?;
    match config.mode {
        ViewMode::GalacticCube => Ok(Frame::Cube(render_cube(store, config))),
        ViewMode::Panoramic | ViewMode::Zenithal => {
            render_sky(store, observer, tz, config, ephemeris).map(Frame::Sky)
        }
    }
}

fn render_sky<E, Tz>(
    store: &CatalogStore,
    observer: &Observer,
    tz: &Tz,
    config: &ViewConfig,
    ephemeris: &E,
) -> SkyResult<SkyFrame>
where
    E: Ephemeris + ?Sized,
    Tz: TimeZone,
{
    let frame = HorizontalFrame::new(observer);
    let catalog = &store.stars;
    let horizontal = catalog.horizontal(&frame);
    let visible = filter_visible_stars(catalog, &horizontal, config);

    let mut sky = SkyFrame {
        window: view_window(config),
        ticks: panoramic_ticks(config),
        stars: visible.iter().filter_map(|v| star_point(store, v)).collect(),
        ..Default::default()
    };

    if config.show_planets {
        let positions = Body::ALL
            .iter()
            .map(|&body| ephemeris.position(observer, body))
            .collect::<SkyResult<Vec<_>>>()?;
        sky.bodies = filter_visible_bodies(&positions, config)
            .into_iter()
            .filter_map(|b| {
                let p = b.point?;
                Some(RenderPoint {
                    x: p.x,
                    y: p.y,
                    color: b.color.to_string(),
                    size: b.size,
                    tooltip: b.tooltip,
                    id: b.position.body.name().to_string(),
                })
            })
            .collect();
    }

    if config.show_constellations {
        let (segments, labels) = constellations_2d(store, &horizontal, config);
        sky.constellation_segments = segments;
        sky.constellation_labels = labels;
    }

    if config.show_messier {
        sky.messier = MESSIER_OBJECTS
            .iter()
            .filter_map(|m| {
                let h = frame.to_horizontal(m.ra_hours, m.dec_deg);
                if h.alt_deg <= config.horizon.deep_sky {
                    return None;
                }
                let p = project(h.az_deg, h.alt_deg, config)?;
                Some(RenderPoint {
                    x: p.x,
                    y: p.y,
                    color: MESSIER_COLOR.to_string(),
                    size: MESSIER_SIZE,
                    tooltip: Tooltip::new(m.code).field("Name", m.name),
                    id: m.code.to_string(),
                })
            })
            .collect();
    }

    if config.show_images {
        sky.images = DEEP_SKY_IMAGES
            .iter()
            .filter_map(|img| {
                let h = frame.to_horizontal(img.ra_hours, img.dec_deg);
                if h.alt_deg <= config.horizon.deep_sky {
                    return None;
                }
                Some(ImagePlacement {
                    code: img.code.to_string(),
                    url: img.url.to_string(),
                    center: project(h.az_deg, h.alt_deg, config)?,
                    size_deg: img.size_deg,
                })
            })
            .collect();
    }

    if config.show_exoplanets && !store.exoplanets.is_empty() {
        sky.exoplanets = visible
            .iter()
            .filter_map(|v| {
                let star = catalog.get(v.index)?;
                let host = store.exoplanets.lookup(star)?;
                let p = v.point?;
                Some(RenderPoint {
                    x: p.x,
                    y: p.y,
                    color: EXOPLANET_COLOR.to_string(),
                    size: v.size + EXOPLANET_RING_EXTRA,
                    tooltip: Tooltip::for_exoplanet_host(star, host),
                    id: star.id.to_string(),
                })
            })
            .collect();
    }

    if config.show_grid {
        sky.ecliptic = reference_line(ReferenceLineKind::Ecliptic, observer, config);
        sky.celestial_equator =
            reference_line(ReferenceLineKind::CelestialEquator, observer, config);
    }

    if let Some(ident) = config.selection() {
        sky.trajectory = Some(sample_trajectory_for(
            ident,
            catalog,
            ephemeris,
            observer.lat_deg(),
            observer.lon_deg(),
            observer.local_date(tz),
            tz,
            config,
        )?);
    }

    debug!(
        "Sky frame: {} stars, {} bodies, {} constellation segments",
        sky.stars.len(),
        sky.bodies.len(),
        sky.constellation_segments.len()
    );
    Ok(sky)
}

fn star_point(store: &CatalogStore, v: &VisibleStar) -> Option<RenderPoint> {
    let star = store.stars.get(v.index)?;
    let p = v.point?;
    Some(RenderPoint {
        x: p.x,
        y: p.y,
        color: v.color.to_hex(),
        size: v.size,
        tooltip: Tooltip::for_star(star),
        id: star.id.to_string(),
    })
}

/// Segments between figure stars above the anchor threshold, and one label
/// per constellation at the mean of its drawn endpoints.
fn constellations_2d(
    store: &CatalogStore,
    horizontal: &HorizontalBatch,
    config: &ViewConfig,
) -> (Vec<[ViewPoint; 2]>, Vec<Label>) {
    let catalog = &store.stars;
    let anchor = |hip: u32| -> Option<ViewPoint> {
        let idx = catalog.index_of_hip(hip)?;
        let h = horizontal.get(idx)?;
        if h.alt_deg <= config.horizon.constellation_anchor {
            return None;
        }
        project(h.az_deg, h.alt_deg, config)
    };
    let panoramic = config.mode == ViewMode::Panoramic;
    let label_min_y = if panoramic {
        PANORAMIC_LABEL_MIN_Y
    } else {
        ZENITHAL_LABEL_MIN_Y
    };

    let mut segments = Vec::new();
    let mut labels = Vec::new();
    for figure in &store.constellations {
        let mut sum = ViewPoint { x: 0.0, y: 0.0 };
        let mut endpoints = 0usize;
        for &(a, b) in &figure.segments {
            let (Some(pa), Some(pb)) = (anchor(a), anchor(b)) else {
                continue;
            };
            if panoramic && (pa.x - pb.x).abs() >= CONSTELLATION_MAX_SPAN {
                continue;
            }
            segments.push([pa, pb]);
            sum.x += pa.x + pb.x;
            sum.y += pa.y + pb.y;
            endpoints += 2;
        }
        if endpoints == 0 {
            continue;
        }
        let mean = ViewPoint {
            x: sum.x / endpoints as f64,
            y: sum.y / endpoints as f64,
        };
        if mean.y > label_min_y {
            labels.push(Label {
                point: mean,
                text: figure.name.clone(),
            });
        }
    }
    (segments, labels)
}

fn render_cube(store: &CatalogStore, config: &ViewConfig) -> CubeFrame {
    let catalog = &store.stars;
    let universe = translate_universe(catalog, config.selection());
    let radius = config.cube_radius_ly;

    let mut plotted: Vec<(usize, Vector3<f64>)> = universe
        .known()
        .filter(|(idx, p)| {
            p.norm() <= radius
                && catalog
                    .get(*idx)
                    .is_some_and(|s| s.mag <= config.magnitude_limit)
        })
        .map(|(idx, p)| (idx, *p))
        .collect();
    plotted.sort_by(|a, b| {
        let ma = catalog.get(a.0).map_or(f64::INFINITY, |s| s.mag);
        let mb = catalog.get(b.0).map_or(f64::INFINITY, |s| s.mag);
        ma.total_cmp(&mb)
    });

    let stars: Vec<CubePoint> = plotted
        .iter()
        .filter_map(|&(idx, position)| {
            let star = catalog.get(idx)?;
            Some(CubePoint {
                position,
                color: spectral_color_or_white(star.spectral.as_deref()).to_hex(),
                size: config.point_scale * CUBE_STAR_SCALE,
                tooltip: Tooltip::for_star(star),
                id: star.id.to_string(),
            })
        })
        .collect();

    let constellation_segments = if config.show_constellations {
        let at = |hip: u32| {
            catalog
                .index_of_hip(hip)
                .and_then(|idx| universe.positions.get(idx).copied().flatten())
        };
        store
            .constellations
            .iter()
            .flat_map(|c| c.segments.iter())
            .filter_map(|&(a, b)| Some([at(a)?, at(b)?]))
            .collect()
    } else {
        Vec::new()
    };

    let exoplanets = if config.show_exoplanets {
        plotted
            .iter()
            .filter_map(|&(idx, position)| {
                let star = catalog.get(idx)?;
                let host = store.exoplanets.lookup(star)?;
                Some(CubePoint {
                    position,
                    color: EXOPLANET_COLOR.to_string(),
                    size: config.point_scale + EXOPLANET_RING_EXTRA,
                    tooltip: Tooltip::for_exoplanet_host(star, host),
                    id: star.id.to_string(),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    let sun = (universe.sun.norm() <= radius).then(|| CubePoint {
        position: universe.sun,
        color: SUN_MARKER_COLOR.to_string(),
        size: SUN_MARKER_SIZE,
        tooltip: Tooltip::new(Body::Sun.name()),
        id: Body::Sun.name().to_string(),
    });

    let center = universe
        .focus
        .filter(|_| universe.center != Vector3::zeros())
        .and_then(|idx| catalog.get(idx))
        .map(|s| s.name.clone());

    debug!(
        "Cube frame: {} stars within {} ly of {}",
        stars.len(),
        radius,
        center.as_deref().unwrap_or("the Sun")
    );

    CubeFrame {
        center,
        stars,
        constellation_segments,
        exoplanets,
        sun,
        axis_range: AxisRange::symmetric(radius),
        show_grid: config.show_grid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::constellations::Constellation;
    use crate::catalogs::exoplanets::{ExoplanetHost, ExoplanetIndex};
    use crate::ephemeris::BodyPosition;
    use crate::{SkyError, Star, StarCatalog};
    use chrono::Utc;

    struct Overhead;

    impl Ephemeris for Overhead {
        fn position(&self, _: &Observer, body: Body) -> SkyResult<BodyPosition> {
            Ok(BodyPosition {
                body,
                alt_deg: 60.0,
                az_deg: 10.0 * body as usize as f64,
                magnitude: -2.0,
                phase_percent: Some(50.0),
                constellation: Some("Tau".to_string()),
            })
        }
    }

    struct Offline;

    impl Ephemeris for Offline {
        fn position(&self, _: &Observer, _: Body) -> SkyResult<BodyPosition> {
            Err(SkyError::upstream("offline"))
        }
    }

    fn star(id: u64, hip: u32, ra_hours: f64, dec_deg: f64, mag: f64, dist: Option<f64>) -> Star {
        Star {
            id,
            hip: Some(hip),
            proper: None,
            name: format!("HIP {hip}"),
            ra_hours,
            dec_deg,
            mag,
            color_index: None,
            spectral: Some("G2V".to_string()),
            distance_ly: dist,
            constellation: None,
            rank: 0,
        }
    }

    /// Observer at the north pole: altitude equals declination.
    fn polar_observer() -> Observer {
        Observer::new(90.0, 0.0, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()).unwrap()
    }

    fn store() -> CatalogStore {
        let stars = StarCatalog::new(vec![
            star(1, 101, 0.0, 50.0, 1.0, Some(10.0)),
            star(2, 102, 0.5, 55.0, 2.0, Some(20.0)),
            star(3, 103, 12.0, -30.0, 1.5, Some(30.0)),
            star(4, 104, 6.0, 40.0, 0.0, None),
        ]);
        let constellations = vec![Constellation {
            abbr: "Tst".to_string(),
            name: "Test".to_string(),
            segments: vec![(101, 102), (102, 103), (101, 999)],
        }];
        let exoplanets = ExoplanetIndex::new(vec![ExoplanetHost {
            host_key: "HIP 102".to_string(),
            hip: Some(102),
            planet_count: 1,
            planet_names: vec!["HIP 102 b".to_string()],
        }]);
        CatalogStore::new(stars, constellations, exoplanets)
    }

    #[test]
    fn sky_frame_filters_and_overlays() {
        let config = ViewConfig {
            mode: ViewMode::Zenithal,
            show_constellations: true,
            show_exoplanets: true,
            show_grid: true,
            ..Default::default()
        };
        let frame = render_frame(&store(), &polar_observer(), &Utc, &config, &Offline).unwrap();
        let sky = frame.as_sky().unwrap();

        // Star 3 is below the horizon
        let ids: Vec<&str> = sky.stars.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "1", "2"]);
        // Only the 101-102 segment has both anchors up
        assert_eq!(sky.constellation_segments.len(), 1);
        assert_eq!(sky.constellation_labels.len(), 1);
        assert_eq!(sky.constellation_labels[0].text, "Test");

        assert_eq!(sky.exoplanets.len(), 1);
        assert_eq!(sky.exoplanets[0].id, "2");
        assert!((sky.exoplanets[0].size - (sky.stars[2].size + 10.0)).abs() < 1e-12);

        assert!(!sky.ecliptic.is_empty());
        assert!(sky.bodies.is_empty());
        assert!(sky.trajectory.is_none());
    }

    #[test]
    fn bodies_need_a_working_ephemeris() {
        let config = ViewConfig {
            show_planets: true,
            ..Default::default()
        };
        let frame = render_frame(&store(), &polar_observer(), &Utc, &config, &Overhead).unwrap();
        let sky = frame.as_sky().unwrap();
        assert_eq!(sky.bodies.len(), Body::ALL.len());
        assert_eq!(sky.bodies[0].id, "Sun");
        assert_eq!(sky.bodies[1].tooltip.get("Illum"), Some("50.0%"));

        let err = render_frame(&store(), &polar_observer(), &Utc, &config, &Offline).unwrap_err();
        assert!(matches!(err, SkyError::UpstreamUnavailable { .. }));
    }

    #[test]
    fn selection_adds_a_trajectory() {
        let config = ViewConfig {
            selected: Some("1".to_string()),
            ..Default::default()
        };
        let frame = render_frame(&store(), &polar_observer(), &Utc, &config, &Offline).unwrap();
        let trajectory = frame.as_sky().unwrap().trajectory.as_ref().unwrap();
        // Dec 50 from the pole stays at altitude 50 all day
        assert_eq!(trajectory.vertex_count(), 144);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ViewConfig {
            point_scale: 0.0,
            ..Default::default()
        };
        let err = render_frame(&store(), &polar_observer(), &Utc, &config, &Offline).unwrap_err();
        assert!(matches!(err, SkyError::InvalidConfig { .. }));
    }

    #[test]
    fn cube_recenters_on_selection() {
        let config = ViewConfig {
            mode: ViewMode::GalacticCube,
            selected: Some("HIP 101".to_string()),
            cube_radius_ly: 25.0,
            show_constellations: true,
            show_exoplanets: true,
            ..Default::default()
        };
        let frame = render_frame(&store(), &polar_observer(), &Utc, &config, &Offline).unwrap();
        let cube = frame.as_cube().unwrap();
        assert_eq!(cube.center.as_deref(), Some("HIP 101"));
        assert_eq!(cube.axis_range, AxisRange::symmetric(25.0));

        let origin = cube.stars.iter().find(|s| s.id == "1").unwrap();
        assert!(origin.position.norm() < 1e-9);
        assert_eq!(origin.size, 1.5);
        // Unknown distance never appears
        assert!(cube.stars.iter().all(|s| s.id != "4"));
        // The Sun is 10 ly away
        let sun = cube.sun.as_ref().unwrap();
        assert!((sun.position.norm() - 10.0).abs() < 1e-9);
        // 101-102 and 102-103 both have known distances
        assert_eq!(cube.constellation_segments.len(), 2);
        for ring in &cube.exoplanets {
            assert_eq!(ring.size, 11.0);
        }
    }

    #[test]
    fn cube_without_selection_is_heliocentric() {
        let config = ViewConfig {
            mode: ViewMode::GalacticCube,
            cube_radius_ly: 15.0,
            ..Default::default()
        };
        let frame = render_frame(&store(), &polar_observer(), &Utc, &config, &Offline).unwrap();
        let cube = frame.as_cube().unwrap();
        assert_eq!(cube.center, None);
        assert_eq!(cube.stars.len(), 1);
        assert_eq!(cube.sun.as_ref().unwrap().position, Vector3::zeros());
        assert!(cube.constellation_segments.is_empty());
    }
}
