//! 24-hour path of a selected star or body across the view.
//!
//! The day is swept from local midnight in fixed steps. Only samples above
//! the trajectory horizon are kept. In panoramic mode the path is split
//! wherever consecutive samples jump across the azimuth seam.

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone};
use tracing::debug;

use crate::config::{ViewConfig, ViewMode};
use crate::coords::HorizontalFrame;
use crate::ephemeris::{Body, Ephemeris};
use crate::error::SkyResult;
use crate::projection::{project, ViewPoint};
use crate::{Observer, StarCatalog};

const MINUTES_PER_DAY: u32 = 24 * 60;
const HOUR_LABEL_EVERY_MINUTES: u32 = 120;

/// What a trajectory follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrajectoryTarget {
    Body(Body),
    /// Index into [`StarCatalog::stars`].
    Star(usize),
}

/// Resolve a selection: body name first, then star id, then star name.
pub fn resolve_target(ident: &str, catalog: &StarCatalog) -> Option<TrajectoryTarget> {
    Body::from_name(ident)
        .map(TrajectoryTarget::Body)
        .or_else(|| catalog.resolve(ident).map(TrajectoryTarget::Star))
}

/// A polyline vertex, or a pen-up between two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrajectoryPoint {
    At(ViewPoint),
    Break,
}

/// Local-time marker placed on the path every two hours.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourLabel {
    pub point: ViewPoint,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    pub points: Vec<TrajectoryPoint>,
    pub labels: Vec<HourLabel>,
}

impl Trajectory {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of drawn vertices (breaks excluded).
    pub fn vertex_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| matches!(p, TrajectoryPoint::At(_)))
            .count()
    }

    /// Contiguous runs of vertices between breaks.
    pub fn segments(&self) -> Vec<Vec<ViewPoint>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for p in &self.points {
            match p {
                TrajectoryPoint::At(v) => current.push(*v),
                TrajectoryPoint::Break => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Appends view points to a polyline, inserting a break before any point
/// whose x jumps by more than the seam threshold in panoramic mode.
#[derive(Debug)]
pub(crate) struct SeamAwarePath {
    points: Vec<TrajectoryPoint>,
    last_x: Option<f64>,
    break_threshold: Option<f64>,
}

impl SeamAwarePath {
    pub(crate) fn new(config: &ViewConfig) -> Self {
        Self {
            points: Vec::new(),
            last_x: None,
            break_threshold: (config.mode == ViewMode::Panoramic)
                .then_some(config.seam_break_threshold),
        }
    }

    pub(crate) fn push(&mut self, point: ViewPoint) {
        if let (Some(last), Some(threshold)) = (self.last_x, self.break_threshold) {
            if (point.x - last).abs() > threshold {
                self.points.push(TrajectoryPoint::Break);
            }
        }
        self.points.push(TrajectoryPoint::At(point));
        self.last_x = Some(point.x);
    }

    pub(crate) fn into_points(self) -> Vec<TrajectoryPoint> {
        self.points
    }
}

/// Sample the path of `target` over the local calendar day `date`.
///
/// Local times that do not exist in `tz` (DST gaps) are skipped. The
/// galactic cube has no 2D path, so the result is empty in that mode.
#[allow(clippy::too_many_arguments)]
pub fn sample_trajectory<E, Tz>(
    target: TrajectoryTarget,
    catalog: &StarCatalog,
    ephemeris: &E,
    lat_deg: f64,
    lon_deg: f64,
    date: NaiveDate,
    tz: &Tz,
    config: &ViewConfig,
) -> SkyResult<Trajectory>
where
    E: Ephemeris + ?Sized,
    Tz: TimeZone,
{
    config.validate()?;
    if config.mode == ViewMode::GalacticCube {
        return Ok(Trajectory::default());
    }
    let star = match target {
        TrajectoryTarget::Star(idx) => match catalog.get(idx) {
            Some(s) => Some(s),
            None => return Ok(Trajectory::default()),
        },
        TrajectoryTarget::Body(_) => None,
    };

    let midnight = date.and_time(NaiveTime::MIN);
    let mut path = SeamAwarePath::new(config);
    let mut labels = Vec::new();
    let mut samples = 0usize;

    for minutes in (0..MINUTES_PER_DAY).step_by(config.trajectory_step_minutes as usize) {
        let local = midnight + Duration::minutes(minutes as i64);
        let Some(observer) = Observer::from_local(lat_deg, lon_deg, local, tz)? else {
            continue;
        };
        samples += 1;

        let (alt, az) = match (target, star) {
            (TrajectoryTarget::Body(body), _) => {
                let pos = ephemeris.position(&observer, body)?;
                (pos.alt_deg, pos.az_deg)
            }
            (TrajectoryTarget::Star(_), Some(s)) => {
                let h = HorizontalFrame::new(&observer).to_horizontal(s.ra_hours, s.dec_deg);
                (h.alt_deg, h.az_deg)
            }
            (TrajectoryTarget::Star(_), None) => continue,
        };
        if alt <= config.horizon.trajectory {
            continue;
        }
        let Some(point) = project(az, alt, config) else {
            continue;
        };
        path.push(point);
        if minutes % HOUR_LABEL_EVERY_MINUTES == 0 {
            labels.push(HourLabel {
                point,
                label: format!("{}h", minutes / 60),
            });
        }
    }

    let trajectory = Trajectory {
        points: path.into_points(),
        labels,
    };
    debug!(
        "Trajectory: {} samples, {} above horizon",
        samples,
        trajectory.vertex_count()
    );
    Ok(trajectory)
}

/// Resolve `ident` and sample its trajectory; unknown identifiers give an
/// empty trajectory.
#[allow(clippy::too_many_arguments)]
pub fn sample_trajectory_for<E, Tz>(
    ident: &str,
    catalog: &StarCatalog,
    ephemeris: &E,
    lat_deg: f64,
    lon_deg: f64,
    date: NaiveDate,
    tz: &Tz,
    config: &ViewConfig,
) -> SkyResult<Trajectory>
where
    E: Ephemeris + ?Sized,
    Tz: TimeZone,
{
    match resolve_target(ident, catalog) {
        Some(target) => {
            sample_trajectory(target, catalog, ephemeris, lat_deg, lon_deg, date, tz, config)
        }
        None => {
            debug!("Trajectory target '{}' not found", ident);
            Ok(Trajectory::default())
        }
    }
}
