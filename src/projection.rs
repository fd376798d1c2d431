//! Horizontal coordinates to 2D view-space coordinates.
//!
//! Panoramic: x is azimuth relative to the view center, wrapped into
//! `[-180, 180)`; y is altitude. Zenithal: polar plot with the zenith at the
//! origin, radius `90 - alt`, North up (+y) and East right (+x).

use crate::config::{ViewConfig, ViewMode};
use crate::coords::wrap_degrees;

/// A position in view space. Units are degrees in both 2D modes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewPoint {
    pub x: f64,
    pub y: f64,
}

/// Project an altitude/azimuth onto the 2D view.
///
/// Returns `None` in [`ViewMode::GalacticCube`], which does not use the 2D
/// projector.
pub fn project(az_deg: f64, alt_deg: f64, config: &ViewConfig) -> Option<ViewPoint> {
    match config.mode {
        ViewMode::Panoramic => Some(ViewPoint {
            x: (az_deg - config.view_center_az_deg + 180.0).rem_euclid(360.0) - 180.0,
            y: alt_deg,
        }),
        ViewMode::Zenithal => {
            let r = 90.0 - alt_deg;
            let (sin_az, cos_az) = az_deg.to_radians().sin_cos();
            Some(ViewPoint {
                x: r * sin_az,
                y: r * cos_az,
            })
        }
        ViewMode::GalacticCube => None,
    }
}

/// Inclusive axis range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn symmetric(half: f64) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        (self.min..=self.max).contains(&v)
    }
}

/// The visible extent of the 2D view.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewWindow {
    pub x: AxisRange,
    pub y: AxisRange,
}

/// Zenithal plots show slightly past the horizon circle (r = 90).
const ZENITHAL_HALF_EXTENT: f64 = 100.0;

/// Axis ranges of the 2D view, `None` for the galactic cube.
pub fn view_window(config: &ViewConfig) -> Option<ViewWindow> {
    match config.mode {
        ViewMode::Panoramic => Some(ViewWindow {
            x: AxisRange::symmetric(config.field_of_view_deg),
            y: AxisRange { min: 0.0, max: 90.0 },
        }),
        ViewMode::Zenithal => Some(ViewWindow {
            x: AxisRange::symmetric(ZENITHAL_HALF_EXTENT),
            y: AxisRange::symmetric(ZENITHAL_HALF_EXTENT),
        }),
        ViewMode::GalacticCube => None,
    }
}

/// A labelled tick on the panoramic x axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisTick {
    pub x: f64,
    pub label: String,
}

const TICK_OFFSETS: [f64; 7] = [-135.0, -90.0, -45.0, 0.0, 45.0, 90.0, 135.0];

/// Compass ticks for the panoramic x axis, relative to the view center.
/// Empty for the other modes.
pub fn panoramic_ticks(config: &ViewConfig) -> Vec<AxisTick> {
    if config.mode != ViewMode::Panoramic {
        return Vec::new();
    }
    TICK_OFFSETS
        .iter()
        .map(|&x| AxisTick {
            x,
            label: cardinal_label(config.view_center_az_deg + x),
        })
        .collect()
}

/// Compass point for an azimuth, or the azimuth itself when it is not one
/// of the eight principal directions. The azimuth is rounded to the whole
/// degree.
pub fn cardinal_label(az_deg: f64) -> String {
    let az = wrap_degrees(az_deg.round()) as u32 % 360;
    match az {
        0 => "N".to_string(),
        45 => "NE".to_string(),
        90 => "E".to_string(),
        135 => "SE".to_string(),
        180 => "S".to_string(),
        225 => "SW".to_string(),
        270 => "W".to_string(),
        315 => "NW".to_string(),
        other => format!("{other}°"),
    }
}
