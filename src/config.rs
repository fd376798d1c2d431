//! View configuration.
//!
//! A [`ViewConfig`] is a plain value: build one with struct-update syntax
//! from the defaults and hand it to the pipeline. Nothing in the crate
//! mutates it.
//!
//! ```
//! use skychart::{ViewConfig, ViewMode};
//!
//! let config = ViewConfig {
//!     mode: ViewMode::Zenithal,
//!     magnitude_limit: 5.0,
//!     show_constellations: true,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{SkyError, SkyResult};

/// How positions are laid out in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewMode {
    /// Azimuth on x (relative to the view center), altitude on y.
    #[default]
    Panoramic,
    /// Polar plot around the zenith; radius is `90 - altitude`.
    Zenithal,
    /// 3D galaxy-aligned cube around a chosen star.
    GalacticCube,
}

/// Altitude cut-offs (degrees) below which an entity is not drawn.
///
/// Slightly negative values keep objects that are just setting, so they do
/// not blink out at the horizon line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HorizonThresholds {
    pub stars: f64,
    pub bodies: f64,
    pub trajectory: f64,
    pub deep_sky: f64,
    pub reference_lines: f64,
    /// Constellation endpoints are kept well below the horizon so that
    /// figures straddling it are not cut in half.
    pub constellation_anchor: f64,
}

impl Default for HorizonThresholds {
    fn default() -> Self {
        Self {
            stars: -1.0,
            bodies: -5.0,
            trajectory: 0.0,
            deep_sky: 0.0,
            reference_lines: -5.0,
            constellation_anchor: -20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewConfig {
    pub mode: ViewMode,
    /// Azimuth at the center of the panoramic view, `[0, 360)`.
    pub view_center_az_deg: f64,
    /// Half-width of the panoramic view in degrees of azimuth.
    pub field_of_view_deg: f64,
    /// Faintest magnitude shown.
    pub magnitude_limit: f64,
    /// Base marker size added to the brightness term.
    pub point_scale: f64,
    /// Half-extent of the galactic cube in light-years.
    pub cube_radius_ly: f64,
    pub show_constellations: bool,
    pub show_grid: bool,
    pub show_planets: bool,
    pub show_messier: bool,
    pub show_images: bool,
    pub show_exoplanets: bool,
    /// Selected entity: a body name, a star id or a star name. Drives the
    /// trajectory in 2D and the cube center in 3D.
    pub selected: Option<String>,
    pub horizon: HorizonThresholds,
    /// Marker size gained per magnitude of headroom below the limit.
    pub size_coefficient: f64,
    pub trajectory_step_minutes: u32,
    /// Horizontal jump (view units) that splits a panoramic polyline.
    pub seam_break_threshold: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            mode: ViewMode::Panoramic,
            view_center_az_deg: 0.0,
            field_of_view_deg: 100.0,
            magnitude_limit: 3.2,
            point_scale: 1.0,
            cube_radius_ly: 500.0,
            show_constellations: false,
            show_grid: false,
            show_planets: false,
            show_messier: false,
            show_images: false,
            show_exoplanets: false,
            selected: None,
            horizon: HorizonThresholds::default(),
            size_coefficient: 0.3,
            trajectory_step_minutes: 10,
            seam_break_threshold: 100.0,
        }
    }
}

impl ViewConfig {
    /// Reject tunables that would make the pipeline meaningless.
    pub fn validate(&self) -> SkyResult<()> {
        if self.trajectory_step_minutes == 0 {
            return Err(SkyError::invalid_config("trajectory step must be positive"));
        }
        let positive = [
            ("field of view", self.field_of_view_deg),
            ("point scale", self.point_scale),
            ("cube radius", self.cube_radius_ly),
            ("seam break threshold", self.seam_break_threshold),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SkyError::invalid_config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.magnitude_limit.is_finite() || !self.size_coefficient.is_finite() {
            return Err(SkyError::invalid_config(
                "magnitude limit and size coefficient must be finite",
            ));
        }
        if self.size_coefficient < 0.0 {
            return Err(SkyError::invalid_config(format!(
                "size coefficient must not be negative, got {}",
                self.size_coefficient
            )));
        }
        if !self.view_center_az_deg.is_finite() {
            return Err(SkyError::invalid_config("view center must be finite"));
        }
        Ok(())
    }

    /// The selected entity, ignoring blank strings.
    pub fn selection(&self) -> Option<&str> {
        self.selected
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
