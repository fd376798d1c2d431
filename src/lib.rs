//! # skychart
//!
//! Coordinate transformation and visibility pipeline for a **real-time sky chart**.
//!
//! Given an observer's location, a UTC instant and a view configuration, `skychart`
//! computes which stars, planets and deep-sky objects are visible and where they land
//! on a 2D chart (panoramic or zenithal) or inside a 3D galaxy-aligned cube.
//!
//! ## Features
//!
//! - **Horizontal coordinates** — RA/Dec to altitude/azimuth with a linear sidereal-time
//!   model, batched over precomputed catalog columns
//! - **Two chart projections** — panoramic strip centered on any azimuth, or a polar
//!   zenithal plot
//! - **Galactic cube** — light-year positions in the galactic frame, recentered on any star
//! - **Visibility and styling** — magnitude/horizon filtering, spectral-class colors,
//!   brightness-scaled marker sizes
//! - **Trajectories** — 24-hour path of a star or planet with seam breaks and hour marks
//! - **Local catalogs** — HYG stars, Stellarium constellation figures, NASA exoplanet hosts
//!
//! ## Example
//!
//! ```no_run
//! use chrono::{FixedOffset, TimeZone, Utc};
//! use skychart::{
//!     render_frame, Body, BodyPosition, CatalogPaths, CatalogStore, Ephemeris, Frame,
//!     Observer, SkyResult, ViewConfig, ViewMode,
//! };
//!
//! // Wrap your ephemeris library of choice
//! struct MyEphemeris;
//! impl Ephemeris for MyEphemeris {
//!     fn position(&self, _observer: &Observer, _body: Body) -> SkyResult<BodyPosition> {
//!         unimplemented!()
//!     }
//! }
//!
//! // Load catalogs once per session
//! let store = CatalogStore::load(&CatalogPaths::default()).unwrap();
//!
//! let observer = Observer::new(
//!     -34.9214,
//!     -57.9546,
//!     Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
//! )
//! .unwrap();
//! let tz = FixedOffset::west_opt(3 * 3600).unwrap();
//!
//! let config = ViewConfig {
//!     mode: ViewMode::Zenithal,
//!     magnitude_limit: 5.0,
//!     show_constellations: true,
//!     selected: Some("Sirius".to_string()),
//!     ..Default::default()
//! };
//!
//! if let Frame::Sky(sky) = render_frame(&store, &observer, &tz, &config, &MyEphemeris).unwrap() {
//!     println!("{} stars visible", sky.stars.len());
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. **Catalog store** — stars are loaded once, ranked by brightness, and their
//!    RA/Dec trigonometry is precomputed into columns
//! 2. **Coordinate math** — the observer fixes latitude and local sidereal time; every
//!    star is converted to altitude/azimuth in one pass over the columns
//! 3. **Projection** — altitude/azimuth to view coordinates for the active mode
//! 4. **Visibility** — horizon and magnitude cuts, color by spectral class, size by
//!    magnitude headroom
//! 5. **Overlays** — planets, constellation figures, deep-sky markers, reference lines
//!    and the selected object's trajectory
//!
//! The galactic cube bypasses steps 2-3: positions come from the galactic Cartesian
//! transform, translated so the selected star sits at the origin.
//!
//! Precision is that of the simplified sidereal-time model: no refraction, nutation
//! or precession.
//!

/// Local catalog files: HYG, constellation figures, exoplanets, deep sky
pub mod catalogs;
pub mod config;
pub mod coords;
pub mod ephemeris;
pub mod error;
pub mod frame;
pub mod galactic;
pub mod grid;
pub mod observer;
pub mod projection;
pub mod spectral;
pub mod star;
pub mod starcatalog;
pub mod tooltip;
pub mod trajectory;
pub mod visibility;

pub use catalogs::{CatalogPaths, CatalogStore};
pub use config::{HorizonThresholds, ViewConfig, ViewMode};
pub use coords::{equatorial_to_horizontal, Horizontal, HorizontalBatch, HorizontalFrame};
pub use ephemeris::{Body, BodyPosition, BodyStyle, Ephemeris};
pub use error::{SkyError, SkyResult};
pub use frame::{render_frame, CubeFrame, Frame, RenderPoint, SkyFrame};
pub use galactic::{
    celestial_to_cartesian, celestial_to_galactic_cartesian, translate_universe,
    TranslatedUniverse,
};
pub use grid::{reference_line, ReferenceLineKind};
pub use observer::Observer;
pub use projection::{project, ViewPoint};
pub use spectral::{spectral_to_color, Rgb};
pub use star::*;
pub use starcatalog::*;
pub use tooltip::Tooltip;
pub use trajectory::{
    resolve_target, sample_trajectory, Trajectory, TrajectoryPoint, TrajectoryTarget,
};
pub use visibility::{filter_visible_bodies, filter_visible_stars, VisibleBody, VisibleStar};

// Commonly used types
pub type Vector3 = nalgebra::Vector3<f64>;
