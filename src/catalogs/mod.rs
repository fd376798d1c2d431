//! Local catalog files and the per-session store built from them.
//!
//! Nothing here touches the network or caches to disk; the caller is
//! expected to have the files in place.

pub mod constellations;
pub mod deep_sky;
pub mod exoplanets;
pub mod hyg;

use std::path::PathBuf;

use tracing::{info, warn};

use crate::StarCatalog;
use constellations::{load_constellations_from_file, Constellation};
use exoplanets::{read_exoplanets_csv, ExoplanetIndex};

/// File locations of the catalogs loaded at session start.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPaths {
    /// HYG v4.x star table (CSV).
    pub hyg: PathBuf,
    /// Stellarium `constellationship.fab` figures.
    pub constellations: PathBuf,
    /// NASA Exoplanet Archive export. Optional: a missing file yields an
    /// empty index.
    pub exoplanets: PathBuf,
}

impl Default for CatalogPaths {
    fn default() -> Self {
        Self {
            hyg: PathBuf::from("data/hygdata_v41.csv"),
            constellations: PathBuf::from("data/constellationship.fab"),
            exoplanets: PathBuf::from("data/exoplanets.csv"),
        }
    }
}

/// Everything the pipeline reads from catalogs, loaded once per session.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    pub stars: StarCatalog,
    pub constellations: Vec<Constellation>,
    pub exoplanets: ExoplanetIndex,
}

impl CatalogStore {
    pub fn new(
        stars: StarCatalog,
        constellations: Vec<Constellation>,
        exoplanets: ExoplanetIndex,
    ) -> Self {
        Self {
            stars,
            constellations,
            exoplanets,
        }
    }

    /// Load all catalogs from disk.
    ///
    /// The star table and constellation figures are required. The exoplanet
    /// table is optional and falls back to an empty index with a warning.
    pub fn load(paths: &CatalogPaths) -> anyhow::Result<Self> {
        let rows = hyg::read_hyg_csv(&paths.hyg)?;
        let stars = StarCatalog::from_hyg(&rows);
        let constellations = load_constellations_from_file(&paths.constellations)?;
        let exoplanets = if paths.exoplanets.exists() {
            read_exoplanets_csv(&paths.exoplanets)?
        } else {
            warn!(
                "Exoplanet table {} not found; continuing without exoplanet data",
                paths.exoplanets.display()
            );
            ExoplanetIndex::default()
        };
        info!(
            "Catalog store ready: {} stars, {} constellations, {} exoplanet hosts",
            stars.len(),
            constellations.len(),
            exoplanets.len()
        );
        Ok(Self::new(stars, constellations, exoplanets))
    }
}
