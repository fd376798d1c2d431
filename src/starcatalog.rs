//! Immutable star table with precomputed columns for batch evaluation.
//!
//! `StarCatalog` is built once per session. Construction
//! 1. assigns brightness ranks (1 = brightest, ties share the lowest rank),
//! 2. precomputes RA in radians and sin/cos of declination for every star,
//! 3. builds lookup indices by id, Hipparcos number and name.
//!
//! Per-frame work then reduces to [`StarCatalog::horizontal`], which runs the
//! observer-dependent part of the transform over the precomputed columns.

use std::collections::HashMap;

use tracing::debug;

use crate::catalogs::hyg::HygStar;
use crate::coords::{EquatorialColumns, HorizontalBatch, HorizontalFrame};
use crate::star::{star_from_hyg, Star};

#[derive(Debug, Clone, Default)]
pub struct StarCatalog {
    stars: Vec<Star>,
    columns: EquatorialColumns,
    by_id: HashMap<u64, usize>,
    by_hip: HashMap<u32, usize>,
    by_name: HashMap<String, usize>,
}

impl StarCatalog {
    /// Build a catalog from owned stars. Ranks are (re)assigned here.
    pub fn new(mut stars: Vec<Star>) -> Self {
        assign_brightness_ranks(&mut stars);

        let columns =
            EquatorialColumns::from_hours_degrees(stars.iter().map(|s| (s.ra_hours, s.dec_deg)));

        let mut by_id = HashMap::with_capacity(stars.len());
        let mut by_hip = HashMap::new();
        let mut by_name = HashMap::new();
        for (idx, star) in stars.iter().enumerate() {
            by_id.entry(star.id).or_insert(idx);
            // First occurrence wins for duplicated Hipparcos entries
            if let Some(hip) = star.hip {
                by_hip.entry(hip).or_insert(idx);
            }
            by_name.entry(star.name.to_lowercase()).or_insert(idx);
            if let Some(proper) = &star.proper {
                by_name.entry(proper.to_lowercase()).or_insert(idx);
            }
        }

        Self {
            stars,
            columns,
            by_id,
            by_hip,
            by_name,
        }
    }

    /// Build a catalog from raw HYG rows, dropping rows that do not convert.
    pub fn from_hyg(rows: &[HygStar]) -> Self {
        let stars: Vec<Star> = rows.iter().filter_map(star_from_hyg).collect();
        debug!(
            "Converted {} of {} HYG rows to catalog stars",
            stars.len(),
            rows.len()
        );
        Self::new(stars)
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn get(&self, idx: usize) -> Option<&Star> {
        self.stars.get(idx)
    }

    /// Precomputed equatorial columns, index-aligned with [`Self::stars`].
    pub fn columns(&self) -> &EquatorialColumns {
        &self.columns
    }

    pub fn index_of_id(&self, id: u64) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn index_of_hip(&self, hip: u32) -> Option<usize> {
        self.by_hip.get(&hip).copied()
    }

    /// Case-insensitive lookup by display or proper name.
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }

    /// Resolve a selection identifier: a numeric catalog id first, then a name.
    pub fn resolve(&self, ident: &str) -> Option<usize> {
        let ident = ident.trim();
        ident
            .parse::<u64>()
            .ok()
            .and_then(|id| self.index_of_id(id))
            .or_else(|| self.index_of_name(ident))
    }

    /// Altitude/azimuth of every star, index-aligned with [`Self::stars`].
    pub fn horizontal(&self, frame: &HorizontalFrame) -> HorizontalBatch {
        frame.to_horizontal_batch(&self.columns)
    }
}

/// Rank stars by magnitude, ascending. Equal magnitudes share the lowest
/// rank of their group, so ranks can skip (1, 2, 2, 4).
fn assign_brightness_ranks(stars: &mut [Star]) {
    let mut order: Vec<usize> = (0..stars.len()).collect();
    order.sort_by(|&a, &b| stars[a].mag.total_cmp(&stars[b].mag));

    let mut prev: Option<(f64, u32)> = None;
    for (pos, &idx) in order.iter().enumerate() {
        let mag = stars[idx].mag;
        let rank = match prev {
            Some((prev_mag, prev_rank)) if prev_mag == mag => prev_rank,
            _ => pos as u32 + 1,
        };
        stars[idx].rank = rank;
        prev = Some((mag, rank));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Observer;
    use chrono::{TimeZone, Utc};

    fn star(id: u64, name: &str, ra_hours: f64, dec_deg: f64, mag: f64) -> Star {
        Star {
            id,
            hip: Some(id as u32 + 1000),
            proper: Some(name.to_string()),
            name: name.to_string(),
            ra_hours,
            dec_deg,
            mag,
            color_index: None,
            spectral: None,
            distance_ly: Some(10.0),
            constellation: None,
            rank: 0,
        }
    }

    #[test]
    fn ranks_share_ties() {
        let catalog = StarCatalog::new(vec![
            star(1, "a", 0.0, 0.0, 2.0),
            star(2, "b", 1.0, 0.0, 0.5),
            star(3, "c", 2.0, 0.0, 2.0),
            star(4, "d", 3.0, 0.0, 3.0),
        ]);
        let ranks: Vec<u32> = catalog.stars().iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![2, 1, 2, 4]);
    }

    #[test]
    fn resolves_by_id_then_name() {
        let catalog = StarCatalog::new(vec![
            star(7, "Sirius", 6.75, -16.7, -1.44),
            star(8, "Vega", 18.6, 38.8, 0.03),
        ]);
        assert_eq!(catalog.resolve("8"), Some(1));
        assert_eq!(catalog.resolve("sirius"), Some(0));
        assert_eq!(catalog.resolve(" VEGA "), Some(1));
        assert_eq!(catalog.resolve("Polaris"), None);
        assert_eq!(catalog.resolve("99"), None);
        assert_eq!(catalog.index_of_hip(1007), Some(0));
    }

    #[test]
    fn horizontal_is_index_aligned() {
        let catalog = StarCatalog::new(vec![
            star(7, "Sirius", 6.75, -16.7, -1.44),
            star(8, "Vega", 18.6, 38.8, 0.03),
        ]);
        let obs = Observer::new(
            -34.9214,
            -57.9546,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let batch = catalog.horizontal(&HorizontalFrame::new(&obs));
        assert_eq!(batch.len(), 2);
        let sirius = crate::equatorial_to_horizontal(6.75, -16.7, &obs);
        assert_eq!(batch.get(0), Some(sirius));
    }
}
