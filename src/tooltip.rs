//! Structured hover text for rendered points.
//!
//! Tooltips are kept as a title plus labelled fields so the caller decides
//! the markup.

use crate::catalogs::constellations::constellation_name;
use crate::catalogs::exoplanets::ExoplanetHost;
use crate::ephemeris::{BodyPosition, TooltipTemplate, SUN_LIGHT_TIME};
use crate::Star;

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tooltip {
    pub title: String,
    pub fields: Vec<(String, String)>,
}

impl Tooltip {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, label: &str, value: impl Into<String>) -> Self {
        self.fields.push((label.to_string(), value.into()));
        self
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Star details: constellation, distance, spectral type, magnitude.
    pub fn for_star(star: &Star) -> Self {
        let con = star
            .constellation
            .as_deref()
            .map(|abbr| constellation_name(abbr).unwrap_or(abbr))
            .unwrap_or("?");
        let dist = star
            .distance_ly
            .map(|d| format!("{d:.1} ly"))
            .unwrap_or_else(|| "?".to_string());
        Self::new(&star.name)
            .field("Const", con)
            .field("Dist", dist)
            .field("Type", star.spectral.as_deref().unwrap_or("?"))
            .field("Mag", format!("{:.2}", star.mag))
    }

    /// Star details headed by the planet count and names of its system.
    pub fn for_exoplanet_host(star: &Star, host: &ExoplanetHost) -> Self {
        let star_tip = Self::for_star(star);
        let mut tip = Self::new(&star.name)
            .field("Planets", host.planet_count.to_string())
            .field("Names", host.planet_names.join(", "));
        tip.fields.extend(star_tip.fields);
        tip
    }

    pub fn for_body(position: &BodyPosition) -> Self {
        let body = position.body;
        let mag = format!("{:.1}", position.magnitude);
        let tip = Self::new(body.name());
        match body.style().tooltip {
            TooltipTemplate::Solar => {
                let con = position
                    .constellation
                    .as_deref()
                    .map(|abbr| constellation_name(abbr).unwrap_or(abbr))
                    .unwrap_or("?");
                tip.field("Const", con)
                    .field("Dist", SUN_LIGHT_TIME)
                    .field("Mag", mag)
            }
            TooltipTemplate::Lunar => {
                let illum = position
                    .phase_percent
                    .map(|p| format!("{p:.1}%"))
                    .unwrap_or_else(|| "?".to_string());
                tip.field("Illum", illum).field("Mag", mag)
            }
            TooltipTemplate::Planet => tip.field("Mag", mag),
        }
    }
}
