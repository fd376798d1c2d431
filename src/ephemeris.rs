//! Solar-system bodies.
//!
//! Positions come from an external ephemeris behind the [`Ephemeris`]
//! trait; the crate itself carries no planetary theory. Per-body display
//! style is a static table.

use crate::error::SkyResult;
use crate::Observer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }

    /// Case-insensitive lookup by English name.
    pub fn from_name(name: &str) -> Option<Body> {
        let name = name.trim();
        Body::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    pub fn style(&self) -> &'static BodyStyle {
        &BODY_STYLES[*self as usize]
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Apparent place of a body for one observer and instant.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPosition {
    pub body: Body,
    pub alt_deg: f64,
    pub az_deg: f64,
    pub magnitude: f64,
    /// Illuminated fraction in percent (Moon).
    pub phase_percent: Option<f64>,
    /// IAU abbreviation of the constellation the body is in.
    pub constellation: Option<String>,
}

/// Source of solar-system body positions.
///
/// Implementations wrap whatever ephemeris library the application uses.
/// A failure should be reported as
/// [`SkyError::UpstreamUnavailable`](crate::SkyError::UpstreamUnavailable).
pub trait Ephemeris {
    fn position(&self, observer: &Observer, body: Body) -> SkyResult<BodyPosition>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn position(&self, observer: &Observer, body: Body) -> SkyResult<BodyPosition> {
        (**self).position(observer, body)
    }
}

/// Which extra fields a body's tooltip shows besides the magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipTemplate {
    /// Constellation and the light travel time from the Sun.
    Solar,
    /// Illuminated fraction.
    Lunar,
    /// Magnitude only.
    Planet,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyStyle {
    /// `#rrggbb`
    pub color: &'static str,
    pub size: f64,
    pub tooltip: TooltipTemplate,
}

/// Display style per body, indexed in [`Body::ALL`] order.
pub const BODY_STYLES: [BodyStyle; 9] = [
    BodyStyle { color: "#FFCC33", size: 24.0, tooltip: TooltipTemplate::Solar },
    BodyStyle { color: "#FFFFFF", size: 22.0, tooltip: TooltipTemplate::Lunar },
    BodyStyle { color: "#adb5bd", size: 14.0, tooltip: TooltipTemplate::Planet },
    BodyStyle { color: "#ffd166", size: 18.0, tooltip: TooltipTemplate::Planet },
    BodyStyle { color: "#ef476f", size: 16.0, tooltip: TooltipTemplate::Planet },
    BodyStyle { color: "#a5d6f1", size: 20.0, tooltip: TooltipTemplate::Planet },
    BodyStyle { color: "#e9c46a", size: 18.0, tooltip: TooltipTemplate::Planet },
    BodyStyle { color: "#81dfd0", size: 14.0, tooltip: TooltipTemplate::Planet },
    BodyStyle { color: "#4361ee", size: 14.0, tooltip: TooltipTemplate::Planet },
];

/// Light travel time from the Sun, shown in the Sun's tooltip.
pub const SUN_LIGHT_TIME: &str = "8.3 light-minutes";
