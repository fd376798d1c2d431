//! Star color from the spectral classification string.
//!
//! Each class letter has an anchor color; the subclass digit blends toward
//! the next cooler class (`G5` sits halfway between G and K). Channels are
//! truncated to integers after blending.

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Anchor colors in temperature order, hottest first. `Z` is a terminal
/// anchor for the coolest end of M.
pub const SPECTRAL_ANCHORS: [(char, Rgb); 8] = [
    ('O', Rgb::new(155, 176, 255)),
    ('B', Rgb::new(170, 191, 255)),
    ('A', Rgb::new(248, 247, 255)),
    ('F', Rgb::new(255, 244, 234)),
    ('G', Rgb::new(255, 242, 161)),
    ('K', Rgb::new(255, 204, 111)),
    ('M', Rgb::new(255, 90, 90)),
    ('Z', Rgb::new(255, 50, 50)),
];

/// Class used when the string names no known class letter.
const DEFAULT_CLASS: usize = 2; // 'A'

/// Map a spectral type such as `"G2V"` or `"k5iii"` to a color.
///
/// The first recognized class letter and the first digit anywhere in the
/// string are used. An unrecognized class defaults to A, a missing digit to
/// 0. An empty string is white.
pub fn spectral_to_color(spect: &str) -> Rgb {
    let spect = spect.trim();
    if spect.is_empty() {
        return Rgb::WHITE;
    }
    let upper = spect.to_uppercase();

    let idx = upper
        .chars()
        .find_map(|c| SPECTRAL_ANCHORS.iter().position(|(l, _)| *l == c))
        .unwrap_or(DEFAULT_CLASS);
    let digit = upper
        .chars()
        .find_map(|c| c.to_digit(10))
        .unwrap_or(0);

    let current = SPECTRAL_ANCHORS[idx].1;
    let Some(&(_, next)) = SPECTRAL_ANCHORS.get(idx + 1) else {
        return current;
    };
    let f = digit as f64 / 10.0;
    let blend = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f) as u8;
    Rgb::new(
        blend(current.r, next.r),
        blend(current.g, next.g),
        blend(current.b, next.b),
    )
}

/// Color for an optional spectral type; missing types are white.
pub fn spectral_color_or_white(spect: Option<&str>) -> Rgb {
    spect.map_or(Rgb::WHITE, spectral_to_color)
}
