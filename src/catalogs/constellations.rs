//! Constellation stick figures in Stellarium's `constellationship.fab` format.
//!
//! Each non-comment line reads
//!
//! ```text
//! <abbr> <num_segments> <hip_a1> <hip_b1> <hip_a2> <hip_b2> ...
//! ```
//!
//! where each pair of Hipparcos numbers is one line segment. The western sky
//! culture file lives in the Stellarium repository under
//! `skycultures/western/constellationship.fab`.

use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

/// One constellation figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Constellation {
    /// IAU abbreviation, e.g. "Ori".
    pub abbr: String,
    /// Human-readable name, e.g. "Orion".
    pub name: String,
    /// Line segments as pairs of Hipparcos numbers.
    pub segments: Vec<(u32, u32)>,
}

/// Parse a single figure line. Returns `None` for comments, blank lines and
/// lines that do not follow the format.
fn parse_constellation(line: &str) -> Option<Result<Constellation, String>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return Some(Err(format!("too few fields in '{line}'")));
    }
    let abbr = parts[0];
    let Ok(num_segments) = parts[1].parse::<usize>() else {
        return Some(Err(format!("{abbr}: bad segment count '{}'", parts[1])));
    };
    let hips: Result<Vec<u32>, _> = parts[2..].iter().map(|p| p.parse::<u32>()).collect();
    let hips = match hips {
        Ok(h) => h,
        Err(e) => return Some(Err(format!("{abbr}: {e}"))),
    };
    let Some(expected) = num_segments.checked_mul(2) else {
        return Some(Err(format!("{abbr}: segment count {num_segments} out of range")));
    };
    if hips.len() != expected {
        return Some(Err(format!(
            "{abbr}: expected {num_segments} segments, found {} star ids",
            hips.len()
        )));
    }
    let segments = hips.chunks_exact(2).map(|c| (c[0], c[1])).collect();
    Some(Ok(Constellation {
        abbr: abbr.to_string(),
        name: constellation_name(abbr).unwrap_or(abbr).to_string(),
        segments,
    }))
}

/// Load constellation figures from an in-memory string.
///
/// Malformed lines are skipped with a warning.
pub fn load_constellations(data: &str) -> Vec<Constellation> {
    data.lines()
        .filter_map(parse_constellation)
        .filter_map(|r| match r {
            Ok(c) => Some(c),
            Err(msg) => {
                warn!("Skipping constellation line: {}", msg);
                None
            }
        })
        .collect()
}

pub fn load_constellations_from_file<P: AsRef<Path>>(
    path: P,
) -> anyhow::Result<Vec<Constellation>> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading constellation figures {}", path.display()))?;
    let figures = load_constellations(&data);
    info!("Loaded {} constellation figures", figures.len());
    Ok(figures)
}

/// English display name for an IAU constellation abbreviation.
pub fn constellation_name(abbr: &str) -> Option<&'static str> {
    IAU_CONSTELLATIONS
        .iter()
        .find(|(a, _)| *a == abbr)
        .map(|(_, name)| *name)
}

const IAU_CONSTELLATIONS: [(&str, &str); 88] = [
    ("And", "Andromeda"),
    ("Ant", "Antlia"),
    ("Aps", "Apus"),
    ("Aqr", "Aquarius"),
    ("Aql", "Aquila"),
    ("Ara", "Ara"),
    ("Ari", "Aries"),
    ("Aur", "Auriga"),
    ("Boo", "Boötes"),
    ("Cae", "Caelum"),
    ("Cam", "Camelopardalis"),
    ("Cnc", "Cancer"),
    ("CVn", "Canes Venatici"),
    ("CMa", "Canis Major"),
    ("CMi", "Canis Minor"),
    ("Cap", "Capricornus"),
    ("Car", "Carina"),
    ("Cas", "Cassiopeia"),
    ("Cen", "Centaurus"),
    ("Cep", "Cepheus"),
    ("Cet", "Cetus"),
    ("Cha", "Chamaeleon"),
    ("Cir", "Circinus"),
    ("Col", "Columba"),
    ("Com", "Coma Berenices"),
    ("CrA", "Corona Australis"),
    ("CrB", "Corona Borealis"),
    ("Crv", "Corvus"),
    ("Crt", "Crater"),
    ("Cru", "Crux"),
    ("Cyg", "Cygnus"),
    ("Del", "Delphinus"),
    ("Dor", "Dorado"),
    ("Dra", "Draco"),
    ("Equ", "Equuleus"),
    ("Eri", "Eridanus"),
    ("For", "Fornax"),
    ("Gem", "Gemini"),
    ("Gru", "Grus"),
    ("Her", "Hercules"),
    ("Hor", "Horologium"),
    ("Hya", "Hydra"),
    ("Hyi", "Hydrus"),
    ("Ind", "Indus"),
    ("Lac", "Lacerta"),
    ("Leo", "Leo"),
    ("LMi", "Leo Minor"),
    ("Lep", "Lepus"),
    ("Lib", "Libra"),
    ("Lup", "Lupus"),
    ("Lyn", "Lynx"),
    ("Lyr", "Lyra"),
    ("Men", "Mensa"),
    ("Mic", "Microscopium"),
    ("Mon", "Monoceros"),
    ("Mus", "Musca"),
    ("Nor", "Norma"),
    ("Oct", "Octans"),
    ("Oph", "Ophiuchus"),
    ("Ori", "Orion"),
    ("Pav", "Pavo"),
    ("Peg", "Pegasus"),
    ("Per", "Perseus"),
    ("Phe", "Phoenix"),
    ("Pic", "Pictor"),
    ("Psc", "Pisces"),
    ("PsA", "Piscis Austrinus"),
    ("Pup", "Puppis"),
    ("Pyx", "Pyxis"),
    ("Ret", "Reticulum"),
    ("Sge", "Sagitta"),
    ("Sgr", "Sagittarius"),
    ("Sco", "Scorpius"),
    ("Scl", "Sculptor"),
    ("Sct", "Scutum"),
    ("Ser", "Serpens"),
    ("Sex", "Sextans"),
    ("Tau", "Taurus"),
    ("Tel", "Telescopium"),
    ("Tri", "Triangulum"),
    ("TrA", "Triangulum Australe"),
    ("Tuc", "Tucana"),
    ("UMa", "Ursa Major"),
    ("UMi", "Ursa Minor"),
    ("Vel", "Vela"),
    ("Vir", "Virgo"),
    ("Vol", "Volans"),
    ("Vul", "Vulpecula"),
];
