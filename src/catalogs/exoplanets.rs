//! Exoplanet host associations from the NASA Exoplanet Archive.
//!
//! Expected input is the CSV produced by the archive's TAP service for
//! `select pl_name,hostname,hip_name,sy_pnum from ps where default_flag=1`.
//! Lines starting with `#` are comments.
//!
//! Planets are grouped per host star. A host is matched to a catalog star by
//! Hipparcos number when the archive has one, otherwise by upper-cased
//! proper name.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::Star;

/// All known planets of one host star.
#[derive(Debug, Clone, PartialEq)]
pub struct ExoplanetHost {
    /// Upper-cased, trimmed host name used for name matching.
    pub host_key: String,
    pub hip: Option<u32>,
    /// Number of planets in the system, as reported by the archive.
    pub planet_count: u32,
    pub planet_names: Vec<String>,
}

/// Host lookup table keyed by Hipparcos number and by host name.
#[derive(Debug, Clone, Default)]
pub struct ExoplanetIndex {
    hosts: Vec<ExoplanetHost>,
    by_hip: HashMap<u32, usize>,
    by_name: HashMap<String, usize>,
}

impl ExoplanetIndex {
    /// Build the index from host records. Later duplicates of a Hipparcos
    /// number or host key do not override earlier ones.
    pub fn new(hosts: Vec<ExoplanetHost>) -> Self {
        let mut by_hip = HashMap::new();
        let mut by_name = HashMap::new();
        for (idx, host) in hosts.iter().enumerate() {
            if let Some(hip) = host.hip {
                by_hip.entry(hip).or_insert(idx);
            }
            by_name.entry(host.host_key.clone()).or_insert(idx);
        }
        Self {
            hosts,
            by_hip,
            by_name,
        }
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn hosts(&self) -> &[ExoplanetHost] {
        &self.hosts
    }

    /// Find the planetary system of a catalog star, if any.
    pub fn lookup(&self, star: &Star) -> Option<&ExoplanetHost> {
        let by_hip = star.hip.and_then(|hip| self.by_hip.get(&hip));
        let idx = by_hip.or_else(|| {
            star.proper
                .as_deref()
                .and_then(|name| self.by_name.get(&host_key(name)))
        })?;
        self.hosts.get(*idx)
    }
}

fn host_key(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Extract the numeric part of an archive designation such as "HIP 12345".
fn parse_hip_name(s: &str) -> Option<u32> {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Read and group the planet table from any reader.
pub fn read_exoplanets<R: Read>(reader: R) -> anyhow::Result<ExoplanetIndex> {
    let mut rdr = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.trim() == name);
    let pl_name = col("pl_name").context("exoplanet table is missing 'pl_name'")?;
    let hostname = col("hostname").context("exoplanet table is missing 'hostname'")?;
    let hip_name = col("hip_name");
    let sy_pnum = col("sy_pnum");

    let mut hosts: Vec<ExoplanetHost> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for result in rdr.records() {
        let record = result?;
        let Some(host) = record.get(hostname).map(str::trim).filter(|s| !s.is_empty()) else {
            continue;
        };
        let key = host_key(host);
        let idx = *slots.entry(key.clone()).or_insert_with(|| {
            hosts.push(ExoplanetHost {
                host_key: key,
                hip: None,
                planet_count: 0,
                planet_names: Vec::new(),
            });
            hosts.len() - 1
        });
        let entry = &mut hosts[idx];

        // First non-empty value wins for per-system fields
        if entry.hip.is_none() {
            entry.hip = hip_name.and_then(|i| record.get(i)).and_then(parse_hip_name);
        }
        if entry.planet_count == 0 {
            entry.planet_count = sy_pnum
                .and_then(|i| record.get(i))
                .and_then(|s| s.trim().parse::<f64>().ok())
                .map(|n| n as u32)
                .unwrap_or(0);
        }
        if let Some(name) = record.get(pl_name).map(str::trim).filter(|s| !s.is_empty()) {
            entry.planet_names.push(name.to_string());
        }
    }

    for host in &mut hosts {
        if host.planet_count == 0 {
            host.planet_count = host.planet_names.len() as u32;
        }
    }

    info!("Loaded {} exoplanet host systems", hosts.len());
    Ok(ExoplanetIndex::new(hosts))
}

pub fn read_exoplanets_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<ExoplanetIndex> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening exoplanet table {}", path.display()))?;
    read_exoplanets(file)
}
