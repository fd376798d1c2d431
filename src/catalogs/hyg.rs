//! Reader for the HYG star database (CSV).
//!
//! HYG merges Hipparcos, Yale Bright Star and Gliese into one table of about
//! 120 000 stars. Version 4.x can be downloaded from
//! <https://github.com/astronexus/HYG-Database>; this module only reads a
//! local copy.
//!
//! Columns are located by header name, so extra or reordered columns are
//! fine. Only `id`, `ra` and `dec` are required.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

/// One raw row of the HYG table, before conversion to [`Star`](crate::Star).
#[derive(Debug, Clone, PartialEq)]
pub struct HygStar {
    pub id: u64,
    pub hip: Option<u32>,
    pub proper: Option<String>,
    pub ra_hours: f64,
    pub dec_deg: f64,
    pub mag: Option<f64>,
    pub color_index: Option<f64>,
    pub con: Option<String>,
    /// Distance in parsecs as stored in HYG.
    pub dist_pc: Option<f64>,
    pub spect: Option<String>,
}

struct Columns {
    id: usize,
    hip: Option<usize>,
    proper: Option<usize>,
    ra: usize,
    dec: usize,
    mag: Option<usize>,
    ci: Option<usize>,
    con: Option<usize>,
    dist: Option<usize>,
    spect: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> anyhow::Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).with_context(|| format!("HYG header is missing column '{name}'"))
        };
        Ok(Self {
            id: require("id")?,
            hip: find("hip"),
            proper: find("proper"),
            ra: require("ra")?,
            dec: require("dec")?,
            mag: find("mag"),
            ci: find("ci"),
            con: find("con"),
            dist: find("dist"),
            spect: find("spect"),
        })
    }
}

/// Read a HYG CSV file from disk.
pub fn read_hyg_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<HygStar>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening HYG catalog {}", path.display()))?;
    info!("Loading HYG catalog from {}", path.display());
    read_hyg(file)
}

/// Read HYG CSV data from any reader.
///
/// Rows whose id or position cannot be parsed are skipped.
pub fn read_hyg<R: Read>(reader: R) -> anyhow::Result<Vec<HygStar>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let cols = Columns::from_headers(rdr.headers()?)?;

    let mut stars = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        match parse_row(&record, &cols) {
            Some(star) => stars.push(star),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!("Skipped {} malformed HYG rows", skipped);
    }
    info!("Read {} HYG rows", stars.len());
    Ok(stars)
}

fn parse_row(record: &csv::StringRecord, cols: &Columns) -> Option<HygStar> {
    let field = |idx: Option<usize>| {
        idx.and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };
    let number = |idx: Option<usize>| field(idx).and_then(|s| s.parse::<f64>().ok());

    Some(HygStar {
        id: field(Some(cols.id))?.parse().ok()?,
        // Some exports write Hipparcos numbers as floats ("32349.0")
        hip: field(cols.hip).and_then(|s| {
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|v| v as u32))
        }),
        proper: field(cols.proper).map(str::to_string),
        ra_hours: number(Some(cols.ra))?,
        dec_deg: number(Some(cols.dec))?,
        mag: number(cols.mag),
        color_index: number(cols.ci),
        con: field(cols.con).map(str::to_string),
        dist_pc: number(cols.dist),
        spect: field(cols.spect).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
id,hip,hd,proper,ra,dec,dist,mag,ci,con,spect
0,,,Sol,0.000000,0.000000,0.0000,-26.700,0.656,,G2V
32263,32349,48915,Sirius,6.752481,-16.716116,2.6371,-1.440,0.009,CMa,A0m...
27919,27989,39801,Betelgeuse,5.919529,7.407063,152.6718,0.450,1.500,Ori,M2Ib
99999,,,,bad,12.0,10,5.0,,,
118000,,,,12.000000,-5.000000,100000.0000,9.100,,Vir,
";

    #[test]
    fn reads_columns_by_header_name() {
        let rows = read_hyg(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 4, "malformed RA row should be skipped");

        let sirius = &rows[1];
        assert_eq!(sirius.id, 32263);
        assert_eq!(sirius.hip, Some(32349));
        assert_eq!(sirius.proper.as_deref(), Some("Sirius"));
        assert!((sirius.ra_hours - 6.752481).abs() < 1e-9);
        assert_eq!(sirius.mag, Some(-1.44));
        assert_eq!(sirius.con.as_deref(), Some("CMa"));
        assert_eq!(sirius.spect.as_deref(), Some("A0m..."));

        let faint = &rows[3];
        assert_eq!(faint.hip, None);
        assert_eq!(faint.proper, None);
        assert_eq!(faint.spect, None);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let data = "id,hip,dec\n1,2,3\n";
        assert!(read_hyg(data.as_bytes()).is_err());
    }
}
