//! Fixed deep-sky objects: a short Messier list for markers, and a few
//! objects with photographs that can be overlaid on the 2D chart.

/// A deep-sky object drawn as a labelled marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeepSkyObject {
    pub code: &'static str,
    pub ra_hours: f64,
    pub dec_deg: f64,
    pub name: &'static str,
}

/// A photograph placed at the object's position, sized in degrees of sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeepSkyImage {
    pub code: &'static str,
    pub ra_hours: f64,
    pub dec_deg: f64,
    pub url: &'static str,
    pub size_deg: f64,
}

pub const MESSIER_OBJECTS: [DeepSkyObject; 11] = [
    DeepSkyObject { code: "M31", ra_hours: 0.7123, dec_deg: 41.269, name: "Andromeda Galaxy" },
    DeepSkyObject { code: "M42", ra_hours: 5.5881, dec_deg: -5.391, name: "Orion Nebula" },
    DeepSkyObject { code: "M45", ra_hours: 3.7836, dec_deg: 24.11, name: "Pleiades" },
    DeepSkyObject { code: "M44", ra_hours: 8.6667, dec_deg: 19.67, name: "Beehive Cluster" },
    DeepSkyObject { code: "M13", ra_hours: 16.695, dec_deg: 36.46, name: "Great Hercules Cluster" },
    DeepSkyObject { code: "M8", ra_hours: 18.06, dec_deg: -24.38, name: "Lagoon Nebula" },
    DeepSkyObject { code: "M20", ra_hours: 18.04, dec_deg: -23.03, name: "Trifid Nebula" },
    DeepSkyObject { code: "M51", ra_hours: 13.498, dec_deg: 47.19, name: "Whirlpool Galaxy" },
    DeepSkyObject { code: "M104", ra_hours: 12.66, dec_deg: -11.62, name: "Sombrero Galaxy" },
    DeepSkyObject { code: "M7", ra_hours: 17.89, dec_deg: -34.82, name: "Ptolemy Cluster" },
    DeepSkyObject { code: "M6", ra_hours: 17.67, dec_deg: -32.22, name: "Butterfly Cluster" },
];

pub const DEEP_SKY_IMAGES: [DeepSkyImage; 5] = [
    DeepSkyImage {
        code: "M42",
        ra_hours: 5.588,
        dec_deg: -5.39,
        url: "https://upload.wikimedia.org/wikipedia/commons/thumb/f/f3/Orion_Nebula_-_Hubble_2006_mosaic_18000.jpg/600px-Orion_Nebula_-_Hubble_2006_mosaic_18000.jpg",
        size_deg: 3.0,
    },
    DeepSkyImage {
        code: "M31",
        ra_hours: 0.712,
        dec_deg: 41.26,
        url: "https://upload.wikimedia.org/wikipedia/commons/thumb/c/c2/M31_09-01-2011_%28C9.25%29.jpg/600px-M31_09-01-2011_%28C9.25%29.jpg",
        size_deg: 5.0,
    },
    DeepSkyImage {
        code: "M45",
        ra_hours: 3.783,
        dec_deg: 24.11,
        url: "https://upload.wikimedia.org/wikipedia/commons/thumb/4/4e/Pleiades_large.jpg/600px-Pleiades_large.jpg",
        size_deg: 4.0,
    },
    DeepSkyImage {
        code: "M104",
        ra_hours: 12.66,
        dec_deg: -11.62,
        url: "https://upload.wikimedia.org/wikipedia/commons/thumb/5/5e/M104_ngc4594_sombrero_galaxy_hi-res.jpg/600px-M104_ngc4594_sombrero_galaxy_hi-res.jpg",
        size_deg: 2.0,
    },
    DeepSkyImage {
        code: "M51",
        ra_hours: 13.49,
        dec_deg: 47.19,
        url: "https://upload.wikimedia.org/wikipedia/commons/thumb/d/db/Messier51_sRGB.jpg/600px-Messier51_sRGB.jpg",
        size_deg: 2.0,
    },
];
