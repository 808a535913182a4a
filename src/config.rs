use std::fs;
use std::path::Path;

use nalgebra::Point3;
use serde::Deserialize;
use thiserror::Error;

/// Scenario problems caught before any simulation runs. None of these are
/// recoverable; the caller reports them and exits.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("orbit {name:?}: semi-major axis must be positive, got {value}")]
    NonPositiveAxis { name: String, value: f64 },
    #[error("orbit {name:?}: eccentricity must lie in [0, 1), got {value}")]
    EccentricityOutOfRange { name: String, value: f64 },
    #[error("orbit {name:?}: ring and tube radii must be positive")]
    NonPositiveRing { name: String },
    #[error("orbit {name:?}: give either semimajor_axis or ring_radius, not both")]
    AmbiguousShape { name: String },
    #[error("orbit {name:?}: no shape given (semimajor_axis or ring_radius)")]
    MissingShape { name: String },
    #[error("orbit {name:?}: debris_speed range must be ordered low to high")]
    BadSpeedRange { name: String },
    #[error("orbit {name:?}: debris_count is set but debris_speed is missing")]
    MissingSpeedRange { name: String },
    #[error("orbit {name:?}: bad color tag {tag:?}, expected six hex digits")]
    BadColor { name: String, tag: String },
    #[error("trail_length must be positive")]
    NonPositiveTrailBound,
    #[error("frame_step must be positive, got {0}")]
    NonPositiveFrameStep(f64),
    #[error("capture_radius must be positive when sweepers are defined")]
    NonPositiveCaptureRadius,
}

/// One orbit family as written in a scenario file. Shape is either a conic
/// (`semimajor_axis` and friends) or a debris ring (`ring_radius` and
/// `tube_radius`); population fields are all optional.
#[derive(Debug, Clone, Deserialize)]
pub struct OrbitConfig {
    pub name: String,
    pub color: String,
    // Conic shape
    pub semimajor_axis: Option<f64>,
    #[serde(default)]
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination_deg: f64,
    pub axial_tilt_deg: Option<f64>,
    // Ring shape
    pub ring_radius: Option<f64>,
    pub tube_radius: Option<f64>,
    // Population
    pub orbiter_speed: Option<f64>,
    pub sweeper_speed: Option<f64>,
    pub sweeper_color: Option<String>,
    #[serde(default)]
    pub debris_count: usize,
    pub debris_speed: Option<[f64; 2]>,
}

/// A whole scenario file: global knobs plus its `[[orbit]]` tables.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    pub capture_radius: Option<f64>,
    pub trail_length: usize,
    #[serde(default = "default_frame_step")]
    pub frame_step: f64,
    /// Total frames to run; absent means run indefinitely.
    pub frames: Option<u64>,
    #[serde(rename = "orbit")]
    pub orbits: Vec<OrbitConfig>,
}

fn default_frame_step() -> f64 {
    1.0
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str(text)?)
    }
}

/// Parses a six-digit hex color tag into normalized RGB.
pub fn parse_color(name: &str, tag: &str) -> Result<Point3<f32>, ConfigurationError> {
    let bad = || ConfigurationError::BadColor {
        name: name.to_owned(),
        tag: tag.to_owned(),
    };
    if tag.len() != 6 || !tag.is_ascii() {
        return Err(bad());
    }
    let r = u8::from_str_radix(&tag[0..2], 16).map_err(|_| bad())?;
    let g = u8::from_str_radix(&tag[2..4], 16).map_err(|_| bad())?;
    let b = u8::from_str_radix(&tag[4..6], 16).map_err(|_| bad())?;

    Ok(Point3::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
    ))
}
