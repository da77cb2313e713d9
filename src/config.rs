use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use serde::Deserialize;

/// Which files are written at the end of a run.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<FACILITY>-videomaps.json` and `<FACILITY>.info`.
    #[default]
    Json,
    /// `<FACILITY>-videomaps.bin` and `<FACILITY>-manifest.bin`.
    Binary,
    Both,
}

impl OutputFormat {
    pub fn writes_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    pub fn writes_binary(&self) -> bool {
        matches!(self, OutputFormat::Binary | OutputFormat::Both)
    }
}

/// How GeoJSON files are found for the maps of the ARTCC definition.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// Walk the facility's video map directory and pick up every file the definition uses.
    #[default]
    Scan,
    /// Open `<id>.geojson` for every map of the definition; a missing file is an error.
    Direct,
}

/// What happens when a GeoJSON file cannot be read or decoded.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeometryErrorPolicy {
    /// Log a warning, skip the file and keep going.
    #[default]
    Warn,
    Abort,
}

/// What happens when two GeoJSON files resolve to the same map name.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// The file processed last replaces the earlier lines. A warning is logged.
    #[default]
    Overwrite,
    /// Lines of both files are kept. A warning is logged.
    Append,
    Abort,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub artccs_dir: PathBuf,
    pub video_maps_dir: PathBuf,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub traversal: Traversal,
    pub on_geometry_error: GeometryErrorPolicy,
    pub on_duplicate: DuplicatePolicy,
    /// Also write the aggregated lines as `<FACILITY>-videomaps.geojson`.
    pub dump_geojson: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            artccs_dir: PathBuf::from("ARTCCs"),
            video_maps_dir: PathBuf::from("VideoMaps"),
            output_dir: PathBuf::from("."),
            format: OutputFormat::default(),
            traversal: Traversal::default(),
            on_geometry_error: GeometryErrorPolicy::default(),
            on_duplicate: DuplicatePolicy::default(),
            dump_geojson: false,
        }
    }
}

impl Settings {
    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Err(anyhow!("Config file {} not found", path.display()));
        }
        let contents = read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
