use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::geometry::RadiusTableConfig;
use crate::types::TrackHit;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Write the JSON summary here instead of printing it.
    pub json_out: Option<PathBuf>,
}

/// Configuration of the `project_demo` binary.
#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    /// JSON hit dump with one hit list per track.
    pub hits_path: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub radius_table: RadiusTableConfig,
    #[serde(default)]
    pub verbosity: u8,
}

/// Hit dump format consumed by the demo: all tracks of one event.
#[derive(Clone, Debug, Deserialize)]
pub struct HitsFile {
    pub tracks: Vec<Vec<TrackHit>>,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

pub fn load_hits(path: &Path) -> Result<HitsFile, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read hits {}: {e}", path.display()))?;
    let hits: HitsFile = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse hits {}: {e}", path.display()))?;
    Ok(hits)
}

/// Pretty-prints a serializable value to disk.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

/// Reads the config path from the command line.
pub fn parse_cli(program: &str) -> Result<RuntimeConfig, String> {
    let mut args = env::args().skip(1);
    let Some(config_path) = args.next() else {
        return Err(format!("Usage: {program} <config.json>"));
    };
    load_config(Path::new(&config_path))
}
