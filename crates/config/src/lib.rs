//! Test-case manifests and their loaders.
//!
//! A manifest names one reference trajectory and the computed series to compare against
//! it. Manifests are TOML (one case per file) or YAML (one case or a list of cases).
//! Relative series paths are resolved against the directory holding the manifest.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use regress_core::time::TimeAxis;
use serde::Deserialize;
use thiserror::Error;

/// One regression test case.
#[derive(Debug, Deserialize, Clone)]
pub struct CaseConfig {
    pub name: String,
    #[serde(default)]
    pub time_axis: TimeAxisConfig,
    pub reference: SeriesConfig,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
    /// Compare the scalar chart channels in addition to position, velocity and attitude.
    #[serde(default = "default_true")]
    pub channels: bool,
    /// Render PNG charts of the per-sample differences.
    #[serde(default)]
    pub charts: bool,
    /// Fail instead of truncating when series lengths differ.
    #[serde(default)]
    pub strict_length: bool,
}

/// A series file taking part in a comparison.
#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub file: PathBuf,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl SeriesConfig {
    /// Explicit label, or the file stem when none was given.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self
                .file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("series")
                .to_string(),
        }
    }
}

/// Column layout of a series file.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutConfig {
    /// Elements, Cartesian state, quaternion and rates (27 columns after time).
    #[default]
    Full,
    /// Local-frame position and velocity only (6 columns after time).
    LocalFrame,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeAxisConfig {
    #[default]
    Seconds,
    Hours,
    Days,
}

impl From<TimeAxisConfig> for TimeAxis {
    fn from(value: TimeAxisConfig) -> Self {
        match value {
            TimeAxisConfig::Seconds => TimeAxis::Seconds,
            TimeAxisConfig::Hours => TimeAxis::Hours,
            TimeAxisConfig::Days => TimeAxis::Days,
        }
    }
}

impl CaseConfig {
    /// Resolve relative paths: series against `base`, the reference against
    /// `reference_dir` when given, otherwise against `base`.
    pub fn resolve_paths(&mut self, base: &Path, reference_dir: Option<&Path>) {
        let reference_base = reference_dir.unwrap_or(base);
        if self.reference.file.is_relative() {
            self.reference.file = reference_base.join(&self.reference.file);
        }
        for series in &mut self.series {
            if series.file.is_relative() {
                series.file = base.join(&series.file);
            }
        }
    }

    /// Check the case is runnable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::Invalid {
            case: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("case name must not be empty"));
        }
        if self.series.is_empty() {
            return Err(invalid("at least one series must be compared"));
        }
        let mut labels = HashSet::new();
        for series in &self.series {
            if !labels.insert(series.display_label()) {
                return Err(ConfigError::Invalid {
                    case: self.name.clone(),
                    reason: format!("duplicate series label '{}'", series.display_label()),
                });
            }
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

/// Errors that can occur while loading manifests.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid case '{case}': {reason}")]
    Invalid { case: String, reason: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Load every case from a manifest file or a directory of manifests.
///
/// Directories are scanned for `*.toml`, `*.yaml` and `*.yml` files in name order. The
/// first manifest that fails to load aborts the whole call; use [`manifest_files`] with
/// [`load_manifest`] to keep going past broken manifests.
pub fn load_cases<P: AsRef<Path>>(
    path: P,
    reference_dir: Option<&Path>,
) -> Result<Vec<CaseConfig>, ConfigError> {
    let mut cases = Vec::new();
    for file in manifest_files(path)? {
        cases.extend(load_manifest(&file, reference_dir)?);
    }
    Ok(cases)
}

/// Load, resolve and validate the cases of a single manifest file.
pub fn load_manifest<P: AsRef<Path>>(
    file: P,
    reference_dir: Option<&Path>,
) -> Result<Vec<CaseConfig>, ConfigError> {
    let file = file.as_ref();
    let base = file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut cases = Vec::new();
    for mut case in load_records::<CaseConfig>(file)? {
        case.resolve_paths(&base, reference_dir);
        case.validate()?;
        cases.push(case);
    }
    Ok(cases)
}

/// Manifest files under `path`: the manifests of a directory in name order, or the path
/// itself when it is not a directory.
pub fn manifest_files<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>, ConfigError> {
    let path = path.as_ref();
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut entries: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_extension(path, &["toml", "yaml", "yml"]))
        .collect();
    entries.sort();
    Ok(entries)
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if has_extension(path, &["toml"]) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(match serde_yaml::from_reader(reader)? {
            OneOrMany::Many(records) => records,
            OneOrMany::One(record) => vec![record],
        })
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
