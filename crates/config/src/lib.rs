//! Configuration models and loaders for the astro dashboard.
//!
//! A configuration file names the external visualizer, the directory that receives
//! handoff files, and optional per-page input defaults.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable that overrides [`HandoffConfig::visualizer`].
pub const VISUALIZER_ENV: &str = "ASTRO_VISUALIZER";

/// Top-level configuration file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub handoff: HandoffConfig,
    #[serde(default)]
    pub pages: Vec<PageDefaults>,
}

impl AppConfig {
    /// Defaults configured for `page`, matched case-insensitively.
    pub fn page(&self, page: &str) -> Option<&PageDefaults> {
        self.pages
            .iter()
            .find(|p| p.page.eq_ignore_ascii_case(page))
    }

    /// Apply the environment override for the visualizer executable.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(path) = std::env::var_os(VISUALIZER_ENV).filter(|v| !v.is_empty()) {
            self.handoff.visualizer = PathBuf::from(path);
        }
        self
    }
}

/// Where handoff files go and which program consumes them.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HandoffConfig {
    #[serde(default = "default_visualizer")]
    pub visualizer: PathBuf,
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            visualizer: default_visualizer(),
            output_root: default_output_root(),
        }
    }
}

fn default_visualizer() -> PathBuf {
    PathBuf::from("love")
}

fn default_output_root() -> PathBuf {
    PathBuf::from("visual")
}

/// Input defaults for one calculator page.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct PageDefaults {
    pub page: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDefault>,
    #[serde(default)]
    pub scalars: BTreeMap<String, f64>,
}

impl PageDefaults {
    pub fn field(&self, key: &str) -> Option<FieldDefault> {
        self.fields.get(key).copied()
    }

    pub fn scalar(&self, key: &str) -> Option<f64> {
        self.scalars.get(key).copied()
    }
}

/// Default `coefficient × 10^exponent` for one scientific input.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct FieldDefault {
    pub coefficient: f64,
    pub exponent: i32,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load the application configuration from a TOML or YAML file.
pub fn load_app_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Load page defaults from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_page_defaults<P: AsRef<Path>>(path: P) -> Result<Vec<PageDefaults>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn toml_config_with_page_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("astro.toml");
        let mut file = File::create(&path).expect("create");
        writeln!(
            file,
            r#"
[handoff]
visualizer = "/opt/love/bin/love"

[[pages]]
page = "roche"
fields.primary_mass = {{ coefficient = 1.898, exponent = 27 }}

[[pages]]
page = "orbit"
scalars.eccentricity = 0.0934
"#
        )
        .expect("write");

        let config = load_app_config(&path).expect("config");
        assert_eq!(config.handoff.visualizer, PathBuf::from("/opt/love/bin/love"));
        assert_eq!(config.handoff.output_root, PathBuf::from("visual"));
        let roche = config.page("ROCHE").expect("roche page");
        assert_eq!(
            roche.field("primary_mass"),
            Some(FieldDefault {
                coefficient: 1.898,
                exponent: 27
            })
        );
        assert_eq!(config.page("orbit").and_then(|p| p.scalar("eccentricity")), Some(0.0934));
        assert!(config.page("parallax").is_none());
    }

    #[test]
    fn yaml_config_defaults_missing_sections() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("astro.yaml");
        std::fs::write(&path, "handoff:\n  output_root: out\n").expect("write");
        let config = load_app_config(&path).expect("config");
        assert_eq!(config.handoff.output_root, PathBuf::from("out"));
        assert_eq!(config.handoff.visualizer, PathBuf::from("love"));
        assert!(config.pages.is_empty());
    }

    #[test]
    fn page_defaults_directory_is_sorted() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("b.toml"), "page = \"gravity\"\n").expect("write");
        std::fs::write(dir.path().join("a.toml"), "page = \"escape\"\n").expect("write");
        std::fs::write(dir.path().join("notes.txt"), "ignored").expect("write");
        let pages = load_page_defaults(dir.path()).expect("pages");
        let names: Vec<_> = pages.iter().map(|p| p.page.as_str()).collect();
        assert_eq!(names, ["escape", "gravity"]);
    }

    #[test]
    fn malformed_toml_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[handoff\n").expect("write");
        assert!(matches!(load_app_config(&path), Err(ConfigError::Toml(_))));
    }
}
