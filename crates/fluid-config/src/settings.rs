//! Optional `fluid-sim.toml` settings (SPEC_FULL.md §2 "Configuration"):
//! non-spec-breaking tunables the CLI flags fall back to when omitted.
//! Mirrors `core-config`'s `ConfigFile`/`load_from`/`discover` shape:
//! tolerant deserialization (unknown fields ignored, parse failure falls
//! back to defaults rather than aborting startup) since none of these
//! settings are load-bearing for correctness.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SettingsFile {
    #[serde(default)]
    pub threads_count: Option<usize>,
    #[serde(default)]
    pub log_path: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub file: SettingsFile,
}

/// Prefer a local `fluid-sim.toml` before falling back to the platform
/// config directory, same preference order as `core-config::discover`.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("fluid-sim.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("fluid-sim").join("fluid-sim.toml");
    }
    PathBuf::from("fluid-sim.toml")
}

/// Load settings from `path`, or discover one if `None`. Missing or
/// unparseable files silently yield defaults — the TOML file only ever
/// supplies fallback values that an explicit CLI flag overrides, so a
/// bad settings file is not a startup-stopping configuration error.
pub fn load_from(path: Option<&Path>) -> Settings {
    let path = path.map(PathBuf::from).unwrap_or_else(discover);
    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str::<SettingsFile>(&contents) {
            Ok(file) => {
                tracing::debug!(target: "config", path = %path.display(), "loaded fluid-sim.toml");
                Settings { file }
            }
            Err(err) => {
                tracing::warn!(
                    target: "config",
                    path = %path.display(),
                    error = %err,
                    "failed to parse fluid-sim.toml, using defaults"
                );
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

impl Settings {
    pub fn threads_count_or(&self, default: usize) -> usize {
        self.file.threads_count.unwrap_or(default)
    }

    pub fn log_path_or(&self, default: &str) -> String {
        self.file.log_path.clone().unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_known_fields() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "threads_count = 4\nlog_path = \"/tmp/fluid.log\"").unwrap();
        let settings = load_from(Some(f.path()));
        assert_eq!(settings.threads_count_or(1), 4);
        assert_eq!(settings.log_path_or("default.log"), "/tmp/fluid.log");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = load_from(Some(Path::new("/nonexistent/fluid-sim.toml")));
        assert_eq!(settings.threads_count_or(3), 3);
    }

    #[test]
    fn malformed_file_yields_defaults_not_an_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "this is not valid toml =====").unwrap();
        let settings = load_from(Some(f.path()));
        assert_eq!(settings.threads_count_or(2), 2);
    }
}
