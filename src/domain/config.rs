use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The configuration file looked for in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

/// Configuration for the people directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Where the directory is persisted.
    ///
    /// Relative paths are resolved against the working directory.
    data_file: PathBuf,

    /// Whether the menu waits for ENTER after each operation.
    pub pause: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            pause: default_pause(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Finds the configuration to use.
    ///
    /// An explicit path must exist and parse. Without one, [`DEFAULT_CONFIG_FILE`]
    /// in the working directory is used if present, and the defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, String> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            tracing::debug!("Loading config from {}", fallback.display());
            Self::load(fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the path of the persistence file.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Sets the path of the persistence file.
    pub fn set_data_file(&mut self, path: PathBuf) {
        self.data_file = path;
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("pessoas.json")
}

const fn default_pause() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_data_file")]
        data_file: PathBuf,

        #[serde(default = "default_pause")]
        pause: bool,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { data_file, pause } => Self { data_file, pause },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            data_file: config.data_file,
            pause: config.pause,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndata_file = \"people.json\"\npause = false\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.data_file(), Path::new("people.json"));
        assert!(!config.pause);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\npause = \"sometimes\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.data_file(), Path::new("pessoas.json"));
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("roster.toml");

        let mut config = Config::default();
        config.set_data_file(PathBuf::from("elsewhere.json"));
        config.pause = false;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn discover_prefers_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndata_file = \"explicit.json\"\n")
            .unwrap();

        let config = Config::discover(Some(file.path())).unwrap();
        assert_eq!(config.data_file(), Path::new("explicit.json"));
        assert!(config.pause);
    }

    #[test]
    fn discover_fails_for_missing_explicit_path() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(Config::discover(Some(&tmp.path().join("nope.toml"))).is_err());
    }
}
