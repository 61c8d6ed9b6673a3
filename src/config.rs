//! Configuration file
//!
//! Read from `config.yaml` in the platform config directory. Every field has
//! a default, so a missing file is the same as an empty one.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, decode_hex};
use crate::sink::DEFAULT_ZONE_PATH;
use crate::{ColorParseError, LightError};

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "myrtio";
const APPLICATION: &str = "zone-light";
const CONFIG_FILE: &str = "config.yaml";

/// Default static transition duration
pub const DEFAULT_STATIC_DURATION_MS: u64 = 100;

/// Default rainbow tick
pub const DEFAULT_RAINBOW_TICK_MS: u64 = 10;

/// Built-in color presets
pub const PRESETS: [(&str, &str); 6] = [
    ("red", "ff0000"),
    ("green", "00ff00"),
    ("blue", "0000ff"),
    ("purple", "800080"),
    ("white", "ffffff"),
    ("orange", "ff7f00"),
];

/// Configuration for mode timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Duration of a static color change
    pub color_change: Duration,
    /// Delay between rainbow frames
    pub rainbow_tick: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            color_change: Duration::from_millis(DEFAULT_STATIC_DURATION_MS),
            rainbow_tick: Duration::from_millis(DEFAULT_RAINBOW_TICK_MS),
        }
    }
}

/// How colors reach the zone file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMethod {
    /// Open the zone file directly
    Direct,
    /// Pipe through `<privilege_command> tee`
    #[default]
    Privileged,
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid preset '{name}': {source}")]
    Preset {
        name: String,
        source: ColorParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub device_path: PathBuf,
    pub write_method: WriteMethod,
    pub privilege_command: Vec<String>,
    pub static_duration_ms: u64,
    pub rainbow_tick_ms: u64,
    /// Extra presets, merged over the built-in ones
    pub presets: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_path: PathBuf::from(DEFAULT_ZONE_PATH),
            write_method: WriteMethod::default(),
            privilege_command: vec!["sudo".to_string()],
            static_duration_ms: DEFAULT_STATIC_DURATION_MS,
            rainbow_tick_ms: DEFAULT_RAINBOW_TICK_MS,
            presets: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from `path`, falling back to defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    pub fn timings(&self) -> Timings {
        Timings {
            color_change: Duration::from_millis(self.static_duration_ms),
            rainbow_tick: Duration::from_millis(self.rainbow_tick_ms),
        }
    }

    /// Built-in and configured presets, names lowercased
    pub fn presets(&self) -> Result<BTreeMap<String, Rgb>, ConfigError> {
        let builtin = PRESETS
            .iter()
            .map(|(name, hex)| ((*name).to_string(), (*hex).to_string()));
        let custom = self
            .presets
            .iter()
            .map(|(name, hex)| (name.to_lowercase(), hex.clone()));

        let mut presets = BTreeMap::new();
        for (name, hex) in builtin.chain(custom) {
            let color = decode_hex(&hex).map_err(|source| ConfigError::Preset {
                name: name.clone(),
                source,
            })?;
            presets.insert(name, color);
        }
        Ok(presets)
    }

    /// Resolve a preset name (case-insensitive) or a hex color
    pub fn resolve_color(&self, input: &str) -> Result<Rgb, LightError> {
        let name = input.trim().to_lowercase();
        let custom = self
            .presets
            .iter()
            .find_map(|(key, hex)| (key.to_lowercase() == name).then_some(hex.as_str()));
        let builtin = PRESETS
            .iter()
            .find_map(|(key, hex)| (*key == name).then_some(*hex));
        if let Some(hex) = custom.or(builtin) {
            return Ok(decode_hex(hex)?);
        }
        decode_hex(input.trim()).map_err(|err| match err {
            // Not hex-shaped at all: most likely a mistyped preset name
            ColorParseError::InvalidLength(_) if !name.starts_with('#') => {
                LightError::UnknownPreset(input.to_string())
            }
            err => LightError::InvalidColorFormat(err),
        })
    }
}
