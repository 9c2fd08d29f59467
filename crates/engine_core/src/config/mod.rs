//! Configuration system
//!
//! Configuration types are plain serde structs; the [`Config`] trait gives
//! them TOML and RON file support, picking the format from the extension.

pub use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// File formats understood by [`Config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Settings for the resource manager
///
/// Controls how material prefixes expand into shader file names and where
/// relative asset paths are looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Suffix appended to a material prefix to find the vertex stage source
    pub vertex_shader_extension: String,

    /// Suffix appended to a material prefix to find the fragment stage source
    pub fragment_shader_extension: String,

    /// Directories tried, in order, for relative asset paths
    pub search_paths: Vec<PathBuf>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            vertex_shader_extension: "_vp.glsl".to_string(),
            fragment_shader_extension: "_fp.glsl".to_string(),
            search_paths: Vec::new(),
        }
    }
}

impl Config for ResourceConfig {}

impl ResourceConfig {
    /// Add a search path for relative asset lookups
    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Resolve an asset path against the configured search paths
    ///
    /// Absolute paths are returned unchanged. Relative paths take the first
    /// search path under which the file exists; if none match, the path is
    /// returned as is so the caller reports the name it was given.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }

        self.search_paths
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.exists())
            .unwrap_or_else(|| path.to_path_buf())
    }

    /// Paths of the vertex and fragment stage sources for a material prefix
    pub fn shader_paths(&self, prefix: &str) -> (PathBuf, PathBuf) {
        let vertex = format!("{}{}", prefix, self.vertex_shader_extension);
        let fragment = format!("{}{}", prefix, self.fragment_shader_extension);
        (
            self.resolve_path(Path::new(&vertex)),
            self.resolve_path(Path::new(&fragment)),
        )
    }
}
