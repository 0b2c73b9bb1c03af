//! Demo configuration, read from a TOML file.
//!
//! Every key is optional:
//!
//! ```toml
//! [grid]
//! width = 80
//! height = 22
//! density = 0.33
//! seed = 7
//!
//! [brush]
//! radius = 1
//! clear_radius = 2
//!
//! [animation]
//! cells_per_frame = 25
//! trail_divisor = 15
//! frame_millis = 33
//!
//! [storage]
//! map_path = "slime-map.json"
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use slime_map::mapgen::DEFAULT_DENSITY;
use slime_paths::PlaybackConfig;

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    /// A value parsed but is out of range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config: {e}"),
            Self::Parse(e) => write!(f, "config: {e}"),
            Self::Invalid(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    /// Probability that a generated cell is a barrier.
    pub density: f64,
    /// Fixed map seed. A random one is drawn when unset.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 22,
            density: DEFAULT_DENSITY,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrushConfig {
    pub radius: i32,
    /// Radius cleared around the source and target before searching.
    pub clear_radius: i32,
}

// Terminal cells are much coarser than pixels, so the radii are smaller
// than the brush defaults in slime_map.
impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            radius: 1,
            clear_radius: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    pub cells_per_frame: usize,
    pub trail_divisor: usize,
    pub frame_millis: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            cells_per_frame: 25,
            trail_divisor: PlaybackConfig::default().trail_divisor,
            frame_millis: 33,
        }
    }
}

impl AnimationConfig {
    pub fn playback(&self) -> PlaybackConfig {
        PlaybackConfig {
            cells_per_frame: self.cells_per_frame,
            trail_divisor: self.trail_divisor,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Where `s` saves and `l` loads the map. A `.json` extension selects
    /// JSON, anything else the text layout.
    pub map_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            map_path: PathBuf::from("slime-map.json"),
        }
    }
}

/// Complete demo configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlimeConfig {
    pub grid: GridConfig,
    pub brush: BrushConfig,
    pub animation: AnimationConfig,
    pub storage: StorageConfig,
}

impl SlimeConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Check value ranges that the TOML types cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        let g = &self.grid;
        if g.width <= 0 || g.height <= 0 {
            return invalid(format!(
                "grid size must be positive, got {}x{}",
                g.width, g.height
            ));
        }
        if !(0.0..=1.0).contains(&g.density) {
            return invalid(format!("grid.density {} is not within [0, 1]", g.density));
        }
        if self.brush.radius < 0 || self.brush.clear_radius < 0 {
            return invalid("brush radii must not be negative".to_string());
        }
        let limit = g.width.max(g.height);
        if self.brush.radius > limit || self.brush.clear_radius > limit {
            return invalid(format!("brush radii must not exceed {limit}"));
        }
        if self.animation.cells_per_frame == 0 {
            return invalid("animation.cells_per_frame must be at least 1".to_string());
        }
        if self.animation.trail_divisor == 0 {
            return invalid("animation.trail_divisor must be at least 1".to_string());
        }
        if self.storage.map_path.as_os_str().is_empty() {
            return invalid("storage.map_path is empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(SlimeConfig::from_toml("").unwrap(), SlimeConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = SlimeConfig::from_toml(
            r#"
            [grid]
            width = 40
            seed = 9

            [storage]
            map_path = "maps/a.txt"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.grid.width, 40);
        assert_eq!(cfg.grid.height, GridConfig::default().height);
        assert_eq!(cfg.grid.seed, Some(9));
        assert_eq!(cfg.storage.map_path, PathBuf::from("maps/a.txt"));
        assert_eq!(cfg.brush, BrushConfig::default());
    }

    #[test]
    fn out_of_range_values_are_invalid() {
        for doc in [
            "[grid]\nwidth = 0",
            "[grid]\ndensity = 1.5",
            "[brush]\nradius = -1",
            "[brush]\nradius = 2147483647",
            "[grid]\nwidth = 10\nheight = 5\n[brush]\nclear_radius = 11",
            "[animation]\ncells_per_frame = 0",
            "[animation]\ntrail_divisor = 0",
            "[storage]\nmap_path = \"\"",
        ] {
            assert!(
                matches!(SlimeConfig::from_toml(doc), Err(ConfigError::Invalid(_))),
                "{doc}"
            );
        }
    }

    #[test]
    fn syntax_and_unknown_keys_are_parse_errors() {
        assert!(matches!(
            SlimeConfig::from_toml("[grid\nwidth = 1"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SlimeConfig::from_toml("[grid]\ncolour = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("slime-config-does-not-exist.toml");
        assert_eq!(
            SlimeConfig::load_or_default(&path).unwrap(),
            SlimeConfig::default()
        );
        assert!(matches!(SlimeConfig::load(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn animation_knobs_map_to_playback() {
        let anim = AnimationConfig {
            cells_per_frame: 3,
            trail_divisor: 4,
            frame_millis: 10,
        };
        assert_eq!(
            anim.playback(),
            PlaybackConfig {
                cells_per_frame: 3,
                trail_divisor: 4
            }
        );
        assert_eq!(anim.frame_duration(), Duration::from_millis(10));
    }
}
