use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use splitview_layout::Size;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Divider thickness between split panes, in pixels.
    pub divider: u32,
    /// Pane area used when no size is given on the command line.
    pub width: u32,
    pub height: u32,
    pub state_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            divider: 4,
            width: 1280,
            height: 800,
            state_file: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("splitview")
                .join("layout.bin"),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("splitview").join("config.json"))
    }

    /// Load `path`, or the default config file if it exists, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => {
                    tracing::debug!("No config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn surface(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
