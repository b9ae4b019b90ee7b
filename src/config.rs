// Panel configuration and the tab presentation catalog.
// - Holds the fixed visual height reserved by every layout.
// - Maps item kinds to tab labels/icons; unknown kinds still get a control.
// - Loads overrides from YAML on top of the built-in defaults.
use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_VISUAL_HEIGHT: u16 = 500;

const APP_DIR: &str = "vispanel";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStyle {
    pub label: String,
    #[serde(default)]
    pub icon: String,
    /// Blank cells between icon and label.
    #[serde(default = "default_label_gap")]
    pub label_gap: u16,
}

fn default_label_gap() -> u16 {
    1
}

impl TabStyle {
    pub fn new(label: &str, icon: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            label_gap: default_label_gap(),
        }
    }

    pub fn caption(&self) -> String {
        if self.icon.is_empty() {
            return self.label.clone();
        }
        let gap = " ".repeat(self.label_gap as usize);
        format!("{}{gap}{}", self.icon, self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabCatalog {
    styles: BTreeMap<String, TabStyle>,
}

impl TabCatalog {
    pub fn empty() -> Self {
        Self {
            styles: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, kind: impl Into<String>, style: TabStyle) {
        self.styles.insert(kind.into(), style);
    }

    pub fn get(&self, kind: &str) -> Option<&TabStyle> {
        self.styles.get(kind)
    }

    pub fn style_for(&self, kind: &str) -> TabStyle {
        if let Some(style) = self.get(kind) {
            return style.clone();
        }
        let label = if kind.is_empty() { "Visual" } else { kind };
        TabStyle::new(label, "")
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    fn merge(&mut self, other: TabCatalog) {
        self.styles.extend(other.styles);
    }
}

impl Default for TabCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.insert("chartJS", TabStyle::new("Chart.js", "◔"));
        catalog.insert("eCharts", TabStyle::new("ECharts", "◕"));
        catalog.insert("highcharts", TabStyle::new("Highcharts", "◑"));
        catalog.insert("table", TabStyle::new("Table", "▦"));
        catalog
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelConfig {
    pub visual_height: u16,
    pub tabs: TabCatalog,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    visual_height: Option<u16>,
    tabs: Option<TabCatalog>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            visual_height: DEFAULT_VISUAL_HEIGHT,
            tabs: TabCatalog::default(),
        }
    }
}

impl PanelConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }

        let file: ConfigFile = serde_yaml::from_str(source)?;
        let mut config = Self::default();
        if let Some(height) = file.visual_height {
            if height == 0 {
                return Err(ConfigError::Invalid(
                    "visual_height must be greater than 0".to_string(),
                ));
            }
            config.visual_height = height;
        }
        if let Some(tabs) = file.tabs {
            config.tabs.merge(tabs);
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&source)?;
        tracing::debug!(path = %path.display(), tabs = config.tabs.len(), "Loaded panel config");
        Ok(config)
    }

    /// Loads the explicit path if given, otherwise the default location when it exists.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_file() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|config| config.join(APP_DIR))
}

pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn default_logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}
