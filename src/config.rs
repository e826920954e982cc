use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::buffer::DEFAULT_TAB_WIDTH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tab_width: usize,
    pub scroll_margin_top: usize,
    pub scroll_margin_bottom: usize,
    pub match_color: String,
    pub selection_color: String,
    pub navigation_color: String,
    pub navigation_dir_color: String,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            scroll_margin_top: 3,
            scroll_margin_bottom: 3,
            match_color: "cyan".to_string(),
            selection_color: "blue".to_string(),
            navigation_color: "gray".to_string(),
            navigation_dir_color: "cyan".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PartialConfig {
    tab_width: Option<usize>,
    scroll_margin_top: Option<usize>,
    scroll_margin_bottom: Option<usize>,
    match_color: Option<String>,
    selection_color: Option<String>,
    navigation_color: Option<String>,
    navigation_dir_color: Option<String>,
    log_filter: Option<String>,
}

fn or_default<T>(value: Option<T>, default: T, changed: &mut bool) -> T {
    match value {
        Some(v) => v,
        None => {
            *changed = true;
            default
        }
    }
}

impl PartialConfig {
    fn apply_defaults(self) -> (Config, bool) {
        let defaults = Config::default();
        let mut changed = false;

        let config = Config {
            tab_width: or_default(self.tab_width, defaults.tab_width, &mut changed),
            scroll_margin_top: or_default(
                self.scroll_margin_top,
                defaults.scroll_margin_top,
                &mut changed,
            ),
            scroll_margin_bottom: or_default(
                self.scroll_margin_bottom,
                defaults.scroll_margin_bottom,
                &mut changed,
            ),
            match_color: or_default(self.match_color, defaults.match_color, &mut changed),
            selection_color: or_default(
                self.selection_color,
                defaults.selection_color,
                &mut changed,
            ),
            navigation_color: or_default(
                self.navigation_color,
                defaults.navigation_color,
                &mut changed,
            ),
            navigation_dir_color: or_default(
                self.navigation_dir_color,
                defaults.navigation_dir_color,
                &mut changed,
            ),
            log_filter: or_default(self.log_filter, defaults.log_filter, &mut changed),
        };

        (config, changed)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("jot").join("config.toml"))
}

pub fn ensure_config_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        let cfg = Config::default();
        write_config(&cfg)?;
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let (cfg, changed) = parse_config(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    if changed {
        write_config(&cfg)?;
    }
    Ok(cfg)
}

fn parse_config(raw: &str) -> Result<(Config, bool)> {
    let partial: PartialConfig = toml::from_str(raw)?;
    Ok(partial.apply_defaults())
}

pub fn write_config(cfg: &Config) -> Result<()> {
    let path = config_path()?;
    ensure_config_dir(&path)?;
    let text = toml::to_string_pretty(cfg).context("Failed to serialize config")?;
    fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
