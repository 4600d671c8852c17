use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    /// Layout file used when none is given on the command line
    #[serde(default = "default_grid_path")]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_obstructions")]
    pub show_obstructions: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub enable_trace: bool,
    #[serde(default = "default_trace_path")]
    pub trace_path: String,
}

// Default values
fn default_grid_path() -> String { "test_data/standard/reference_10x10.txt".to_string() }
fn default_window_title() -> String { "Patrol Sim - Obstruction Search".to_string() }
fn default_cell_size() -> f32 { 30.0 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_show_obstructions() -> bool { true }
fn default_log_filter() -> String { "warn".to_string() }
fn default_trace_path() -> String { "run_trace.json".to_string() }

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_grid_path(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            cell_size: default_cell_size(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_obstructions: default_show_obstructions(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            enable_trace: false,
            trace_path: default_trace_path(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, or use defaults
    pub fn load() -> Self {
        Self::load_from(CONFIG_PATH)
    }

    /// Load configuration from `path`, falling back to defaults if it is
    /// missing or does not parse
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse configuration, using defaults");
                    Config::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no configuration file, using defaults");
                Config::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
