// src/config.rs

use crate::model::CrystalSystem;
use crate::physics::operations::align::{AntiparallelPolicy, SolverSettings, DEFAULT_EPSILON};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

fn default_epsilon() -> f64 {
  DEFAULT_EPSILON
}

fn default_log_level() -> String {
  "info".to_string()
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
  // Below this cross-product norm two directions count as parallel
  #[serde(default = "default_epsilon")]
  pub epsilon: f64,

  #[serde(default)]
  pub antiparallel_policy: AntiparallelPolicy,

  // Pinned crystal system; None derives it from the loaded model's lattice
  #[serde(default)]
  pub crystal_system: Option<CrystalSystem>,

  // Write the model comment as the second xyz line instead of a blank line
  #[serde(default)]
  pub export_comment: bool,

  #[serde(default = "default_log_level")]
  pub log_level: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      epsilon: DEFAULT_EPSILON,
      antiparallel_policy: AntiparallelPolicy::Flip,
      crystal_system: None,
      export_comment: false,
      log_level: default_log_level(),
    }
  }
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/cview-align/settings.json)
  pub fn load() -> (Self, String) {
    Self::from_path(&Self::get_path())
  }

  pub fn from_path(path: &Path) -> (Self, String) {
    if path.exists() {
      match File::open(path) {
        Ok(file) => {
          let reader = BufReader::new(file);
          match serde_json::from_reader(reader) {
            Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
            Err(e) => (Self::default(), format!("Error parsing config: {}", e)),
          }
        }
        Err(e) => (Self::default(), format!("Error opening config: {}", e)),
      }
    } else {
      (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      )
    }
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> String {
    self.save_to(&Self::get_path())
  }

  pub fn save_to(&self, path: &Path) -> String {
    if let Some(parent) = path.parent() {
      let _ = fs::create_dir_all(parent);
    }

    match File::create(path) {
      Ok(file) => {
        let writer = BufWriter::new(file);
        match serde_json::to_writer_pretty(writer, self) {
          Ok(_) => format!("Config saved to {:?}", path),
          Err(e) => format!("Failed to save config: {}", e),
        }
      }
      Err(e) => format!("Could not create config file: {}", e),
    }
  }

  pub fn solver_settings(&self) -> SolverSettings {
    SolverSettings {
      epsilon: self.epsilon,
      antiparallel: self.antiparallel_policy,
    }
  }

  fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "mavensgroup", "cview-align") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}
