use std::{fs, path::PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub fn default_background() -> [u8; 3] {
    [245, 222, 179]
}

pub fn default_foreground() -> [u8; 3] {
    [0, 0, 0]
}

pub fn default_save_message() -> String {
    "Notes saved successfully!".into()
}

pub fn get_true() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default = "default_foreground")]
    pub foreground: [u8; 3],
    #[serde(default = "get_true")]
    pub show_info_line: bool,
    #[serde(default = "default_save_message")]
    pub save_message: String,
}

impl Config {
    pub const DEFAULT: &str = include_str!("../../../config/notes.toml");

    pub fn create_default_config(overwrite: bool) -> Result<()> {
        let config = Self::get_default_location()?;

        let mut config_folder = config.clone();
        config_folder.pop();

        if !config_folder.exists() {
            fs::create_dir_all(config_folder)?;
        }

        if !config.exists() || overwrite {
            fs::write(config, Self::DEFAULT)?;
        }

        Ok(())
    }

    /// Loads the user config, falling back to the defaults when there is none.
    pub fn load_from_default_location() -> Result<Self> {
        let path = Self::get_default_location()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(&fs::read_to_string(&path)?)?)
    }

    pub fn get_default_location() -> Result<PathBuf> {
        let Some(directories) = directories::ProjectDirs::from("", "", "pnotes") else {
            return Err(anyhow::Error::msg("Unable to find project directory"));
        };
        Ok(directories.config_dir().join("notes.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(Self::DEFAULT).expect("default config is valid toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.background, [245, 222, 179]);
        assert!(config.show_info_line);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: Config = toml::from_str("show_info_line = false").unwrap();
        assert!(!config.show_info_line);
        assert_eq!(config.background, default_background());
        assert_eq!(config.save_message, default_save_message());
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(toml::from_str::<Config>("background = \"wheat\"").is_err());
    }
}
