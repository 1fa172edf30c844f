//! INI file configuration adapter.

use crate::domain::error::SimError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn not_a_number(&self, section: &str, key: &str, expected: &str) -> SimError {
        let raw = self.config.get(section, key).unwrap_or_default();
        SimError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("'{}' is not {}", raw.trim(), expected),
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, SimError> {
        self.config
            .getint(section, key)
            .map_err(|_| self.not_a_number(section, key, "an integer"))
    }

    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, SimError> {
        self.config
            .getfloat(section, key)
            .map_err(|_| self.not_a_number(section, key, "a number"))
    }
}
