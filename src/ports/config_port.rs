//! Configuration access port.

use crate::domain::error::SimError;

/// Typed lookups return `Ok(None)` for an absent key and `ConfigInvalid` for a
/// present value that does not parse.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, SimError>;
    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, SimError>;

    /// Comma-separated value split into trimmed, non-empty items.
    fn get_list(&self, section: &str, key: &str) -> Option<Vec<String>> {
        self.get_string(section, key).map(|raw| {
            raw.split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
    }
}
