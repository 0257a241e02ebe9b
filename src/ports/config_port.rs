//! Configuration access port trait.

/// Section/key lookup with typed defaults. Missing or unparseable values
/// fall back to `default`.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;

    /// Like `get_string`, but a missing key is an error.
    fn require_string(
        &self,
        section: &str,
        key: &str,
    ) -> Result<String, crate::domain::error::TradeStatsError> {
        self.get_string(section, key)
            .ok_or_else(|| crate::domain::error::TradeStatsError::ConfigMissing {
                section: section.into(),
                key: key.into(),
            })
    }
}
