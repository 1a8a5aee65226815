//! Store configuration.

use slotdb_codec::DEFAULT_RECORD_WIDTH;

/// Configuration for creating and using a store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Slot width in bytes for newly created stores.
    ///
    /// Opening an existing store always uses the width saved in its descriptor.
    pub record_width: usize,

    /// Number of sorted records returned by a report.
    pub report_limit: usize,

    /// Whether to fsync both segments before the descriptor is written on close.
    pub sync_on_close: bool,

    /// Whether import rewrites `_` to a space before parsing each row.
    pub underscores_as_spaces: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            record_width: DEFAULT_RECORD_WIDTH,
            report_limit: 10,
            sync_on_close: true,
            underscores_as_spaces: true,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slot width for newly created stores.
    #[must_use]
    pub const fn record_width(mut self, width: usize) -> Self {
        self.record_width = width;
        self
    }

    /// Sets the number of records a report returns.
    #[must_use]
    pub const fn report_limit(mut self, limit: usize) -> Self {
        self.report_limit = limit;
        self
    }

    /// Sets whether to fsync segments on close.
    #[must_use]
    pub const fn sync_on_close(mut self, value: bool) -> Self {
        self.sync_on_close = value;
        self
    }

    /// Sets whether import rewrites underscores to spaces.
    #[must_use]
    pub const fn underscores_as_spaces(mut self, value: bool) -> Self {
        self.underscores_as_spaces = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.record_width, 200);
        assert_eq!(config.report_limit, 10);
        assert!(config.sync_on_close);
        assert!(config.underscores_as_spaces);
    }

    #[test]
    fn builder_pattern() {
        let config = StoreConfig::new()
            .record_width(64)
            .report_limit(3)
            .sync_on_close(false)
            .underscores_as_spaces(false);

        assert_eq!(config.record_width, 64);
        assert_eq!(config.report_limit, 3);
        assert!(!config.sync_on_close);
        assert!(!config.underscores_as_spaces);
    }
}
