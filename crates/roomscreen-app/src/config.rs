//! Screen configuration.

use std::time::Duration;

use crate::ScreenError;

/// Interval after sending during which the author may edit or delete.
pub const DEFAULT_EDIT_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Inactivity required before a read-receipt batch is flushed.
pub const DEFAULT_READ_QUIET_PERIOD: Duration = Duration::from_millis(250);

/// `strftime` format of the timestamp in quote links (`2016 Mar 7, 14:05`).
pub const DEFAULT_QUOTE_TIME_FORMAT: &str = "%Y %b %-d, %H:%M";

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Edit/delete eligibility window.
    pub edit_window: Duration,
    /// Read-receipt debounce quiet period.
    pub read_quiet_period: Duration,
    /// Timestamp format used when quoting with a link.
    pub quote_time_format: String,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            edit_window: DEFAULT_EDIT_WINDOW,
            read_quiet_period: DEFAULT_READ_QUIET_PERIOD,
            quote_time_format: DEFAULT_QUOTE_TIME_FORMAT.to_owned(),
        }
    }
}

impl ScreenConfig {
    /// Override the edit window.
    #[must_use]
    pub fn with_edit_window(mut self, window: Duration) -> Self {
        self.edit_window = window;
        self
    }

    /// Override the read-receipt quiet period.
    #[must_use]
    pub fn with_read_quiet_period(mut self, period: Duration) -> Self {
        self.read_quiet_period = period;
        self
    }

    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::InvalidConfig`] if either duration is zero or
    /// the quote time format is empty.
    pub fn validate(&self) -> Result<(), ScreenError> {
        if self.edit_window.is_zero() {
            return Err(ScreenError::InvalidConfig("edit window must be non-zero".into()));
        }
        if self.read_quiet_period.is_zero() {
            return Err(ScreenError::InvalidConfig("read quiet period must be non-zero".into()));
        }
        if self.quote_time_format.is_empty() {
            return Err(ScreenError::InvalidConfig("quote time format must not be empty".into()));
        }
        Ok(())
    }
}
