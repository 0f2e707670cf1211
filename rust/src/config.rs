//! Configuration for schedule computation.

use crate::logging::VERBOSITY_SILENT;

/// Configuration for the backward scheduling pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
    /// Floor applied to task durations (values below 1 act as 1)
    pub min_duration_days: i64,
    /// Treat a nominal end date as a full day of work by scheduling back
    /// from the following day
    pub inclusive_end_date: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            verbosity: VERBOSITY_SILENT,
            min_duration_days: 1,
            inclusive_end_date: true,
        }
    }
}

impl ScheduleConfig {
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Effective clamp floor.
    pub fn duration_floor(&self) -> i64 {
        self.min_duration_days.max(1)
    }
}
