//! Verbosity-gated logging for the schedule computation.
//!
//! Messages go to stderr and cost nothing at verbosity 0. Levels:
//! - 0: SILENT
//! - 1: CHANGES (groups dated, cursor moves)
//! - 2: CHECKS (clamped durations, skipped groups and phases)
//! - 3: DEBUG (per-item dates, offset annotation)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!("[waterfall] {}", format_args!($($arg)*));
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!("[waterfall]   {}", format_args!($($arg)*));
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[waterfall]     {}", format_args!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_CHANGES);
        assert!(VERBOSITY_CHANGES < VERBOSITY_CHECKS);
        assert!(VERBOSITY_CHECKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_macros_accept_format_args() {
        let verbosity = VERBOSITY_SILENT;
        log_changes!(verbosity, "group {} dated", 1);
        log_checks!(verbosity, "clamped {}", "a");
        log_debug!(verbosity, "item {} -> {}", "a", 3);
    }
}
