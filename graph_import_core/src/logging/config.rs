//! Logging service construction from runtime preferences

use super::service::{Logger, LoggingService, MultiLogger};
use crate::config::compile_time::logging::{LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH};
use crate::config::runtime::LoggingPreferences;
use std::sync::Arc;

/// Build the logger target selected by the preferences
pub fn create_target(preferences: &LoggingPreferences) -> Arc<dyn Logger> {
    let target = MultiLogger::new();
    let target = match (
        preferences.enable_console_logging,
        preferences.use_structured_logging,
    ) {
        (false, _) => target,
        (true, true) => target.with_structured_console(),
        (true, false) => target.with_console(),
    };
    Arc::new(target)
}

/// Create a filtered service from preferences
pub fn create_service(preferences: &LoggingPreferences) -> LoggingService {
    LoggingService::new(create_target(preferences), preferences.min_severity)
}

/// Get configuration summary for debugging
pub fn get_config_summary(preferences: &LoggingPreferences) -> String {
    format!(
        "Logging Configuration:\n\
         - Min Severity: {}\n\
         - Structured Logging: {}\n\
         - Console Logging: {}\n\
         - Max Message Length: {}\n\
         - Memory Buffer Size: {}",
        preferences.min_severity,
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        MAX_LOG_MESSAGE_LENGTH,
        LOG_BUFFER_SIZE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Severity;

    fn preferences(console: bool, structured: bool, min: Severity) -> LoggingPreferences {
        LoggingPreferences {
            use_structured_logging: structured,
            enable_console_logging: console,
            min_severity: min,
        }
    }

    #[test]
    fn test_service_respects_min_severity() {
        let service = create_service(&preferences(false, false, Severity::Error));
        assert_eq!(service.min_severity(), Severity::Error);
        assert!(service.should_log(Severity::InternalError));
        assert!(!service.should_log(Severity::Warning));
    }

    #[test]
    fn test_config_summary() {
        let summary = get_config_summary(&preferences(true, false, Severity::Warning));
        assert!(summary.contains("Min Severity: WARNING"));
        assert!(summary.contains("Console Logging: true"));
    }
}
