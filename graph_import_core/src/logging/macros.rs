//! Logging macros over the global service

/// Log through the global service, appending `key=value` context pairs
#[macro_export]
macro_rules! import_log {
    ($severity:expr, $message:expr) => {
        $crate::logging::log_with_context($severity, $message, vec![])
    };

    ($severity:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_with_context($severity, $message, context_refs)
        }
    };
}
