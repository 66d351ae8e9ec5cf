//! Configuration for the import status layer
//!
//! Fixed bounds live in [`constants`]; user-facing preferences, loaded from
//! TOML or `GRAPH_IMPORT_*` environment variables, live in [`runtime`].

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{
    BoundaryPreferences, ConfigError, ImporterConfig, LoggingPreferences, RecorderPreferences,
};
