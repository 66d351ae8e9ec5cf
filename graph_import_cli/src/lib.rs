//! Graph import driver
//!
//! Discovers JSON graph descriptions, imports each one as a session behind
//! per-unit failure boundaries, and decides success with an allow-list policy.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod importer;
pub mod policy;
pub mod runner;

pub use cli::{BoundaryTarget, Cli};
pub use error::CliError;
pub use importer::{FileOutcome, GraphImporter};
pub use policy::SessionPolicy;
pub use runner::{load_config, run, RunReport};
