//! End-to-end driver run: configuration, discovery, sessions and reports

use crate::cli::Cli;
use crate::discovery::{discover_graph_files, DiscoveryConfig};
use crate::error::CliError;
use crate::importer::{FileOutcome, GraphImporter};
use crate::policy::SessionPolicy;
use graph_import_core::summary::{format_cargo_style, SessionSummary};
use graph_import_core::{
    import_log, ErrorRecorder, ImporterConfig, ImporterContext, Logger, LoggingRecorder,
    MemoryRecorder, Severity, Status,
};
use log::{info, warn};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// One graph file's session and its policy verdict
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    #[serde(flatten)]
    pub outcome: FileOutcome,
    pub succeeded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub sessions: Vec<SessionReport>,
    pub summary: SessionSummary,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.sessions.iter().all(|session| session.succeeded)
    }

    pub fn failed_sessions(&self) -> usize {
        self.sessions.iter().filter(|s| !s.succeeded).count()
    }

    pub fn report_line(&self) -> String {
        format!(
            "{} graph(s) imported: {} succeeded, {} failed, {} error(s) recorded",
            self.sessions.len(),
            self.sessions.len() - self.failed_sessions(),
            self.failed_sessions(),
            self.summary.total_errors
        )
    }
}

/// Load configuration and apply command-line overrides
pub fn load_config(cli: &Cli) -> Result<ImporterConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => ImporterConfig::load(path)?,
        None => ImporterConfig::default(),
    };

    if cli.structured {
        config.logging.use_structured_logging = true;
    }
    if cli.capture_panics {
        config.boundary.capture_panics = true;
    }

    config.validate()?;
    Ok(config)
}

/// Import every graph named by the command line, one session per file
pub fn run(
    cli: &Cli,
    config: &ImporterConfig,
    logger: Arc<dyn Logger>,
) -> Result<RunReport, CliError> {
    let discovery = DiscoveryConfig {
        recursive: !cli.no_recursive,
        ..DiscoveryConfig::default()
    };
    let files = discover_graph_files(&cli.path, &discovery)?;
    info!("Importing {} graph file(s)", files.len());

    let buffered = (!cli.stream_errors)
        .then(|| Arc::new(MemoryRecorder::from_preferences(&config.recorder, logger.clone())));
    let recorder: Arc<dyn ErrorRecorder> = match &buffered {
        Some(memory) => memory.clone(),
        None => Arc::new(LoggingRecorder::new(logger.clone())),
    };
    let context = ImporterContext::from_config(config, recorder, logger);
    let importer = GraphImporter::new(&context, cli.boundary);
    let policy = SessionPolicy::new(cli.allow.iter().copied());

    let mut sessions = Vec::with_capacity(files.len());
    for path in &files {
        let outcome = importer.import_file(path);
        let succeeded = policy.succeeded(&outcome.errors);

        if !outcome.errors.is_empty() {
            println!(
                "{}",
                format_cargo_style(&path.display().to_string(), &outcome.errors)
            );
        }
        import_log!(
            Severity::Info,
            "Graph session finished",
            "file" => path.display(),
            "imported" => outcome.imported_nodes,
            "nodes" => outcome.nodes,
            "errors" => outcome.errors.len(),
            "result" => if succeeded { "succeeded" } else { "failed" }
        );

        sessions.push(SessionReport { outcome, succeeded });
    }

    if let Some(memory) = buffered.filter(|memory| memory.has_overflowed()) {
        warn!(
            "Error recorder capacity {} exceeded; later reports were dropped",
            memory.capacity()
        );
    }

    let all_errors: Vec<Status> = sessions
        .iter()
        .flat_map(|s| s.outcome.errors.iter().cloned())
        .collect();
    let report = RunReport {
        sessions,
        summary: SessionSummary::from_errors(&all_errors),
    };

    if let Some(path) = &cli.json_report {
        write_json_report(path, &report)?;
    }

    Ok(report)
}

pub fn write_json_report(path: &Path, report: &RunReport) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|source| CliError::Report {
        path: path.to_path_buf(),
        source,
    })
}
