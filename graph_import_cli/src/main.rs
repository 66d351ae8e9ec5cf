use clap::Parser;
use graph_import_cli::{load_config, run, Cli, CliError};
use graph_import_core::logging;
use graph_import_core::Logger;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn execute(cli: &Cli) -> Result<bool, CliError> {
    let config = load_config(cli)?;
    log::debug!("{}", logging::config::get_config_summary(&config.logging));
    logging::init_global_logging(&config.logging).map_err(CliError::Logging)?;

    let logger: Arc<dyn Logger> = match logging::global_logger() {
        Some(service) => service,
        None => Arc::new(logging::config::create_service(&config.logging)),
    };

    let report = run(cli, &config, logger)?;
    println!("{}", report.report_line());
    Ok(report.succeeded())
}
