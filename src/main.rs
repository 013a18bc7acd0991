// Entry point and high-level CLI flow.
//
// A single run loads the weather CSV, computes the rainfall statistics,
// prints the report and writes the chart and spreadsheet artifacts. Any load
// failure is reported once and nothing else is produced.
mod aggregate;
mod chart;
mod config;
mod error;
mod loader;
mod output;
mod pipeline;
mod reports;
mod types;
mod util;
mod workbook;

use clap::Parser;
use config::Config;
use error::{ReportError, ReportResult};
use output::ConsoleSink;
use pipeline::RenderOptions;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rainfall_report=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// The single user-facing message for a failed render.
fn failure_message(cfg: &Config, err: &ReportError) -> String {
    if err.is_load_failure() {
        format!(
            "ERROR: Could not load the CSV file '{}'. Please ensure it exists and has 'date' and precipitation columns. Details: {}",
            cfg.data_file_name(),
            err
        )
    } else {
        format!("ERROR: Report generation failed. Details: {}", err)
    }
}

fn run(cfg: &Config) -> ReportResult<()> {
    let mut sink = ConsoleSink::new(&cfg.out_dir);
    let options = RenderOptions {
        charts: !cfg.no_charts,
    };

    println!("BEJIN RAINFALL TREND ANALYSIS");
    println!("A Data Report for Clients and Agricultural Planning\n");

    let report = pipeline::render(&cfg.data, &mut sink, options)?;
    if cfg.summary_json {
        sink.save_summary(&report)?;
    }
    tracing::info!(artifacts = sink.written().len(), "report complete");
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cfg = Config::parse();
    tracing::debug!(?cfg, "configuration");

    match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&cfg, &e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failures_name_the_file() {
        let cfg = Config::parse_from(["rainfall_report", "--data", "data/beijing.csv"]);
        let err = ReportError::InvalidDate {
            line: 4,
            value: "??".into(),
        };
        let msg = failure_message(&cfg, &err);
        assert!(msg.starts_with("ERROR: Could not load the CSV file 'beijing.csv'"));
        assert!(msg.contains("line 4"));
    }

    #[test]
    fn output_failures_are_reported_separately() {
        let cfg = Config::parse_from(["rainfall_report"]);
        let msg = failure_message(&cfg, &ReportError::Chart("no backend".into()));
        assert_eq!(
            msg,
            "ERROR: Report generation failed. Details: Chart rendering failed: no backend"
        );
    }
}
