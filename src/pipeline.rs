use crate::config::Config;
use crate::error::Result;
use crate::loader::{Loader, RowWarning};
use crate::metrics::ReportMetrics;
use crate::report::{Report, ReportKind, Reporter};
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument};

/// One written artifact
#[derive(Debug, Clone)]
pub struct ArtifactSummary {
    pub kind: ReportKind,
    pub path: PathBuf,
    pub rows: usize,
}

/// Result of a complete pipeline run
#[derive(Debug)]
pub struct PipelineResult {
    pub records_loaded: usize,
    pub warnings: Vec<RowWarning>,
    pub artifacts: Vec<ArtifactSummary>,
}

pub struct Pipeline;

impl Pipeline {
    /// Load the three sources, build all four reports, then write them to the output directory.
    ///
    /// Nothing is written unless every source could be opened and read.
    #[instrument(skip(config), fields(output_dir = %config.output.dir.display()))]
    pub fn run(config: &Config, as_of: NaiveDateTime) -> Result<PipelineResult> {
        let started = Instant::now();
        info!("🚀 Starting inventory pipeline (as of {})", as_of);

        let loader = Loader::from_config(config);
        let outcome = loader.load_files(
            &config.sources.manufacturers,
            &config.sources.prices,
            &config.sources.service_dates,
        )?;

        let reporter = Reporter::new(&config.parsing.damaged_marker, as_of);
        let reports = reporter.generate_all(&outcome.inventory);

        fs::create_dir_all(&config.output.dir)?;

        let mut artifacts = Vec::with_capacity(reports.len());
        for report in &reports {
            println!("Generating {}...", report.kind.file_name());
            info!(
                report = report.kind.title(),
                rows = report.len(),
                "Generating {}",
                report.kind.file_name()
            );

            let path = Self::write_report(report, &config.output.dir)?;
            ReportMetrics::record_report_written(report.kind, report.len());
            artifacts.push(ArtifactSummary {
                kind: report.kind,
                path,
                rows: report.len(),
            });
        }

        println!("All files generated successfully.");
        ReportMetrics::record_pipeline_duration(started.elapsed().as_secs_f64());
        info!("✅ Wrote {} artifacts to {}", artifacts.len(), config.output.dir.display());

        Ok(PipelineResult {
            records_loaded: outcome.inventory.len(),
            warnings: outcome.warnings,
            artifacts,
        })
    }

    /// Write one report as CSV, header row first. Returns the artifact path.
    pub fn write_report(report: &Report, output_dir: &Path) -> Result<PathBuf> {
        let filepath = output_dir.join(report.kind.file_name());

        let mut writer = csv::Writer::from_path(&filepath)?;
        writer.write_record(report.headers())?;
        for row in &report.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        Ok(filepath)
    }
}
