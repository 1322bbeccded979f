//! Run metrics for the inventory pipeline.
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the embedding
//! process installs a recorder; otherwise every call is a no-op.

use crate::loader::SourceKind;
use crate::report::ReportKind;

/// Metrics for the loading phase
pub struct LoaderMetrics;

impl LoaderMetrics {
    pub fn record_source_loaded(source: SourceKind, rows: usize, duration_secs: f64) {
        ::metrics::counter!("inventory_source_rows_total", "source" => source.label())
            .increment(rows as u64);
        ::metrics::histogram!(
            "inventory_source_load_duration_seconds",
            "source" => source.label()
        )
        .record(duration_secs);
    }

    pub fn record_row_warning(source: SourceKind) {
        ::metrics::counter!("inventory_row_warnings_total", "source" => source.label())
            .increment(1);
    }

    pub fn record_records_merged(records: usize) {
        ::metrics::gauge!("inventory_records_merged").set(records as f64);
    }
}

/// Metrics for report generation
pub struct ReportMetrics;

impl ReportMetrics {
    pub fn record_report_written(kind: ReportKind, rows: usize) {
        ::metrics::counter!("inventory_reports_written_total", "report" => kind.label())
            .increment(1);
        ::metrics::histogram!("inventory_report_rows", "report" => kind.label())
            .record(rows as f64);
    }

    pub fn record_pipeline_duration(duration_secs: f64) {
        ::metrics::histogram!("inventory_pipeline_duration_seconds").record(duration_secs);
    }
}
