use crate::config::Config;
use crate::constants::SERVICE_DATE_FORMAT;
use crate::error::{InventoryError, Result};
use crate::metrics::LoaderMetrics;
use crate::types::{Inventory, InventoryRecord};
use chrono::NaiveDate;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// The three input tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Manufacturers,
    Prices,
    ServiceDates,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Manufacturers => "manufacturers",
            SourceKind::Prices => "prices",
            SourceKind::ServiceDates => "service_dates",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A price or service-date value that could not be parsed. The field is left absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    pub source: SourceKind,
    pub line: u64,
    pub item_id: String,
    pub raw_value: String,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.source {
            SourceKind::Prices => "convert price",
            SourceKind::ServiceDates => "parse service date",
            SourceKind::Manufacturers => "read row",
        };
        write!(
            f,
            "Could not {} '{}' for item ID '{}' ({} line {})",
            what, self.raw_value, self.item_id, self.source, self.line
        )
    }
}

/// Merged inventory plus every recoverable problem met on the way
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub inventory: Inventory,
    pub warnings: Vec<RowWarning>,
}

/// Joins the manufacturer, price and service-date tables by item id.
///
/// The manufacturer table decides which records exist. Price and service-date rows
/// only fill in fields of records that are already known.
#[derive(Debug, Clone)]
pub struct Loader {
    // Lowercased once; source values are lowercased before comparing
    damaged_marker: String,
}

impl Loader {
    pub fn new(damaged_marker: impl Into<String>) -> Self {
        Self {
            damaged_marker: damaged_marker.into().trim().to_lowercase(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.parsing.damaged_marker.as_str())
    }

    /// Open all three sources, then load them. Any source that cannot be opened aborts the run.
    #[instrument(skip(self))]
    pub fn load_files(
        &self,
        manufacturers: &Path,
        prices: &Path,
        service_dates: &Path,
    ) -> Result<LoadOutcome> {
        let manufacturers = open_source(manufacturers)?;
        let prices = open_source(prices)?;
        let service_dates = open_source(service_dates)?;
        self.load(manufacturers, prices, service_dates)
    }

    /// Load from any readers. Each reader is consumed and dropped at the end of its pass.
    pub fn load<M: Read, P: Read, S: Read>(
        &self,
        manufacturers: M,
        prices: P,
        service_dates: S,
    ) -> Result<LoadOutcome> {
        let mut outcome = LoadOutcome::default();

        self.load_manufacturers(manufacturers, &mut outcome)?;
        self.merge_prices(prices, &mut outcome)?;
        self.merge_service_dates(service_dates, &mut outcome)?;

        LoaderMetrics::record_records_merged(outcome.inventory.len());
        info!(
            "✅ Loaded {} records ({} warnings)",
            outcome.inventory.len(),
            outcome.warnings.len()
        );
        Ok(outcome)
    }

    fn load_manufacturers<R: Read>(&self, reader: R, outcome: &mut LoadOutcome) -> Result<()> {
        let started = Instant::now();
        let mut rows = 0;

        for_each_row(reader, SourceKind::Manufacturers, |line, row| {
            rows += 1;
            let (Some(id), Some(manufacturer), Some(item_type)) =
                (row.get(0), row.get(1), row.get(2))
            else {
                debug!(line, "Skipping manufacturer row with fewer than 3 columns");
                return;
            };
            if id.is_empty() {
                debug!(line, "Skipping manufacturer row without an item id");
                return;
            }

            let damaged = row
                .get(3)
                .is_some_and(|marker| marker.to_lowercase() == self.damaged_marker);
            outcome
                .inventory
                .insert(InventoryRecord::new(id, manufacturer, item_type, damaged));
        })?;

        LoaderMetrics::record_source_loaded(
            SourceKind::Manufacturers,
            rows,
            started.elapsed().as_secs_f64(),
        );
        debug!("Read {} manufacturer rows", rows);
        Ok(())
    }

    fn merge_prices<R: Read>(&self, reader: R, outcome: &mut LoadOutcome) -> Result<()> {
        let started = Instant::now();
        let mut rows = 0;

        for_each_row(reader, SourceKind::Prices, |line, row| {
            rows += 1;
            let item_id = row.get(0).unwrap_or_default();
            let raw = row.get(1).unwrap_or_default();

            match parse_price(raw) {
                Some(price) => {
                    if let Some(record) = outcome.inventory.get_mut(item_id) {
                        record.price = Some(price);
                    }
                }
                None => push_warning(outcome, SourceKind::Prices, line, item_id, raw),
            }
        })?;

        LoaderMetrics::record_source_loaded(
            SourceKind::Prices,
            rows,
            started.elapsed().as_secs_f64(),
        );
        debug!("Read {} price rows", rows);
        Ok(())
    }

    fn merge_service_dates<R: Read>(&self, reader: R, outcome: &mut LoadOutcome) -> Result<()> {
        let started = Instant::now();
        let mut rows = 0;

        for_each_row(reader, SourceKind::ServiceDates, |line, row| {
            rows += 1;
            let item_id = row.get(0).unwrap_or_default();
            let raw = row.get(1).unwrap_or_default();

            match parse_service_date(raw) {
                Some(date) => {
                    if let Some(record) = outcome.inventory.get_mut(item_id) {
                        record.service_date = Some(date);
                    }
                }
                None => push_warning(outcome, SourceKind::ServiceDates, line, item_id, raw),
            }
        })?;

        LoaderMetrics::record_source_loaded(
            SourceKind::ServiceDates,
            rows,
            started.elapsed().as_secs_f64(),
        );
        debug!("Read {} service date rows", rows);
        Ok(())
    }
}

/// Parse a decimal price. Empty, malformed and non-finite values yield `None`.
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|price| price.is_finite())
}

/// Parse a MM/DD/YYYY service date. Empty or malformed values yield `None`.
pub fn parse_service_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, SERVICE_DATE_FORMAT).ok()
}

fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| InventoryError::SourceOpen {
        path: path.to_path_buf(),
        source,
    })
}

fn push_warning(
    outcome: &mut LoadOutcome,
    source: SourceKind,
    line: u64,
    item_id: &str,
    raw: &str,
) {
    let warning = RowWarning {
        source,
        line,
        item_id: item_id.to_string(),
        raw_value: raw.to_string(),
    };
    warn!(source = %source, item_id = %item_id, value = %raw, "{}", warning);
    LoaderMetrics::record_row_warning(source);
    outcome.warnings.push(warning);
}

/// Stream every data row of a CSV source (header skipped, fields trimmed, ragged rows allowed).
///
/// Rows the CSV layer cannot decode are skipped; an I/O failure mid-read is fatal.
fn for_each_row<R: Read>(
    reader: R,
    source: SourceKind,
    mut handle: impl FnMut(u64, &csv::StringRecord),
) -> Result<()> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    for result in csv_reader.records() {
        match result {
            Ok(row) => {
                let line = row.position().map(|p| p.line()).unwrap_or_default();
                handle(line, &row);
            }
            Err(e) if e.is_io_error() => return Err(InventoryError::Csv(e)),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                if source == SourceKind::Manufacturers {
                    debug!(line, "Skipping unreadable manufacturer row: {}", e);
                } else {
                    warn!(source = %source, line, "Skipping unreadable row: {}", e);
                }
            }
        }
    }
    Ok(())
}
