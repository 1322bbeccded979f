//! The four inventory reports.
//!
//! Each report is a pure function of the merged [`Inventory`]: a filter, a stable sort
//! and a column projection. Rendering rules are shared through [`Column`], so a field
//! looks the same in every artifact it appears in.

use crate::constants;
use crate::types::{Inventory, InventoryRecord};
use chrono::NaiveDateTime;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ItemId,
    Manufacturer,
    ItemType,
    Price,
    ServiceDate,
    Damaged,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::ItemId => constants::HEADER_ITEM_ID,
            Column::Manufacturer => constants::HEADER_MANUFACTURER,
            Column::ItemType => constants::HEADER_ITEM_TYPE,
            Column::Price => constants::HEADER_PRICE,
            Column::ServiceDate => constants::HEADER_SERVICE_DATE,
            Column::Damaged => constants::HEADER_DAMAGED,
        }
    }

    /// Render one cell. Absent values and undamaged items render as an empty cell.
    pub fn render(self, record: &InventoryRecord, damaged_marker: &str) -> String {
        match self {
            Column::ItemId => record.id.clone(),
            Column::Manufacturer => record.manufacturer.clone(),
            Column::ItemType => record.item_type.clone(),
            Column::Price => record.price.map(format_price).unwrap_or_default(),
            Column::ServiceDate => record
                .service_date
                .map(|d| d.format(constants::SERVICE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            Column::Damaged if record.damaged => damaged_marker.to_string(),
            Column::Damaged => String::new(),
        }
    }
}

const FULL_COLUMNS: &[Column] = &[
    Column::ItemId,
    Column::Manufacturer,
    Column::ItemType,
    Column::Price,
    Column::ServiceDate,
    Column::Damaged,
];

const LAPTOP_COLUMNS: &[Column] = &[
    Column::ItemId,
    Column::Manufacturer,
    Column::Price,
    Column::ServiceDate,
    Column::Damaged,
];

// Membership already implies damaged, so no Damaged column
const DAMAGED_COLUMNS: &[Column] = &[
    Column::ItemId,
    Column::Manufacturer,
    Column::ItemType,
    Column::Price,
    Column::ServiceDate,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    FullInventory,
    LaptopInventory,
    PastServiceDateInventory,
    DamagedInventory,
}

impl ReportKind {
    /// Generation order
    pub const ALL: [ReportKind; 4] = [
        ReportKind::FullInventory,
        ReportKind::LaptopInventory,
        ReportKind::PastServiceDateInventory,
        ReportKind::DamagedInventory,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::FullInventory => "Full Inventory",
            ReportKind::LaptopInventory => "Laptop Inventory",
            ReportKind::PastServiceDateInventory => "Past Service Date Inventory",
            ReportKind::DamagedInventory => "Damaged Inventory",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ReportKind::FullInventory => constants::FULL_INVENTORY_FILE,
            ReportKind::LaptopInventory => constants::LAPTOP_INVENTORY_FILE,
            ReportKind::PastServiceDateInventory => constants::PAST_SERVICE_DATE_INVENTORY_FILE,
            ReportKind::DamagedInventory => constants::DAMAGED_INVENTORY_FILE,
        }
    }

    /// Metric label
    pub fn label(self) -> &'static str {
        match self {
            ReportKind::FullInventory => "full_inventory",
            ReportKind::LaptopInventory => "laptop_inventory",
            ReportKind::PastServiceDateInventory => "past_service_date_inventory",
            ReportKind::DamagedInventory => "damaged_inventory",
        }
    }

    pub fn columns(self) -> &'static [Column] {
        match self {
            ReportKind::FullInventory | ReportKind::PastServiceDateInventory => FULL_COLUMNS,
            ReportKind::LaptopInventory => LAPTOP_COLUMNS,
            ReportKind::DamagedInventory => DAMAGED_COLUMNS,
        }
    }
}

/// A fully rendered report, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub kind: ReportKind,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    pub fn headers(&self) -> Vec<&'static str> {
        self.kind.columns().iter().map(|c| c.header()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, top to bottom. `None` when the report has no such column.
    pub fn column_values(&self, column: Column) -> Option<Vec<&str>> {
        let position = self.kind.columns().iter().position(|c| *c == column)?;
        Some(self.rows.iter().map(|row| row[position].as_str()).collect())
    }
}

/// Builds reports against a fixed evaluation instant.
#[derive(Debug, Clone)]
pub struct Reporter {
    damaged_marker: String,
    as_of: NaiveDateTime,
}

impl Reporter {
    /// `damaged_marker` is written (lowercased) into the Damaged column of damaged items.
    pub fn new(damaged_marker: &str, as_of: NaiveDateTime) -> Self {
        Self {
            damaged_marker: damaged_marker.trim().to_lowercase(),
            as_of,
        }
    }

    pub fn as_of(&self) -> NaiveDateTime {
        self.as_of
    }

    /// All records, by manufacturer.
    pub fn full_inventory(&self, inventory: &Inventory) -> Report {
        let mut records: Vec<&InventoryRecord> = inventory.iter().collect();
        records.sort_by(|a, b| a.manufacturer.cmp(&b.manufacturer));
        self.project(ReportKind::FullInventory, &records)
    }

    /// Laptops only, by item id.
    pub fn laptop_inventory(&self, inventory: &Inventory) -> Report {
        let mut records: Vec<&InventoryRecord> =
            inventory.iter().filter(|r| r.is_laptop()).collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        self.project(ReportKind::LaptopInventory, &records)
    }

    /// Records whose service date is before the evaluation instant, oldest first.
    pub fn past_service_date_inventory(&self, inventory: &Inventory) -> Report {
        let mut records: Vec<&InventoryRecord> = inventory
            .iter()
            .filter(|r| r.is_past_service(self.as_of))
            .collect();
        records.sort_by(|a, b| compare_service_dates(a, b));
        self.project(ReportKind::PastServiceDateInventory, &records)
    }

    /// Damaged records, most valuable first. A missing price orders as zero.
    pub fn damaged_inventory(&self, inventory: &Inventory) -> Report {
        let mut records: Vec<&InventoryRecord> = inventory.iter().filter(|r| r.damaged).collect();
        records.sort_by(|a, b| {
            price_key(b)
                .partial_cmp(&price_key(a))
                .unwrap_or(Ordering::Equal)
        });
        self.project(ReportKind::DamagedInventory, &records)
    }

    pub fn generate(&self, kind: ReportKind, inventory: &Inventory) -> Report {
        match kind {
            ReportKind::FullInventory => self.full_inventory(inventory),
            ReportKind::LaptopInventory => self.laptop_inventory(inventory),
            ReportKind::PastServiceDateInventory => self.past_service_date_inventory(inventory),
            ReportKind::DamagedInventory => self.damaged_inventory(inventory),
        }
    }

    pub fn generate_all(&self, inventory: &Inventory) -> Vec<Report> {
        ReportKind::ALL
            .iter()
            .map(|&kind| self.generate(kind, inventory))
            .collect()
    }

    fn project(&self, kind: ReportKind, records: &[&InventoryRecord]) -> Report {
        let columns = kind.columns();
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| column.render(record, &self.damaged_marker))
                    .collect()
            })
            .collect();
        Report { kind, rows }
    }
}

/// Decimal text for a price. Whole numbers keep one decimal place (`799.0`), anything
/// else uses the shortest form that reads back to the same value.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e16 {
        format!("{:.1}", price)
    } else {
        price.to_string()
    }
}

fn price_key(record: &InventoryRecord) -> f64 {
    record.price.unwrap_or(0.0)
}

/// Dated records first, in date order; undated records last.
fn compare_service_dates(a: &InventoryRecord, b: &InventoryRecord) -> Ordering {
    match (a.service_date, b.service_date) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
