//! # inventory_reports
//!
//! Joins three inventory tables (manufacturer/type/damage, price, service date) by item id
//! and derives four CSV reports from the merged records:
//!
//! - `FullInventory.csv`: every item, by manufacturer
//! - `LaptopInventory.csv`: laptops, by item id
//! - `PastServiceDateInventory.csv`: items whose service date has passed, oldest first
//! - `DamagedInventory.csv`: damaged items, most valuable first
//!
//! ```
//! use chrono::NaiveDate;
//! use inventory_reports::{Loader, Reporter};
//!
//! let outcome = Loader::new("damaged")
//!     .load(
//!         "Item ID,Manufacturer,Item Type,Damaged\n1,Acme,Laptop,\n2,Zeta,Monitor,damaged\n"
//!             .as_bytes(),
//!         "Item ID,Price\n1,999.99\n2,bad\n".as_bytes(),
//!         "Item ID,Service Date\n1,01/01/2020\n2,\n".as_bytes(),
//!     )
//!     .unwrap();
//!
//! let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let damaged = Reporter::new("damaged", as_of).damaged_inventory(&outcome.inventory);
//! assert_eq!(damaged.rows, vec![vec!["2", "Zeta", "Monitor", "", ""]]);
//! assert_eq!(outcome.warnings.len(), 2);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod types;

pub use config::{Config, ConfigOverrides};
pub use error::{InventoryError, Result};
pub use loader::{LoadOutcome, Loader, RowWarning, SourceKind};
pub use pipeline::{ArtifactSummary, Pipeline, PipelineResult};
pub use report::{Column, Report, ReportKind, Reporter};
pub use types::{Inventory, InventoryRecord};
