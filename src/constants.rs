/// File and column name constants shared by the loader, the reports and the CLI.
/// Artifact names are consumed by downstream tooling and must not change.

// Default source locations (relative to the working directory)
pub const MANUFACTURER_SOURCE: &str = "ManufacturerList.csv";
pub const PRICE_SOURCE: &str = "PriceList.csv";
pub const SERVICE_DATE_SOURCE: &str = "ServiceDatesList.csv";

// Default config file picked up when present
pub const DEFAULT_CONFIG_FILE: &str = "inventory.toml";

pub const DEFAULT_OUTPUT_DIR: &str = "output";

// Artifact file names
pub const FULL_INVENTORY_FILE: &str = "FullInventory.csv";
pub const LAPTOP_INVENTORY_FILE: &str = "LaptopInventory.csv";
pub const PAST_SERVICE_DATE_INVENTORY_FILE: &str = "PastServiceDateInventory.csv";
pub const DAMAGED_INVENTORY_FILE: &str = "DamagedInventory.csv";

// Column headers
pub const HEADER_ITEM_ID: &str = "Item ID";
pub const HEADER_MANUFACTURER: &str = "Manufacturer";
pub const HEADER_ITEM_TYPE: &str = "Item Type";
pub const HEADER_PRICE: &str = "Price";
pub const HEADER_SERVICE_DATE: &str = "Service Date";
pub const HEADER_DAMAGED: &str = "Damaged";

pub const DEFAULT_DAMAGED_MARKER: &str = "damaged";
pub const LAPTOP_ITEM_TYPE: &str = "laptop";

/// Service dates are read and written as MM/DD/YYYY.
pub const SERVICE_DATE_FORMAT: &str = "%m/%d/%Y";

pub const LOG_FILE_PREFIX: &str = "inventory_reports.log";

/// All four artifact file names, in generation order
pub fn get_artifact_files() -> Vec<&'static str> {
    vec![
        FULL_INVENTORY_FILE,
        LAPTOP_INVENTORY_FILE,
        PAST_SERVICE_DATE_INVENTORY_FILE,
        DAMAGED_INVENTORY_FILE,
    ]
}
