use crate::constants::LAPTOP_ITEM_TYPE;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

/// One inventory item after the three sources have been joined
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRecord {
    pub id: String,
    pub manufacturer: String,
    pub item_type: String,
    pub damaged: bool,
    pub price: Option<f64>,
    pub service_date: Option<NaiveDate>,
}

impl InventoryRecord {
    /// A record as read from the manufacturer source, before price and date are merged in
    pub fn new(
        id: impl Into<String>,
        manufacturer: impl Into<String>,
        item_type: impl Into<String>,
        damaged: bool,
    ) -> Self {
        Self {
            id: id.into(),
            manufacturer: manufacturer.into(),
            item_type: item_type.into(),
            damaged,
            price: None,
            service_date: None,
        }
    }

    pub fn is_laptop(&self) -> bool {
        self.item_type.eq_ignore_ascii_case(LAPTOP_ITEM_TYPE)
    }

    /// True when the service date falls strictly before `as_of`. Records without a
    /// date are never past due.
    pub fn is_past_service(&self, as_of: NaiveDateTime) -> bool {
        self.service_date
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .is_some_and(|due| due < as_of)
    }
}

/// Records keyed by item id, iterated in the order ids were first seen
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    records: Vec<InventoryRecord>,
    index: HashMap<String, usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. An id already present is replaced in place, keeping its position.
    pub fn insert(&mut self, record: InventoryRecord) {
        match self.index.get(&record.id) {
            Some(&slot) => self.records[slot] = record,
            None => {
                self.index.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&InventoryRecord> {
        self.index.get(id).map(|&slot| &self.records[slot])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut InventoryRecord> {
        match self.index.get(id) {
            Some(&slot) => self.records.get_mut(slot),
            None => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<InventoryRecord> for Inventory {
    fn from_iter<I: IntoIterator<Item = InventoryRecord>>(iter: I) -> Self {
        let mut inventory = Inventory::new();
        for record in iter {
            inventory.insert(record);
        }
        inventory
    }
}
