use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use inventory_reports::constants::get_artifact_files;
use inventory_reports::{Config, ConfigOverrides, InventoryError, Pipeline, ReportKind, SourceKind};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const MANUFACTURERS: &str = "\
Item ID,Manufacturer,Item Type,Damaged
1,Acme,Laptop,
2,Zeta,Monitor,damaged
";
const PRICES: &str = "Item ID,Price\n1,999.99\n2,bad\n";
const SERVICE_DATES: &str = "Item ID,Service Date\n1,01/01/2020\n2,\n";

fn as_of() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn write_sources(
    dir: &Path,
    manufacturers: &str,
    prices: &str,
    service_dates: &str,
) -> Result<Config> {
    fs::write(dir.join("ManufacturerList.csv"), manufacturers)?;
    fs::write(dir.join("PriceList.csv"), prices)?;
    fs::write(dir.join("ServiceDatesList.csv"), service_dates)?;

    let config = Config::default().apply_overrides(ConfigOverrides {
        manufacturers: Some(dir.join("ManufacturerList.csv")),
        prices: Some(dir.join("PriceList.csv")),
        service_dates: Some(dir.join("ServiceDatesList.csv")),
        output_dir: Some(dir.join("output")),
        ..Default::default()
    })?;
    Ok(config)
}

/// Header plus data rows of a written artifact
fn read_artifact(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok((headers, rows))
}

#[test]
fn test_round_trip_scenario() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = write_sources(temp_dir.path(), MANUFACTURERS, PRICES, SERVICE_DATES)?;

    let result = Pipeline::run(&config, as_of())?;
    assert_eq!(result.records_loaded, 2);
    assert_eq!(result.artifacts.len(), 4);

    // One bad price, one empty date
    assert_eq!(result.warnings.len(), 2);
    assert_eq!(result.warnings[0].source, SourceKind::Prices);
    assert_eq!(result.warnings[0].item_id, "2");
    assert_eq!(result.warnings[0].raw_value, "bad");
    assert_eq!(result.warnings[1].source, SourceKind::ServiceDates);

    let output = temp_dir.path().join("output");

    let (headers, rows) = read_artifact(&output.join("FullInventory.csv"))?;
    assert_eq!(
        headers,
        vec!["Item ID", "Manufacturer", "Item Type", "Price", "Service Date", "Damaged"]
    );
    assert_eq!(
        rows,
        vec![
            vec!["1", "Acme", "Laptop", "999.99", "01/01/2020", ""],
            vec!["2", "Zeta", "Monitor", "", "", "damaged"],
        ]
    );

    let (headers, rows) = read_artifact(&output.join("LaptopInventory.csv"))?;
    assert_eq!(headers, vec!["Item ID", "Manufacturer", "Price", "Service Date", "Damaged"]);
    assert_eq!(rows, vec![vec!["1", "Acme", "999.99", "01/01/2020", ""]]);

    let (_, rows) = read_artifact(&output.join("PastServiceDateInventory.csv"))?;
    assert_eq!(rows, vec![vec!["1", "Acme", "Laptop", "999.99", "01/01/2020", ""]]);

    let (headers, rows) = read_artifact(&output.join("DamagedInventory.csv"))?;
    assert_eq!(headers, vec!["Item ID", "Manufacturer", "Item Type", "Price", "Service Date"]);
    assert_eq!(rows, vec![vec!["2", "Zeta", "Monitor", "", ""]]);

    Ok(())
}

#[test]
fn test_laptop_with_bad_price_is_still_reported() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = write_sources(
        temp_dir.path(),
        "id,m,t,d\n4,Acme,LAPTOP,\n6,Bolt,laptop,damaged\n",
        "id,price\n4,n/a\n6,799\n",
        "id,date\n4,03/15/2021\n",
    )?;

    let result = Pipeline::run(&config, as_of())?;
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].item_id, "4");
    assert_eq!(result.warnings[0].raw_value, "n/a");

    let (_, rows) = read_artifact(&config.output.dir.join("LaptopInventory.csv"))?;
    assert_eq!(
        rows,
        vec![
            vec!["4", "Acme", "", "03/15/2021", ""],
            vec!["6", "Bolt", "799.0", "", "damaged"],
        ]
    );

    let (_, rows) = read_artifact(&config.output.dir.join("DamagedInventory.csv"))?;
    assert_eq!(rows, vec![vec!["6", "Bolt", "laptop", "799.0", ""]]);
    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = write_sources(
        temp_dir.path(),
        "id,m,t,d\n7,Zeta,Tower,\n3,Acme,laptop,damaged\n5,Acme,LAPTOP,damaged\n9,Bolt,Phone,\n",
        "id,price\n3,10\n5,10\n9,1.25\n",
        "id,date\n7,02/02/2022\n3,01/01/2021\n9,12/31/2099\n",
    )?;

    Pipeline::run(&config, as_of())?;
    let first: Vec<Vec<u8>> = get_artifact_files()
        .iter()
        .map(|name| fs::read(config.output.dir.join(name)))
        .collect::<std::io::Result<_>>()?;

    Pipeline::run(&config, as_of())?;
    let second: Vec<Vec<u8>> = get_artifact_files()
        .iter()
        .map(|name| fs::read(config.output.dir.join(name)))
        .collect::<std::io::Result<_>>()?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_every_manufacturer_id_appears_once() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = write_sources(
        temp_dir.path(),
        "id,m,t\n1,Acme,Tower\n2,Acme,Tower\n3,Bolt,Phone\n",
        "id,price\n1,5\n42,7\n",
        "id,date\n3,03/03/2023\n43,03/03/2023\n",
    )?;

    let result = Pipeline::run(&config, as_of())?;
    assert!(result.warnings.is_empty());

    let full = result
        .artifacts
        .iter()
        .find(|a| a.kind == ReportKind::FullInventory)
        .unwrap();
    assert_eq!(full.rows, 3);

    let (_, rows) = read_artifact(&full.path)?;
    let ids: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    Ok(())
}

#[test]
fn test_missing_source_is_fatal_and_writes_nothing() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = write_sources(temp_dir.path(), MANUFACTURERS, PRICES, SERVICE_DATES)?;
    fs::remove_file(&config.sources.service_dates)?;

    let err = Pipeline::run(&config, as_of()).unwrap_err();
    assert!(matches!(err, InventoryError::SourceOpen { .. }));
    assert!(!config.output.dir.exists());
    Ok(())
}

#[test]
fn test_nested_output_dir_is_created() -> Result<()> {
    let temp_dir = tempdir()?;
    let mut config = write_sources(temp_dir.path(), MANUFACTURERS, PRICES, SERVICE_DATES)?;
    config.output.dir = temp_dir.path().join("reports").join("2024");

    let result = Pipeline::run(&config, as_of())?;
    for artifact in &result.artifacts {
        assert!(artifact.path.is_file());
        assert_eq!(artifact.path.parent(), Some(config.output.dir.as_path()));
    }
    Ok(())
}
