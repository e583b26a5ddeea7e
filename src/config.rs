//! The immutable configuration consumed by a classification pass.
//!
//! A [`BaselineConfig`] is constructed once, either from the tables embedded
//! in the library or from a directory of custom tables, and passed by
//! reference into each pipeline component.
use crate::input::{read_csv_from_slice, read_toml};
use crate::system_type::{
    HeatSourceTable, SystemTypeTable, read_heat_source_table, read_system_type_table,
};
use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};
use log::info;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// The default tables shipped with the library.
static DATA_DIR: Dir = include_dir!("data");

const THRESHOLDS_FILE_NAME: &str = "classification.toml";
const SYSTEM_TYPES_FILE_NAME: &str = "baseline_system_types.csv";
const HEAT_SOURCES_FILE_NAME: &str = "heat_sources.csv";

/// Threshold constants consumed throughout classification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Load-intensity deviation isolating a zone, in Btu/h*ft2
    pub load_limit: f64,
    /// Operating-hours deviation isolating a zone, in EFLH/week
    pub eflh_limit: f64,
    /// Aggregate computer-room load selecting the high-load tier, in Btu/h
    pub computer_room_building_threshold: f64,
    /// Single-zone computer-room load selecting the high-load tier, in Btu/h
    pub computer_room_zone_threshold: f64,
    /// Total laboratory exhaust isolating laboratory zones, in cfm
    pub lab_exhaust_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            load_limit: 10.0,
            eflh_limit: 40.0,
            computer_room_building_threshold: 3_000_000.0,
            computer_room_zone_threshold: 600_000.0,
            lab_exhaust_threshold: 15_000.0,
        }
    }
}

impl Thresholds {
    /// Read thresholds from `classification.toml` in the given directory,
    /// falling back to the defaults when the file is absent.
    pub fn from_path(config_dir: &Path) -> Result<Self> {
        let file_path = config_dir.join(THRESHOLDS_FILE_NAME);
        if !file_path.exists() {
            info!(
                "No {THRESHOLDS_FILE_NAME} found; using default classification thresholds"
            );
            return Ok(Self::default());
        }

        read_toml(&file_path)
    }
}

/// Everything a classification pass reads but never writes.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineConfig {
    /// Threshold constants
    pub thresholds: Thresholds,
    /// The system-type table
    pub system_types: SystemTypeTable,
    /// The climate-zone × category heat-source table
    pub heat_sources: HeatSourceTable,
}

impl BaselineConfig {
    /// Build the configuration from a directory containing the two table
    /// CSV files and an optional `classification.toml`.
    pub fn from_path(config_dir: &Path) -> Result<Self> {
        Ok(Self {
            thresholds: Thresholds::from_path(config_dir)?,
            system_types: read_system_type_table(&config_dir.join(SYSTEM_TYPES_FILE_NAME))?,
            heat_sources: read_heat_source_table(&config_dir.join(HEAT_SOURCES_FILE_NAME))?,
        })
    }

    /// Build the configuration from the embedded default tables.
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            thresholds: Thresholds::default(),
            system_types: SystemTypeTable::from_rows(embedded_csv(SYSTEM_TYPES_FILE_NAME)?)?,
            heat_sources: HeatSourceTable::from_rows(embedded_csv(HEAT_SOURCES_FILE_NAME)?)?,
        })
    }
}

/// Read one of the embedded CSV tables.
fn embedded_csv<T: DeserializeOwned>(file_name: &str) -> Result<Vec<T>> {
    let file = DATA_DIR
        .get_file(file_name)
        .with_context(|| format!("Embedded table {file_name} is missing"))?;
    read_csv_from_slice(file.contents(), file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_thresholds_default_when_file_absent() {
        let dir = tempdir().unwrap();
        let thresholds = Thresholds::from_path(dir.path()).unwrap();
        assert_eq!(thresholds, Thresholds::default());
    }

    #[test]
    fn test_thresholds_partial_override() {
        let dir = tempdir().unwrap();
        {
            let mut file = File::create(dir.path().join(THRESHOLDS_FILE_NAME)).unwrap();
            writeln!(file, "eflh_limit = 30.0").unwrap();
        }

        let thresholds = Thresholds::from_path(dir.path()).unwrap();
        assert_eq!(thresholds.eflh_limit, 30.0);
        assert_eq!(thresholds.load_limit, Thresholds::default().load_limit);
    }

    #[test]
    fn test_embedded_tables_load_and_validate() {
        let config = BaselineConfig::embedded().unwrap();

        // The shipped office table gives low-rise small buildings a
        // packaged single-zone system
        let generic = config
            .system_types
            .lookup(&"office".into(), 2, 20_000.0)
            .unwrap();
        assert_eq!(generic, crate::system_type::GenericSystem::Psz);

        // Hot-humid climates heat electrically, the rest with fuel
        assert_eq!(
            config
                .heat_sources
                .lookup(&"1A".into(), &"office".into())
                .unwrap(),
            crate::system_type::HeatSource::Electric
        );
        assert_eq!(
            config
                .heat_sources
                .lookup(&"5A".into(), &"office".into())
                .unwrap(),
            crate::system_type::HeatSource::Fuel
        );
    }

    #[test]
    fn test_config_from_path() {
        let dir = tempdir().unwrap();
        {
            let mut file = File::create(dir.path().join(SYSTEM_TYPES_FILE_NAME)).unwrap();
            writeln!(
                file,
                "occupancy_category,story_group,max_stories,area_group,min_area,min_area_qual,\
                max_area,max_area_qual,system_type"
            )
            .unwrap();
            writeln!(file, "office,1,99,1,0,GE,1000000000,LE,VAV").unwrap();
        }
        {
            let mut file = File::create(dir.path().join(HEAT_SOURCES_FILE_NAME)).unwrap();
            writeln!(file, "climate_zone,occupancy_category,heat_source").unwrap();
            writeln!(file, "5A,any,fuel").unwrap();
        }

        let config = BaselineConfig::from_path(dir.path()).unwrap();
        assert_eq!(config.thresholds, Thresholds::default());
        assert!(
            config
                .system_types
                .lookup(&"office".into(), 40, 5_000.0)
                .is_ok()
        );
    }
}
