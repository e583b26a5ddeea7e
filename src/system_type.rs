//! The baseline system-type table and the selection of a concrete system
//! type for a finished group.
//!
//! The table is keyed by occupancy category; within a category the rows form
//! ascending story-range groups, and within a story-range group ascending
//! area ranges whose comparison operators are data, not code. The generic
//! system label of the matching row is mapped to a concrete system-type code
//! by the climate-dependent heat source.
use crate::config::BaselineConfig;
use crate::group::{GroupType, SystemGroup};
use crate::id::{CategoryID, ClimateZoneID};
use crate::input::read_csv;
use crate::zone::Fuel;
use anyhow::{Context, Result, bail, ensure};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_string_enum::DeserializeLabeledStringEnum;
use std::path::Path;

/// Heat-source table category matching any occupancy category.
const ANY_CATEGORY: &str = "any";

/// A generic system label, as it appears in the system-type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeLabeledStringEnum)]
pub enum GenericSystem {
    /// Packaged terminal unit
    #[string = "PTAC"]
    Ptac,
    /// Packaged single-zone unit
    #[string = "PSZ"]
    Psz,
    /// Single-zone constant-volume air handler
    #[string = "SZ-CV"]
    SzCv,
    /// Single-zone variable-air-volume air handler
    #[string = "SZ-VAV"]
    SzVav,
    /// Packaged variable-air-volume system
    #[string = "Packaged VAV"]
    PackagedVav,
    /// Built-up variable-air-volume system
    #[string = "VAV"]
    Vav,
    /// Heating and ventilation only
    #[string = "Heating and ventilation"]
    HeatingAndVentilation,
    /// No conditioning
    #[string = "Unconditioned"]
    Unconditioned,
}

/// A concrete baseline system-type code handed to equipment construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SystemTypeCode {
    /// Packaged terminal air conditioner
    #[display("PTAC")]
    Ptac,
    /// Packaged terminal heat pump
    #[display("PTHP")]
    Pthp,
    /// Packaged single-zone air conditioner
    #[display("PSZ-AC")]
    PszAc,
    /// Packaged single-zone heat pump
    #[display("PSZ-HP")]
    PszHp,
    /// Single-zone constant-volume air handler
    #[display("SZ-CV")]
    SzCv,
    /// Single-zone variable-air-volume air handler
    #[display("SZ-VAV")]
    SzVav,
    /// Packaged VAV with hot-water reheat
    #[display("PVAV-Reheat")]
    PvavReheat,
    /// Packaged VAV with parallel fan-powered boxes
    #[display("PVAV-PFP-Boxes")]
    PvavPfpBoxes,
    /// VAV with hot-water reheat
    #[display("VAV-Reheat")]
    VavReheat,
    /// VAV with parallel fan-powered boxes
    #[display("VAV-PFP-Boxes")]
    VavPfpBoxes,
    /// Gas-fired furnace
    #[display("Gas-Furnace")]
    GasFurnace,
    /// Electric-resistance furnace
    #[display("Electric-Furnace")]
    ElectricFurnace,
}

/// The baseline heat source governing a category in a climate zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeLabeledStringEnum)]
pub enum HeatSource {
    /// Fuel-fired heating
    #[string = "fuel"]
    Fuel,
    /// Electric-resistance or heat-pump heating
    #[string = "electric"]
    Electric,
}

/// Comparison mode for an area range's lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeLabeledStringEnum)]
pub enum MinAreaQual {
    /// The group area must exceed the bound
    #[string = "GT"]
    GreaterThan,
    /// The group area must equal or exceed the bound
    #[string = "GE"]
    GreaterOrEqual,
}

/// Comparison mode for an area range's upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeLabeledStringEnum)]
pub enum MaxAreaQual {
    /// The group area must fall below the bound
    #[string = "LT"]
    LessThan,
    /// The group area must equal or fall below the bound
    #[string = "LE"]
    LessOrEqual,
}

/// One row of the system-type table, as read from CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemTypeRow {
    /// The occupancy category the row applies to
    pub occupancy_category: String,
    /// Ordinal of the story-range group within the category, from 1
    pub story_group: u32,
    /// Upper story bound of the story-range group
    pub max_stories: u32,
    /// Ordinal of the area range within the story-range group, from 1
    pub area_group: u32,
    /// Lower area bound in ft2
    pub min_area: f64,
    /// Comparison mode for the lower bound
    pub min_area_qual: MinAreaQual,
    /// Upper area bound in ft2
    pub max_area: f64,
    /// Comparison mode for the upper bound
    pub max_area_qual: MaxAreaQual,
    /// The generic system label the row resolves to
    pub system_type: GenericSystem,
}

/// An area range with data-driven comparison operators.
#[derive(Debug, Clone, PartialEq)]
struct AreaRange {
    min_area: f64,
    min_qual: MinAreaQual,
    max_area: f64,
    max_qual: MaxAreaQual,
    system_type: GenericSystem,
}

impl AreaRange {
    fn from_row(row: &SystemTypeRow) -> Self {
        Self {
            min_area: row.min_area,
            min_qual: row.min_area_qual,
            max_area: row.max_area,
            max_qual: row.max_area_qual,
            system_type: row.system_type,
        }
    }

    /// Whether the given floor area satisfies both bounds under their
    /// comparison modes.
    fn contains(&self, area_ft2: f64) -> bool {
        let above_min = match self.min_qual {
            MinAreaQual::GreaterThan => area_ft2 > self.min_area,
            MinAreaQual::GreaterOrEqual => area_ft2 >= self.min_area,
        };
        let below_max = match self.max_qual {
            MaxAreaQual::LessThan => area_ft2 < self.max_area,
            MaxAreaQual::LessOrEqual => area_ft2 <= self.max_area,
        };
        above_min && below_max
    }
}

/// A story-range group: all area ranges sharing one upper story bound.
#[derive(Debug, Clone, PartialEq)]
struct StoryGroup {
    max_stories: u32,
    area_ranges: Vec<AreaRange>,
}

/// The validated in-memory system-type table.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemTypeTable(IndexMap<CategoryID, Vec<StoryGroup>>);

impl SystemTypeTable {
    /// Build and validate the table from its rows.
    ///
    /// Rows must be listed per category in ascending `(story_group,
    /// area_group)` order, both numbered contiguously from 1, with
    /// non-decreasing story bounds.
    pub fn from_rows(rows: Vec<SystemTypeRow>) -> Result<Self> {
        ensure!(!rows.is_empty(), "System type table has no rows");

        let mut table: IndexMap<CategoryID, Vec<StoryGroup>> = IndexMap::new();
        for row in rows {
            let category = &row.occupancy_category;
            ensure!(
                row.min_area >= 0.0 && row.max_area.is_finite() && row.min_area <= row.max_area,
                "Invalid area bounds [{}, {}] for category '{}'",
                row.min_area,
                row.max_area,
                category
            );

            let story_groups = table.entry(category.as_str().into()).or_default();
            if row.story_group as usize == story_groups.len() + 1 {
                // First row of a new story-range group
                ensure!(
                    row.area_group == 1,
                    "Area range groups for category '{}' must be numbered from 1",
                    category
                );
                if let Some(previous) = story_groups.last() {
                    ensure!(
                        row.max_stories >= previous.max_stories,
                        "Story bounds for category '{}' must not decrease",
                        category
                    );
                }
                story_groups.push(StoryGroup {
                    max_stories: row.max_stories,
                    area_ranges: vec![AreaRange::from_row(&row)],
                });
            } else if row.story_group as usize == story_groups.len() {
                let current = story_groups.last_mut().unwrap();
                ensure!(
                    row.max_stories == current.max_stories,
                    "Conflicting story bound in story range group {} for category '{}'",
                    row.story_group,
                    category
                );
                ensure!(
                    row.area_group as usize == current.area_ranges.len() + 1,
                    "Area range groups for category '{}' must be contiguous and ascending",
                    category
                );
                current.area_ranges.push(AreaRange::from_row(&row));
            } else {
                bail!(
                    "Story range groups for category '{}' must be contiguous and ascending",
                    category
                );
            }
        }

        Ok(Self(table))
    }

    /// Resolve the generic system label for a group.
    ///
    /// Searches story-range groups in ascending order for the first whose
    /// upper bound covers `story_count`, then that group's area ranges in
    /// ascending order for the first containing `area_ft2`.
    pub fn lookup(
        &self,
        category: &CategoryID,
        story_count: u32,
        area_ft2: f64,
    ) -> Result<GenericSystem> {
        let not_found = || {
            format!(
                "No baseline HVAC type found for category '{category}' \
                ({story_count} stories, {area_ft2:.0} ft2)"
            )
        };

        let story_groups = self.0.get(category).with_context(not_found)?;
        let story_group = story_groups
            .iter()
            .find(|group| story_count <= group.max_stories)
            .with_context(not_found)?;
        let row = story_group
            .area_ranges
            .iter()
            .find(|range| range.contains(area_ft2))
            .with_context(not_found)?;

        Ok(row.system_type)
    }
}

/// One row of the heat-source table, as read from CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeatSourceRow {
    /// The climate zone the row applies to
    pub climate_zone: String,
    /// The occupancy category the row applies to, or "any"
    pub occupancy_category: String,
    /// The baseline heat source
    pub heat_source: HeatSource,
}

/// The validated climate-zone × category → heat-source table.
///
/// Category-specific rows take precedence over a climate zone's "any" row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatSourceTable(IndexMap<(ClimateZoneID, CategoryID), HeatSource>);

impl HeatSourceTable {
    /// Build and validate the table from its rows.
    pub fn from_rows(rows: Vec<HeatSourceRow>) -> Result<Self> {
        ensure!(!rows.is_empty(), "Heat source table has no rows");

        let mut table = IndexMap::new();
        for row in rows {
            let key = (
                ClimateZoneID::from(row.climate_zone.as_str()),
                CategoryID::from(row.occupancy_category.as_str()),
            );
            ensure!(
                table.insert(key, row.heat_source).is_none(),
                "Duplicate heat source entry for climate zone '{}' and category '{}'",
                row.climate_zone,
                row.occupancy_category
            );
        }

        Ok(Self(table))
    }

    /// The baseline heat source for a category in a climate zone.
    pub fn lookup(
        &self,
        climate_zone: &ClimateZoneID,
        category: &CategoryID,
    ) -> Result<HeatSource> {
        self.0
            .get(&(climate_zone.clone(), category.clone()))
            .or_else(|| self.0.get(&(climate_zone.clone(), ANY_CATEGORY.into())))
            .copied()
            .with_context(|| {
                format!(
                    "No baseline heat source for climate zone '{climate_zone}' \
                    and category '{category}'"
                )
            })
    }
}

/// Read the system-type table from a CSV file.
pub fn read_system_type_table(file_path: &Path) -> Result<SystemTypeTable> {
    SystemTypeTable::from_rows(read_csv(file_path)?)
        .with_context(|| format!("Error validating {}", file_path.display()))
}

/// Read the heat-source table from a CSV file.
pub fn read_heat_source_table(file_path: &Path) -> Result<HeatSourceTable> {
    HeatSourceTable::from_rows(read_csv(file_path)?)
        .with_context(|| format!("Error validating {}", file_path.display()))
}

/// A fully resolved baseline system type for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemSelection {
    /// The concrete system-type code; absent for unconditioned rows
    pub system_type: Option<SystemTypeCode>,
    /// Fuel serving the central heating plant
    pub central_heating_fuel: Fuel,
    /// Fuel serving zone-level heating
    pub zone_heating_fuel: Fuel,
    /// Fuel serving cooling; absent for group types with no cooling
    pub cooling_fuel: Option<Fuel>,
}

/// Map a generic system label to a concrete code under the given heat source.
fn concrete_code(generic: GenericSystem, heat_source: HeatSource) -> Option<SystemTypeCode> {
    match (generic, heat_source) {
        (GenericSystem::Ptac, HeatSource::Fuel) => Some(SystemTypeCode::Ptac),
        (GenericSystem::Ptac, HeatSource::Electric) => Some(SystemTypeCode::Pthp),
        (GenericSystem::Psz, HeatSource::Fuel) => Some(SystemTypeCode::PszAc),
        (GenericSystem::Psz, HeatSource::Electric) => Some(SystemTypeCode::PszHp),
        (GenericSystem::SzCv, _) => Some(SystemTypeCode::SzCv),
        (GenericSystem::SzVav, _) => Some(SystemTypeCode::SzVav),
        (GenericSystem::PackagedVav, HeatSource::Fuel) => Some(SystemTypeCode::PvavReheat),
        (GenericSystem::PackagedVav, HeatSource::Electric) => Some(SystemTypeCode::PvavPfpBoxes),
        (GenericSystem::Vav, HeatSource::Fuel) => Some(SystemTypeCode::VavReheat),
        (GenericSystem::Vav, HeatSource::Electric) => Some(SystemTypeCode::VavPfpBoxes),
        (GenericSystem::HeatingAndVentilation, HeatSource::Fuel) => {
            Some(SystemTypeCode::GasFurnace)
        }
        (GenericSystem::HeatingAndVentilation, HeatSource::Electric) => {
            Some(SystemTypeCode::ElectricFurnace)
        }
        (GenericSystem::Unconditioned, _) => None,
    }
}

/// Resolve the baseline system type and fuels for a finished group.
///
/// The group's story count and floor area select a generic label from the
/// system-type table; the category's climate-dependent heat source picks the
/// concrete code; heating and cooling fuels follow the group's fuel
/// signature and group type.
pub fn select_system_type(
    group: &SystemGroup,
    config: &BaselineConfig,
    climate_zone: &ClimateZoneID,
) -> Result<SystemSelection> {
    let generic = config.system_types.lookup(
        &group.table_category(),
        group.story_count,
        group.floor_area().value(),
    )?;
    let heat_source = config
        .heat_sources
        .lookup(climate_zone, &group.occupancy_category)?;

    let resolved_heating_fuel = match heat_source {
        HeatSource::Fuel => Fuel::NaturalGas,
        HeatSource::Electric => Fuel::Electricity,
    };
    let signature = group.fuel_signature();

    let central_heating_fuel = if signature.contains(&Fuel::DistrictHeating) {
        Fuel::DistrictHeating
    } else {
        resolved_heating_fuel
    };

    // Zones default to district heat only when no zone heats with fuel or
    // electricity in the proposed design
    let zone_heating_fuel = if signature.contains(&Fuel::DistrictHeating)
        && !signature.contains(&Fuel::NaturalGas)
        && !signature.contains(&Fuel::FuelOil)
        && !signature.contains(&Fuel::Electricity)
    {
        Fuel::DistrictHeating
    } else {
        resolved_heating_fuel
    };

    let uncooled = group.group_type == GroupType::HeatedOnly
        || matches!(
            generic,
            GenericSystem::HeatingAndVentilation | GenericSystem::Unconditioned
        );
    let cooling_fuel = if group.district_cooled {
        Some(Fuel::DistrictCooling)
    } else if uncooled {
        None
    } else {
        Some(Fuel::Electricity)
    };

    Ok(SystemSelection {
        system_type: concrete_code(generic, heat_source),
        central_heating_fuel,
        zone_heating_fuel,
        cooling_fuel,
    })
}
