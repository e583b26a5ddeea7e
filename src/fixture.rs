//! Fixtures for tests
use crate::building::{BuildingModel, CoolingSource, SizingResults, ZoneComponent, ZoneDesign};
use crate::config::{BaselineConfig, Thresholds};
use crate::system_type::{
    GenericSystem, HeatSource, HeatSourceRow, HeatSourceTable, MaxAreaQual, MinAreaQual,
    SystemTypeRow, SystemTypeTable,
};
use crate::units::{AirFlow, FloorArea, PeakLoad, Volume};
use crate::zone::{Fuel, OperatingProfile, Zone};
use indexmap::IndexMap;
use rstest::fixture;
use std::collections::{HashMap, HashSet};

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn thresholds() -> Thresholds {
    Thresholds::default()
}

/// Build a zone snapshot with the given floor area (ft2), load intensity
/// (Btu/h*ft2) and weekly operating hours, heated and cooled by default.
pub fn test_zone(id: &str, area_ft2: f64, load_intensity: f64, weekly_hours: f64) -> Zone {
    Zone {
        id: id.into(),
        floor_area: FloorArea::from(area_ft2),
        volume: Volume::from(area_ft2 * 9.0),
        occupant_count: area_ft2 / 150.0,
        stories: vec!["story 1".into()],
        peak_internal_load: PeakLoad::from(load_intensity * area_ft2),
        operating_hours: OperatingProfile(vec![weekly_hours / 168.0; 8760]),
        heated: true,
        cooled: true,
        tags: HashSet::new(),
        fuel_signature: HashSet::from([Fuel::NaturalGas]),
        exhaust_flow: AirFlow::from(0.0),
    }
}

#[fixture]
pub fn system_type_rows() -> Vec<SystemTypeRow> {
    #[allow(clippy::too_many_arguments)]
    fn row(
        occupancy_category: &str,
        story_group: u32,
        max_stories: u32,
        area_group: u32,
        min_area: f64,
        min_area_qual: MinAreaQual,
        max_area: f64,
        max_area_qual: MaxAreaQual,
        system_type: GenericSystem,
    ) -> SystemTypeRow {
        SystemTypeRow {
            occupancy_category: occupancy_category.to_string(),
            story_group,
            max_stories,
            area_group,
            min_area,
            min_area_qual,
            max_area,
            max_area_qual,
            system_type,
        }
    }

    use GenericSystem::*;
    use MaxAreaQual::*;
    use MinAreaQual::*;
    vec![
        row("office", 1, 3, 1, 0.0, GreaterOrEqual, 25_000.0, LessThan, Psz),
        row(
            "office",
            1,
            3,
            2,
            25_000.0,
            GreaterOrEqual,
            150_000.0,
            LessOrEqual,
            PackagedVav,
        ),
        row(
            "office",
            1,
            3,
            3,
            150_000.0,
            GreaterThan,
            1e9,
            LessOrEqual,
            Vav,
        ),
        row(
            "office",
            2,
            5,
            1,
            0.0,
            GreaterOrEqual,
            150_000.0,
            LessOrEqual,
            PackagedVav,
        ),
        row(
            "office",
            2,
            5,
            2,
            150_000.0,
            GreaterThan,
            1e9,
            LessOrEqual,
            Vav,
        ),
        row("office", 3, 99, 1, 0.0, GreaterOrEqual, 1e9, LessOrEqual, Vav),
        row(
            "heated-only storage",
            1,
            99,
            1,
            0.0,
            GreaterOrEqual,
            1e9,
            LessOrEqual,
            HeatingAndVentilation,
        ),
        row(
            "computer room szvav",
            1,
            99,
            1,
            0.0,
            GreaterOrEqual,
            1e9,
            LessOrEqual,
            SzVav,
        ),
        row(
            "computer room psz",
            1,
            99,
            1,
            0.0,
            GreaterOrEqual,
            1e9,
            LessOrEqual,
            Psz,
        ),
    ]
}

#[fixture]
pub fn heat_source_rows() -> Vec<HeatSourceRow> {
    let row = |climate_zone: &str, occupancy_category: &str, heat_source| HeatSourceRow {
        climate_zone: climate_zone.to_string(),
        occupancy_category: occupancy_category.to_string(),
        heat_source,
    };

    vec![
        row("3A", "any", HeatSource::Electric),
        row("3A", "school", HeatSource::Fuel),
        row("5A", "any", HeatSource::Fuel),
    ]
}

#[fixture]
pub fn config(
    system_type_rows: Vec<SystemTypeRow>,
    heat_source_rows: Vec<HeatSourceRow>,
) -> BaselineConfig {
    BaselineConfig {
        thresholds: Thresholds::default(),
        system_types: SystemTypeTable::from_rows(system_type_rows).unwrap(),
        heat_sources: HeatSourceTable::from_rows(heat_source_rows).unwrap(),
    }
}

#[fixture]
pub fn office_model() -> BuildingModel {
    let components = vec![
        ZoneComponent::HeatingCoil {
            fuel: Fuel::NaturalGas,
        },
        ZoneComponent::CoolingCoil {
            source: CoolingSource::Electricity,
        },
    ];
    let zone = |id: &str, floor_area: f64| ZoneDesign {
        id: id.into(),
        floor_area,
        volume: floor_area * 3.0,
        occupant_count: floor_area / 10.0,
        multiplier: 1,
        stories: vec!["story 1".into()],
        is_plenum: false,
        tags: HashSet::new(),
        components: components.clone(),
    };

    BuildingModel {
        zones: vec![
            zone("core", 929.0304),
            zone("north wing", 464.5152),
            zone("south wing", 464.5152),
        ],
        air_loops: Vec::new(),
        story_multipliers: IndexMap::new(),
        default_category: "office".into(),
        category_overrides: HashMap::new(),
    }
}

/// Sizing results covering every zone of the model: a uniform load
/// intensity of about 10 Btu/h*ft2 and a 60 h/week operating profile.
pub fn sizing_results_for(model: &BuildingModel) -> SizingResults {
    let mut sizing = SizingResults::default();
    for design in &model.zones {
        sizing
            .peak_internal_loads
            .insert(design.id.clone(), design.floor_area * 31.55);
        sizing
            .operating_hours
            .insert(design.id.clone(), OperatingProfile(vec![60.0 / 168.0; 8760]));
    }
    sizing
}
