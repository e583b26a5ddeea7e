//! Input snapshots supplied by the building model and the sizing simulation.
//!
//! These types are the upstream collaborators of the pipeline: static zone
//! design data from the model, and autosized loads, flows and operating
//! hours from a completed sizing run. The pipeline reads them and never
//! writes back.
use crate::id::{AirLoopID, CategoryID, StoryID, ZoneID};
use crate::zone::{CategoryTag, Fuel, OperatingProfile};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// The source serving a cooling component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoolingSource {
    /// Compressor-based cooling
    Electricity,
    /// Purchased chilled water
    DistrictCooling,
}

/// A piece of conditioning equipment attached to a zone.
///
/// Closed set of component kinds; each derived zone attribute is a match
/// over this enum with one arm per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneComponent {
    /// An air-side heating coil
    HeatingCoil {
        /// The energy source firing the coil
        fuel: Fuel,
    },
    /// A perimeter baseboard heater
    Baseboard {
        /// The energy source firing the heater
        fuel: Fuel,
    },
    /// An air-side cooling coil
    CoolingCoil {
        /// The source serving the coil
        source: CoolingSource,
    },
    /// A zone exhaust fan
    ExhaustFan {
        /// Maximum flow rate in m3/s
        max_flow: f64,
    },
}

impl ZoneComponent {
    /// Whether this component heats the zone.
    fn heats(&self) -> bool {
        matches!(
            self,
            ZoneComponent::HeatingCoil { .. } | ZoneComponent::Baseboard { .. }
        )
    }

    /// Whether this component cools the zone.
    fn cools(&self) -> bool {
        matches!(self, ZoneComponent::CoolingCoil { .. })
    }

    /// The fuels this component contributes to the zone's signature.
    ///
    /// Electric cooling contributes nothing: signature membership is only
    /// consulted for district detection and heating-fuel resolution.
    fn signature_fuel(&self) -> Option<Fuel> {
        match self {
            ZoneComponent::HeatingCoil { fuel } | ZoneComponent::Baseboard { fuel } => Some(*fuel),
            ZoneComponent::CoolingCoil {
                source: CoolingSource::DistrictCooling,
            } => Some(Fuel::DistrictCooling),
            ZoneComponent::CoolingCoil {
                source: CoolingSource::Electricity,
            }
            | ZoneComponent::ExhaustFan { .. } => None,
        }
    }
}

/// Static design data for one thermal zone, as read from the building model.
///
/// Geometric quantities are in SI; the extractor applies the multiplier and
/// converts to reporting units.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDesign {
    /// Unique identifier for the zone
    pub id: ZoneID,
    /// Floor area in m2 of a single instance of the zone
    pub floor_area: f64,
    /// Air volume in m3 of a single instance of the zone
    pub volume: f64,
    /// Design occupant count of a single instance of the zone
    pub occupant_count: f64,
    /// How many identical instances this zone represents
    pub multiplier: u32,
    /// The building stories the zone spans
    pub stories: Vec<StoryID>,
    /// Whether the zone is a return-air plenum
    pub is_plenum: bool,
    /// Special-use tags for the zone's spaces
    pub tags: HashSet<CategoryTag>,
    /// The conditioning equipment attached to the zone
    pub components: Vec<ZoneComponent>,
}

impl ZoneDesign {
    /// Whether any component heats the zone.
    pub fn is_heated(&self) -> bool {
        self.components.iter().any(ZoneComponent::heats)
    }

    /// Whether any component cools the zone.
    pub fn is_cooled(&self) -> bool {
        self.components.iter().any(ZoneComponent::cools)
    }

    /// The set of fuels drawn from the zone's equipment.
    pub fn fuel_signature(&self) -> HashSet<Fuel> {
        self.components
            .iter()
            .filter_map(ZoneComponent::signature_fuel)
            .collect()
    }

    /// Total exhaust-fan flow for one instance of the zone, in m3/s.
    pub fn exhaust_fan_flow(&self) -> f64 {
        self.components
            .iter()
            .map(|component| match component {
                ZoneComponent::ExhaustFan { max_flow } => *max_flow,
                _ => 0.0,
            })
            .sum()
    }
}

/// An air loop serving several zones, used to apportion central relief air
/// back to the zones it exhausts from.
#[derive(Debug, Clone, PartialEq)]
pub struct AirLoop {
    /// Unique identifier for the loop
    pub id: AirLoopID,
    /// The zones served by this loop
    pub zones: Vec<ZoneID>,
}

/// A snapshot of the building model for one classification pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingModel {
    /// All thermal zones in the building
    pub zones: Vec<ZoneDesign>,
    /// All air loops in the building
    pub air_loops: Vec<AirLoop>,
    /// Floor multiplier per story (absent means 1)
    pub story_multipliers: IndexMap<StoryID, u32>,
    /// The occupancy category assumed for zones with no override
    pub default_category: CategoryID,
    /// User-assigned occupancy categories, taking precedence over the default
    pub category_overrides: HashMap<ZoneID, CategoryID>,
}

impl BuildingModel {
    /// The occupancy category governing the given zone.
    pub fn category_for(&self, zone_id: &ZoneID) -> &CategoryID {
        self.category_overrides
            .get(zone_id)
            .unwrap_or(&self.default_category)
    }
}

/// Autosized results from a completed sizing simulation, queried per zone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizingResults {
    /// Coincident peak internal load in W per zone instance
    pub peak_internal_loads: HashMap<ZoneID, f64>,
    /// Annual operating-hours profile per zone
    pub operating_hours: HashMap<ZoneID, OperatingProfile>,
    /// Design return airflow in m3/s per zone instance (absent means 0)
    pub zone_return_flows: HashMap<ZoneID, f64>,
    /// Design relief airflow in m3/s per air loop (absent means 0)
    pub relief_flows: HashMap<AirLoopID, f64>,
}

impl SizingResults {
    /// Peak internal load for a zone, if the sizing run produced one.
    pub fn peak_internal_load(&self, zone_id: &ZoneID) -> Option<f64> {
        self.peak_internal_loads.get(zone_id).copied()
    }

    /// Operating-hours profile for a zone, if the sizing run produced one.
    pub fn operating_hours(&self, zone_id: &ZoneID) -> Option<&OperatingProfile> {
        self.operating_hours.get(zone_id)
    }

    /// Return airflow for a zone; zero when not reported.
    pub fn return_flow(&self, zone_id: &ZoneID) -> f64 {
        self.zone_return_flows.get(zone_id).copied().unwrap_or(0.0)
    }

    /// Relief airflow for an air loop; zero when not reported.
    pub fn relief_flow(&self, air_loop_id: &AirLoopID) -> f64 {
        self.relief_flows.get(air_loop_id).copied().unwrap_or(0.0)
    }
}
