//! Baseline system groups: the output unit of classification.
use crate::id::{CategoryID, StoryID};
use crate::system_type::SystemSelection;
use crate::units::FloorArea;
use crate::zone::{Fuel, OperatingProfile, Zone};
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::HashSet;

/// System-type table category for heated-only groups.
const HEATED_ONLY_CATEGORY: &str = "heated-only storage";
/// System-type table category for high-load computer-room groups.
const COMPUTER_ROOM_LARGE_CATEGORY: &str = "computer room szvav";
/// System-type table category for other computer-room groups.
const COMPUTER_ROOM_SMALL_CATEGORY: &str = "computer room psz";

/// The kind of baseline system group a set of zones was assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GroupType {
    /// Zones with heating but no cooling equipment
    #[display("heated-only")]
    HeatedOnly,
    /// Zones cooled by purchased chilled water
    #[display("district-cooled")]
    DistrictCooled,
    /// Laboratory zones isolated for their exhaust airflow
    #[display("laboratory")]
    Laboratory,
    /// Computer-room zones below the high-load tier
    #[display("computer-room")]
    ComputerRoomSmall,
    /// Computer-room zones in the high-load tier
    #[display("computer-room high-load")]
    ComputerRoomLarge,
    /// The shared multi-zone remainder of the general bucket
    #[display("heated-and-cooled primary")]
    HeatedCooledPrimary,
    /// A statistically dissimilar zone served by its own system
    #[display("heated-and-cooled secondary")]
    HeatedCooledSecondary,
}

/// A set of zones assigned to share one baseline HVAC system archetype.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemGroup {
    /// The building-use classification governing the system-type table row
    pub occupancy_category: CategoryID,
    /// Which classification rule produced this group
    pub group_type: GroupType,
    /// Whether the group's zones are served by purchased chilled water
    pub district_cooled: bool,
    /// The member zones; never empty
    pub zones: Vec<Zone>,
    /// Number of stories spanned by the member zones
    pub story_count: u32,
    /// Combined operating-hours profile of the member zones
    pub operating_profile: OperatingProfile,
    /// The resolved baseline system type; absent until selection has run
    pub system_type: Option<SystemSelection>,
}

impl SystemGroup {
    /// Assemble a group from its member zones.
    ///
    /// The story count and combined operating profile are fixed here, before
    /// system-type selection, which depends on them.
    pub fn new(
        occupancy_category: CategoryID,
        group_type: GroupType,
        district_cooled: bool,
        zones: Vec<Zone>,
        story_multipliers: &IndexMap<StoryID, u32>,
    ) -> Self {
        let story_count = stories_spanned(&zones, story_multipliers);
        let operating_profile = OperatingProfile::union(zones.iter().map(|z| &z.operating_hours));

        Self {
            occupancy_category,
            group_type,
            district_cooled,
            zones,
            story_count,
            operating_profile,
            system_type: None,
        }
    }

    /// Total floor area of the member zones.
    pub fn floor_area(&self) -> FloorArea {
        FloorArea::from(self.zones.iter().map(|z| z.floor_area.value()).sum())
    }

    /// Union of the member zones' fuel signatures.
    pub fn fuel_signature(&self) -> HashSet<Fuel> {
        self.zones
            .iter()
            .flat_map(|z| z.fuel_signature.iter().copied())
            .collect()
    }

    /// The category under which this group is looked up in the system-type
    /// table. Heated-only and computer-room groups use dedicated table
    /// categories; every other group uses its occupancy category.
    pub fn table_category(&self) -> CategoryID {
        match self.group_type {
            GroupType::HeatedOnly => HEATED_ONLY_CATEGORY.into(),
            GroupType::ComputerRoomLarge => COMPUTER_ROOM_LARGE_CATEGORY.into(),
            GroupType::ComputerRoomSmall => COMPUTER_ROOM_SMALL_CATEGORY.into(),
            _ => self.occupancy_category.clone(),
        }
    }
}

/// Number of stories spanned by the given zones, counting each distinct
/// story once with its floor multiplier applied.
fn stories_spanned(zones: &[Zone], story_multipliers: &IndexMap<StoryID, u32>) -> u32 {
    zones
        .iter()
        .flat_map(|zone| zone.stories.iter())
        .unique()
        .map(|story| story_multipliers.get(story).copied().unwrap_or(1))
        .sum()
}
