//! The top-level pipeline assembling baseline system groups for a building.
//!
//! Control flow: attribute extraction, ordered special-case bucketing per
//! occupancy category, primary/secondary partitioning of each general
//! bucket, then system-type selection for every finished group. Data flows
//! strictly forward; each stage returns a new structure consumed once by
//! the next.
use crate::building::{BuildingModel, SizingResults};
use crate::classify::classify_zones;
use crate::config::BaselineConfig;
use crate::extract::extract_zones;
use crate::group::{GroupType, SystemGroup};
use crate::id::{CategoryID, ClimateZoneID, StoryID};
use crate::partition::split_primary_secondary;
use crate::system_type::select_system_type;
use crate::zone::Zone;
use anyhow::Result;
use indexmap::IndexMap;
use itertools::Itertools;
use log::info;

/// Assign every conditioned zone of the building to a baseline system group
/// and resolve each group's system type and fuels.
///
/// Groups are emitted per occupancy category in a fixed order: heated-only,
/// district-cooled, the heated/cooled primary group, one group per
/// secondary zone in elimination order, laboratory, then the computer-room
/// tiers. Every conditioned zone appears in exactly one group.
///
/// Any fatal condition (missing sizing data, no conditioned zones, no
/// matching system-type row) aborts the whole pass: a partial baseline
/// would silently corrupt every downstream sizing decision.
pub fn assign_system_groups(
    model: &BuildingModel,
    sizing: &SizingResults,
    config: &BaselineConfig,
    climate_zone: &ClimateZoneID,
) -> Result<Vec<SystemGroup>> {
    let zones_by_category = extract_zones(model, sizing)?;

    let mut groups = Vec::new();
    for (category, zones) in zones_by_category {
        assemble_category_groups(
            &mut groups,
            &category,
            zones,
            config,
            &model.story_multipliers,
        );
    }

    for group in &mut groups {
        group.system_type = Some(select_system_type(group, config, climate_zone)?);
    }

    report_groups(&groups);

    Ok(groups)
}

/// Classify and partition one category's zones, appending the finished
/// groups in their fixed order.
fn assemble_category_groups(
    groups: &mut Vec<SystemGroup>,
    category: &CategoryID,
    zones: Vec<Zone>,
    config: &BaselineConfig,
    story_multipliers: &IndexMap<StoryID, u32>,
) {
    let buckets = classify_zones(zones, &config.thresholds);

    let mut push = |group_type, district_cooled, members: Vec<Zone>| {
        if !members.is_empty() {
            groups.push(SystemGroup::new(
                category.clone(),
                group_type,
                district_cooled,
                members,
                story_multipliers,
            ));
        }
    };

    push(GroupType::HeatedOnly, false, buckets.heated_only);
    push(GroupType::DistrictCooled, true, buckets.district_cooled);

    let partition = split_primary_secondary(buckets.general, &config.thresholds);
    push(GroupType::HeatedCooledPrimary, false, partition.primary);
    for zone in partition.secondary {
        push(GroupType::HeatedCooledSecondary, false, vec![zone]);
    }

    push(GroupType::Laboratory, false, buckets.laboratory);
    push(GroupType::ComputerRoomLarge, false, buckets.computer_room_large);
    push(GroupType::ComputerRoomSmall, false, buckets.computer_room_small);
    push(
        GroupType::ComputerRoomLarge,
        true,
        buckets.computer_room_large_district,
    );
    push(
        GroupType::ComputerRoomSmall,
        true,
        buckets.computer_room_small_district,
    );
}

/// Report the final grouping and check the non-empty postcondition.
fn report_groups(groups: &[SystemGroup]) {
    for group in groups {
        assert!(
            !group.zones.is_empty(),
            "assembled an empty baseline system group"
        );

        let system = group
            .system_type
            .as_ref()
            .and_then(|selection| selection.system_type)
            .map_or_else(|| "none".to_string(), |code| code.to_string());
        info!(
            "Final system group: category = {}, type = {}, system = {}, \
            area = {:.0} ft2, stories = {}, zones: {}",
            group.occupancy_category,
            group.group_type,
            system,
            group.floor_area().value(),
            group.story_count,
            group.zones.iter().map(|zone| zone.id.to_string()).join(", ")
        );
    }
}
