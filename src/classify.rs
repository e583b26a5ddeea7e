//! Ordered special-case bucketing of a category's conditioned zones.
//!
//! Rules apply in a fixed order and the first match wins; a zone is never
//! reconsidered once bucketed. Everything that matches no special rule
//! lands in the general heated/cooled bucket, which is the input to the
//! primary/secondary partitioner.
use crate::config::Thresholds;
use crate::zone::{CategoryTag, Zone};
use log::{debug, info};

/// Mutually exclusive special-case buckets for one occupancy category.
///
/// Computer-room tiers are additionally split by district cooling so that
/// cooling-fuel resolution can act per group; the tier is the bucket.
#[derive(Debug, Default, PartialEq)]
pub struct Buckets {
    /// Zones with heating but no cooling equipment
    pub heated_only: Vec<Zone>,
    /// High-load-tier computer-room zones
    pub computer_room_large: Vec<Zone>,
    /// High-load-tier computer-room zones on district cooling
    pub computer_room_large_district: Vec<Zone>,
    /// Other computer-room zones
    pub computer_room_small: Vec<Zone>,
    /// Other computer-room zones on district cooling
    pub computer_room_small_district: Vec<Zone>,
    /// Laboratory zones isolated for their exhaust airflow
    pub laboratory: Vec<Zone>,
    /// Zones cooled by purchased chilled water
    pub district_cooled: Vec<Zone>,
    /// The general heated/cooled remainder
    pub general: Vec<Zone>,
}

/// Partition one occupancy category's zones into special-case buckets.
///
/// The computer-room tier depends on the category's aggregate computer-room
/// load as well as each zone's own load; laboratory zones are only isolated
/// when the category's total laboratory exhaust exceeds the threshold.
pub fn classify_zones(zones: Vec<Zone>, thresholds: &Thresholds) -> Buckets {
    let computer_room_load: f64 = zones
        .iter()
        .filter(|zone| zone.has_tag(CategoryTag::ComputerRoom))
        .map(|zone| zone.peak_internal_load.value())
        .sum();

    let lab_exhaust: f64 = zones
        .iter()
        .filter(|zone| zone.has_tag(CategoryTag::Laboratory))
        .map(|zone| zone.exhaust_flow.value())
        .sum();
    let isolate_labs = lab_exhaust > thresholds.lab_exhaust_threshold;
    if isolate_labs {
        info!(
            "Laboratory exhaust of {lab_exhaust:.0} cfm exceeds {:.0} cfm; \
            laboratory zones will be served by a dedicated system group",
            thresholds.lab_exhaust_threshold
        );
    }

    let mut buckets = Buckets::default();
    for zone in zones {
        if zone.heated && !zone.cooled {
            debug!("Zone {} is heated-only", zone.id);
            buckets.heated_only.push(zone);
        } else if zone.has_tag(CategoryTag::ComputerRoom) {
            let large = computer_room_load > thresholds.computer_room_building_threshold
                || zone.peak_internal_load.value() > thresholds.computer_room_zone_threshold;
            debug!(
                "Zone {} is a computer room ({} tier)",
                zone.id,
                if large { "high-load" } else { "standard" }
            );
            match (large, zone.is_district_cooled()) {
                (true, false) => buckets.computer_room_large.push(zone),
                (true, true) => buckets.computer_room_large_district.push(zone),
                (false, false) => buckets.computer_room_small.push(zone),
                (false, true) => buckets.computer_room_small_district.push(zone),
            }
        } else if isolate_labs && zone.has_tag(CategoryTag::Laboratory) {
            buckets.laboratory.push(zone);
        } else if zone.is_district_cooled() {
            debug!("Zone {} is district cooled", zone.id);
            buckets.district_cooled.push(zone);
        } else {
            buckets.general.push(zone);
        }
    }

    buckets
}
