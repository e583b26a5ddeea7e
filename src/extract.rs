//! Extraction of per-zone classification attributes from the building model
//! and the sizing results.
//!
//! Extraction produces the immutable [`Zone`] snapshots the rest of the
//! pipeline works on, grouped by occupancy category. Peak loads and
//! operating hours require a completed sizing run; static attributes come
//! straight from the model.
use crate::building::{BuildingModel, SizingResults, ZoneDesign};
use crate::id::{CategoryID, ZoneID};
use crate::units::{AirFlow, FloorArea, PeakLoad, Volume};
use crate::zone::Zone;
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use log::info;
use std::collections::HashMap;

/// Build the zone snapshots for one classification pass, grouped by
/// occupancy category in model order.
///
/// Plenums, zones with no heating and no cooling equipment, and zones with
/// no conditioned floor area are excluded (logged, not an error). Missing
/// sizing results for any remaining zone abort the pass, as does a building
/// with no conditioned zones at all.
pub fn extract_zones(
    model: &BuildingModel,
    sizing: &SizingResults,
) -> Result<IndexMap<CategoryID, Vec<Zone>>> {
    let relief_shares = relief_shares(model, sizing);

    let mut by_category: IndexMap<CategoryID, Vec<Zone>> = IndexMap::new();
    for design in &model.zones {
        if design.is_plenum {
            info!(
                "Zone {} is a plenum. It will not be assigned a baseline system.",
                design.id
            );
            continue;
        }
        if !design.is_heated() && !design.is_cooled() {
            info!(
                "Zone {} is unconditioned. It will not be assigned a baseline system.",
                design.id
            );
            continue;
        }
        if design.floor_area <= 0.0 {
            info!(
                "Zone {} has no conditioned floor area. It will not be assigned a baseline system.",
                design.id
            );
            continue;
        }

        let relief_share = relief_shares.get(&design.id).copied().unwrap_or(0.0);
        let zone = extract_zone(design, sizing, relief_share)?;
        let category = model.category_for(&design.id).clone();
        by_category.entry(category).or_default().push(zone);
    }

    ensure!(
        !by_category.is_empty(),
        "The building has no conditioned zones. Make sure zones have heating or cooling equipment."
    );

    Ok(by_category)
}

/// Build one zone snapshot, applying the zone multiplier and converting the
/// model's SI quantities to reporting units.
fn extract_zone(design: &ZoneDesign, sizing: &SizingResults, relief_share: f64) -> Result<Zone> {
    let peak_load = sizing.peak_internal_load(&design.id).with_context(|| {
        format!(
            "Missing sizing results for zone {}: no peak internal load. \
            Run the sizing simulation before classification.",
            design.id
        )
    })?;
    let operating_hours = sizing
        .operating_hours(&design.id)
        .with_context(|| {
            format!(
                "Missing sizing results for zone {}: no operating-hours profile. \
                Run the sizing simulation before classification.",
                design.id
            )
        })?
        .clone();

    let multiplier = f64::from(design.multiplier);
    Ok(Zone {
        id: design.id.clone(),
        floor_area: FloorArea::from_square_metres(design.floor_area * multiplier),
        volume: Volume::from_cubic_metres(design.volume * multiplier),
        occupant_count: design.occupant_count * multiplier,
        stories: design.stories.clone(),
        peak_internal_load: PeakLoad::from_watts(peak_load * multiplier),
        operating_hours,
        heated: design.is_heated(),
        cooled: design.is_cooled(),
        tags: design.tags.clone(),
        fuel_signature: design.fuel_signature(),
        exhaust_flow: AirFlow::from_cubic_metres_per_second(
            design.exhaust_fan_flow() * multiplier + relief_share,
        ),
    })
}

/// Apportion each air loop's relief airflow back to the zones it serves, in
/// proportion to their return airflow.
///
/// Outdoor air exhausted through a central relief node counts towards the
/// zones it was drawn from, on top of any zone exhaust fans.
fn relief_shares(model: &BuildingModel, sizing: &SizingResults) -> HashMap<ZoneID, f64> {
    let mut shares = HashMap::new();
    for air_loop in &model.air_loops {
        let relief_flow = sizing.relief_flow(&air_loop.id);
        let total_return: f64 = air_loop
            .zones
            .iter()
            .map(|zone_id| sizing.return_flow(zone_id))
            .sum();
        if total_return <= 0.0 {
            continue;
        }

        let relief_fraction = relief_flow / total_return;
        for zone_id in &air_loop.zones {
            shares.insert(zone_id.clone(), relief_fraction * sizing.return_flow(zone_id));
        }
    }
    shares
}
