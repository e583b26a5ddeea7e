//! Zone attribute snapshots consumed by the classification pipeline.
//!
//! A [`Zone`] is a read-only record built once per classification pass from
//! the building model and the sizing results. Nothing downstream mutates it.
use crate::id::{StoryID, ZoneID};
use crate::units::{AirFlow, FloorArea, LoadIntensity, PeakLoad, Volume, WeeklyHours};
use std::collections::HashSet;

/// Hours in a week, used to normalise annual operating hours.
const HOURS_PER_WEEK: f64 = 168.0;

/// An energy source appearing in a zone's equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Fuel {
    /// Electric-resistance or heat-pump heating, or electric cooling
    #[display("electricity")]
    Electricity,
    /// Gas-fired heating
    #[display("natural gas")]
    NaturalGas,
    /// Oil-fired heating
    #[display("fuel oil")]
    FuelOil,
    /// Heat purchased from a district loop
    #[display("district heating")]
    DistrictHeating,
    /// Chilled water purchased from a district loop
    #[display("district cooling")]
    DistrictCooling,
}

/// A special-use tag attached to a zone's spaces in the building model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryTag {
    /// The zone contains laboratory space
    Laboratory,
    /// The zone contains computer-room space
    ComputerRoom,
}

/// An annual operating-hours profile: one fraction per hour of the year,
/// 1 when the zone's system is operating for the whole hour.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingProfile(pub Vec<f64>);

impl OperatingProfile {
    /// Equivalent full-load hours per week over the profile.
    pub fn eflh(&self) -> WeeklyHours {
        if self.0.is_empty() {
            return WeeklyHours::from(0.0);
        }
        let annual: f64 = self.0.iter().sum();
        WeeklyHours::from(annual * HOURS_PER_WEEK / self.0.len() as f64)
    }

    /// Combine profiles hour-wise, keeping the largest fraction.
    ///
    /// A shared system must operate whenever any of its zones does.
    pub fn union<'a, I>(profiles: I) -> Self
    where
        I: IntoIterator<Item = &'a OperatingProfile>,
    {
        let mut combined: Vec<f64> = Vec::new();
        for profile in profiles {
            if combined.is_empty() {
                combined = profile.0.clone();
            } else {
                for (hour, fraction) in combined.iter_mut().zip(profile.0.iter()) {
                    *hour = hour.max(*fraction);
                }
            }
        }
        Self(combined)
    }
}

/// Attributes of one conditioned thermal zone.
///
/// Floor area, volume, occupancy and peak load have the zone multiplier
/// applied, so a repeated zone counts for all of its instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    /// Unique identifier for the zone
    pub id: ZoneID,
    /// Conditioned floor area
    pub floor_area: FloorArea,
    /// Air volume
    pub volume: Volume,
    /// Design occupant count
    pub occupant_count: f64,
    /// The building stories this zone spans
    pub stories: Vec<StoryID>,
    /// Coincident design cooling load
    pub peak_internal_load: PeakLoad,
    /// Annual operating-hours profile
    pub operating_hours: OperatingProfile,
    /// Whether the zone has heating equipment
    pub heated: bool,
    /// Whether the zone has cooling equipment
    pub cooled: bool,
    /// Special-use tags for the zone's spaces
    pub tags: HashSet<CategoryTag>,
    /// Energy sources drawn from the zone's actual equipment
    pub fuel_signature: HashSet<Fuel>,
    /// Effective exhaust airflow: zone exhaust fans plus the zone's share
    /// of central relief air
    pub exhaust_flow: AirFlow,
}

impl Zone {
    /// Peak internal load per unit floor area.
    ///
    /// A zone with no floor area carries no load intensity.
    pub fn load_intensity(&self) -> LoadIntensity {
        if self.floor_area.value() > 0.0 {
            self.peak_internal_load / self.floor_area
        } else {
            LoadIntensity::from(0.0)
        }
    }

    /// Equivalent full-load hours per week for this zone.
    pub fn eflh(&self) -> WeeklyHours {
        self.operating_hours.eflh()
    }

    /// Whether the zone carries the given special-use tag.
    pub fn has_tag(&self, tag: CategoryTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Whether the zone is served by purchased chilled water.
    pub fn is_district_cooled(&self) -> bool {
        self.fuel_signature.contains(&Fuel::DistrictCooling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_eflh_uniform_profile() {
        // A profile on for 60 of every 168 hours averages 60 EFLH/week
        let profile = OperatingProfile(vec![60.0 / 168.0; 8760]);
        assert_approx_eq!(f64, profile.eflh().value(), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_eflh_always_on() {
        let profile = OperatingProfile(vec![1.0; 8760]);
        assert_approx_eq!(f64, profile.eflh().value(), 168.0);
    }

    #[test]
    fn test_eflh_empty_profile() {
        assert_approx_eq!(f64, OperatingProfile(Vec::new()).eflh().value(), 0.0);
    }

    #[test]
    fn test_union_keeps_largest_fraction() {
        let a = OperatingProfile(vec![1.0, 0.0, 0.5]);
        let b = OperatingProfile(vec![0.0, 1.0, 0.25]);
        let merged = OperatingProfile::union([&a, &b]);
        assert_eq!(merged, OperatingProfile(vec![1.0, 1.0, 0.5]));
    }

    #[test]
    fn test_union_of_nothing_is_empty() {
        let merged = OperatingProfile::union(std::iter::empty::<&OperatingProfile>());
        assert_eq!(merged, OperatingProfile(Vec::new()));
    }
}
