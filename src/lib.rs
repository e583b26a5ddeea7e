//! Baseline HVAC system grouping for prescriptive building-energy codes.
//!
//! Given a building's conditioned zones and the results of a completed
//! sizing simulation, this library splits the zones into special-case
//! buckets, isolates statistically dissimilar zones onto their own
//! single-zone systems, and maps every resulting group to a canonical
//! baseline system-type code via story-count and floor-area range tables.
//!
//! The entry point is [`grouping::assign_system_groups`].
#![warn(missing_docs)]
pub mod building;
pub mod classify;
pub mod config;
pub mod extract;
pub mod group;
pub mod grouping;
pub mod id;
pub mod input;
pub mod log;
pub mod partition;
pub mod system_type;
pub mod units;
pub mod zone;

#[cfg(test)]
mod fixture;
