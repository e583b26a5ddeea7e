#![allow(missing_docs)]

//! Unit types for the quantities used in classification.
//!
//! Zone attributes are reported in the IP units the governing rule text is
//! written in; the building model and sizing results arrive in SI and are
//! converted at the extraction seam.

const SQUARE_FEET_PER_SQUARE_METRE: f64 = 10.763_910_416_7;
const CUBIC_FEET_PER_CUBIC_METRE: f64 = 35.314_666_721_5;
const BTU_PER_HOUR_PER_WATT: f64 = 3.412_141_633;
const CFM_PER_CUBIC_METRE_PER_SECOND: f64 = 2_118.880_003;

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, derive_more::Add, derive_more::Sub)]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub fn from(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

macro_rules! impl_div {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Div<$Rhs> for $Lhs {
            type Output = $Out;
            fn div(self, rhs: $Rhs) -> $Out {
                <$Out>::from(self.0 / rhs.0)
            }
        }
    };
}

// Base quantities
unit_struct!(FloorArea); // ft2
unit_struct!(Volume); // ft3
unit_struct!(PeakLoad); // Btu/h
unit_struct!(AirFlow); // cfm
unit_struct!(WeeklyHours); // h/week

// Derived quantities
unit_struct!(LoadIntensity); // Btu/h*ft2

// Division rules
impl_div!(PeakLoad, FloorArea, LoadIntensity);

impl FloorArea {
    /// Convert a floor area in m2 from the building model.
    pub fn from_square_metres(val: f64) -> Self {
        Self(val * SQUARE_FEET_PER_SQUARE_METRE)
    }
}

impl Volume {
    /// Convert a volume in m3 from the building model.
    pub fn from_cubic_metres(val: f64) -> Self {
        Self(val * CUBIC_FEET_PER_CUBIC_METRE)
    }
}

impl PeakLoad {
    /// Convert a load in W from the sizing results.
    pub fn from_watts(val: f64) -> Self {
        Self(val * BTU_PER_HOUR_PER_WATT)
    }
}

impl AirFlow {
    /// Convert a volumetric flow in m3/s from the model or sizing results.
    pub fn from_cubic_metres_per_second(val: f64) -> Self {
        Self(val * CFM_PER_CUBIC_METRE_PER_SECOND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_si_conversions() {
        assert_approx_eq!(
            f64,
            FloorArea::from_square_metres(100.0).value(),
            1076.391,
            epsilon = 1e-3
        );
        assert_approx_eq!(
            f64,
            PeakLoad::from_watts(1000.0).value(),
            3412.142,
            epsilon = 1e-3
        );
        assert_approx_eq!(
            f64,
            AirFlow::from_cubic_metres_per_second(1.0).value(),
            2118.880,
            epsilon = 1e-3
        );
        assert_approx_eq!(
            f64,
            Volume::from_cubic_metres(1.0).value(),
            35.3147,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_load_intensity_division() {
        let intensity = PeakLoad::from(50_000.0) / FloorArea::from(5_000.0);
        assert_approx_eq!(f64, intensity.value(), 10.0);
    }
}
