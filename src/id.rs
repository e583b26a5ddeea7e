//! Identifier types for zones, categories and related objects.

/// Define a newtype ID over a shared string (e.g. `ZoneID`, `CategoryID`)
macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(
            Clone, std::hash::Hash, PartialEq, Eq, serde::Deserialize, Debug, serde::Serialize,
        )]
        /// An ID type
        pub struct $name(pub std::rc::Rc<str>);

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl $name {
            /// Create a new ID from a string slice
            pub fn new(id: &str) -> Self {
                $name(std::rc::Rc::from(id))
            }
        }
    };
}
pub(crate) use define_id_type;

define_id_type! {ZoneID}
define_id_type! {CategoryID}
define_id_type! {StoryID}
define_id_type! {AirLoopID}
define_id_type! {ClimateZoneID}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_id_lookup_by_str() {
        let map: HashMap<ZoneID, u32> = [("Core_ZN".into(), 1)].into_iter().collect();
        assert_eq!(map.get("Core_ZN"), Some(&1));
        assert_eq!(map.get("Perimeter_ZN"), None);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(CategoryID::new("office").to_string(), "office");
    }
}
