use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// declares a string-backed identifier. serializes as the bare string so ids can be
/// used as JSON object keys.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Default, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Deserialize, Serialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// identifies a stop facility
    StopId
);
string_id!(
    /// identifies a transit line
    LineId
);
string_id!(
    /// identifies a route within its line
    RouteId
);
string_id!(
    /// identifies a network link
    LinkId
);
string_id!(
    /// identifies a network node
    NodeId
);
string_id!(DepartureId);
string_id!(VehicleId);
string_id!(VehicleTypeId);
