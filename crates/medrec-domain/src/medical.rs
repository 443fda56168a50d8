//! Closed vocabularies stored on patient and record rows.
//!
//! Each enum round-trips through the exact strings kept in the database
//! (`as_str` / `FromStr`) and through serde with the same spelling.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownValue {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// ABO/Rh blood group. `Unknown` is the registration default.
    BloodGroup, "blood group" {
        APos => "A+",
        ANeg => "A-",
        BPos => "B+",
        BNeg => "B-",
        AbPos => "AB+",
        AbNeg => "AB-",
        OPos => "O+",
        ONeg => "O-",
        Unknown => "Unknown",
    }
}

string_enum! {
    Gender, "gender" {
        Male => "Male",
        Female => "Female",
        Other => "Other",
        Undisclosed => "Prefer not to say",
    }
}

string_enum! {
    /// Allergy severity.
    Severity, "severity" {
        Mild => "Mild",
        Moderate => "Moderate",
        Severe => "Severe",
    }
}

impl Default for BloodGroup {
    fn default() -> Self {
        Self::Unknown
    }
}

impl Default for Gender {
    fn default() -> Self {
        Self::Undisclosed
    }
}
