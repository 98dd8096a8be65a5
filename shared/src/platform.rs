//! Delivery platform identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported delivery marketplaces
///
/// The canonical string identifier (`"ifood"`, `"rappi"`, `"ubereats"`,
/// `"99food"`) is the value used in the operation envelope, in catalog
/// files and by callers selecting an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "ifood")]
    IFood,
    #[serde(rename = "rappi")]
    Rappi,
    #[serde(rename = "ubereats")]
    UberEats,
    #[serde(rename = "99food")]
    NineNineFood,
}

impl Platform {
    /// All supported platforms, in registry order
    pub const ALL: [Platform; 4] = [
        Platform::IFood,
        Platform::Rappi,
        Platform::UberEats,
        Platform::NineNineFood,
    ];

    /// Canonical string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::IFood => "ifood",
            Platform::Rappi => "rappi",
            Platform::UberEats => "ubereats",
            Platform::NineNineFood => "99food",
        }
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::IFood => "iFood",
            Platform::Rappi => "Rappi",
            Platform::UberEats => "Uber Eats",
            Platform::NineNineFood => "99Food",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown platform identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ifood" => Ok(Platform::IFood),
            "rappi" => Ok(Platform::Rappi),
            "ubereats" | "uber_eats" | "uber-eats" => Ok(Platform::UberEats),
            "99food" | "ninefood" => Ok(Platform::NineNineFood),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for p in Platform::ALL {
            assert_eq!(p.as_str().parse::<Platform>().unwrap(), p);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("iFood".parse::<Platform>().unwrap(), Platform::IFood);
        assert_eq!("UberEats".parse::<Platform>().unwrap(), Platform::UberEats);
    }

    #[test]
    fn test_parse_unknown() {
        assert!("deliveroo".parse::<Platform>().is_err());
    }

    #[test]
    fn test_serde_identifier() {
        let json = serde_json::to_string(&Platform::NineNineFood).unwrap();
        assert_eq!(json, "\"99food\"");
        let back: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Platform::NineNineFood);
    }
}
