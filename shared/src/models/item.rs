//! Item lot models: units of measure and stock categories

use serde::{Deserialize, Serialize};

/// Unit-of-measure kind for an item lot.
///
/// The measure column stores the magnitude per discrete unit; the unit kind
/// fixes how that magnitude is read (grams for mass, milliliters for volume).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Mass,
    Volume,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Mass => "mass",
            Unit::Volume => "volume",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "mass" => Some(Unit::Mass),
            "volume" => Some(Unit::Volume),
            _ => None,
        }
    }

    /// Suffix implied by the unit kind ("g" / "ml").
    ///
    /// A measure value must not carry this suffix itself; the unit already
    /// implies it.
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Mass => "g",
            Unit::Volume => "ml",
        }
    }
}

/// The three classification buckets for stock quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockCategory {
    InStock,
    Consumed,
    Expired,
}

impl StockCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockCategory::InStock => "in_stock",
            StockCategory::Consumed => "consumed",
            StockCategory::Expired => "expired",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "in_stock" => Some(StockCategory::InStock),
            "consumed" => Some(StockCategory::Consumed),
            "expired" => Some(StockCategory::Expired),
            _ => None,
        }
    }
}
