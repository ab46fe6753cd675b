//! Category entity - The closed set of product categories the shop takes orders for.
//!
//! A category decides both which capture form is shown and which table renders the
//! order on an invoice. The set is closed: any name outside it is a data-integrity
//! error, never silently ignored.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product category.
///
/// The derived ordering follows declaration order and is only used for map keys;
/// invoice display order lives in [`Category::DISPLAY_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    /// Curtains and drapes
    Curtains,
    /// Sofas and upholstery
    Sofas,
    /// Window blinds
    Blinds,
    /// Floor coverings
    Floorings,
    /// Wallpaper rolls
    Wallpaper,
    /// Loose furniture and decor
    Furniture,
    /// Carpets and rugs
    Carpets,
}

impl Category {
    /// Every category, in the order the category picker shows them.
    pub const ALL: [Self; 7] = [
        Self::Curtains,
        Self::Sofas,
        Self::Blinds,
        Self::Floorings,
        Self::Wallpaper,
        Self::Furniture,
        Self::Carpets,
    ];

    /// Order in which category tables appear on an invoice.
    pub const DISPLAY_ORDER: [Self; 7] = [
        Self::Curtains,
        Self::Sofas,
        Self::Blinds,
        Self::Furniture,
        Self::Wallpaper,
        Self::Floorings,
        Self::Carpets,
    ];

    /// Canonical name, as written on new orders.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Curtains => "Curtains",
            Self::Sofas => "Sofas",
            Self::Blinds => "Blinds",
            Self::Floorings => "Floorings",
            Self::Wallpaper => "Wallpaper",
            Self::Furniture => "Furniture",
            Self::Carpets => "Carpets",
        }
    }

    /// Parses a category name.
    ///
    /// Accepts the canonical names plus the singular spellings ("Sofa", "Flooring",
    /// "Carpet") found in stored product records. Matching is case sensitive.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "Curtains" | "Curtain" => Ok(Self::Curtains),
            "Sofas" | "Sofa" => Ok(Self::Sofas),
            "Blinds" | "Blind" => Ok(Self::Blinds),
            "Floorings" | "Flooring" => Ok(Self::Floorings),
            "Wallpaper" | "Wallpapers" => Ok(Self::Wallpaper),
            "Furniture" => Ok(Self::Furniture),
            "Carpets" | "Carpet" => Ok(Self::Carpets),
            other => Err(Error::UnknownCategory {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Category {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}
