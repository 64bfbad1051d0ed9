//! # Option Catalog
//!
//! The fixed option tables a shoe is assembled from.
//!
//! ## Families
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Family         ids        priceDelta                                   │
//! │  ────────────   ────────   ─────────────────────────────────────────    │
//! │  size           6..12      +0 (6-8), +5 (9-10), +10 (11-12)             │
//! │  brand          1..3       SoleTech +40, StridePro +30, AeroRun +35     │
//! │  type           10..12     Runner +25, Trainer +20, Casual +15          │
//! │  color          20..23     Black/White +0, Red/Blue +5                  │
//! │  cushion        32..34     Air Pocket +20, Foam Flex +15, Gel Glide +18 │
//! │  cushionColor   41..43     +8 each                                      │
//! │  laceColor      51..53     Black/White +0, Gray Blend +3                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are stored as raw integers in the `shoes` table, so these
//! tables must never be renumbered.
//!
//! ## Lookups Never Fail
//! A stale or foreign id prices at zero, names as itself and has no swatch.
//! Display code keeps working for rows saved against an older catalog.
//!
//! ```rust
//! use shoelab_core::catalog::OptionFamily;
//!
//! assert_eq!(OptionFamily::Brand.price_of(1), 40);
//! assert_eq!(OptionFamily::Brand.name_of(1), "SoleTech");
//! assert_eq!(OptionFamily::Brand.price_of(99), 0);
//! assert_eq!(OptionFamily::Brand.name_of(99), "99");
//! ```

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use ts_rs::TS;

use crate::pricing::BASE_PRICE;

// =============================================================================
// Option Record
// =============================================================================

/// One selectable option within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OptionRecord {
    /// Identifier, unique within its family.
    #[ts(type = "number")]
    pub id: i64,

    /// Display name.
    #[ts(type = "string")]
    pub name: &'static str,

    /// Amount added to the base price when selected.
    #[ts(type = "number")]
    pub price_delta: i64,

    /// Swatch fill color, for color-like families.
    #[ts(type = "string | null")]
    pub color_hex: Option<&'static str>,

    /// Swatch border, for light colors that vanish on a white background.
    #[ts(type = "string | null")]
    pub border_hex: Option<&'static str>,
}

impl OptionRecord {
    const fn plain(id: i64, name: &'static str, price_delta: i64) -> Self {
        OptionRecord {
            id,
            name,
            price_delta,
            color_hex: None,
            border_hex: None,
        }
    }

    const fn colored(id: i64, name: &'static str, price_delta: i64, hex: &'static str) -> Self {
        OptionRecord {
            id,
            name,
            price_delta,
            color_hex: Some(hex),
            border_hex: None,
        }
    }

    const fn bordered(
        id: i64,
        name: &'static str,
        price_delta: i64,
        hex: &'static str,
        border: &'static str,
    ) -> Self {
        OptionRecord {
            id,
            name,
            price_delta,
            color_hex: Some(hex),
            border_hex: Some(border),
        }
    }

    /// Returns the presentation swatch for this option.
    pub const fn swatch(&self) -> Swatch {
        Swatch {
            hex: self.color_hex,
            border: self.border_hex,
        }
    }
}

/// Presentation metadata for a color dot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Swatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | undefined")]
    pub hex: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | undefined")]
    pub border: Option<&'static str>,
}

impl Swatch {
    /// True if there is nothing to draw.
    pub const fn is_empty(&self) -> bool {
        self.hex.is_none() && self.border.is_none()
    }
}

// =============================================================================
// Reference Tables
// =============================================================================

const WHITE_BORDER: &str = "#e5e7eb";

pub const SIZES: &[OptionRecord] = &[
    OptionRecord::plain(6, "6", 0),
    OptionRecord::plain(7, "7", 0),
    OptionRecord::plain(8, "8", 0),
    OptionRecord::plain(9, "9", 5),
    OptionRecord::plain(10, "10", 5),
    OptionRecord::plain(11, "11", 10),
    OptionRecord::plain(12, "12", 10),
];

pub const BRANDS: &[OptionRecord] = &[
    OptionRecord::plain(1, "SoleTech", 40),
    OptionRecord::plain(2, "StridePro", 30),
    OptionRecord::plain(3, "AeroRun", 35),
];

pub const TYPES: &[OptionRecord] = &[
    OptionRecord::plain(10, "Runner", 25),
    OptionRecord::plain(11, "Trainer", 20),
    OptionRecord::plain(12, "Casual", 15),
];

pub const COLORS: &[OptionRecord] = &[
    OptionRecord::colored(20, "Black", 0, "#111111"),
    OptionRecord::bordered(21, "White", 0, "#ffffff", WHITE_BORDER),
    OptionRecord::colored(22, "Red", 5, "#dc2626"),
    OptionRecord::colored(23, "Blue", 5, "#2563eb"),
];

pub const CUSHIONS: &[OptionRecord] = &[
    OptionRecord::plain(32, "Air Pocket", 20),
    OptionRecord::plain(33, "Foam Flex", 15),
    OptionRecord::plain(34, "Gel Glide", 18),
];

pub const CUSHION_COLORS: &[OptionRecord] = &[
    OptionRecord::colored(41, "Neon Yellow", 8, "#d4ff00"),
    OptionRecord::colored(42, "Electric Blue", 8, "#00c2ff"),
    OptionRecord::colored(43, "Crimson Red", 8, "#b91c1c"),
];

pub const LACE_COLORS: &[OptionRecord] = &[
    OptionRecord::colored(51, "Black Contrast", 0, "#111111"),
    OptionRecord::bordered(52, "White Classic", 0, "#ffffff", WHITE_BORDER),
    OptionRecord::colored(53, "Gray Blend", 3, "#6b7280"),
];

// =============================================================================
// Option Family
// =============================================================================

/// One of the seven selectable attribute categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum OptionFamily {
    Size,
    Brand,
    Type,
    Color,
    Cushion,
    CushionColor,
    LaceColor,
}

impl OptionFamily {
    /// All families, in the order a configuration lists them.
    pub const ALL: [OptionFamily; 7] = [
        OptionFamily::Size,
        OptionFamily::Brand,
        OptionFamily::Type,
        OptionFamily::Color,
        OptionFamily::Cushion,
        OptionFamily::CushionColor,
        OptionFamily::LaceColor,
    ];

    /// The ordered option list for this family.
    pub const fn options(self) -> &'static [OptionRecord] {
        match self {
            OptionFamily::Size => SIZES,
            OptionFamily::Brand => BRANDS,
            OptionFamily::Type => TYPES,
            OptionFamily::Color => COLORS,
            OptionFamily::Cushion => CUSHIONS,
            OptionFamily::CushionColor => CUSHION_COLORS,
            OptionFamily::LaceColor => LACE_COLORS,
        }
    }

    /// The camelCase key for this family.
    pub const fn key(self) -> &'static str {
        match self {
            OptionFamily::Size => "size",
            OptionFamily::Brand => "brand",
            OptionFamily::Type => "type",
            OptionFamily::Color => "color",
            OptionFamily::Cushion => "cushion",
            OptionFamily::CushionColor => "cushionColor",
            OptionFamily::LaceColor => "laceColor",
        }
    }

    /// Finds the record with the given id.
    pub fn find(self, id: i64) -> Option<&'static OptionRecord> {
        self.options().iter().find(|record| record.id == id)
    }

    /// Price delta of the option, or 0 if the id is not in this family.
    pub fn price_of(self, id: i64) -> i64 {
        self.find(id).map_or(0, |record| record.price_delta)
    }

    /// Display name of the option, or the id itself if it is unknown.
    pub fn name_of(self, id: i64) -> Cow<'static, str> {
        match self.find(id) {
            Some(record) => Cow::Borrowed(record.name),
            None => Cow::Owned(id.to_string()),
        }
    }

    /// Swatch for the option, or an empty swatch if it is unknown.
    pub fn swatch_of(self, id: i64) -> Swatch {
        self.find(id).map(OptionRecord::swatch).unwrap_or_default()
    }
}

impl fmt::Display for OptionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// The full catalog as one serializable value, for clients that render the
/// builder form.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub base_price: i64,
    pub size: &'static [OptionRecord],
    pub brand: &'static [OptionRecord],
    #[serde(rename = "type")]
    pub shoe_type: &'static [OptionRecord],
    pub color: &'static [OptionRecord],
    pub cushion: &'static [OptionRecord],
    pub cushion_color: &'static [OptionRecord],
    pub lace_color: &'static [OptionRecord],
}

/// Returns the whole catalog.
pub const fn snapshot() -> CatalogSnapshot {
    CatalogSnapshot {
        base_price: BASE_PRICE,
        size: SIZES,
        brand: BRANDS,
        shoe_type: TYPES,
        color: COLORS,
        cushion: CUSHIONS,
        cushion_color: CUSHION_COLORS,
        lace_color: LACE_COLORS,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_within_family() {
        for family in OptionFamily::ALL {
            let ids: HashSet<i64> = family.options().iter().map(|r| r.id).collect();
            assert_eq!(ids.len(), family.options().len(), "duplicate id in {}", family);
        }
    }

    #[test]
    fn test_size_price_bands() {
        let deltas: Vec<i64> = (6..=12).map(|id| OptionFamily::Size.price_of(id)).collect();
        assert_eq!(deltas, vec![0, 0, 0, 5, 5, 10, 10]);
    }

    #[test]
    fn test_reference_prices() {
        assert_eq!(OptionFamily::Brand.price_of(2), 30);
        assert_eq!(OptionFamily::Brand.price_of(3), 35);
        assert_eq!(OptionFamily::Type.price_of(10), 25);
        assert_eq!(OptionFamily::Type.price_of(12), 15);
        assert_eq!(OptionFamily::Color.price_of(22), 5);
        assert_eq!(OptionFamily::Cushion.price_of(34), 18);
        assert_eq!(OptionFamily::CushionColor.price_of(43), 8);
        assert_eq!(OptionFamily::LaceColor.price_of(53), 3);
    }

    #[test]
    fn test_unknown_id_degrades_gracefully() {
        assert_eq!(OptionFamily::Cushion.price_of(99), 0);
        assert_eq!(OptionFamily::Cushion.name_of(99), "99");
        assert!(OptionFamily::Cushion.swatch_of(99).is_empty());

        // Ids from another family are unknown here.
        assert_eq!(OptionFamily::Color.price_of(32), 0);
    }

    #[test]
    fn test_names() {
        assert_eq!(OptionFamily::Type.name_of(11), "Trainer");
        assert_eq!(OptionFamily::Cushion.name_of(32), "Air Pocket");
        assert_eq!(OptionFamily::LaceColor.name_of(52), "White Classic");
        assert_eq!(OptionFamily::Size.name_of(10), "10");
    }

    #[test]
    fn test_swatches() {
        let white = OptionFamily::Color.swatch_of(21);
        assert_eq!(white.hex, Some("#ffffff"));
        assert_eq!(white.border, Some("#e5e7eb"));

        let neon = OptionFamily::CushionColor.swatch_of(41);
        assert_eq!(neon.hex, Some("#d4ff00"));
        assert_eq!(neon.border, None);

        // Brands have no presentation metadata.
        assert!(OptionFamily::Brand.swatch_of(1).is_empty());
    }

    #[test]
    fn test_typescript_binding_uses_numbers() {
        let decl = OptionRecord::decl();
        assert!(decl.contains("id: number"), "{}", decl);
        assert!(decl.contains("priceDelta: number"), "{}", decl);
        assert!(!decl.contains("bigint"), "{}", decl);
    }

    #[test]
    fn test_snapshot_serialization() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["basePrice"], 60);
        assert_eq!(json["type"][0]["name"], "Runner");
        assert_eq!(json["laceColor"][1]["borderHex"], "#e5e7eb");
        assert_eq!(json["brand"][0]["priceDelta"], 40);
        assert_eq!(json["size"].as_array().unwrap().len(), 7);
    }
}
