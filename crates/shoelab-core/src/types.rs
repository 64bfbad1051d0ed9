//! # Domain Types
//!
//! Core domain types used throughout Shoe Lab.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ShoeConfig    │   │      Shoe       │   │    NewShoe      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  draft / patch  │   │  id (INTEGER)   │   │  complete,      │       │
//! │  │  every field    │   │  8 fields,      │   │  ready to       │       │
//! │  │  optional       │   │  all present    │   │  insert         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │   ShoeField     │  shoeName, sizeId, brandId, typeId, colorId,      │
//! │  │  ─────────────  │  cushionId, cushionColorId, laceColorId           │
//! │  │  declaration    │  (this order drives REQUIRED reporting)           │
//! │  │  order          │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Draft vs Record
//! A `ShoeConfig` is what the builder form (or a PATCH body) sends: any field
//! may be missing, and the validation engine reports what is. A `Shoe` is a
//! persisted row where every field is present. Identifier fields accept
//! either JSON numbers or numeric strings; an empty string counts as missing.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::catalog::OptionFamily;
use crate::error::CoreError;

// =============================================================================
// Shoe Field
// =============================================================================

/// One of the eight fields of a shoe configuration.
///
/// Serialized in camelCase (`"shoeName"`, `"sizeId"`, ...) since that is how
/// the frontend and the violation `field` tag refer to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ShoeField {
    ShoeName,
    SizeId,
    BrandId,
    TypeId,
    ColorId,
    CushionId,
    CushionColorId,
    LaceColorId,
}

impl ShoeField {
    /// All fields in declaration order.
    pub const ALL: [ShoeField; 8] = [
        ShoeField::ShoeName,
        ShoeField::SizeId,
        ShoeField::BrandId,
        ShoeField::TypeId,
        ShoeField::ColorId,
        ShoeField::CushionId,
        ShoeField::CushionColorId,
        ShoeField::LaceColorId,
    ];

    /// The camelCase name used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            ShoeField::ShoeName => "shoeName",
            ShoeField::SizeId => "sizeId",
            ShoeField::BrandId => "brandId",
            ShoeField::TypeId => "typeId",
            ShoeField::ColorId => "colorId",
            ShoeField::CushionId => "cushionId",
            ShoeField::CushionColorId => "cushionColorId",
            ShoeField::LaceColorId => "laceColorId",
        }
    }

    /// The snake_case column name in the `shoes` table.
    pub const fn column(self) -> &'static str {
        match self {
            ShoeField::ShoeName => "shoe_name",
            ShoeField::SizeId => "size_id",
            ShoeField::BrandId => "brand_id",
            ShoeField::TypeId => "type_id",
            ShoeField::ColorId => "color_id",
            ShoeField::CushionId => "cushion_id",
            ShoeField::CushionColorId => "cushion_color_id",
            ShoeField::LaceColorId => "lace_color_id",
        }
    }

    /// The option family an identifier field selects from.
    ///
    /// `None` for the free-text name.
    pub const fn family(self) -> Option<OptionFamily> {
        match self {
            ShoeField::ShoeName => None,
            ShoeField::SizeId => Some(OptionFamily::Size),
            ShoeField::BrandId => Some(OptionFamily::Brand),
            ShoeField::TypeId => Some(OptionFamily::Type),
            ShoeField::ColorId => Some(OptionFamily::Color),
            ShoeField::CushionId => Some(OptionFamily::Cushion),
            ShoeField::CushionColorId => Some(OptionFamily::CushionColor),
            ShoeField::LaceColorId => Some(OptionFamily::LaceColor),
        }
    }
}

impl fmt::Display for ShoeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed field value, used when binding partial updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Id(i64),
}

// =============================================================================
// Shoe Configuration (draft / patch)
// =============================================================================

/// A shoe configuration as submitted by a client.
///
/// Every field is optional. The same shape serves three purposes:
/// - the live draft the builder form validates and prices,
/// - the body of a create request (all fields expected),
/// - the body of a partial update (only the fields being changed).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShoeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub shoe_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<i32>")]
    pub size_id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<i32>")]
    pub brand_id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<i32>")]
    pub type_id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<i32>")]
    pub color_id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<i32>")]
    pub cushion_id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<i32>")]
    pub cushion_color_id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<i32>")]
    pub lace_color_id: Option<i64>,
}

impl ShoeConfig {
    /// Returns the selected identifier for an option family.
    pub fn selected(&self, family: OptionFamily) -> Option<i64> {
        match family {
            OptionFamily::Size => self.size_id,
            OptionFamily::Brand => self.brand_id,
            OptionFamily::Type => self.type_id,
            OptionFamily::Color => self.color_id,
            OptionFamily::Cushion => self.cushion_id,
            OptionFamily::CushionColor => self.cushion_color_id,
            OptionFamily::LaceColor => self.lace_color_id,
        }
    }

    /// Returns the value of a field, if present.
    ///
    /// An empty `shoeName` is returned as-is; use [`ShoeConfig::is_missing`]
    /// to apply the "empty string counts as missing" rule.
    pub fn value(&self, field: ShoeField) -> Option<FieldValue<'_>> {
        match field {
            ShoeField::ShoeName => self.shoe_name.as_deref().map(FieldValue::Text),
            other => other
                .family()
                .and_then(|family| self.selected(family))
                .map(FieldValue::Id),
        }
    }

    /// True if the field is absent or an empty string.
    ///
    /// Zero is a value, not an absence.
    pub fn is_missing(&self, field: ShoeField) -> bool {
        match self.value(field) {
            None => true,
            Some(FieldValue::Text(text)) => text.is_empty(),
            Some(FieldValue::Id(_)) => false,
        }
    }

    /// Fields that are missing, in declaration order.
    pub fn missing_fields(&self) -> Vec<ShoeField> {
        ShoeField::ALL
            .into_iter()
            .filter(|field| self.is_missing(*field))
            .collect()
    }

    /// Fields carrying a value, in declaration order, for partial updates.
    pub fn provided(&self) -> Vec<(ShoeField, FieldValue<'_>)> {
        ShoeField::ALL
            .into_iter()
            .filter_map(|field| self.value(field).map(|value| (field, value)))
            .collect()
    }

    /// True if no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.provided().is_empty()
    }
}

// =============================================================================
// Persisted Shoe
// =============================================================================

/// A saved shoe configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Shoe {
    /// Server-assigned identifier.
    #[ts(type = "number")]
    pub id: i64,
    pub shoe_name: String,
    #[ts(type = "number")]
    pub size_id: i64,
    #[ts(type = "number")]
    pub brand_id: i64,
    #[ts(type = "number")]
    pub type_id: i64,
    #[ts(type = "number")]
    pub color_id: i64,
    #[ts(type = "number")]
    pub cushion_id: i64,
    #[ts(type = "number")]
    pub cushion_color_id: i64,
    #[ts(type = "number")]
    pub lace_color_id: i64,
}

impl Shoe {
    /// Returns the stored fields as a configuration for pricing/validation.
    pub fn config(&self) -> ShoeConfig {
        ShoeConfig {
            shoe_name: Some(self.shoe_name.clone()),
            size_id: Some(self.size_id),
            brand_id: Some(self.brand_id),
            type_id: Some(self.type_id),
            color_id: Some(self.color_id),
            cushion_id: Some(self.cushion_id),
            cushion_color_id: Some(self.cushion_color_id),
            lace_color_id: Some(self.lace_color_id),
        }
    }

    /// Returns the configuration this shoe would have after applying `patch`.
    ///
    /// Fields present in the patch win; everything else is kept.
    pub fn merged(&self, patch: &ShoeConfig) -> ShoeConfig {
        let current = self.config();
        ShoeConfig {
            shoe_name: patch.shoe_name.clone().or(current.shoe_name),
            size_id: patch.size_id.or(current.size_id),
            brand_id: patch.brand_id.or(current.brand_id),
            type_id: patch.type_id.or(current.type_id),
            color_id: patch.color_id.or(current.color_id),
            cushion_id: patch.cushion_id.or(current.cushion_id),
            cushion_color_id: patch.cushion_color_id.or(current.cushion_color_id),
            lace_color_id: patch.lace_color_id.or(current.lace_color_id),
        }
    }
}

// =============================================================================
// New Shoe
// =============================================================================

/// A complete configuration ready to be inserted.
///
/// Built from a draft with `NewShoe::try_from(&config)`, which fails with
/// [`CoreError::MissingFields`] listing every missing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShoe {
    pub shoe_name: String,
    pub size_id: i64,
    pub brand_id: i64,
    pub type_id: i64,
    pub color_id: i64,
    pub cushion_id: i64,
    pub cushion_color_id: i64,
    pub lace_color_id: i64,
}

impl TryFrom<&ShoeConfig> for NewShoe {
    type Error = CoreError;

    fn try_from(config: &ShoeConfig) -> Result<Self, Self::Error> {
        let missing = config.missing_fields();
        if !missing.is_empty() {
            return Err(CoreError::MissingFields(missing));
        }

        let id = |field: ShoeField| match config.value(field) {
            Some(FieldValue::Id(id)) => Ok(id),
            _ => Err(CoreError::MissingFields(vec![field])),
        };

        Ok(NewShoe {
            shoe_name: config.shoe_name.clone().unwrap_or_default(),
            size_id: id(ShoeField::SizeId)?,
            brand_id: id(ShoeField::BrandId)?,
            type_id: id(ShoeField::TypeId)?,
            color_id: id(ShoeField::ColorId)?,
            cushion_id: id(ShoeField::CushionId)?,
            cushion_color_id: id(ShoeField::CushionColorId)?,
            lace_color_id: id(ShoeField::LaceColorId)?,
        })
    }
}

// =============================================================================
// Lenient identifier deserialization
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum IdInput {
    Number(i64),
    Text(String),
}

/// Accepts `9`, `"9"`, `null` and `""` (the last two as missing).
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdInput::Number(id)) => Ok(Some(id)),
        Some(IdInput::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i64>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("expected an integer id, got \"{}\"", text)))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
