//! # Validation Module
//!
//! Business rules a shoe configuration is checked against before saving.
//!
//! ## Rule Evaluation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rule Table (evaluated in order)                    │
//! │                                                                         │
//! │  config == None?  ──► [EMPTY_CONFIG]  (stop here)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. REQUIRED           error    once per missing field                 │
//! │  2. RUNNER_CUSHION     error    Runner needs Air Pocket / Gel Glide    │
//! │  3. NEON_WHITE_CLASH   warning  Neon Yellow cushion + White laces      │
//! │  4. BRAND_COLOR_BLOCK  error    SoleTech is not stocked in Red         │
//! │  5. SIZE_RANGE         error    size outside 6..=12                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Every matching rule reports. Nothing short-circuits.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules are data: [`RULES`] is a static table and [`validate_with`] runs any
//! table, so a new rule is a new entry at the position it should report in.
//!
//! ## Usage
//! ```rust
//! use shoelab_core::validation::{explain, is_submittable, validate};
//! use shoelab_core::ShoeConfig;
//!
//! let draft = ShoeConfig {
//!     shoe_name: Some("Night Runner".to_string()),
//!     size_id: Some(9),
//!     brand_id: Some(1),
//!     type_id: Some(10),
//!     color_id: Some(20),
//!     cushion_id: Some(33), // Foam Flex: not allowed on a Runner
//!     cushion_color_id: Some(42),
//!     lace_color_id: Some(51),
//! };
//!
//! let violations = validate(Some(&draft));
//! assert_eq!(violations.len(), 1);
//! assert!(!is_submittable(&violations));
//! assert_eq!(
//!     explain(&violations),
//!     "❌ Runner type requires Air Pocket or Gel Glide cushioning."
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{ShoeConfig, ShoeField};

// =============================================================================
// Violation
// =============================================================================

/// How serious a violation is.
///
/// Only errors block saving; warnings are advice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

/// Machine-readable violation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ViolationCode {
    EmptyConfig,
    Required,
    RunnerCushion,
    NeonWhiteClash,
    BrandColorBlock,
    SizeRange,
}

impl ViolationCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ViolationCode::EmptyConfig => "EMPTY_CONFIG",
            ViolationCode::Required => "REQUIRED",
            ViolationCode::RunnerCushion => "RUNNER_CUSHION",
            ViolationCode::NeonWhiteClash => "NEON_WHITE_CLASH",
            ViolationCode::BrandColorBlock => "BRAND_COLOR_BLOCK",
            ViolationCode::SizeRange => "SIZE_RANGE",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule failure or caution found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Violation {
    pub code: ViolationCode,

    /// Human-readable explanation.
    pub message: String,

    /// The field the violation is attached to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub field: Option<ShoeField>,

    #[serde(default)]
    pub severity: Severity,
}

impl Violation {
    /// True if this violation blocks saving.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// =============================================================================
// Rules
// =============================================================================

/// What a rule inspects and how it reports.
#[derive(Clone, Copy)]
pub enum RuleCheck {
    /// Checked once per field in declaration order; reports each field for
    /// which `check` holds, with `message(field)`.
    EachField {
        check: fn(&ShoeConfig, ShoeField) -> bool,
        message: fn(ShoeField) -> String,
    },

    /// Checked once against the whole configuration; reports `message` on
    /// `field` when `check` holds.
    Combination {
        field: ShoeField,
        check: fn(&ShoeConfig) -> bool,
        message: &'static str,
    },
}

/// One entry of a rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub code: ViolationCode,
    pub severity: Severity,
    pub check: RuleCheck,
}

impl Rule {
    /// Appends this rule's violations for `config` to `out`.
    fn evaluate(&self, config: &ShoeConfig, out: &mut Vec<Violation>) {
        match self.check {
            RuleCheck::EachField { check, message } => {
                for field in ShoeField::ALL {
                    if check(config, field) {
                        out.push(Violation {
                            code: self.code,
                            message: message(field),
                            field: Some(field),
                            severity: self.severity,
                        });
                    }
                }
            }
            RuleCheck::Combination {
                field,
                check,
                message,
            } => {
                if check(config) {
                    out.push(Violation {
                        code: self.code,
                        message: message.to_string(),
                        field: Some(field),
                        severity: self.severity,
                    });
                }
            }
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("code", &self.code)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

// Catalog ids the rules refer to.
const TYPE_RUNNER: i64 = 10;
const CUSHION_AIR_POCKET: i64 = 32;
const CUSHION_GEL_GLIDE: i64 = 34;
const CUSHION_COLOR_NEON_YELLOW: i64 = 41;
const LACE_WHITE_CLASSIC: i64 = 52;
const BRAND_SOLETECH: i64 = 1;
const COLOR_RED: i64 = 22;

/// Smallest and largest size the guard accepts.
pub const SIZE_MIN: i64 = 6;
pub const SIZE_MAX: i64 = 12;

fn is_missing(config: &ShoeConfig, field: ShoeField) -> bool {
    config.is_missing(field)
}

fn required_message(field: ShoeField) -> String {
    format!("“{}” is required.", field)
}

fn runner_without_premium_cushion(config: &ShoeConfig) -> bool {
    config.type_id == Some(TYPE_RUNNER)
        && !matches!(
            config.cushion_id,
            Some(CUSHION_AIR_POCKET) | Some(CUSHION_GEL_GLIDE)
        )
}

fn neon_with_white_laces(config: &ShoeConfig) -> bool {
    config.cushion_color_id == Some(CUSHION_COLOR_NEON_YELLOW)
        && config.lace_color_id == Some(LACE_WHITE_CLASSIC)
}

fn soletech_in_red(config: &ShoeConfig) -> bool {
    config.brand_id == Some(BRAND_SOLETECH) && config.color_id == Some(COLOR_RED)
}

fn size_out_of_range(config: &ShoeConfig) -> bool {
    config
        .size_id
        .is_some_and(|size| !(SIZE_MIN..=SIZE_MAX).contains(&size))
}

/// The rule table, in reporting order.
pub static RULES: &[Rule] = &[
    Rule {
        code: ViolationCode::Required,
        severity: Severity::Error,
        check: RuleCheck::EachField {
            check: is_missing,
            message: required_message,
        },
    },
    Rule {
        code: ViolationCode::RunnerCushion,
        severity: Severity::Error,
        check: RuleCheck::Combination {
            field: ShoeField::CushionId,
            check: runner_without_premium_cushion,
            message: "Runner type requires Air Pocket or Gel Glide cushioning.",
        },
    },
    Rule {
        code: ViolationCode::NeonWhiteClash,
        severity: Severity::Warning,
        check: RuleCheck::Combination {
            field: ShoeField::LaceColorId,
            check: neon_with_white_laces,
            message: "Neon Yellow cushion with White laces may clash. Consider a darker lace color.",
        },
    },
    Rule {
        code: ViolationCode::BrandColorBlock,
        severity: Severity::Error,
        check: RuleCheck::Combination {
            field: ShoeField::ColorId,
            check: soletech_in_red,
            message: "SoleTech is not available in Red at the moment.",
        },
    },
    Rule {
        code: ViolationCode::SizeRange,
        severity: Severity::Error,
        check: RuleCheck::Combination {
            field: ShoeField::SizeId,
            check: size_out_of_range,
            message: "Size must be between 6 and 12.",
        },
    },
];

// =============================================================================
// Engine
// =============================================================================

/// Validates a configuration against [`RULES`].
///
/// Returns violations in rule order, then field order within a rule.
/// An absent configuration yields a single `EMPTY_CONFIG` error.
pub fn validate(config: Option<&ShoeConfig>) -> Vec<Violation> {
    validate_with(config, RULES)
}

/// Validates a configuration against an arbitrary rule table.
pub fn validate_with(config: Option<&ShoeConfig>, rules: &[Rule]) -> Vec<Violation> {
    let Some(config) = config else {
        return vec![Violation {
            code: ViolationCode::EmptyConfig,
            message: "No configuration provided.".to_string(),
            field: None,
            severity: Severity::Error,
        }];
    };

    let mut violations = Vec::new();
    for rule in rules {
        rule.evaluate(config, &mut violations);
    }
    violations
}

/// True if no violation is an error. Warnings alone do not block.
pub fn is_submittable(violations: &[Violation]) -> bool {
    violations.iter().all(|v| v.severity == Severity::Warning)
}

/// Renders violations as one line each, or a fixed message when there are
/// none.
pub fn explain(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return "No issues found.".to_string();
    }

    violations
        .iter()
        .map(|v| {
            let glyph = match v.severity {
                Severity::Warning => "⚠️",
                Severity::Error => "❌",
            };
            format!("{} {}", glyph, v.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Input Checks
// =============================================================================

/// Longest shoe name the store accepts.
pub const MAX_SHOE_NAME_LEN: usize = 255;

/// Validates a shoe name before it reaches storage.
///
/// Emptiness is left to the `REQUIRED` rule; a name made only of spaces or
/// one longer than [`MAX_SHOE_NAME_LEN`] characters is rejected here.
pub fn validate_shoe_name(name: &str) -> Result<(), ValidationError> {
    if !name.is_empty() && name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: ShoeField::ShoeName.to_string(),
        });
    }

    if name.chars().count() > MAX_SHOE_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: ShoeField::ShoeName.to_string(),
            max: MAX_SHOE_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_build() -> ShoeConfig {
        ShoeConfig {
            shoe_name: Some("X".to_string()),
            size_id: Some(9),
            brand_id: Some(1),
            type_id: Some(10),
            color_id: Some(20),
            cushion_id: Some(32),
            cushion_color_id: Some(41),
            lace_color_id: Some(51),
        }
    }

    fn codes(violations: &[Violation]) -> Vec<ViolationCode> {
        violations.iter().map(|v| v.code).collect()
    }

    #[test]
    fn test_absent_config() {
        let violations = validate(None);
        assert_eq!(codes(&violations), vec![ViolationCode::EmptyConfig]);
        assert_eq!(violations[0].message, "No configuration provided.");
        assert_eq!(violations[0].field, None);
        assert!(!is_submittable(&violations));
    }

    #[test]
    fn test_reference_build_is_clean() {
        let violations = validate(Some(&reference_build()));
        assert!(violations.is_empty());
        assert!(is_submittable(&violations));
    }

    #[test]
    fn test_runner_requires_premium_cushion() {
        let config = ShoeConfig {
            cushion_id: Some(33),
            ..reference_build()
        };
        let violations = validate(Some(&config));
        assert_eq!(codes(&violations), vec![ViolationCode::RunnerCushion]);
        assert_eq!(violations[0].field, Some(ShoeField::CushionId));
        assert_eq!(violations[0].severity, Severity::Error);

        let gel = ShoeConfig {
            cushion_id: Some(34),
            ..reference_build()
        };
        assert!(validate(Some(&gel)).is_empty());
    }

    #[test]
    fn test_non_runner_accepts_any_cushion() {
        let config = ShoeConfig {
            type_id: Some(12),
            cushion_id: Some(33),
            ..reference_build()
        };
        assert!(validate(Some(&config)).is_empty());
    }

    #[test]
    fn test_runner_with_missing_cushion_reports_both() {
        let config = ShoeConfig {
            cushion_id: None,
            ..reference_build()
        };
        let violations = validate(Some(&config));
        assert_eq!(
            codes(&violations),
            vec![ViolationCode::Required, ViolationCode::RunnerCushion]
        );
    }

    #[test]
    fn test_neon_white_clash_is_only_a_warning() {
        let config = ShoeConfig {
            lace_color_id: Some(52),
            ..reference_build()
        };
        let violations = validate(Some(&config));
        assert_eq!(codes(&violations), vec![ViolationCode::NeonWhiteClash]);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(violations[0].field, Some(ShoeField::LaceColorId));
        assert!(is_submittable(&violations));
    }

    #[test]
    fn test_brand_color_block() {
        let config = ShoeConfig {
            color_id: Some(22),
            ..reference_build()
        };
        let violations = validate(Some(&config));
        assert_eq!(codes(&violations), vec![ViolationCode::BrandColorBlock]);
        assert_eq!(violations[0].field, Some(ShoeField::ColorId));
        assert!(!is_submittable(&violations));
    }

    #[test]
    fn test_size_range_is_a_bounds_check() {
        for size in [5, 13, 62, -1] {
            let config = ShoeConfig {
                size_id: Some(size),
                ..reference_build()
            };
            assert_eq!(
                codes(&validate(Some(&config))),
                vec![ViolationCode::SizeRange],
                "size {}",
                size
            );
        }
        for size in [6, 12] {
            let config = ShoeConfig {
                size_id: Some(size),
                ..reference_build()
            };
            assert!(validate(Some(&config)).is_empty(), "size {}", size);
        }
    }

    #[test]
    fn test_empty_name_reports_only_that_field() {
        let config = ShoeConfig {
            shoe_name: Some(String::new()),
            ..reference_build()
        };
        let violations = validate(Some(&config));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, ViolationCode::Required);
        assert_eq!(violations[0].field, Some(ShoeField::ShoeName));
        assert_eq!(violations[0].message, "“shoeName” is required.");
    }

    #[test]
    fn test_zero_id_is_not_required_violation() {
        let config = ShoeConfig {
            color_id: Some(0),
            ..reference_build()
        };
        assert!(validate(Some(&config)).is_empty());
    }

    #[test]
    fn test_empty_draft_reports_every_field_in_order() {
        let violations = validate(Some(&ShoeConfig::default()));
        let fields: Vec<ShoeField> = violations.iter().filter_map(|v| v.field).collect();
        assert_eq!(fields, ShoeField::ALL.to_vec());
        assert!(violations.iter().all(|v| v.code == ViolationCode::Required));
    }

    #[test]
    fn test_all_matching_rules_report_in_table_order() {
        let config = ShoeConfig {
            shoe_name: None,
            size_id: Some(13),
            brand_id: Some(1),
            type_id: Some(10),
            color_id: Some(22),
            cushion_id: Some(33),
            cushion_color_id: Some(41),
            lace_color_id: Some(52),
        };
        assert_eq!(
            codes(&validate(Some(&config))),
            vec![
                ViolationCode::Required,
                ViolationCode::RunnerCushion,
                ViolationCode::NeonWhiteClash,
                ViolationCode::BrandColorBlock,
                ViolationCode::SizeRange,
            ]
        );
    }

    #[test]
    fn test_validate_is_idempotent() {
        let config = ShoeConfig {
            color_id: Some(22),
            lace_color_id: Some(52),
            ..reference_build()
        };
        assert_eq!(validate(Some(&config)), validate(Some(&config)));
    }

    #[test]
    fn test_custom_rule_table() {
        fn always(_: &ShoeConfig) -> bool {
            true
        }
        let rules = [Rule {
            code: ViolationCode::SizeRange,
            severity: Severity::Warning,
            check: RuleCheck::Combination {
                field: ShoeField::SizeId,
                check: always,
                message: "custom",
            },
        }];
        let violations = validate_with(Some(&reference_build()), &rules);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "custom");
        assert!(validate_with(Some(&reference_build()), &[]).is_empty());
    }

    #[test]
    fn test_is_submittable() {
        assert!(is_submittable(&[]));

        let warning = Violation {
            code: ViolationCode::NeonWhiteClash,
            message: "w".to_string(),
            field: None,
            severity: Severity::Warning,
        };
        let error = Violation {
            severity: Severity::Error,
            ..warning.clone()
        };
        assert!(is_submittable(&[warning.clone()]));
        assert!(!is_submittable(&[warning, error]));
    }

    #[test]
    fn test_explain() {
        assert_eq!(explain(&[]), "No issues found.");

        let config = ShoeConfig {
            color_id: Some(22),
            lace_color_id: Some(52),
            ..reference_build()
        };
        assert_eq!(
            explain(&validate(Some(&config))),
            "⚠️ Neon Yellow cushion with White laces may clash. Consider a darker lace color.\n\
             ❌ SoleTech is not available in Red at the moment."
        );
    }

    #[test]
    fn test_violation_wire_format() {
        let config = ShoeConfig {
            lace_color_id: Some(52),
            ..reference_build()
        };
        let json = serde_json::to_value(&validate(Some(&config))[0]).unwrap();
        assert_eq!(json["code"], "NEON_WHITE_CLASH");
        assert_eq!(json["field"], "laceColorId");
        assert_eq!(json["severity"], "warning");

        // Severity defaults to error when omitted.
        let parsed: Violation =
            serde_json::from_str(r#"{"code":"REQUIRED","message":"m"}"#).unwrap();
        assert_eq!(parsed.severity, Severity::Error);
        assert!(parsed.is_error());
    }

    #[test]
    fn test_validate_shoe_name() {
        assert!(validate_shoe_name("Trail Blazer").is_ok());
        assert!(validate_shoe_name("").is_ok());
        assert!(matches!(
            validate_shoe_name("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_shoe_name(&"a".repeat(255)).is_ok());
        assert!(matches!(
            validate_shoe_name(&"a".repeat(256)),
            Err(ValidationError::TooLong { max: 255, .. })
        ));
    }
}
