//! Field-token catalogs: per field, the set of acceptable pattern
//! tokens, plus the named schemas and template skeletons the composers
//! draw from.
//!
//! This module is pure data. The only failure mode is an unknown schema
//! name, which is a caller error.

use std::fmt;
use std::str::FromStr;

use crate::error::SynthError;
use crate::types::Field;

// ============================================================================
// Field tokens
// ============================================================================

/// Day tokens, numeric and spelled-out.
/// `{C(day)}` one, `{O(day)}` first, `{ON(day)}` 1st.
pub const DAY_TOKENS: &[&str] = &["{d}", "{dd}", "{C(day)}", "{O(day)}", "{ON(day)}"];

/// Month tokens across every schema. `{X(month)}` is a Roman numeral.
pub const MONTH_TOKENS_ALL: &[&str] = &["{M}", "{MM}", "{MMM}", "{MMMM}", "{X(month)}"];
/// Arabic numerals and text only.
pub const MONTH_TOKENS_ARABIC: &[&str] = &["{M}", "{MM}", "{MMM}", "{MMMM}"];
/// Text-only months: never confusable with a day number.
pub const MONTH_TOKENS_UNAMBIGUOUS: &[&str] = &["{MMM}", "{MMMM}"];
/// Roman numerals only.
pub const MONTH_TOKENS_ROMAN: &[&str] = &["{X(month)}"];

pub const YEAR_TOKENS: &[&str] = &["{yy}", "{yyyy}"];

pub const HOUR_TOKENS: &[&str] = &["{h}", "{H}"];
pub const MINUTE_TOKENS: &[&str] = &["{m}", "{mm}"];
pub const SECOND_TOKENS: &[&str] = &["{s}", "{ss}"];

/// Fractional-second tokens, one to six digits.
pub const MICROSECOND_TOKENS: &[&str] = &[
    "{S}", "{SS}", "{SSS}", "{SSSS}", "{SSSSS}", "{SSSSSS}",
];

/// Timezone tokens: CLDR forms plus the two custom forms `{T}` (full
/// identifier, e.g. America/Anguilla) and `{TT}` (short code, e.g. AST).
pub const TIMEZONE_TOKENS: &[&str] = &[
    "{z}", "{zz}", "{zzz}", "{zzzz}",
    "{Z}", "{ZZ}", "{ZZZ}", "{ZZZZ}", "{ZZZZZ}",
    "{OOOO}",
    "{v}", "{vvvv}",
    "{V}", "{VV}", "{VVV}", "{VVVV}",
    "{X}", "{XX}", "{XXX}", "{XXXX}", "{XXXXX}",
    "{x}", "{xx}", "{xxx}", "{xxxx}", "{xxxxx}",
    "{T}", "{TT}",
];

pub const PERIOD_TOKENS: &[&str] = &["{a}"];

pub const WEEKDAY_TOKENS: &[&str] = &["{E}", "{EE}", "{EEE}", "{EEEE}"];

/// All catalog tokens for one field. This is the superset across
/// schemas; a concrete template can only ever contain tokens from here.
pub fn tokens_for(field: Field) -> &'static [&'static str] {
    match field {
        Field::Day => DAY_TOKENS,
        Field::Month => MONTH_TOKENS_ALL,
        Field::Year => YEAR_TOKENS,
        Field::Hour => HOUR_TOKENS,
        Field::Minute => MINUTE_TOKENS,
        Field::Second => SECOND_TOKENS,
        Field::Microsecond => MICROSECOND_TOKENS,
        Field::Timezone => TIMEZONE_TOKENS,
        Field::Period => PERIOD_TOKENS,
        Field::Weekday => WEEKDAY_TOKENS,
        Field::Week | Field::Quarter => &[],
    }
}

/// Fields tracked in visible-component maps, in scan order.
pub const TRACKED_FIELDS: &[Field] = &[
    Field::Year,
    Field::Month,
    Field::Day,
    Field::Hour,
    Field::Minute,
    Field::Second,
    Field::Microsecond,
    Field::Timezone,
    Field::Weekday,
    Field::Period,
];

// ============================================================================
// Separators and delimiters
// ============================================================================

/// Date field separators. "No separator" was tried and dropped: strings
/// like `111212` are too hard for the downstream models.
pub const DATE_SEPARATORS: &[&str] = &[" ", ".", "/", "-", "#", "|"];

/// Time field separators.
pub const TIME_SEPARATORS: &[&str] = &[":"];

/// Delimiters between the date and time parts of a combined template.
/// Short, position-shifting variants keep the model from memorizing
/// absolute character offsets.
pub const DATETIME_DELIMITERS: &[&str] = &[" ", ",", ", ", " ,"];

/// The character `{whitespace}` resolves to. Kept distinct from field
/// separators so tokenizing the output on whitespace stays viable.
pub const WHITESPACE_CHARACTER: &str = " ";

// ============================================================================
// Month schemas
// ============================================================================

/// Named groupings of month tokens, controlling how months may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthSchema {
    /// Arabic and Roman numerals plus text.
    #[default]
    All,
    /// Arabic numerals and text (1, 2, 3, ...).
    Arabic,
    /// Text-only months (jan, january).
    Unambiguous,
    /// Roman numerals (i, ii, iii, ...).
    Roman,
}

impl MonthSchema {
    pub fn tokens(&self) -> &'static [&'static str] {
        match self {
            MonthSchema::All => MONTH_TOKENS_ALL,
            MonthSchema::Arabic => MONTH_TOKENS_ARABIC,
            MonthSchema::Unambiguous => MONTH_TOKENS_UNAMBIGUOUS,
            MonthSchema::Roman => MONTH_TOKENS_ROMAN,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MonthSchema::All => "all",
            MonthSchema::Arabic => "arabic",
            MonthSchema::Unambiguous => "unambiguous",
            MonthSchema::Roman => "roman",
        }
    }
}

impl FromStr for MonthSchema {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(MonthSchema::All),
            "arabic" => Ok(MonthSchema::Arabic),
            "unambiguous" => Ok(MonthSchema::Unambiguous),
            "roman" => Ok(MonthSchema::Roman),
            other => Err(SynthError::UnknownMonthSchema(other.to_string())),
        }
    }
}

impl fmt::Display for MonthSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Date format schemas
// ============================================================================

/// Skeletons for day-before-month order, 2-digit year.
const DAY_MONTH_YY: &[&str] = &[
    "{day}{separator}{month}{separator}{yy}",
    "{yy}{separator}{day}{separator}{month}",
];

const DAY_MONTH_WEEKDAY_YY: &[&str] = &[
    "{E}{whitespace}{day}{separator}{month}{separator}{yy}",
    "{EE}{whitespace}{day}{separator}{month}{separator}{yy}",
    "{EEE}{whitespace}{day}{separator}{month}{separator}{yy}",
    "{EEEE}{whitespace}{day}{separator}{month}{separator}{yy}",
];

const MONTH_DAY_YY: &[&str] = &[
    "{month}{separator}{day}{separator}{yy}",
    "{yy}{separator}{month}{separator}{day}",
];

const MONTH_DAY_WEEKDAY_YY: &[&str] = &[
    "{E}{whitespace}{month}{separator}{day}{separator}{yy}",
    "{EE}{whitespace}{month}{separator}{day}{separator}{yy}",
    "{EEE}{whitespace}{month}{separator}{day}{separator}{yy}",
    "{EEEE}{whitespace}{month}{separator}{day}{separator}{yy}",
    "{month}{separator}{E}{whitespace}{day}{separator}{yy}",
    "{month}{separator}{EE}{whitespace}{day}{separator}{yy}",
    "{month}{separator}{EEE}{whitespace}{day}{separator}{yy}",
    "{month}{separator}{EEEE}{whitespace}{day}{separator}{yy}",
];

const DAY_MONTH_YYYY: &[&str] = &[
    "{day}{separator}{month}{separator}{yyyy}",
    "{yyyy}{separator}{day}{separator}{month}",
];

const DAY_MONTH_WEEKDAY_YYYY: &[&str] = &[
    "{E}{whitespace}{day}{separator}{month}{separator}{yyyy}",
    "{EE}{whitespace}{day}{separator}{month}{separator}{yyyy}",
    "{EEE}{whitespace}{day}{separator}{month}{separator}{yyyy}",
    "{EEEE}{whitespace}{day}{separator}{month}{separator}{yyyy}",
];

const MONTH_DAY_YYYY: &[&str] = &[
    "{month}{separator}{day}{separator}{yyyy}",
    "{yyyy}{separator}{month}{separator}{day}",
];

const MONTH_DAY_WEEKDAY_YYYY: &[&str] = &[
    "{E}{whitespace}{month}{separator}{day}{separator}{yyyy}",
    "{EE}{whitespace}{month}{separator}{day}{separator}{yyyy}",
    "{EEE}{whitespace}{month}{separator}{day}{separator}{yyyy}",
    "{EEEE}{whitespace}{month}{separator}{day}{separator}{yyyy}",
    "{month}{separator}{E}{whitespace}{day}{separator}{yyyy}",
    "{month}{separator}{EE}{whitespace}{day}{separator}{yyyy}",
    "{month}{separator}{EEE}{whitespace}{day}{separator}{yyyy}",
    "{month}{separator}{EEEE}{whitespace}{day}{separator}{yyyy}",
];

/// All date schema names, in catalog order.
pub const DATE_SCHEMAS: &[&str] = &[
    "day-month-yy",
    "day-month-weekday-yy",
    "month-day-yy",
    "month-day-weekday-yy",
    "day-month-yyyy",
    "day-month-weekday-yyyy",
    "month-day-yyyy",
    "month-day-weekday-yyyy",
];

/// Skeleton templates for a named date schema.
pub fn date_skeletons(schema: &str) -> Option<&'static [&'static str]> {
    match schema {
        "day-month-yy" => Some(DAY_MONTH_YY),
        "day-month-weekday-yy" => Some(DAY_MONTH_WEEKDAY_YY),
        "month-day-yy" => Some(MONTH_DAY_YY),
        "month-day-weekday-yy" => Some(MONTH_DAY_WEEKDAY_YY),
        "day-month-yyyy" => Some(DAY_MONTH_YYYY),
        "day-month-weekday-yyyy" => Some(DAY_MONTH_WEEKDAY_YYYY),
        "month-day-yyyy" => Some(MONTH_DAY_YYYY),
        "month-day-weekday-yyyy" => Some(MONTH_DAY_WEEKDAY_YYYY),
        _ => None,
    }
}

// ============================================================================
// Time format families
// ============================================================================

// Each family below crosses hour style (12h with period / 24h bare /
// 24h with period), optional minute/second suffixes, and fractional
// second + timezone tails. Repeated "short" entries are deliberate:
// they weight the draw towards common shapes.

/// 2-digit minute, 2-digit second.
const TIME_2M_2S: &[&str] = &[
    "{h}{whitespace}{a}",
    "{h}{separator}{mm}{whitespace}{a}",
    "{h}{separator}{mm}{separator}{ss}{whitespace}{a}",
    "{h}{separator}{mm}{separator}{ss}{whitespace}{a}{whitespace}{timezone}",
    "{h}{whitespace}{a}",
    "{h}{whitespace}{a}{whitespace}{mm}",
    "{h}{whitespace}{a}{whitespace}{mm}{separator}{ss}",
    "{h}{whitespace}{a}{whitespace}{mm}{separator}{ss}{whitespace}{timezone}",
    "{H}",
    "{H}{separator}{mm}",
    "{H}{separator}{mm}{separator}{ss}",
    "{H}{separator}{mm}{separator}{ss}{whitespace}{timezone}",
    "{H}{whitespace}{a}",
    "{H}{separator}{mm}{whitespace}{a}",
    "{H}{separator}{mm}{separator}{ss}{whitespace}{a}",
    "{H}{separator}{mm}{separator}{ss}{whitespace}{a}{whitespace}{timezone}",
    "{h}{separator}{mm}{separator}{ss}.{microsecond}{whitespace}{a}",
    "{h}{separator}{mm}{separator}{ss}.{microsecond}{whitespace}{a}{whitespace}{timezone}",
    "{H}{separator}{mm}{separator}{ss}.{microsecond}",
    "{H}{separator}{mm}{separator}{ss}.{microsecond}{whitespace}{timezone}",
];

/// 1-digit minute, 2-digit second.
const TIME_1M_2S: &[&str] = &[
    "{h}{whitespace}{a}",
    "{h}{separator}{m}{whitespace}{a}",
    "{h}{separator}{m}{separator}{ss}{whitespace}{a}",
    "{h}{separator}{m}{separator}{ss}{whitespace}{a}{whitespace}{timezone}",
    "{h}{whitespace}{a}",
    "{h}{whitespace}{a}{whitespace}{m}",
    "{h}{whitespace}{a}{whitespace}{m}{separator}{ss}",
    "{h}{whitespace}{a}{whitespace}{m}{separator}{ss}{whitespace}{timezone}",
    "{H}",
    "{H}{separator}{m}",
    "{H}{separator}{m}{separator}{ss}",
    "{H}{separator}{m}{separator}{ss}{whitespace}{timezone}",
    "{H}{whitespace}{a}",
    "{H}{separator}{m}{whitespace}{a}",
    "{H}{separator}{m}{separator}{ss}{whitespace}{a}",
    "{H}{separator}{m}{separator}{ss}{whitespace}{a}{whitespace}{timezone}",
    "{h}{separator}{m}{separator}{ss}.{microsecond}{whitespace}{a}",
    "{h}{separator}{m}{separator}{ss}.{microsecond}{whitespace}{a}{whitespace}{timezone}",
    "{H}{separator}{m}{separator}{ss}.{microsecond}",
    "{H}{separator}{m}{separator}{ss}.{microsecond}{whitespace}{timezone}",
];

/// 2-digit minute, 1-digit second.
const TIME_2M_1S: &[&str] = &[
    "{h}{whitespace}{a}",
    "{h}{separator}{mm}{whitespace}{a}",
    "{h}{separator}{mm}{separator}{s}{whitespace}{a}",
    "{h}{separator}{mm}{separator}{s}{whitespace}{a}{whitespace}{timezone}",
    "{h}{whitespace}{a}",
    "{h}{whitespace}{a}{whitespace}{mm}",
    "{h}{whitespace}{a}{whitespace}{mm}{separator}{s}",
    "{h}{whitespace}{a}{whitespace}{mm}{separator}{s}{whitespace}{timezone}",
    "{H}",
    "{H}{separator}{mm}",
    "{H}{separator}{mm}{separator}{s}",
    "{H}{separator}{mm}{separator}{s}{whitespace}{timezone}",
    "{H}{whitespace}{a}",
    "{H}{separator}{mm}{whitespace}{a}",
    "{H}{separator}{mm}{separator}{s}{whitespace}{a}",
    "{H}{separator}{mm}{separator}{s}{whitespace}{a}{whitespace}{timezone}",
    "{h}{separator}{mm}{separator}{s}.{microsecond}{whitespace}{a}",
    "{h}{separator}{mm}{separator}{s}.{microsecond}{whitespace}{a}{whitespace}{timezone}",
    "{H}{separator}{mm}{separator}{s}.{microsecond}",
    "{H}{separator}{mm}{separator}{s}.{microsecond}{whitespace}{timezone}",
];

/// 1-digit minute, 1-digit second.
const TIME_1M_1S: &[&str] = &[
    "{h}{whitespace}{a}",
    "{h}{separator}{m}{whitespace}{a}",
    "{h}{separator}{m}{separator}{s}{whitespace}{a}",
    "{h}{separator}{m}{separator}{s}{whitespace}{a}{whitespace}{timezone}",
    "{h}{whitespace}{a}",
    "{h}{whitespace}{a}{whitespace}{m}",
    "{h}{whitespace}{a}{whitespace}{m}{separator}{s}",
    "{h}{whitespace}{a}{whitespace}{m}{separator}{s}{whitespace}{timezone}",
    "{H}",
    "{H}{separator}{m}",
    "{H}{separator}{m}{separator}{s}",
    "{H}{separator}{m}{separator}{s}{whitespace}{timezone}",
    "{H}{whitespace}{a}",
    "{H}{separator}{m}{whitespace}{a}",
    "{H}{separator}{m}{separator}{s}{whitespace}{a}",
    "{H}{separator}{m}{separator}{s}{whitespace}{a}{whitespace}{timezone}",
    "{h}{separator}{m}{separator}{s}.{microsecond}{whitespace}{a}",
    "{h}{separator}{m}{separator}{s}.{microsecond}{whitespace}{a}{whitespace}{timezone}",
    "{H}{separator}{m}{separator}{s}.{microsecond}",
    "{H}{separator}{m}{separator}{s}.{microsecond}{whitespace}{timezone}",
];

/// The four minute/second digit-width families.
pub const TIME_FAMILIES: &[&[&str]] = &[TIME_2M_2S, TIME_1M_2S, TIME_2M_1S, TIME_1M_1S];

/// Orderings for combining a date part with a time part.
pub const DATETIME_SKELETONS: &[&str] = &[
    "{date}{datetime_delimiter}{time}",
    "{time}{datetime_delimiter}{date}",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_name_resolves() {
        for schema in DATE_SCHEMAS {
            assert!(date_skeletons(schema).is_some(), "missing {schema}");
        }
        assert!(date_skeletons("hour-month").is_none());
    }

    #[test]
    fn month_schemas_are_subsets_of_all() {
        for schema in [
            MonthSchema::Arabic,
            MonthSchema::Unambiguous,
            MonthSchema::Roman,
        ] {
            for token in schema.tokens() {
                assert!(MONTH_TOKENS_ALL.contains(token));
            }
        }
    }

    #[test]
    fn month_schema_parses_and_rejects() {
        assert_eq!("roman".parse::<MonthSchema>().unwrap(), MonthSchema::Roman);
        assert!("gregorian".parse::<MonthSchema>().is_err());
    }

    #[test]
    fn time_families_resolve_every_placeholder_kind() {
        for family in TIME_FAMILIES {
            assert_eq!(family.len(), 20);
            for skeleton in *family {
                assert!(skeleton.contains("{h}") || skeleton.contains("{H}"));
            }
        }
    }

    #[test]
    fn tokens_are_unique_within_each_field() {
        for field in TRACKED_FIELDS {
            let tokens = tokens_for(*field);
            for (i, a) in tokens.iter().enumerate() {
                for b in &tokens[i + 1..] {
                    assert_ne!(a, b, "duplicate token in {field}");
                }
            }
        }
    }

    #[test]
    fn no_token_is_a_substring_of_a_sibling() {
        // containment-based field location relies on this
        for field in TRACKED_FIELDS {
            let tokens = tokens_for(*field);
            for a in tokens {
                for b in tokens {
                    if a != b {
                        assert!(!b.contains(a), "{a} is contained in {b}");
                    }
                }
            }
        }
    }
}
