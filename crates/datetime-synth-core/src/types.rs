//! Core domain types: fields, labels, output kinds and training examples.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// One semantic unit of a date/time.
///
/// Every pattern token belongs to exactly one field; the composers
/// guarantee at most one token per field in a finished template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Microsecond,
    Timezone,
    Weekday,
    /// AM/PM marker; named after the CLDR `a` token.
    Period,
    Week,
    Quarter,
}

impl Field {
    /// Canonical lowercase name, as used inside generic placeholders
    /// such as `{day}` and in serialized visible-component maps.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::Second => "second",
            Field::Microsecond => "microsecond",
            Field::Timezone => "timezone",
            Field::Weekday => "weekday",
            Field::Period => "period",
            Field::Week => "week",
            Field::Quarter => "quarter",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The machine-usable side of a training example.
///
/// `Null` is emitted when the labeled field was deliberately removed
/// from the rendered string (or was never part of the chosen format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Int(i64),
    Text(String),
    Null,
}

impl Label {
    /// Render the label for line-oriented output. `null_target` stands in
    /// for `Null` (the trainer needs a concrete class name to predict).
    pub fn render(&self, null_target: &str) -> String {
        match self {
            Label::Int(v) => v.to_string(),
            Label::Text(s) => s.clone(),
            Label::Null => null_target.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Label::Null)
    }
}

/// What the output side of each training example should contain.
///
/// This is the closed set of label projections the extractor implements;
/// an unknown string is a configuration error, not a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Fixed NER tag ("datetime").
    Entity,
    /// Fixed model tag ("DATETIME").
    Model,
    /// The sampled locale identifier.
    Locale,
    /// The rendered input text itself.
    Identity,
    /// The template with tokens rewritten to canonical field names.
    Format,
    /// The concrete template string.
    FormatSpec,
    /// Canonical `YYYY-MM-DDTHH:MM:SS` projection with invisible
    /// time fields zeroed; microseconds and timezone always excluded.
    Iso8601,
    Year,
    YearInt,
    Century,
    Decade,
    Month,
    MonthInt,
    /// The month exactly as rendered in the input string.
    MonthStr,
    Day,
    DayInt,
    Hour,
    HourInt,
    Minute,
    MinuteInt,
    Second,
    SecondInt,
    Microsecond,
    HasMicrosecond,
    Timezone,
    HasTimezone,
    HasMinute,
    HasSecond,
}

impl OutputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Entity => "entity",
            OutputKind::Model => "model",
            OutputKind::Locale => "locale",
            OutputKind::Identity => "identity",
            OutputKind::Format => "format",
            OutputKind::FormatSpec => "format_spec",
            OutputKind::Iso8601 => "iso8601",
            OutputKind::Year => "year",
            OutputKind::YearInt => "year_int",
            OutputKind::Century => "century",
            OutputKind::Decade => "decade",
            OutputKind::Month => "month",
            OutputKind::MonthInt => "month_int",
            OutputKind::MonthStr => "month_str",
            OutputKind::Day => "day",
            OutputKind::DayInt => "day_int",
            OutputKind::Hour => "hour",
            OutputKind::HourInt => "hour_int",
            OutputKind::Minute => "minute",
            OutputKind::MinuteInt => "minute_int",
            OutputKind::Second => "second",
            OutputKind::SecondInt => "second_int",
            OutputKind::Microsecond => "microsecond",
            OutputKind::HasMicrosecond => "has_microsecond",
            OutputKind::Timezone => "timezone",
            OutputKind::HasTimezone => "has_timezone",
            OutputKind::HasMinute => "has_minute",
            OutputKind::HasSecond => "has_second",
        }
    }

    /// All kinds, in a stable order. Used by help output and tests.
    pub fn all() -> &'static [OutputKind] {
        use OutputKind::*;
        &[
            Entity, Model, Locale, Identity, Format, FormatSpec, Iso8601, Year, YearInt, Century,
            Decade, Month, MonthInt, MonthStr, Day, DayInt, Hour, HourInt, Minute, MinuteInt,
            Second, SecondInt, Microsecond, HasMicrosecond, Timezone, HasTimezone, HasMinute,
            HasSecond,
        ]
    }
}

impl FromStr for OutputKind {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputKind::all()
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| SynthError::UnknownOutputKind(s.to_string()))
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Auxiliary metadata attached to a training example.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuxInfo {
    /// Name of the field the label describes, when the kind is field-valued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    /// The exact substring the renderer produced for that field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,

    /// The field's integer value on the underlying temporal value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,

    /// Field -> concrete token actually present in the final template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_components: Option<BTreeMap<Field, String>>,
}

impl AuxInfo {
    pub fn is_empty(&self) -> bool {
        self.component.is_none()
            && self.rendered.is_none()
            && self.value.is_none()
            && self.visible_components.is_none()
    }
}

/// One labeled training example: the rendered input text, the output
/// label, the locale the text was rendered in, and optional metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub input: String,
    pub output: Label,
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aux: Option<AuxInfo>,
}

impl TrainingExample {
    pub fn new(input: impl Into<String>, output: Label, locale: Option<String>) -> Self {
        Self {
            input: input.into(),
            output,
            locale,
            aux: None,
        }
    }
}
