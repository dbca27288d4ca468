//! Label extraction: compute the output side of a training example from
//! the same template and instant that produced the input text.
//!
//! Extraction never parses the rendered text. The template is the single
//! source of truth for which fields are visible; the instant is the
//! single source of truth for their values. The one place the rendered
//! text is consulted is the month-string self check, which confirms the
//! label actually occurs in the input it will be paired with.
//!
//! Three outcomes exist per kind: a label (possibly `Null` when the
//! field was deliberately removed or is optional and absent), a discard
//! (`Ok(None)`, the example cannot carry this kind and a fresh one
//! should be composed), or a hard error (the template violates a
//! structural invariant).

use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;

use crate::backends::{CalendarFormatter, NumberSpeller};
use crate::error::{SynthError, SynthResult};
use crate::ldml;
use crate::render::TokenRenderer;
use crate::template;
use crate::types::{AuxInfo, Field, Label, OutputKind};

/// Tag emitted for the `entity` kind (named entity recognition corpora).
pub const ENTITY_TAG: &str = "datetime";
/// Tag emitted for the `model` kind (routing corpora).
pub const MODEL_TAG: &str = "DATETIME";

/// Everything extraction needs about one finished example.
pub struct Extraction<'a> {
    /// Final template, after any component removal.
    pub template: &'a str,
    /// The removed component, braces included, when removal happened.
    pub removed: Option<&'a str>,
    /// The instant the template was rendered against.
    pub value: &'a DateTime<Tz>,
    pub locale: &'a str,
    /// The normalized rendered input text.
    pub input: &'a str,
}

impl<'a> Extraction<'a> {
    /// The catalog token rendering `field`, distinguishing "absent
    /// because removed" from "absent, period".
    ///
    /// Structurally mandatory fields (year, month, day, hour) may only
    /// be absent when they were the removed component; anything else is
    /// a composer bug and fails hard.
    fn field_token(&self, field: Field, mandatory: bool) -> SynthResult<Option<&'static str>> {
        if let Some(token) = template::locate_field(field, self.template)? {
            return Ok(Some(token));
        }
        let was_removed = self
            .removed
            .map_or(false, |r| crate::catalog::tokens_for(field).contains(&r));
        if mandatory && !was_removed {
            return Err(SynthError::MissingMandatoryField {
                field,
                template: self.template.to_string(),
            });
        }
        Ok(None)
    }

    fn field_value(&self, field: Field) -> i64 {
        match field {
            Field::Year => self.value.year() as i64,
            Field::Month => self.value.month() as i64,
            Field::Day => self.value.day() as i64,
            Field::Hour => self.value.hour() as i64,
            Field::Minute => self.value.minute() as i64,
            Field::Second => self.value.second() as i64,
            Field::Microsecond => self.value.timestamp_subsec_micros() as i64,
            _ => 0,
        }
    }

    /// Label a mandatory field: value when visible, `Null` when removed.
    fn mandatory(&self, field: Field, as_int: bool) -> SynthResult<Option<(Label, Option<AuxInfo>)>> {
        let label = match self.field_token(field, true)? {
            Some(_) => int_or_text(self.field_value(field), as_int),
            None => Label::Null,
        };
        Ok(Some((label, None)))
    }

    /// Label an optional field: value when visible, `Null` otherwise.
    fn optional(&self, field: Field, as_int: bool) -> SynthResult<Option<(Label, Option<AuxInfo>)>> {
        let label = match self.field_token(field, false)? {
            Some(_) => int_or_text(self.field_value(field), as_int),
            None => Label::Null,
        };
        Ok(Some((label, None)))
    }

    /// `"1"`/`"0"` presence flag. Class names are strings on purpose so
    /// the trainer treats them as categories, not magnitudes.
    fn presence_flag(&self, field: Field) -> SynthResult<Option<(Label, Option<AuxInfo>)>> {
        let visible = self.field_token(field, false)?.is_some();
        Ok(Some((
            Label::Text(if visible { "1" } else { "0" }.to_string()),
            None,
        )))
    }
}

fn int_or_text(value: i64, as_int: bool) -> Label {
    if as_int {
        Label::Int(value)
    } else {
        Label::Text(value.to_string())
    }
}

fn month_aux(rendered: Option<String>, value: Option<i64>) -> Option<AuxInfo> {
    Some(AuxInfo {
        component: Some("month".to_string()),
        rendered,
        value,
        visible_components: None,
    })
}

/// Compute the label for `kind`. `Ok(None)` means the example cannot
/// carry this kind (e.g. a century from a 2-digit year) and should be
/// discarded and recomposed.
pub fn extract<C, S>(
    kind: OutputKind,
    ctx: &Extraction<'_>,
    renderer: &TokenRenderer<C, S>,
) -> SynthResult<Option<(Label, Option<AuxInfo>)>>
where
    C: CalendarFormatter,
    S: NumberSpeller,
{
    match kind {
        OutputKind::Entity => Ok(Some((Label::Text(ENTITY_TAG.to_string()), None))),
        OutputKind::Model => Ok(Some((Label::Text(MODEL_TAG.to_string()), None))),
        OutputKind::Locale => Ok(Some((Label::Text(ctx.locale.to_string()), None))),
        OutputKind::Identity => Ok(Some((Label::Text(ctx.input.to_string()), None))),

        OutputKind::FormatSpec => Ok(Some((Label::Text(ctx.template.to_string()), None))),
        OutputKind::Format => Ok(Some((
            Label::Text(ldml::canonicalize_template(ctx.template)),
            None,
        ))),

        OutputKind::Iso8601 => {
            // invisible time fields are zeroed so the label matches only
            // what the text actually shows; microseconds and timezone are
            // always excluded
            let hour = ctx.field_token(Field::Hour, true)?.map(|_| ctx.value.hour());
            let minute = ctx
                .field_token(Field::Minute, false)?
                .map(|_| ctx.value.minute());
            let second = ctx
                .field_token(Field::Second, false)?
                .map(|_| ctx.value.second());
            let iso = format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                ctx.value.year(),
                ctx.value.month(),
                ctx.value.day(),
                hour.unwrap_or(0),
                minute.unwrap_or(0),
                second.unwrap_or(0),
            );
            Ok(Some((Label::Text(iso), None)))
        }

        OutputKind::Year => ctx.mandatory(Field::Year, false),
        OutputKind::YearInt => ctx.mandatory(Field::Year, true),

        OutputKind::Century => {
            let Some(token) = ctx.field_token(Field::Year, true)? else {
                return Ok(Some((Label::Null, None)));
            };
            // centuries only exist in 4-digit renderings
            if token != "{yyyy}" {
                return Ok(None);
            }
            let year = ctx.value.year();
            if !(1000..=9999).contains(&year) {
                return Ok(None);
            }
            Ok(Some((
                Label::Text(format!("{}00", year / 100)),
                None,
            )))
        }

        OutputKind::Decade => {
            if ctx.field_token(Field::Year, true)?.is_none() {
                return Ok(Some((Label::Null, None)));
            }
            let year = ctx.value.year();
            if !(1000..=9999).contains(&year) {
                return Ok(None);
            }
            Ok(Some((Label::Text(format!("{:02}", year % 100)), None)))
        }

        OutputKind::Month => {
            let label = match ctx.field_token(Field::Month, true)? {
                Some(_) => Label::Text(ctx.value.month().to_string()),
                None => Label::Null,
            };
            Ok(Some((label, month_aux(None, None))))
        }
        OutputKind::MonthInt => {
            let label = match ctx.field_token(Field::Month, true)? {
                Some(_) => Label::Int(ctx.value.month() as i64),
                None => Label::Null,
            };
            Ok(Some((label, month_aux(None, None))))
        }

        OutputKind::MonthStr => {
            let Some(token) = ctx.field_token(Field::Month, true)? else {
                return Ok(Some((Label::Null, month_aux(None, None))));
            };
            // render the month token exactly the way the input was rendered
            let Ok(rendered) = renderer.apply(token, ctx.value, ctx.locale, None) else {
                return Ok(None);
            };
            if !ctx.input.contains(&rendered) {
                return Err(SynthError::LabelInconsistency {
                    component: rendered,
                    input: ctx.input.to_string(),
                });
            }
            let aux = month_aux(Some(rendered.clone()), Some(ctx.value.month() as i64));
            Ok(Some((Label::Text(rendered), aux)))
        }

        OutputKind::Day => ctx.mandatory(Field::Day, false),
        OutputKind::DayInt => ctx.mandatory(Field::Day, true),
        OutputKind::Hour => ctx.mandatory(Field::Hour, false),
        OutputKind::HourInt => ctx.mandatory(Field::Hour, true),

        OutputKind::Minute => ctx.optional(Field::Minute, false),
        OutputKind::MinuteInt => ctx.optional(Field::Minute, true),
        OutputKind::Second => ctx.optional(Field::Second, false),
        OutputKind::SecondInt => ctx.optional(Field::Second, true),

        OutputKind::Microsecond => ctx.optional(Field::Microsecond, false),
        OutputKind::HasMicrosecond => ctx.presence_flag(Field::Microsecond),

        OutputKind::Timezone => {
            let label = match ctx.field_token(Field::Timezone, false)? {
                Some(_) => Label::Text(ctx.value.timezone().name().to_string()),
                None => Label::Null,
            };
            Ok(Some((label, None)))
        }
        OutputKind::HasTimezone => ctx.presence_flag(Field::Timezone),
        OutputKind::HasMinute => ctx.presence_flag(Field::Minute),
        OutputKind::HasSecond => ctx.presence_flag(Field::Second),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{ChronoCalendar, WordSpeller};
    use chrono::TimeZone;

    fn renderer() -> TokenRenderer<ChronoCalendar, WordSpeller> {
        TokenRenderer::new(ChronoCalendar::new(), WordSpeller)
    }

    fn instant() -> DateTime<Tz> {
        chrono_tz::America::Chicago
            .with_ymd_and_hms(2023, 7, 4, 15, 5, 9)
            .unwrap()
    }

    fn ctx<'a>(template: &'a str, removed: Option<&'a str>, value: &'a DateTime<Tz>) -> Extraction<'a> {
        Extraction {
            template,
            removed,
            value,
            locale: "en_US",
            input: "",
        }
    }

    #[test]
    fn iso8601_zeroes_invisible_time_fields() {
        let r = renderer();
        let dt = instant();
        let c = ctx("{H} {a},{dd}.{MM}.{yyyy}", None, &dt);
        let (label, _) = extract(OutputKind::Iso8601, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Text("2023-07-04T15:00:00".to_string()));

        let c = ctx("{H}:{mm}:{ss},{dd}.{MM}.{yyyy}", None, &dt);
        let (label, _) = extract(OutputKind::Iso8601, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Text("2023-07-04T15:05:09".to_string()));
    }

    #[test]
    fn iso8601_excludes_microseconds_and_timezone() {
        let r = renderer();
        let dt = instant() + chrono::Duration::microseconds(123456);
        let c = ctx("{H}:{mm}:{ss}.{SSSSSS} {zz},{dd}.{MM}.{yyyy}", None, &dt);
        let (label, _) = extract(OutputKind::Iso8601, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Text("2023-07-04T15:05:09".to_string()));
    }

    #[test]
    fn century_requires_a_four_digit_year() {
        let r = renderer();
        let dt = instant();
        let c = ctx("{H},{dd}.{MM}.{yyyy}", None, &dt);
        let (label, _) = extract(OutputKind::Century, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Text("2000".to_string()));

        // 2-digit year: the example is discarded, not mislabeled
        let c = ctx("{H},{dd}.{MM}.{yy}", None, &dt);
        assert!(extract(OutputKind::Century, &c, &r).unwrap().is_none());
    }

    #[test]
    fn decade_is_the_last_two_digits() {
        let r = renderer();
        let dt = instant();
        let c = ctx("{H},{dd}.{MM}.{yy}", None, &dt);
        let (label, _) = extract(OutputKind::Decade, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Text("23".to_string()));
    }

    #[test]
    fn removed_mandatory_field_labels_null() {
        let r = renderer();
        let dt = instant();
        let c = ctx("{H},{dd}.{MM}.", Some("{yyyy}"), &dt);
        let (label, _) = extract(OutputKind::Year, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Null);
        let (label, _) = extract(OutputKind::Century, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Null);
    }

    #[test]
    fn missing_mandatory_field_without_removal_is_fatal() {
        let r = renderer();
        let dt = instant();
        let c = ctx("{H},{dd}.{MM}", None, &dt);
        let err = extract(OutputKind::Year, &c, &r).unwrap_err();
        assert!(matches!(err, SynthError::MissingMandatoryField { .. }));
    }

    #[test]
    fn optional_fields_label_null_when_absent() {
        let r = renderer();
        let dt = instant();
        let c = ctx("{H},{dd}.{MM}.{yyyy}", None, &dt);
        let (label, _) = extract(OutputKind::Minute, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Null);
        let (label, _) = extract(OutputKind::Timezone, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Null);
    }

    #[test]
    fn presence_flags_are_string_classes() {
        let r = renderer();
        let dt = instant();
        let c = ctx("{H}:{mm},{dd}.{MM}.{yyyy}", None, &dt);
        let (label, _) = extract(OutputKind::HasMinute, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Text("1".to_string()));
        let (label, _) = extract(OutputKind::HasSecond, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Text("0".to_string()));
    }

    #[test]
    fn month_str_matches_the_rendered_input() {
        let r = renderer();
        let dt = instant();
        let template = "{H}:{mm},{dd}.{MMM}.{yyyy}";
        let input = r.apply(template, &dt, "en_US", None).unwrap();
        let c = Extraction {
            template,
            removed: None,
            value: &dt,
            locale: "en_US",
            input: &input,
        };
        let (label, aux) = extract(OutputKind::MonthStr, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Text("jul".to_string()));
        let aux = aux.unwrap();
        assert_eq!(aux.rendered.as_deref(), Some("jul"));
        assert_eq!(aux.value, Some(7));
    }

    #[test]
    fn month_str_inconsistency_is_fatal() {
        let r = renderer();
        let dt = instant();
        let c = Extraction {
            template: "{H}:{mm},{dd}.{MMM}.{yyyy}",
            removed: None,
            value: &dt,
            locale: "en_US",
            input: "15:05,04.xyz.2023",
        };
        let err = extract(OutputKind::MonthStr, &c, &r).unwrap_err();
        assert!(matches!(err, SynthError::LabelInconsistency { .. }));
    }

    #[test]
    fn format_canonicalizes_and_format_spec_does_not() {
        let r = renderer();
        let dt = instant();
        let c = ctx("{dd}-{MMM}-{yyyy} {H}", None, &dt);
        let (label, _) = extract(OutputKind::Format, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Text("{day}-{month}-{year} {hour}".to_string()));
        let (label, _) = extract(OutputKind::FormatSpec, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Text("{dd}-{MMM}-{yyyy} {H}".to_string()));
    }

    #[test]
    fn timezone_label_is_the_full_identifier() {
        let r = renderer();
        let dt = instant();
        let c = ctx("{H}:{mm} {zz},{dd}.{MM}.{yyyy}", None, &dt);
        let (label, _) = extract(OutputKind::Timezone, &c, &r).unwrap().unwrap();
        assert_eq!(label, Label::Text("America/Chicago".to_string()));
    }
}
