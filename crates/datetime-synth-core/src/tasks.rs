//! Day-arithmetic tasks layered on the base generator.
//!
//! The input side is a rendered datetime string; the output side is the
//! canonical ISO form of that instant shifted by a fixed number of days.
//! Candidates are drawn from the base generator with microseconds,
//! timezones and component removal all off, and only candidates whose
//! minute and second are actually visible in the text are kept, so the
//! shifted label never encodes information the input hides.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use crate::backends::{CalendarFormatter, NumberSpeller};
use crate::catalog::MonthSchema;
use crate::error::{SynthError, SynthResult};
use crate::generate::{GenerationRequest, Generator, LocaleSchema};
use crate::types::{Field, Label, OutputKind, TrainingExample};

/// Tag emitted for the day-task `model` output.
pub const DAY_TASK_MODEL_TAG: &str = "DATETIME-NATURAL-FORM-TASKS";

/// Candidate examples drawn from the base generator per emitted task
/// example. Month filters can reject the vast majority of candidates.
const CANDIDATE_BUDGET_FACTOR: usize = 1000;

// ============================================================================
// Task kinds and filters
// ============================================================================

/// What a day-arithmetic task asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayTaskKind {
    /// Fixed routing tag.
    Model,
    /// `add.day.N`: the instant N days later, in ISO form.
    AddDays(i64),
    /// `subtract.day.N`: the instant N days earlier, in ISO form.
    SubtractDays(i64),
}

impl DayTaskKind {
    fn offset(&self) -> i64 {
        match self {
            DayTaskKind::Model => 0,
            DayTaskKind::AddDays(n) => *n,
            DayTaskKind::SubtractDays(n) => -n,
        }
    }
}

impl FromStr for DayTaskKind {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "model" {
            return Ok(DayTaskKind::Model);
        }
        let parse_days = |suffix: &str| suffix.parse::<i64>().ok().filter(|n| *n > 0);
        if let Some(n) = s.strip_prefix("add.day.").and_then(parse_days) {
            return Ok(DayTaskKind::AddDays(n));
        }
        if let Some(n) = s.strip_prefix("subtract.day.").and_then(parse_days) {
            return Ok(DayTaskKind::SubtractDays(n));
        }
        Err(SynthError::UnknownDayTask(s.to_string()))
    }
}

impl fmt::Display for DayTaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayTaskKind::Model => f.write_str("model"),
            DayTaskKind::AddDays(n) => write!(f, "add.day.{n}"),
            DayTaskKind::SubtractDays(n) => write!(f, "subtract.day.{n}"),
        }
    }
}

/// Filter on how the shifted instant's month relates to the input's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    /// Keep everything.
    #[default]
    Any,
    /// Keep only candidates where the month is unchanged.
    SameMonth,
    /// Keep only candidates where the month changed but the year did
    /// not. Year rollovers are discarded, so December -> January pairs
    /// never appear here.
    ChangedMonthSameYear,
}

impl MonthFilter {
    fn accepts(&self, input: &NaiveDateTime, output: &NaiveDateTime) -> bool {
        match self {
            MonthFilter::Any => true,
            MonthFilter::SameMonth => input.month() == output.month(),
            MonthFilter::ChangedMonthSameYear => {
                input.month() != output.month() && input.year() == output.year()
            }
        }
    }
}

/// One day-task request.
#[derive(Debug, Clone)]
pub struct DayTaskRequest {
    pub task: DayTaskKind,
    pub count: usize,
    pub start: Option<NaiveDateTime>,
    pub schemas: Option<Vec<String>>,
    pub month_schema: MonthSchema,
    pub locale_schema: LocaleSchema,
    pub month_filter: MonthFilter,
}

impl DayTaskRequest {
    pub fn new(task: DayTaskKind, count: usize) -> Self {
        Self {
            task,
            count,
            start: None,
            schemas: None,
            month_schema: MonthSchema::default(),
            locale_schema: LocaleSchema::default(),
            month_filter: MonthFilter::default(),
        }
    }
}

// ============================================================================
// Generation
// ============================================================================

impl<C: CalendarFormatter, S: NumberSpeller> Generator<C, S> {
    /// Generate day-arithmetic examples.
    pub fn generate_day_tasks(
        &mut self,
        request: &DayTaskRequest,
    ) -> SynthResult<Vec<TrainingExample>> {
        let mut inner = GenerationRequest::new(
            OutputKind::Model,
            request.count.saturating_mul(CANDIDATE_BUDGET_FACTOR),
        );
        inner.start = request.start;
        inner.schemas = request.schemas.clone();
        inner.month_schema = request.month_schema;
        inner.locale_schema = request.locale_schema;
        inner.removal_probability = 0.0;
        inner.microseconds = false;
        inner.timezone = false;
        inner.store_visible_components = true;

        let candidate_budget = inner.count;
        let mut stream = self.stream(&inner)?;
        let mut out = Vec::with_capacity(request.count);

        while out.len() < request.count {
            let Some(candidate) = stream.next_with_instant() else {
                return Err(SynthError::AttemptsExhausted {
                    attempts: candidate_budget as u32,
                    stage: "drawing day-task candidates",
                });
            };
            let (example, value) = candidate?;

            let visible = example
                .aux
                .as_ref()
                .and_then(|aux| aux.visible_components.as_ref())
                .cloned()
                .unwrap_or_default();

            // the shifted label spells out the full time, so the input
            // text must show it
            if !visible.contains_key(&Field::Minute) || !visible.contains_key(&Field::Second) {
                continue;
            }
            for field in [Field::Year, Field::Month, Field::Day, Field::Hour] {
                if !visible.contains_key(&field) {
                    return Err(SynthError::MissingMandatoryField {
                        field,
                        template: example.input.clone(),
                    });
                }
            }

            let input_dt = value.naive_utc();
            let label = match request.task {
                DayTaskKind::Model => Label::Text(DAY_TASK_MODEL_TAG.to_string()),
                _ => {
                    let output_dt = input_dt + Duration::days(request.task.offset());
                    if !request.month_filter.accepts(&input_dt, &output_dt) {
                        continue;
                    }
                    Label::Text(iso_seconds(&output_dt))
                }
            };

            out.push(TrainingExample {
                input: example.input,
                output: label,
                locale: None,
                aux: None,
            });
        }
        Ok(out)
    }
}

fn iso_seconds(dt: &NaiveDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;

    #[test]
    fn task_names_parse_and_round_trip() {
        assert_eq!(
            "add.day.250".parse::<DayTaskKind>().unwrap(),
            DayTaskKind::AddDays(250)
        );
        assert_eq!(
            "subtract.day.2".parse::<DayTaskKind>().unwrap(),
            DayTaskKind::SubtractDays(2)
        );
        assert_eq!("model".parse::<DayTaskKind>().unwrap(), DayTaskKind::Model);
        assert_eq!(DayTaskKind::AddDays(10).to_string(), "add.day.10");

        assert!("multiply.day.2".parse::<DayTaskKind>().is_err());
        assert!("add.day.x".parse::<DayTaskKind>().is_err());
        assert!("add.day.-3".parse::<DayTaskKind>().is_err());
    }

    #[test]
    fn labels_are_full_iso_datetimes() {
        let mut gen = Generator::new(GeneratorConfig::default());
        let request = DayTaskRequest::new(DayTaskKind::AddDays(1), 5);
        let examples = gen.generate_day_tasks(&request).unwrap();
        assert_eq!(examples.len(), 5);
        for example in &examples {
            let Label::Text(iso) = &example.output else {
                panic!("day task labels are text");
            };
            NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S")
                .unwrap_or_else(|_| panic!("bad label {iso}"));
            assert!(example.locale.is_none());
            assert!(example.aux.is_none());
        }
    }

    #[test]
    fn day_tasks_are_deterministic_under_a_seed() {
        let request = DayTaskRequest::new(DayTaskKind::SubtractDays(2), 4);
        let a = Generator::new(GeneratorConfig::default())
            .generate_day_tasks(&request)
            .unwrap();
        let b = Generator::new(GeneratorConfig::default())
            .generate_day_tasks(&request)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn model_task_emits_the_routing_tag() {
        let mut gen = Generator::new(GeneratorConfig::default());
        let request = DayTaskRequest::new(DayTaskKind::Model, 3);
        let examples = gen.generate_day_tasks(&request).unwrap();
        for example in examples {
            assert_eq!(example.output, Label::Text(DAY_TASK_MODEL_TAG.to_string()));
        }
    }

    #[test]
    fn month_filters_shape_the_sample() {
        let mut request = DayTaskRequest::new(DayTaskKind::AddDays(1), 3);
        request.month_filter = MonthFilter::ChangedMonthSameYear;
        let mut gen = Generator::new(GeneratorConfig::default());
        // +1 day with a changed month is always a month boundary; the
        // label month must differ from the input's rendered month, and
        // year rollovers (December 31st) must be gone
        let examples = gen.generate_day_tasks(&request).unwrap();
        assert_eq!(examples.len(), 3);
        for example in &examples {
            let Label::Text(iso) = &example.output else {
                panic!()
            };
            assert_ne!(&iso[5..7], "01", "January labels imply a year rollover");
        }
    }

    #[test]
    fn same_month_filter_accepts_and_rejects_correctly() {
        let jan10 = NaiveDateTime::parse_from_str("2023-01-10T10:00:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        let jan11 = jan10 + Duration::days(1);
        let feb1 = NaiveDateTime::parse_from_str("2023-02-01T10:00:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        let dec31 = NaiveDateTime::parse_from_str("2023-12-31T10:00:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        let jan1 = dec31 + Duration::days(1);

        assert!(MonthFilter::Any.accepts(&jan10, &feb1));
        assert!(MonthFilter::SameMonth.accepts(&jan10, &jan11));
        assert!(!MonthFilter::SameMonth.accepts(&jan10, &feb1));
        assert!(MonthFilter::ChangedMonthSameYear.accepts(&jan10, &feb1));
        assert!(!MonthFilter::ChangedMonthSameYear.accepts(&jan10, &jan11));
        // month changed but the year rolled over: discarded
        assert!(!MonthFilter::ChangedMonthSameYear.accepts(&dec31, &jan1));
    }
}
