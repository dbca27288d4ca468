//! The example generator: composes templates, renders and verifies them,
//! optionally deletes a component, extracts the label, and emits
//! [`TrainingExample`]s.
//!
//! Per example the flow is COMPOSE -> RENDER_AND_VERIFY -> MAYBE_DELETE
//! -> RENDER_FINAL -> NORMALIZE -> EXTRACT -> EMIT. Any recoverable
//! failure before EMIT discards the attempt and recomposes from scratch;
//! only structural invariant violations and attempt exhaustion surface
//! to the caller.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDateTime};
use chrono_tz::Tz;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::backends::{CalendarFormatter, ChronoCalendar, NumberSpeller, WordSpeller};
use crate::catalog::{self, MonthSchema};
use crate::compose::DatetimeComposer;
use crate::config::{GeneratorConfig, DEFAULT_REMOVAL_PROBABILITY};
use crate::error::{SynthError, SynthResult};
use crate::extract::{self, Extraction};
use crate::render::TokenRenderer;
use crate::sample;
use crate::template;
use crate::types::{AuxInfo, Field, OutputKind, TrainingExample};

// ============================================================================
// Locale schemas
// ============================================================================

/// Named locale sets a request can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocaleSchema {
    /// English (US) only.
    EnUs,
    /// The ten hand-curated common locales.
    #[default]
    Mini10,
    /// Every locale the calendar backend supports.
    All,
}

impl LocaleSchema {
    pub fn name(&self) -> &'static str {
        match self {
            LocaleSchema::EnUs => "en_US",
            LocaleSchema::Mini10 => "mini.10",
            LocaleSchema::All => "all",
        }
    }
}

impl FromStr for LocaleSchema {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en_US" => Ok(LocaleSchema::EnUs),
            "mini.10" => Ok(LocaleSchema::Mini10),
            "all" => Ok(LocaleSchema::All),
            other => Err(SynthError::UnknownLocaleSchema(other.to_string())),
        }
    }
}

impl fmt::Display for LocaleSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Requests
// ============================================================================

/// One generation request: what to label and how many examples to emit.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub output: OutputKind,
    pub count: usize,
    /// Sampling range start; the epoch when `None`.
    pub start: Option<NaiveDateTime>,
    /// Sampling range end; 9999-12-31 when `None`.
    pub end: Option<NaiveDateTime>,
    /// Date schemas to draw from; all of them when `None`.
    pub schemas: Option<Vec<String>>,
    pub month_schema: MonthSchema,
    pub locale_schema: LocaleSchema,
    /// Probability of deleting one random component per example.
    pub removal_probability: f64,
    /// Ascending instants instead of independent draws.
    pub incremental: bool,
    /// Sample random microseconds (otherwise pinned to zero).
    pub microseconds: bool,
    /// Re-anchor each instant in a random IANA timezone.
    pub timezone: bool,
    /// Attach the field -> token visibility map to each example.
    pub store_visible_components: bool,
}

impl GenerationRequest {
    pub fn new(output: OutputKind, count: usize) -> Self {
        Self {
            output,
            count,
            start: None,
            end: None,
            schemas: None,
            month_schema: MonthSchema::default(),
            locale_schema: LocaleSchema::default(),
            removal_probability: DEFAULT_REMOVAL_PROBABILITY,
            incremental: false,
            microseconds: true,
            timezone: true,
            store_visible_components: false,
        }
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Synthesizes labeled datetime training examples.
pub struct Generator<C = ChronoCalendar, S = WordSpeller> {
    config: GeneratorConfig,
    renderer: TokenRenderer<C, S>,
    rng: ChaCha8Rng,
}

impl Generator<ChronoCalendar, WordSpeller> {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_backends(config, ChronoCalendar::new(), WordSpeller)
    }
}

impl<C: CalendarFormatter, S: NumberSpeller> Generator<C, S> {
    pub fn with_backends(config: GeneratorConfig, calendar: C, speller: S) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            renderer: TokenRenderer::new(calendar, speller),
            rng,
        }
    }

    /// Generate and collect all requested examples.
    pub fn generate(&mut self, request: &GenerationRequest) -> SynthResult<Vec<TrainingExample>> {
        self.stream(request)?.collect()
    }

    /// Lazily generate the requested examples one at a time.
    pub fn stream<'a>(
        &'a mut self,
        request: &'a GenerationRequest,
    ) -> SynthResult<ExampleStream<'a, C, S>> {
        let schemas = resolve_schemas(request)?;
        let locales = self.resolve_locales(request.locale_schema);
        Ok(ExampleStream {
            generator: self,
            request,
            schemas,
            locales,
            emitted: 0,
            failed: false,
            last_utc: None,
        })
    }

    fn resolve_locales(&self, schema: LocaleSchema) -> Vec<String> {
        match schema {
            LocaleSchema::EnUs => vec!["en_US".to_string()],
            LocaleSchema::Mini10 => self.config.mini10_locales.clone(),
            LocaleSchema::All => self.renderer.calendar().locales().to_vec(),
        }
    }

    /// Every component of the template must render to something visible
    /// for this locale. Locale data gaps produce empty strings or lone
    /// spaces for individual tokens; such templates are unusable.
    fn verify_components(&self, template: &str, value: &DateTime<Tz>, locale: &str) -> bool {
        for component in template::extract_components(template) {
            match self.renderer.apply(&component, value, locale, None) {
                Ok(s) if !s.is_empty() && s != " " => {}
                Ok(_) => {
                    debug!(%component, template, locale, "null component, discarding");
                    return false;
                }
                Err(error) => {
                    debug!(%component, template, locale, %error, "unrenderable component, discarding");
                    return false;
                }
            }
        }
        true
    }
}

fn resolve_schemas(request: &GenerationRequest) -> SynthResult<Vec<String>> {
    let schemas: Vec<String> = match &request.schemas {
        Some(named) => {
            for schema in named {
                if catalog::date_skeletons(schema).is_none() {
                    return Err(SynthError::UnknownSchema(schema.clone()));
                }
            }
            named.clone()
        }
        None => catalog::DATE_SCHEMAS.iter().map(|s| s.to_string()).collect(),
    };
    if schemas.is_empty() {
        return Err(SynthError::EmptySchemaSet);
    }
    Ok(schemas)
}

/// Iterator over generated examples. Stops after the requested count or
/// on the first hard error.
pub struct ExampleStream<'a, C, S> {
    generator: &'a mut Generator<C, S>,
    request: &'a GenerationRequest,
    schemas: Vec<String>,
    locales: Vec<String>,
    emitted: usize,
    failed: bool,
    last_utc: Option<DateTime<Tz>>,
}

impl<C: CalendarFormatter, S: NumberSpeller> ExampleStream<'_, C, S> {
    /// Like `next()`, but also yields the instant behind the example.
    /// Derived tasks need the value itself, not only its rendering.
    pub fn next_with_instant(&mut self) -> Option<SynthResult<(TrainingExample, DateTime<Tz>)>> {
        if self.failed || self.emitted >= self.request.count {
            return None;
        }
        match self.next_example() {
            Ok(pair) => {
                self.emitted += 1;
                Some(Ok(pair))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }

    fn next_example(&mut self) -> SynthResult<(TrainingExample, DateTime<Tz>)> {
        let request = self.request;
        let start = request.start.unwrap_or_else(sample::default_start);
        let end = request.end.unwrap_or_else(sample::default_end);
        let composer = DatetimeComposer::new(request.month_schema);
        let max_attempts = self.generator.config.max_attempts_per_example;

        for _attempt in 0..max_attempts {
            let rng = &mut self.generator.rng;

            // sample the instant; incremental mode walks forward from the
            // previous draw instead of sampling independently
            let utc = match self.last_utc.filter(|_| request.incremental) {
                Some(previous) => previous + Duration::seconds(rng.gen_range(1000..=10000)),
                None => sample::random_datetime(
                    rng,
                    &start,
                    &end,
                    request.microseconds,
                    self.generator.config.max_value_attempts,
                )?,
            };
            self.last_utc = Some(utc);

            let rng = &mut self.generator.rng;
            let value = if request.timezone {
                sample::attach_random_timezone(rng, utc)
            } else {
                utc
            };

            let schema = &self.schemas[rng.gen_range(0..self.schemas.len())];
            let template = composer.compose(schema, rng)?;
            let locale = self.locales[rng.gen_range(0..self.locales.len())].clone();

            if !self.generator.verify_components(&template, &value, &locale) {
                continue;
            }

            let rng = &mut self.generator.rng;
            let (template, removed) = if rng.gen::<f64>() < request.removal_probability {
                let (reduced, component) = template::remove_random_component(&template, rng)?;
                (reduced, Some(component))
            } else {
                (template, None)
            };

            let input = match self.generator.renderer.apply(&template, &value, &locale, None) {
                Ok(input) => input,
                Err(error) => {
                    debug!(%template, %locale, %error, "final render failed, discarding");
                    continue;
                }
            };

            // short all-digit strings are unlearnably ambiguous
            if input.len() < 6 && input.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }

            let ctx = Extraction {
                template: &template,
                removed: removed.as_deref(),
                value: &value,
                locale: &locale,
                input: &input,
            };
            let Some((label, mut aux)) = extract::extract(request.output, &ctx, &self.generator.renderer)?
            else {
                continue;
            };

            if request.store_visible_components {
                let visible: BTreeMap<Field, String> = template::visible_components(&template)?
                    .into_iter()
                    .map(|(field, token)| (field, token.to_string()))
                    .collect();
                aux.get_or_insert_with(AuxInfo::default).visible_components = Some(visible);
            }

            return Ok((
                TrainingExample {
                    input,
                    output: label,
                    locale: Some(locale),
                    aux,
                },
                value,
            ));
        }

        Err(SynthError::AttemptsExhausted {
            attempts: max_attempts,
            stage: "generating an example",
        })
    }
}

impl<C: CalendarFormatter, S: NumberSpeller> Iterator for ExampleStream<'_, C, S> {
    type Item = SynthResult<TrainingExample>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_with_instant()
            .map(|result| result.map(|(example, _)| example))
    }
}
