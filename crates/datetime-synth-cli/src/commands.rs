//! Command handlers for the generator CLI.

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{bail, Context};
use chrono::NaiveDateTime;
use clap::Args;
use tracing::info;

use datetime_synth_core::catalog::MonthSchema;
use datetime_synth_core::config::GeneratorConfig;
use datetime_synth_core::generate::{GenerationRequest, Generator, LocaleSchema};
use datetime_synth_core::tasks::{DayTaskKind, DayTaskRequest, MonthFilter};
use datetime_synth_core::types::{OutputKind, TrainingExample};

/// Arguments for `generate`.
#[derive(Args)]
pub struct GenerateArgs {
    /// Output kind, e.g. iso8601, year, month_str, has_minute
    output: OutputKind,

    /// Number of examples to generate
    count: usize,

    /// Start of the sampling range, ISO format (e.g. 2022-02-02T06:19:37)
    #[arg(long)]
    start_date: Option<NaiveDateTime>,

    /// End of the sampling range, ISO format
    #[arg(long)]
    end_date: Option<NaiveDateTime>,

    /// Comma-separated date schemas (e.g. month-day-yyyy,day-month-yy)
    #[arg(long)]
    schemas: Option<String>,

    /// Month tokens to use: all, arabic, unambiguous or roman
    #[arg(long, default_value = "all")]
    month_schema: MonthSchema,

    /// Locale schema: en_US, mini.10 or all
    #[arg(long, default_value = "mini.10")]
    locale_schema: LocaleSchema,

    /// Probability of removing one random component per example
    #[arg(long, default_value_t = 0.05)]
    removal_probability: f64,

    /// Ascending instants instead of independent draws
    #[arg(long)]
    incremental: bool,

    /// Pin microseconds to zero
    #[arg(long)]
    no_microseconds: bool,

    /// Keep every instant in UTC instead of a random timezone
    #[arg(long)]
    no_timezone: bool,

    /// Attach the field visibility map to each example
    #[arg(long)]
    visible_components: bool,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[command(flatten)]
    emit: EmitArgs,
}

/// Arguments for `day-task`.
#[derive(Args)]
pub struct DayTaskArgs {
    /// Task name: model, add.day.N or subtract.day.N
    task: DayTaskKind,

    /// Number of examples to generate
    count: usize,

    /// Start of the sampling range, ISO format
    #[arg(long)]
    start_date: Option<NaiveDateTime>,

    /// Comma-separated date schemas
    #[arg(long)]
    schemas: Option<String>,

    /// Month tokens to use: all, arabic, unambiguous or roman
    #[arg(long, default_value = "all")]
    month_schema: MonthSchema,

    /// Locale schema: en_US, mini.10 or all
    #[arg(long, default_value = "mini.10")]
    locale_schema: LocaleSchema,

    /// Month relation filter: 0 keep all, 1 same month only,
    /// -1 changed month within the same year only
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    same_month: i32,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[command(flatten)]
    emit: EmitArgs,
}

/// Shared output-shape flags.
#[derive(Args)]
struct EmitArgs {
    /// Print only the input strings
    #[arg(long, conflicts_with_all = ["targets", "csv"])]
    inputs: bool,

    /// Print only the output labels
    #[arg(long, conflicts_with = "csv")]
    targets: bool,

    /// Write a quoted input/output CSV to this path
    #[arg(long)]
    csv: Option<String>,
}

pub fn handle_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = GeneratorConfig {
        seed: args.seed,
        ..GeneratorConfig::default()
    };
    let null_target = config.null_target.clone();
    let mut generator = Generator::new(config);

    let mut request = GenerationRequest::new(args.output, args.count);
    request.start = args.start_date;
    request.end = args.end_date;
    request.schemas = split_schemas(args.schemas.as_deref());
    request.month_schema = args.month_schema;
    request.locale_schema = args.locale_schema;
    request.removal_probability = args.removal_probability;
    request.incremental = args.incremental;
    request.microseconds = !args.no_microseconds;
    request.timezone = !args.no_timezone;
    request.store_visible_components = args.visible_components;

    info!(output = %args.output, count = args.count, "generating examples");

    let mut emitter = Emitter::new(&args.emit, &null_target)?;
    for result in generator.stream(&request)? {
        emitter.emit(&result.context("generation failed")?)?;
    }
    emitter.finish()
}

pub fn handle_day_task(args: DayTaskArgs) -> anyhow::Result<()> {
    let config = GeneratorConfig {
        seed: args.seed,
        ..GeneratorConfig::default()
    };
    let null_target = config.null_target.clone();
    let mut generator = Generator::new(config);

    let mut request = DayTaskRequest::new(args.task, args.count);
    request.start = args.start_date;
    request.schemas = split_schemas(args.schemas.as_deref());
    request.month_schema = args.month_schema;
    request.locale_schema = args.locale_schema;
    request.month_filter = match args.same_month {
        0 => MonthFilter::Any,
        1 => MonthFilter::SameMonth,
        -1 => MonthFilter::ChangedMonthSameYear,
        other => bail!("unhandled --same-month value {other} (expected -1, 0 or 1)"),
    };

    info!(task = %args.task, count = args.count, "generating day-task examples");

    let examples = generator
        .generate_day_tasks(&request)
        .context("day-task generation failed")?;

    let mut emitter = Emitter::new(&args.emit, &null_target)?;
    for example in &examples {
        emitter.emit(example)?;
    }
    emitter.finish()
}

fn split_schemas(schemas: Option<&str>) -> Option<Vec<String>> {
    schemas.map(|s| s.split(',').map(|x| x.trim().to_string()).collect())
}

/// Writes examples in the selected shape: JSON lines by default, compact
/// input/target lines, or a quoted CSV file.
enum Emitter<'a> {
    JsonLines,
    Inputs,
    Targets { null_target: &'a str },
    Csv { writer: BufWriter<File>, null_target: &'a str },
}

impl<'a> Emitter<'a> {
    fn new(args: &EmitArgs, null_target: &'a str) -> anyhow::Result<Self> {
        if args.inputs {
            return Ok(Emitter::Inputs);
        }
        if args.targets {
            return Ok(Emitter::Targets { null_target });
        }
        if let Some(path) = &args.csv {
            let file = File::create(path).with_context(|| format!("creating {path}"))?;
            return Ok(Emitter::Csv {
                writer: BufWriter::new(file),
                null_target,
            });
        }
        Ok(Emitter::JsonLines)
    }

    fn emit(&mut self, example: &TrainingExample) -> anyhow::Result<()> {
        match self {
            Emitter::JsonLines => {
                println!("{}", serde_json::to_string(example)?);
            }
            Emitter::Inputs => println!("{}", example.input),
            Emitter::Targets { null_target } => {
                println!("{}", example.output.render(null_target));
            }
            Emitter::Csv { writer, null_target } => {
                writeln!(
                    writer,
                    "\"{}\",\"{}\"",
                    example.input,
                    example.output.render(null_target)
                )?;
            }
        }
        Ok(())
    }

    fn finish(self) -> anyhow::Result<()> {
        if let Emitter::Csv { mut writer, .. } = self {
            writer.flush()?;
        }
        Ok(())
    }
}
