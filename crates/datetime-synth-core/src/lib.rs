//! Datetime Synthesis Core Library
//!
//! Synthesizes labeled training examples for models that read date/time
//! strings: each example pairs a rendered, normalized datetime text with
//! a label computed from the same template and instant that produced it.
//!
//! # Architecture
//!
//! This crate defines:
//! - Template composition from token catalogs (`compose`, `catalog`)
//! - Locale-aware rendering with custom-token support (`render`, `backends`)
//! - Text normalization and token canonicalization (`normalize`, `ldml`)
//! - Label extraction over a closed set of output kinds (`extract`)
//! - The generation loop and day-arithmetic tasks (`generate`, `tasks`)
//!
//! # Example
//!
//! ```
//! use datetime_synth_core::config::GeneratorConfig;
//! use datetime_synth_core::generate::{GenerationRequest, Generator};
//! use datetime_synth_core::types::OutputKind;
//!
//! let mut generator = Generator::new(GeneratorConfig::default());
//! let request = GenerationRequest::new(OutputKind::Iso8601, 3);
//! let examples = generator.generate(&request).unwrap();
//! assert_eq!(examples.len(), 3);
//! ```

pub mod backends;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod extract;
pub mod generate;
pub mod ldml;
pub mod normalize;
pub mod render;
pub mod sample;
pub mod tasks;
pub mod template;
pub mod types;

// Re-exports for convenience
pub use config::GeneratorConfig;
pub use error::{SynthError, SynthResult};
pub use generate::{GenerationRequest, Generator, LocaleSchema};
pub use tasks::{DayTaskKind, DayTaskRequest, MonthFilter};
pub use types::{Label, OutputKind, TrainingExample};
