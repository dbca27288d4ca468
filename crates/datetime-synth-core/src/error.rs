//! Error types for the synthesis engine.
//!
//! Two families of failure exist and they are deliberately kept apart:
//!
//! - [`SynthError`]: caller-visible failures, covering misconfiguration
//!   (unknown schema names, unknown output kinds) and internal consistency
//!   violations (catalog/composer disagreement). These are never retried.
//! - [`crate::backends::RenderError`]: transient rendering failures
//!   (degenerate locale output, unresolvable patterns). These are handled
//!   inside the generation loop by discarding the attempt and resampling;
//!   callers never observe them directly.

use thiserror::Error;

use crate::types::Field;

/// Result type alias for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Caller-visible error for the synthesis engine.
#[derive(Error, Debug)]
pub enum SynthError {
    // ========== Configuration errors ==========
    /// A date schema name was requested that no catalog defines.
    #[error("unknown date schema '{0}'")]
    UnknownSchema(String),

    /// A month-token schema name was requested that no catalog defines.
    #[error("unknown month schema '{0}' (expected all, arabic, unambiguous or roman)")]
    UnknownMonthSchema(String),

    /// A locale schema name was requested that is not defined.
    #[error("unknown locale schema '{0}' (expected en_US, mini.10 or all)")]
    UnknownLocaleSchema(String),

    /// An output kind string did not parse to a known kind.
    #[error("unknown output kind '{0}'")]
    UnknownOutputKind(String),

    /// The schema filter resolved to zero usable schemas.
    #[error("schema filter resolved to zero usable schemas")]
    EmptySchemaSet,

    /// A day-arithmetic task name did not parse.
    #[error("unknown day task '{0}' (expected add.day.N or subtract.day.N)")]
    UnknownDayTask(String),

    // ========== Internal consistency violations ==========
    /// A template carried two tokens for the same field. Composition is
    /// supposed to make this impossible; hitting it means catalog data
    /// and the composers have drifted apart.
    #[error("field '{field}' appears more than once in template '{template}' (second token '{token}')")]
    DuplicateFieldToken {
        field: Field,
        template: String,
        token: String,
    },

    /// A component with no catalog field (a custom or structural token)
    /// appeared twice in one template.
    #[error("component '{component}' appears more than once in template '{template}'")]
    DuplicateComponent { template: String, component: String },

    /// A structurally mandatory field is missing from a template and was
    /// not the deliberately deleted component.
    #[error("no {field} token found in template '{template}' and it was not the removed component")]
    MissingMandatoryField { field: Field, template: String },

    /// A template contained no bracketed components at all.
    #[error("template '{0}' contains no components")]
    EmptyTemplate(String),

    /// A re-rendered component was not a substring of the final input
    /// string, so the label would not describe the text it is paired with.
    #[error("rendered component '{component}' not found in input string '{input}'")]
    LabelInconsistency { component: String, input: String },

    // ========== Resource exhaustion ==========
    /// The regenerate-on-failure loop gave up. Practically this only
    /// happens when the configured value range or locale set is
    /// pathological for the requested formats.
    #[error("gave up after {attempts} attempts while {stage}")]
    AttemptsExhausted { attempts: u32, stage: &'static str },
}
