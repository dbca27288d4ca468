//! Rendering backends: the locale-aware calendar formatter, the
//! number-to-words speller, Roman numerals, and test stubs.
//!
//! Backend failures are [`RenderError`]s. They are expected and
//! recoverable: the generation loop discards the attempt and composes a
//! fresh template instead of surfacing them to callers.

use chrono::DateTime;
use chrono_tz::Tz;
use thiserror::Error;

pub mod calendar;
pub mod roman;
pub mod spell;
pub mod stub;

pub use calendar::ChronoCalendar;
pub use spell::WordSpeller;

/// Result type alias for backend rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// A recoverable rendering failure.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The pattern contains a token the calendar backend cannot resolve
    /// for this locale.
    #[error("unhandled pattern '{pattern}' for locale '{locale}'")]
    UnhandledPattern { pattern: String, locale: String },

    /// The locale identifier is not in the backend's repertoire.
    #[error("unknown locale '{0}'")]
    UnknownLocale(String),

    /// The spelling backend cannot express this number in this language.
    #[error("cannot spell {number} as {style} in '{language}'")]
    SpellingUnsupported {
        number: u32,
        style: SpellStyle,
        language: String,
    },
}

/// How a number should be spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellStyle {
    /// "one", "two"
    Cardinal,
    /// "first", "second"
    Ordinal,
    /// "1st", "2nd"
    OrdinalNumeral,
}

impl std::fmt::Display for SpellStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SpellStyle::Cardinal => "cardinal",
            SpellStyle::Ordinal => "ordinal",
            SpellStyle::OrdinalNumeral => "ordinal numeral",
        })
    }
}

/// Locale-aware calendar formatting of a timezone-anchored instant.
pub trait CalendarFormatter {
    /// Render a bare (unbraced) date pattern for the given locale.
    fn format(&self, pattern: &str, value: &DateTime<Tz>, locale: &str) -> RenderResult<String>;

    /// Hook for backends that accumulate per-pattern state. The renderer
    /// invokes this periodically; the default does nothing.
    fn release_cache(&self) {}

    /// The locale identifiers this backend accepts.
    fn locales(&self) -> &[String];
}

/// Spelling numbers out as locale words.
pub trait NumberSpeller {
    fn spell(&self, number: u32, style: SpellStyle, language: &str) -> RenderResult<String>;

    /// Whether `language` is in the speller's repertoire. Drives the
    /// exact -> primary-subtag -> default fallback chain.
    fn supports(&self, language: &str) -> bool;
}
