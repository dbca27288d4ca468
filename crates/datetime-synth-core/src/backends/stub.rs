//! Deterministic stub backends for tests.

use std::cell::Cell;

use chrono::DateTime;
use chrono_tz::Tz;

use super::{
    CalendarFormatter, ChronoCalendar, NumberSpeller, RenderError, RenderResult, SpellStyle,
};

/// Calendar stub that delegates to [`ChronoCalendar`] but can be told to
/// render chosen patterns as empty strings (exercising the null-component
/// verification path) and counts cache-release calls.
pub struct StubCalendar {
    inner: ChronoCalendar,
    locales: Vec<String>,
    /// Bare patterns that render to the empty string.
    pub empty_patterns: Vec<String>,
    pub cache_releases: Cell<u64>,
}

impl StubCalendar {
    pub fn new() -> Self {
        Self {
            inner: ChronoCalendar::new(),
            locales: vec!["en_US".to_string()],
            empty_patterns: Vec::new(),
            cache_releases: Cell::new(0),
        }
    }

    pub fn with_empty_pattern(mut self, pattern: &str) -> Self {
        self.empty_patterns.push(pattern.to_string());
        self
    }
}

impl Default for StubCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarFormatter for StubCalendar {
    fn format(&self, pattern: &str, value: &DateTime<Tz>, locale: &str) -> RenderResult<String> {
        if self.empty_patterns.iter().any(|p| p == pattern) {
            return Ok(String::new());
        }
        self.inner.format(pattern, value, locale)
    }

    fn release_cache(&self) {
        self.cache_releases.set(self.cache_releases.get() + 1);
    }

    fn locales(&self) -> &[String] {
        &self.locales
    }
}

/// Speller stub with a fixed language repertoire and a marker output
/// format that records the language actually used.
pub struct StubSpeller {
    pub supported: Vec<String>,
    /// When set, every spell attempt fails.
    pub fail: bool,
}

impl StubSpeller {
    pub fn english_only() -> Self {
        Self {
            supported: vec!["en".to_string()],
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            supported: vec!["en".to_string()],
            fail: true,
        }
    }
}

impl NumberSpeller for StubSpeller {
    fn spell(&self, number: u32, style: SpellStyle, language: &str) -> RenderResult<String> {
        if self.fail {
            return Err(RenderError::SpellingUnsupported {
                number,
                style,
                language: language.to_string(),
            });
        }
        let code = match style {
            SpellStyle::Cardinal => "c",
            SpellStyle::Ordinal => "o",
            SpellStyle::OrdinalNumeral => "on",
        };
        Ok(format!("{language}.{code}{number}"))
    }

    fn supports(&self, language: &str) -> bool {
        self.supported.iter().any(|l| l == language)
    }
}
