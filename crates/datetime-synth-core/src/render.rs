//! Template rendering: custom tokens first, then the calendar backend,
//! then text normalization.
//!
//! Custom tokens must be rendered and escaped before the calendar
//! backend runs, otherwise the backend would reinterpret the rendered
//! characters as pattern letters (the 'e' in "one" is a weekday token).
//! Escaping wraps the rendered text in single quotes, which the backend
//! strips while treating the content as literal.

use std::cell::Cell;

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;

use crate::backends::{
    roman::{to_roman, ROMAN_MAX},
    CalendarFormatter, NumberSpeller, RenderResult, SpellStyle,
};
use crate::normalize::normalize;

/// How many backend calls between cache-release hooks.
pub const CACHE_RELEASE_INTERVAL: u64 = 1000;

/// Renders brace-delimited templates against a concrete instant.
pub struct TokenRenderer<C, S> {
    calendar: C,
    speller: S,
    normalize_by_default: bool,
    calls: Cell<u64>,
}

impl<C: CalendarFormatter, S: NumberSpeller> TokenRenderer<C, S> {
    pub fn new(calendar: C, speller: S) -> Self {
        Self {
            calendar,
            speller,
            normalize_by_default: true,
            calls: Cell::new(0),
        }
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Render a template for one instant and locale.
    ///
    /// `normalize_override` forces normalization on or off; `None` uses
    /// the renderer default (on).
    ///
    /// Two custom-token failure modes intentionally abandon the template
    /// and return the plain numeric field instead: ordinal day spellings
    /// the speller cannot produce, and Roman years out of range. The
    /// caller still gets usable training text for the underlying value.
    pub fn apply(
        &self,
        template: &str,
        value: &DateTime<Tz>,
        locale: &str,
        normalize_override: Option<bool>,
    ) -> RenderResult<String> {
        let mut working = template.to_string();

        if working.contains("{T}") {
            working = working.replace("{T}", &escape(value.timezone().name()));
        }
        if working.contains("{TT}") {
            working = working.replace("{TT}", &escape(&value.format("%Z").to_string()));
        }

        if working.contains("{C(day)}") {
            let language = self.speller_language(locale);
            let spelled = self
                .speller
                .spell(value.day(), SpellStyle::Cardinal, &language)?;
            working = working.replace("{C(day)}", &escape(&spelled));
        }
        if working.contains("{O(day)}") {
            let language = self.speller_language(locale);
            match self.speller.spell(value.day(), SpellStyle::Ordinal, &language) {
                Ok(spelled) => working = working.replace("{O(day)}", &escape(&spelled)),
                Err(_) => return Ok(value.day().to_string()),
            }
        }
        if working.contains("{ON(day)}") {
            let language = self.speller_language(locale);
            match self
                .speller
                .spell(value.day(), SpellStyle::OrdinalNumeral, &language)
            {
                Ok(spelled) => working = working.replace("{ON(day)}", &escape(&spelled)),
                Err(_) => return Ok(value.day().to_string()),
            }
        }

        if working.contains("{X(month)}") {
            let roman = to_roman(value.month()).unwrap_or_else(|| value.month().to_string());
            working = working.replace("{X(month)}", &escape(&roman));
        }
        if working.contains("{X(year)}") {
            let year = value.year();
            if year >= 1 && year <= ROMAN_MAX as i32 {
                let roman = to_roman(year as u32).unwrap_or_else(|| year.to_string());
                working = working.replace("{X(year)}", &escape(&roman));
            } else {
                return Ok(year.to_string());
            }
        }

        // the calendar backend takes bare token runs
        let bare = working.replace('{', "").replace('}', "");
        let rendered = self.calendar.format(&bare, value, locale)?;

        let calls = self.calls.get() + 1;
        self.calls.set(calls);
        if calls % CACHE_RELEASE_INTERVAL == 0 {
            self.calendar.release_cache();
        }

        if normalize_override.unwrap_or(self.normalize_by_default) {
            Ok(normalize(&rendered))
        } else {
            Ok(rendered)
        }
    }

    /// Spelling language for a locale: the locale itself if supported,
    /// else its primary subtag, else English.
    fn speller_language(&self, locale: &str) -> String {
        if self.speller.supports(locale) {
            return locale.to_string();
        }
        if locale.len() == 5 {
            let primary = &locale[..2];
            if self.speller.supports(primary) {
                return primary.to_string();
            }
        }
        "en".to_string()
    }
}

fn escape(s: &str) -> String {
    format!("'{s}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{StubCalendar, StubSpeller};
    use crate::backends::{ChronoCalendar, RenderError, WordSpeller};
    use chrono::TimeZone;

    fn instant() -> DateTime<Tz> {
        chrono_tz::America::Chicago
            .with_ymd_and_hms(2023, 7, 4, 15, 5, 9)
            .unwrap()
    }

    #[test]
    fn renders_a_plain_calendar_template() {
        let renderer = TokenRenderer::new(ChronoCalendar::new(), WordSpeller);
        let out = renderer
            .apply("{dd}-{MMM}-{yyyy}", &instant(), "en_US", None)
            .unwrap();
        assert_eq!(out, "04-jul-2023");
    }

    #[test]
    fn normalization_can_be_disabled_per_call() {
        let renderer = TokenRenderer::new(ChronoCalendar::new(), WordSpeller);
        let out = renderer
            .apply("{dd}-{MMM}-{yyyy}", &instant(), "en_US", Some(false))
            .unwrap();
        assert_eq!(out, "04-Jul-2023");
    }

    #[test]
    fn spelled_days_are_escaped_from_reinterpretation() {
        // "one" contains pattern letters; it must survive verbatim
        let renderer = TokenRenderer::new(ChronoCalendar::new(), WordSpeller);
        let dt = chrono_tz::UTC.with_ymd_and_hms(2023, 7, 1, 0, 0, 0).unwrap();
        let out = renderer
            .apply("{C(day)} {MMM}", &dt, "en_US", None)
            .unwrap();
        assert_eq!(out, "one jul");
    }

    #[test]
    fn ordinal_numeral_day_renders() {
        let renderer = TokenRenderer::new(ChronoCalendar::new(), WordSpeller);
        let out = renderer
            .apply("{MMM} {ON(day)}, {yyyy}", &instant(), "en_US", None)
            .unwrap();
        assert_eq!(out, "jul 4th, 2023");
    }

    #[test]
    fn custom_timezone_tokens_render_id_and_abbreviation() {
        let renderer = TokenRenderer::new(ChronoCalendar::new(), WordSpeller);
        let out = renderer.apply("{T}", &instant(), "en_US", None).unwrap();
        assert_eq!(out, "america/chicago");
        let out = renderer.apply("{TT}", &instant(), "en_US", None).unwrap();
        assert_eq!(out, "cdt");
    }

    #[test]
    fn unsupported_spelling_language_falls_back_to_english() {
        let renderer = TokenRenderer::new(StubCalendar::new(), StubSpeller::english_only());
        let out = renderer
            .apply("{ON(day)}", &instant(), "sv_SE", None)
            .unwrap();
        assert_eq!(out, "en.on4");
    }

    #[test]
    fn failed_ordinal_spelling_abandons_the_template() {
        let renderer = TokenRenderer::new(StubCalendar::new(), StubSpeller::failing());
        let out = renderer
            .apply("{O(day)} {MMM} {yyyy}", &instant(), "en_US", None)
            .unwrap();
        assert_eq!(out, "4");
        let out = renderer
            .apply("{ON(day)}", &instant(), "en_US", None)
            .unwrap();
        assert_eq!(out, "4");
    }

    #[test]
    fn failed_cardinal_spelling_propagates() {
        let renderer = TokenRenderer::new(StubCalendar::new(), StubSpeller::failing());
        let err = renderer
            .apply("{C(day)}", &instant(), "en_US", None)
            .unwrap_err();
        assert!(matches!(err, RenderError::SpellingUnsupported { .. }));
    }

    #[test]
    fn roman_month_and_year_render() {
        let renderer = TokenRenderer::new(ChronoCalendar::new(), WordSpeller);
        let out = renderer
            .apply("{X(month)}.{X(year)}", &instant(), "en_US", None)
            .unwrap();
        assert_eq!(out, "vii.mmxxiii");
    }

    #[test]
    fn roman_year_out_of_range_abandons_the_template() {
        let renderer = TokenRenderer::new(ChronoCalendar::new(), WordSpeller);
        let dt = chrono_tz::UTC.with_ymd_and_hms(8215, 3, 2, 0, 0, 0).unwrap();
        let out = renderer
            .apply("{dd}.{X(year)}", &dt, "en_US", None)
            .unwrap();
        assert_eq!(out, "8215");
    }

    #[test]
    fn cache_release_fires_every_interval() {
        let renderer = TokenRenderer::new(StubCalendar::new(), StubSpeller::english_only());
        let dt = instant();
        for _ in 0..CACHE_RELEASE_INTERVAL {
            renderer.apply("{dd}", &dt, "en_US", None).unwrap();
        }
        assert_eq!(renderer.calendar().cache_releases.get(), 1);
        renderer.apply("{dd}", &dt, "en_US", None).unwrap();
        assert_eq!(renderer.calendar().cache_releases.get(), 1);
    }
}
