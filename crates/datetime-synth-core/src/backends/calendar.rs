//! Locale-aware calendar formatting on top of `chrono`.
//!
//! Patterns arrive as bare CLDR token runs with single-quoted literal
//! stretches (the renderer quotes everything it spliced in itself).
//! Tokens resolve against `chrono`'s localized names where locale data
//! exists; tokens with no workable rendering raise
//! [`RenderError::UnhandledPattern`] so the generation loop can discard
//! the attempt.

use chrono::{DateTime, Datelike, Locale, Timelike};
use chrono_tz::Tz;

use super::{CalendarFormatter, RenderError, RenderResult};

/// Locale identifiers this backend accepts. Curated to glibc names with
/// complete month/weekday/day-period data; the "all" locale schema is
/// exactly this list.
pub const SUPPORTED_LOCALES: &[&str] = &[
    "en_US", "en_GB", "en_AU", "en_CA", "en_IE", "en_NZ", "en_ZA",
    "de_DE", "de_AT", "de_CH",
    "fr_FR", "fr_CH", "fr_BE", "fr_CA", "fr_LU",
    "es_ES", "es_MX", "es_AR", "es_CL", "es_US",
    "it_IT", "it_CH",
    "nl_NL", "nl_BE",
    "pt_PT", "pt_BR",
    "sv_SE", "nn_NO", "nb_NO", "da_DK", "fi_FI", "is_IS",
    "pl_PL", "cs_CZ", "sk_SK", "hu_HU", "ro_RO",
    "hr_HR", "sl_SI", "et_EE", "lt_LT", "lv_LV",
    "tr_TR", "uk_UA", "ca_ES", "gl_ES",
];

/// [`CalendarFormatter`] over `chrono` + `chrono-tz`.
pub struct ChronoCalendar {
    locales: Vec<String>,
}

impl ChronoCalendar {
    pub fn new() -> Self {
        Self {
            locales: SUPPORTED_LOCALES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Resolve a locale identifier, falling back to the first supported
    /// locale sharing its primary subtag.
    fn chrono_locale(&self, locale: &str) -> RenderResult<Locale> {
        if let Ok(loc) = Locale::try_from(locale) {
            return Ok(loc);
        }
        if locale.len() >= 2 {
            let primary = &locale[..2];
            for candidate in &self.locales {
                if candidate.starts_with(primary) {
                    if let Ok(loc) = Locale::try_from(candidate.as_str()) {
                        return Ok(loc);
                    }
                }
            }
        }
        Err(RenderError::UnknownLocale(locale.to_string()))
    }

    fn render_token(
        &self,
        letter: char,
        len: usize,
        value: &DateTime<Tz>,
        locale: &str,
        loc: Locale,
    ) -> RenderResult<String> {
        let unhandled = || RenderError::UnhandledPattern {
            pattern: std::iter::repeat(letter).take(len).collect(),
            locale: locale.to_string(),
        };

        let rendered = match (letter, len) {
            ('d', 1) => value.day().to_string(),
            ('d', 2) => format!("{:02}", value.day()),

            ('M', 1) | ('L', 1) => value.month().to_string(),
            ('M', 2) | ('L', 2) => format!("{:02}", value.month()),
            ('M', 3) | ('L', 3) => value.format_localized("%b", loc).to_string(),
            ('M', 4) | ('L', 4) => value.format_localized("%B", loc).to_string(),

            ('y', 1) => value.year().to_string(),
            ('y', 2) => format!("{:02}", value.year().rem_euclid(100)),
            ('y', 4) => format!("{:04}", value.year()),

            ('h', 1) => hour12(value).to_string(),
            ('h', 2) => format!("{:02}", hour12(value)),
            ('H', 1) => value.hour().to_string(),
            ('H', 2) => format!("{:02}", value.hour()),

            ('m', 1) => value.minute().to_string(),
            ('m', 2) => format!("{:02}", value.minute()),
            ('s', 1) => value.second().to_string(),
            ('s', 2) => format!("{:02}", value.second()),

            // fractional seconds, truncated to the token width
            ('S', 1..=6) => {
                let micros = format!("{:06}", value.timestamp_subsec_micros());
                micros[..len].to_string()
            }

            ('a', 1) => value.format_localized("%p", loc).to_string(),

            ('E', 1..=3) => value.format_localized("%a", loc).to_string(),
            ('E', 4) => value.format_localized("%A", loc).to_string(),

            // timezone abbreviation, e.g. AST
            ('z', 1..=3) => value.format("%Z").to_string(),

            ('Z', 1..=3) => offset_basic(value),
            ('Z', 4) => format!("GMT{}", offset_extended(value)),
            ('Z', 5) | ('X', 3) | ('X', 5) => iso_or_z(value, offset_extended(value)),
            ('X', 1) => iso_or_z(value, offset_short(value)),
            ('X', 2) | ('X', 4) => iso_or_z(value, offset_basic(value)),
            ('x', 1) => offset_short(value),
            ('x', 2) | ('x', 4) => offset_basic(value),
            ('x', 3) | ('x', 5) => offset_extended(value),
            ('O', 4) => format!("GMT{}", offset_extended(value)),

            // full identifier, e.g. America/Chicago
            ('V', 2) => value.timezone().name().to_string(),

            _ => return Err(unhandled()),
        };
        Ok(rendered)
    }
}

impl Default for ChronoCalendar {
    fn default() -> Self {
        Self::new()
    }
}

fn hour12(value: &DateTime<Tz>) -> u32 {
    let (_, hour) = value.hour12();
    hour
}

/// Offset seconds east of UTC.
fn offset_seconds(value: &DateTime<Tz>) -> i32 {
    use chrono::Offset;
    value.offset().fix().local_minus_utc()
}

/// `+0430` style.
fn offset_basic(value: &DateTime<Tz>) -> String {
    let total = offset_seconds(value);
    let sign = if total < 0 { '-' } else { '+' };
    let abs = total.unsigned_abs();
    format!("{}{:02}{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

/// `+04:30` style.
fn offset_extended(value: &DateTime<Tz>) -> String {
    let total = offset_seconds(value);
    let sign = if total < 0 { '-' } else { '+' };
    let abs = total.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

/// `+04`, or `+0430` when the offset has minutes.
fn offset_short(value: &DateTime<Tz>) -> String {
    let total = offset_seconds(value);
    let sign = if total < 0 { '-' } else { '+' };
    let abs = total.unsigned_abs();
    if abs % 3600 == 0 {
        format!("{}{:02}", sign, abs / 3600)
    } else {
        format!("{}{:02}{:02}", sign, abs / 3600, (abs % 3600) / 60)
    }
}

/// ISO forms render a literal `Z` at zero offset.
fn iso_or_z(value: &DateTime<Tz>, formatted: String) -> String {
    if offset_seconds(value) == 0 {
        "Z".to_string()
    } else {
        formatted
    }
}

impl CalendarFormatter for ChronoCalendar {
    fn format(&self, pattern: &str, value: &DateTime<Tz>, locale: &str) -> RenderResult<String> {
        let loc = self.chrono_locale(locale)?;

        let mut out = String::new();
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                // quoted literal; '' inside a literal is an escaped quote
                i += 1;
                while i < chars.len() {
                    if chars[i] == '\'' {
                        if i + 1 < chars.len() && chars[i + 1] == '\'' {
                            out.push('\'');
                            i += 2;
                            continue;
                        }
                        i += 1;
                        break;
                    }
                    out.push(chars[i]);
                    i += 1;
                }
            } else if c.is_ascii_alphabetic() {
                let mut len = 1;
                while i + len < chars.len() && chars[i + len] == c {
                    len += 1;
                }
                out.push_str(&self.render_token(c, len, value, locale, loc)?);
                i += len;
            } else {
                out.push(c);
                i += 1;
            }
        }
        Ok(out)
    }

    fn locales(&self) -> &[String] {
        &self.locales
    }
}
