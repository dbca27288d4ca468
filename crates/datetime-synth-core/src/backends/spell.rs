//! Number spelling via `num2words`.
//!
//! Coverage is much narrower than the calendar backend's locale set, so
//! the renderer falls back to English for unsupported languages. A
//! supported language can still fail on specific number/style pairs;
//! that surfaces as [`RenderError::SpellingUnsupported`].

use num2words::{Lang, Num2Words};

use super::{NumberSpeller, RenderError, RenderResult, SpellStyle};

/// [`NumberSpeller`] backed by the `num2words` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordSpeller;

fn lang_of(language: &str) -> Option<Lang> {
    match language {
        "en" => Some(Lang::English),
        "fr" => Some(Lang::French),
        "fr_BE" => Some(Lang::French_BE),
        "fr_CH" => Some(Lang::French_CH),
        "es" => Some(Lang::Spanish),
        "uk" => Some(Lang::Ukrainian),
        _ => None,
    }
}

impl NumberSpeller for WordSpeller {
    fn spell(&self, number: u32, style: SpellStyle, language: &str) -> RenderResult<String> {
        let lang = lang_of(language).ok_or_else(|| RenderError::SpellingUnsupported {
            number,
            style,
            language: language.to_string(),
        })?;

        let builder = Num2Words::new(number as i64).lang(lang);
        let builder = match style {
            SpellStyle::Cardinal => builder.cardinal(),
            SpellStyle::Ordinal => builder.ordinal(),
            SpellStyle::OrdinalNumeral => builder.ordinal_num(),
        };

        builder
            .to_words()
            .map_err(|_| RenderError::SpellingUnsupported {
                number,
                style,
                language: language.to_string(),
            })
    }

    fn supports(&self, language: &str) -> bool {
        lang_of(language).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_spellings() {
        let speller = WordSpeller;
        assert_eq!(
            speller.spell(1, SpellStyle::Cardinal, "en").unwrap(),
            "one"
        );
        assert_eq!(
            speller.spell(1, SpellStyle::Ordinal, "en").unwrap(),
            "first"
        );
        assert_eq!(
            speller.spell(1, SpellStyle::OrdinalNumeral, "en").unwrap(),
            "1st"
        );
        assert_eq!(
            speller.spell(21, SpellStyle::OrdinalNumeral, "en").unwrap(),
            "21st"
        );
    }

    #[test]
    fn unsupported_language_is_reported_not_defaulted() {
        let speller = WordSpeller;
        assert!(!speller.supports("sv"));
        let err = speller.spell(3, SpellStyle::Cardinal, "sv").unwrap_err();
        assert!(matches!(err, RenderError::SpellingUnsupported { .. }));
    }

    #[test]
    fn regional_french_variants_are_distinct_languages() {
        let speller = WordSpeller;
        assert!(speller.supports("fr"));
        assert!(speller.supports("fr_CH"));
        assert!(!speller.supports("fr_CA"));
    }
}
