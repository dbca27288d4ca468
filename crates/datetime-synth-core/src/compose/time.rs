//! Time part composition.

use rand::Rng;

use super::pick;
use crate::catalog::{MICROSECOND_TOKENS, TIME_FAMILIES, TIME_SEPARATORS, TIMEZONE_TOKENS};

/// Composes the time part of a template from the digit-width families.
#[derive(Debug, Default)]
pub struct TimeComposer;

impl TimeComposer {
    pub fn new() -> Self {
        Self
    }

    /// Build a concrete time template: pick a digit-width family, a
    /// skeleton within it, then resolve separator, whitespace,
    /// microsecond and timezone placeholders.
    pub fn compose<R: Rng + ?Sized>(&self, whitespace: &str, rng: &mut R) -> String {
        let family = TIME_FAMILIES[rng.gen_range(0..TIME_FAMILIES.len())];
        let skeleton = pick(rng, family);

        let mut template = skeleton
            .replace("{separator}", pick(rng, TIME_SEPARATORS))
            .replace("{whitespace}", whitespace);

        if template.contains("{microsecond}") {
            template = template.replace("{microsecond}", pick(rng, MICROSECOND_TOKENS));
        }
        if template.contains("{timezone}") {
            template = template.replace("{timezone}", pick(rng, TIMEZONE_TOKENS));
        }
        template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::visible_components;
    use crate::types::Field;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn composed_times_always_carry_an_hour() {
        let composer = TimeComposer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        for _ in 0..300 {
            let template = composer.compose(" ", &mut rng);
            let visible = visible_components(&template).unwrap();
            assert!(visible.contains_key(&Field::Hour), "{template}");
            assert!(!template.contains("{separator}"));
            assert!(!template.contains("{microsecond}"));
            assert!(!template.contains("{timezone}"));
        }
    }

    #[test]
    fn minutes_and_seconds_are_sometimes_absent() {
        let composer = TimeComposer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen_no_minute = false;
        let mut seen_minute = false;
        for _ in 0..300 {
            let template = composer.compose(" ", &mut rng);
            let visible = visible_components(&template).unwrap();
            if visible.contains_key(&Field::Minute) {
                seen_minute = true;
            } else {
                seen_no_minute = true;
            }
        }
        assert!(seen_minute && seen_no_minute);
    }
}
