//! Date part composition.

use rand::Rng;

use super::pick;
use crate::catalog::{self, MonthSchema, DAY_TOKENS, DATE_SEPARATORS};
use crate::error::{SynthError, SynthResult};

/// Composes the date part of a template from a named date schema.
pub struct DateComposer {
    month_schema: MonthSchema,
}

impl DateComposer {
    pub fn new(month_schema: MonthSchema) -> Self {
        Self { month_schema }
    }

    /// Build a concrete date template: pick a skeleton from the schema,
    /// fix its separator and whitespace, then resolve the generic
    /// `{day}` and `{month}` placeholders to catalog tokens. The year
    /// token is part of the schema name and already concrete.
    ///
    /// `whitespace` is shared with the time part so both halves of a
    /// combined template breathe the same way.
    pub fn compose<R: Rng + ?Sized>(
        &self,
        schema: &str,
        whitespace: &str,
        rng: &mut R,
    ) -> SynthResult<String> {
        let skeletons = catalog::date_skeletons(schema)
            .ok_or_else(|| SynthError::UnknownSchema(schema.to_string()))?;

        let skeleton = pick(rng, skeletons);
        let separator = pick(rng, DATE_SEPARATORS);

        let mut template = skeleton
            .replace("{whitespace}", whitespace)
            .replace("{separator}", separator);

        template = template.replace("{day}", pick(rng, DAY_TOKENS));
        template = template.replace("{month}", pick(rng, self.month_schema.tokens()));
        Ok(template)
    }
}
