//! Combined date+time template composition.

use rand::Rng;

use super::{pick, DateComposer, TimeComposer};
use crate::catalog::{
    MonthSchema, DATETIME_DELIMITERS, DATETIME_SKELETONS, WHITESPACE_CHARACTER,
};
use crate::error::SynthResult;

/// Composes full datetime templates: a date part and a time part joined
/// by a delimiter, in either order.
pub struct DatetimeComposer {
    date: DateComposer,
    time: TimeComposer,
}

impl DatetimeComposer {
    pub fn new(month_schema: MonthSchema) -> Self {
        Self {
            date: DateComposer::new(month_schema),
            time: TimeComposer::new(),
        }
    }

    pub fn compose<R: Rng + ?Sized>(&self, schema: &str, rng: &mut R) -> SynthResult<String> {
        let whitespace = WHITESPACE_CHARACTER;
        let date_part = self.date.compose(schema, whitespace, rng)?;
        let time_part = self.time.compose(whitespace, rng);

        let skeleton = pick(rng, DATETIME_SKELETONS);
        let delimiter = pick(rng, DATETIME_DELIMITERS);

        Ok(skeleton
            .replace("{datetime_delimiter}", delimiter)
            .replace("{date}", &date_part)
            .replace("{time}", &time_part))
    }
}
