//! Random temporal value sampling.
//!
//! Each calendar field is drawn independently between the corresponding
//! fields of the range endpoints, then the combination is validated.
//! Invalid combinations (February 31st) are redrawn; this sidesteps
//! month-length and leap-year arithmetic entirely at a small retry cost.

use std::ops::RangeInclusive;

use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::{Tz, TZ_VARIANTS};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::error::{SynthError, SynthResult};

/// Earliest instant sampled when no range is given.
pub fn default_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .expect("valid literal date")
        .and_hms_opt(0, 0, 0)
        .expect("valid literal time")
}

/// Latest instant sampled when no range is given.
pub fn default_end() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .expect("valid literal date")
        .and_hms_micro_opt(23, 59, 59, 999_999)
        .expect("valid literal time")
}

/// Inclusive bounds for one field draw. Later fields of a perfectly
/// valid range can be mutually inverted (start 2020-06-15, end 2021-03-10
/// puts the month endpoints at 6 and 3), and an inverted range must not
/// reach the random source: it would panic as empty.
fn field_span<T: Ord + Copy>(a: T, b: T) -> RangeInclusive<T> {
    a.min(b)..=a.max(b)
}

/// Sample a random calendar date with per-field uniform draws. Each field
/// lands between the corresponding fields of the two endpoints.
///
/// The retry loop is bounded by `max_attempts`; with sane ranges roughly
/// 2% of draws are invalid dates, so exhaustion signals a degenerate
/// range.
pub fn random_date<R: Rng + ?Sized>(
    rng: &mut R,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
    max_attempts: u32,
) -> SynthResult<NaiveDate> {
    use chrono::Datelike;

    for attempt in 1..=max_attempts {
        let year = rng.gen_range(field_span(start.year(), end.year()));
        let month = rng.gen_range(field_span(start.month(), end.month()));
        let day = rng.gen_range(field_span(start.day(), end.day()));

        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => return Ok(date),
            None => {
                if attempt % 50 == 0 {
                    warn!(attempt, year, month, day, "invalid random date, redrawing");
                }
            }
        }
    }

    Err(SynthError::AttemptsExhausted {
        attempts: max_attempts,
        stage: "sampling a random date",
    })
}

/// Sample a random UTC-anchored datetime with per-field uniform draws.
///
/// `microseconds=false` pins the subsecond part to zero.
pub fn random_datetime<R: Rng + ?Sized>(
    rng: &mut R,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
    microseconds: bool,
    max_attempts: u32,
) -> SynthResult<chrono::DateTime<Tz>> {
    use chrono::Timelike;

    for _ in 1..=max_attempts {
        let date = random_date(rng, start, end, max_attempts)?;

        let hour = rng.gen_range(field_span(start.hour(), end.hour()));
        let minute = rng.gen_range(field_span(start.minute(), end.minute()));
        let second = rng.gen_range(field_span(start.second(), end.second()));
        let micro = if microseconds {
            rng.gen_range(field_span(
                start.nanosecond() / 1_000,
                end.nanosecond() / 1_000,
            ))
        } else {
            0
        };

        let Some(naive) = date.and_hms_micro_opt(hour, minute, second, micro) else {
            continue;
        };
        return Ok(chrono_tz::UTC.from_utc_datetime(&naive));
    }

    Err(SynthError::AttemptsExhausted {
        attempts: max_attempts,
        stage: "sampling a random datetime",
    })
}

/// Re-anchor a UTC instant in a uniformly chosen IANA timezone. The
/// instant is unchanged; only the wall-clock projection moves.
pub fn attach_random_timezone<R: Rng + ?Sized>(
    rng: &mut R,
    value: chrono::DateTime<Tz>,
) -> chrono::DateTime<Tz> {
    let tz = TZ_VARIANTS
        .choose(rng)
        .copied()
        .unwrap_or(chrono_tz::UTC);
    value.with_timezone(&tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn sampled_dates_are_valid_calendar_dates() {
        use chrono::Datelike;
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let start = default_start();
        let end = default_end();
        for _ in 0..200 {
            let date = random_date(&mut rng, &start, &end, 10_000).unwrap();
            assert!(date.year() >= 1970 && date.year() <= 9999);
        }
    }

    #[test]
    fn sampled_datetimes_stay_in_range() {
        use chrono::Datelike;
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let start = default_start();
        let end = default_end();
        for _ in 0..200 {
            let dt = random_datetime(&mut rng, &start, &end, true, 10_000).unwrap();
            assert!(dt.year() >= 1970 && dt.year() <= 9999);
        }
    }

    #[test]
    fn inverted_later_fields_sample_without_panicking() {
        use chrono::{Datelike, Timelike};
        // valid range whose month, day and time endpoints are all
        // inverted relative to each other
        let start = NaiveDate::from_ymd_opt(2020, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 45)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2021, 3, 10)
            .unwrap()
            .and_hms_opt(8, 5, 2)
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        for _ in 0..200 {
            let dt = random_datetime(&mut rng, &start, &end, true, 10_000).unwrap();
            assert!((2020..=2021).contains(&dt.year()), "{dt}");
            assert!((3..=6).contains(&dt.month()), "{dt}");
            assert!((10..=15).contains(&dt.day()), "{dt}");
            assert!((8..=12).contains(&dt.hour()), "{dt}");
            assert!((5..=30).contains(&dt.minute()), "{dt}");
            assert!((2..=45).contains(&dt.second()), "{dt}");
        }
    }

    #[test]
    fn sampling_is_deterministic_under_a_seed() {
        let start = default_start();
        let end = default_end();
        let mut a = ChaCha8Rng::seed_from_u64(3);
        let mut b = ChaCha8Rng::seed_from_u64(3);
        let x = random_datetime(&mut a, &start, &end, true, 10_000).unwrap();
        let y = random_datetime(&mut b, &start, &end, true, 10_000).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn microseconds_can_be_pinned_to_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let start = default_start();
        let end = default_end();
        for _ in 0..50 {
            let dt = random_datetime(&mut rng, &start, &end, false, 10_000).unwrap();
            assert_eq!(dt.timestamp_subsec_micros(), 0);
        }
    }

    #[test]
    fn timezone_attachment_preserves_the_instant() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let start = default_start();
        let end = default_end();
        let utc = random_datetime(&mut rng, &start, &end, true, 10_000).unwrap();
        let zoned = attach_random_timezone(&mut rng, utc);
        assert_eq!(zoned.timestamp(), utc.timestamp());
        assert_eq!(
            zoned.timestamp_subsec_micros(),
            utc.timestamp_subsec_micros()
        );
    }
}
