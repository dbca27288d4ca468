//! Template composition: builds concrete brace-token templates from the
//! schema catalogs, one random draw at a time.
//!
//! Composition resolves structural placeholders (`{separator}`,
//! `{whitespace}`, `{microsecond}`, `{timezone}`, `{date}`, `{time}`,
//! `{datetime_delimiter}`) into concrete tokens and characters. The
//! result is a template the renderer can apply directly, with at most
//! one token per field.

mod date;
mod datetime;
mod time;

pub use date::DateComposer;
pub use datetime::DatetimeComposer;
pub use time::TimeComposer;

/// Uniform pick from a non-empty static slice.
fn pick<'a, T: ?Sized, R: rand::Rng + ?Sized>(rng: &mut R, items: &'a [&'a T]) -> &'a T {
    items[rng.gen_range(0..items.len())]
}
