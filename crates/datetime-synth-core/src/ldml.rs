//! Static mapping from CLDR/LDML pattern tokens to canonical fields.
//!
//! Many token spellings render the same field (`{d}`, `{dd}` are both a
//! day); the table collapses them so templates can be compared and
//! labeled by field rather than by surface token. Tokens outside the
//! table pass through unchanged; the table is consulted only for tokens
//! it recognizes.

use crate::template::extract_components;
use crate::types::Field;

/// Map a bare LDML token (no braces) to its canonical field.
///
/// Careful: upper-case `M` is months, lower-case `m` is minutes.
pub fn canonical_field(token: &str) -> Option<Field> {
    let mut chars = token.chars();
    let first = chars.next()?;
    if token.len() > 5 || !token.chars().all(|c| c == first) {
        return None;
    }
    let field = match first {
        'd' if token.len() <= 4 => Field::Day,
        'M' | 'L' => Field::Month,
        'y' | 'Y' if token.len() <= 4 => Field::Year,
        'h' | 'H' if token.len() <= 4 => Field::Hour,
        'm' if token.len() <= 4 => Field::Minute,
        's' if token.len() <= 4 => Field::Second,
        'S' if token.len() <= 4 => Field::Second,
        'w' if token.len() == 1 => Field::Week,
        'q' | 'Q' if token.len() <= 4 => Field::Quarter,
        'z' if token.len() <= 4 => Field::Timezone,
        'a' if token.len() == 1 => Field::Period,
        'e' if token.len() <= 2 => Field::Weekday,
        'E' if token.len() <= 4 => Field::Weekday,
        _ => return None,
    };
    Some(field)
}

/// Rewrite every recognized `{token}` in a template to its canonical
/// `{field}` form, e.g. `{dd}-{MMM}-{yyyy}` -> `{day}-{month}-{year}`.
/// Unrecognized components (custom tokens, structural placeholders) are
/// left as they are.
pub fn canonicalize_template(template: &str) -> String {
    let mut out = template.to_string();
    for component in extract_components(template) {
        let inner = &component[1..component.len() - 1];
        if let Some(field) = canonical_field(inner) {
            out = out.replace(&component, &format!("{{{}}}", field.name()));
        }
    }
    out
}
