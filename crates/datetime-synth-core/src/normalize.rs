//! Text normalization: flatten rendered strings into a canonical,
//! low-dimensionality form before they are paired with labels.
//!
//! The pipeline is fixed: Unicode-decompose and drop everything outside
//! ASCII, collapse repeated punctuation runs, canonicalize exotic
//! whitespace to a plain space, then optional lowercasing and trimming.
//! The whole composition is idempotent.

use unicode_normalization::UnicodeNormalization;

/// Punctuation whose repeated runs collapse to a single character.
/// Locale data occasionally doubles separators ("1..2..1990"); the
/// trainer should only ever see one.
const COLLAPSIBLE: &[char] = &['.', '-', '/', ',', ':', ';', '|', '#', '?', '!'];

/// Whitespace variants that locale data likes to emit. All become a
/// plain ASCII space. U+202F in particular shows up between time and
/// AM/PM markers in recent CLDR data.
const WHITESPACE_VARIANTS: &[char] = &[
    '\u{00A0}', // no-break space
    '\u{202F}', // narrow no-break space
    '\u{2009}', // thin space
    '\u{2007}', // figure space
    '\u{2002}', // en space
    '\u{2003}', // em space
    '\t',
];

/// Full normalization with default options (trim and lowercase).
pub fn normalize(s: &str) -> String {
    normalize_opts(s, true, true)
}

/// Full normalization.
///
/// `strip=false` exists for callers whose whole string is a single
/// significant delimiter character: a lone `' '` must survive
/// normalization rather than collapse to the empty string.
pub fn normalize_opts(s: &str, strip: bool, to_lower: bool) -> String {
    let flat = ascii_fold(s);
    let collapsed = collapse_token_runs(&flat);
    let spaced = canonicalize_whitespace(&collapsed);

    let cased = if to_lower {
        spaced.to_lowercase()
    } else {
        spaced
    };

    if strip {
        cased.trim().to_string()
    } else {
        cased
    }
}

/// NFKD-decompose and keep only ASCII.
///
/// The multiplication sign is rewritten by hand first: NFKD does not
/// decompose it, and scientific-notation output from number formatters
/// would otherwise lose its operator entirely.
fn ascii_fold(s: &str) -> String {
    let s = if s.contains('\u{00D7}') {
        s.replace('\u{00D7}', "x")
    } else {
        s.to_string()
    };
    s.nfkd().filter(char::is_ascii).collect()
}

/// Collapse runs of the same collapsible punctuation character to one.
fn collapse_token_runs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if prev == Some(c) && COLLAPSIBLE.contains(&c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Map whitespace variants to a plain space and collapse space runs.
fn canonicalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for c in s.chars() {
        let c = if WHITESPACE_VARIANTS.contains(&c) { ' ' } else { c };
        if c == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        out.push(c);
    }
    out
}
