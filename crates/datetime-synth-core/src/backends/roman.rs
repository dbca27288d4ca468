//! Roman numeral rendering for months (1-12) and years.

/// Largest value expressible with the additive MMMM convention.
pub const ROMAN_MAX: u32 = 4999;

const DIGITS: &[(u32, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Render `n` as an upper-case Roman numeral. Values outside
/// `1..=ROMAN_MAX` have no representation and return `None`.
pub fn to_roman(n: u32) -> Option<String> {
    if n == 0 || n > ROMAN_MAX {
        return None;
    }
    let mut remaining = n;
    let mut out = String::new();
    for &(value, digit) in DIGITS {
        while remaining >= value {
            out.push_str(digit);
            remaining -= value;
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_render_as_expected() {
        let expected = [
            "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
        ];
        for (month, want) in (1..=12).zip(expected) {
            assert_eq!(to_roman(month).as_deref(), Some(want));
        }
    }

    #[test]
    fn years_render_as_expected() {
        assert_eq!(to_roman(1970).as_deref(), Some("MCMLXX"));
        assert_eq!(to_roman(2023).as_deref(), Some("MMXXIII"));
        assert_eq!(to_roman(3999).as_deref(), Some("MMMCMXCIX"));
        assert_eq!(to_roman(4999).as_deref(), Some("MMMMCMXCIX"));
    }

    #[test]
    fn out_of_range_has_no_representation() {
        assert_eq!(to_roman(0), None);
        assert_eq!(to_roman(5000), None);
    }
}
