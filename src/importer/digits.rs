//! Integer parsing that tolerates full-width (zenkaku) input.
//!
//! Japanese input methods commonly produce `１２３` instead of `123`, and the
//! upload format carries no per-field locale hint, so the importer tries the
//! text as-is first and only narrows it when that fails.

use std::str::FromStr;

/// Maps full-width and ideographic forms to their half-width equivalents.
/// Characters without a narrow counterpart pass through unchanged.
pub fn narrow(input: &str) -> String {
    input.chars().map(narrow_char).collect()
}

fn narrow_char(c: char) -> char {
    match c {
        // Full-width ASCII block: ！ (U+FF01) through ～ (U+FF5E)
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        '\u{FF5F}' => '\u{2985}', // ⦅
        '\u{FF60}' => '\u{2986}', // ⦆
        '\u{3000}' => ' ',
        '\u{FFE0}' => '\u{00A2}', // ¢
        '\u{FFE1}' => '\u{00A3}', // £
        '\u{FFE2}' => '\u{00AC}', // ¬
        '\u{FFE3}' => '\u{00AF}', // ¯
        '\u{FFE4}' => '\u{00A6}', // ¦
        '\u{FFE5}' => '\u{00A5}', // ¥
        '\u{FFE6}' => '\u{20A9}', // ₩
        // Half-width forms block: box drawing, arrows and shapes
        '\u{FFE8}' => '\u{2502}', // │
        '\u{FFE9}' => '\u{2190}', // ←
        '\u{FFEA}' => '\u{2191}', // ↑
        '\u{FFEB}' => '\u{2192}', // →
        '\u{FFEC}' => '\u{2193}', // ↓
        '\u{FFED}' => '\u{25A0}', // ■
        '\u{FFEE}' => '\u{25CB}', // ○
        _ => c,
    }
}

/// Parses `input` directly, then once more after narrowing it.
///
/// The error from the second attempt is returned when both fail.
pub fn parse_with_fallback<T: FromStr>(input: &str) -> Result<T, T::Err> {
    match input.parse::<T>() {
        Ok(value) => Ok(value),
        Err(_) => narrow(input).parse::<T>(),
    }
}
