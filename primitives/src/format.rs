//! Fixed-point rendering used in user-facing messages.

/// Extra digits inspected to tell an exact halfway value from a near one.
const TIE_PROBE_DIGITS: usize = 64;

/// Renders `value` with `digits` fraction digits, rounding exact halfway values away
/// from zero. `{:.N}` alone rounds those ties to even (`0.125` → `0.12`), while the
/// messages shown to users have always read `0.13`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let expanded = format!("{:.*}", digits + TIE_PROBE_DIGITS, value);
    let (kept, rest) = expanded.split_at(expanded.len() - TIE_PROBE_DIGITS);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{:.*}", digits, value);
    }

    increment_last_digit(kept.trim_end_matches('.'))
}

fn increment_last_digit(number: &str) -> String {
    let mut chars: Vec<char> = number.chars().collect();
    for i in (0..chars.len()).rev() {
        match chars[i] {
            '9' => chars[i] = '0',
            c @ '0'..='8' => {
                chars[i] = char::from(c as u8 + 1);
                return chars.into_iter().collect();
            }
            _ => {}
        }
    }

    // Carry out of the leading digit.
    let at = usize::from(chars.first() == Some(&'-'));
    chars.insert(at, '1');
    chars.into_iter().collect()
}
