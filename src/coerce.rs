//! Best-effort coercion of raw input lines into field values.
//!
//! Numeric fields never reject input: the longest numeric prefix after
//! leading whitespace is used, and a line without one coerces to zero.
//! Text fields are truncated to their maximum length in characters.

/// Whitespace skipped before a number: space, `\t`, `\n`, `\v`, `\f`, `\r`.
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{b}' | '\u{c}' | '\r')
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parse the leading integer of `input`, or 0 when there is none.
///
/// Values outside the `i32` range saturate.
///
/// ```
/// use stepform::coerce::leading_int;
///
/// assert_eq!(leading_int("  42 apples"), 42);
/// assert_eq!(leading_int("-7"), -7);
/// assert_eq!(leading_int("abc"), 0);
/// ```
pub fn leading_int(input: &str) -> i32 {
    let s = input.trim_start_matches(is_blank);
    let bytes = s.as_bytes();

    let (negative, start) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    let mut value: i64 = 0;
    for b in bytes[start..].iter().take_while(|b| b.is_ascii_digit()) {
        value = value * 10 + i64::from(b - b'0');
        // Past this point the result saturates either way.
        if value > i64::from(i32::MAX) + 1 {
            break;
        }
    }

    let signed = if negative { -value } else { value };
    signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Parse the leading decimal number of `input`, or 0.0 when there is none.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent that is only consumed when digits follow it.
///
/// ```
/// use stepform::coerce::leading_float;
///
/// assert_eq!(leading_float("2.50"), 2.5);
/// assert_eq!(leading_float(" .5kg"), 0.5);
/// assert_eq!(leading_float("1e2x"), 100.0);
/// assert_eq!(leading_float("price"), 0.0);
/// ```
pub fn leading_float(input: &str) -> f32 {
    let s = input.trim_start_matches(is_blank);
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }

    if int_digits + frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

/// Copy at most `max_chars` characters of `input`.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    input.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_skips_leading_whitespace_and_stops_at_garbage() {
        assert_eq!(leading_int("\t 10"), 10);
        assert_eq!(leading_int("10abc"), 10);
        assert_eq!(leading_int("3.9"), 3);
        assert_eq!(leading_int("+5"), 5);
    }

    #[test]
    fn int_without_digits_is_zero() {
        assert_eq!(leading_int(""), 0);
        assert_eq!(leading_int("-"), 0);
        assert_eq!(leading_int("x1"), 0);
        assert_eq!(leading_int("- 1"), 0);
    }

    #[test]
    fn int_saturates_out_of_range() {
        assert_eq!(leading_int("99999999999999999999"), i32::MAX);
        assert_eq!(leading_int("-99999999999999999999"), i32::MIN);
        assert_eq!(leading_int("-2147483648"), i32::MIN);
    }

    #[test]
    fn float_reads_decimal_prefix() {
        assert_eq!(leading_float("2.50"), 2.5);
        assert_eq!(leading_float("-1.25 dollars"), -1.25);
        assert_eq!(leading_float("7."), 7.0);
        assert_eq!(leading_float("3"), 3.0);
    }

    #[test]
    fn float_exponent_needs_digits() {
        assert_eq!(leading_float("2e"), 2.0);
        assert_eq!(leading_float("2e+"), 2.0);
        assert_eq!(leading_float("2.5E-1"), 0.25);
    }

    #[test]
    fn float_without_digits_is_zero() {
        assert_eq!(leading_float(""), 0.0);
        assert_eq!(leading_float("."), 0.0);
        assert_eq!(leading_float("+.e5"), 0.0);
        assert_eq!(leading_float("n/a"), 0.0);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("Widget", 3), "Wid");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ok", 49), "ok");
    }
}
